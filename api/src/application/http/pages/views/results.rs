use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};
use platewise_core::domain::{
    food_analysis::entities::FoodImage,
    report::{CompatibilityStyle, ResultsView},
};

use super::{
    charts::{render_bar_chart, render_pie_chart},
    layout::render_page,
};

fn metric(id: &str, label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric-card"><div class="label">{}</div><div id="{}" class="value">{}</div></div>"#,
        encode_text(label),
        id,
        encode_text(value)
    )
}

fn items(values: &[String], class: &str) -> String {
    values.iter().fold(String::new(), |mut out, value| {
        let _ = write!(
            out,
            r#"<div class="{}"><p>{}</p></div>"#,
            class,
            encode_text(value)
        );
        out
    })
}

fn render_profile(view: &ResultsView) -> String {
    let Some(profile) = &view.health_profile else {
        return String::new();
    };
    format!(
        r#"<section id="user-health-info" class="card"><h2>Your Health Profile</h2>
<p><strong>Health Conditions:</strong> <span id="diseases-value">{}</span></p>
<p><strong>Food Allergies:</strong> <span id="allergies-value">{}</span></p></section>"#,
        encode_text(&profile.diseases),
        encode_text(&profile.allergies)
    )
}

fn render_compatibility(view: &ResultsView) -> String {
    let Some(compatibility) = &view.health_compatibility else {
        return String::new();
    };
    let class = match compatibility.style {
        CompatibilityStyle::Safe => "health-compatibility-safe",
        CompatibilityStyle::Risk => "health-compatibility-risk",
    };
    format!(
        r#"<section id="health-compatibility" class="card"><h2>Health Compatibility</h2>
<div id="health-compatibility-content" class="{}"><p id="health-value">{}</p></div></section>"#,
        class,
        encode_text(&compatibility.text)
    )
}

fn render_insights(view: &ResultsView) -> String {
    if !view.has_health_insights() {
        return String::new();
    }
    format!(
        r#"<section id="health-insights-section" class="card"><h2>Health Insights</h2>
<h3>Benefits</h3><div id="health-benefits-container">{}</div>
<h3>Risks</h3><div id="health-risks-container">{}</div></section>"#,
        items(&view.health_benefits, "benefit-item"),
        items(&view.health_risks, "risk-item")
    )
}

/// Only data URLs that parse as an image are embedded.
fn render_image(image_data_url: Option<&str>) -> String {
    image_data_url
        .and_then(|url| FoodImage::from_data_url(url).ok())
        .map(|image| {
            format!(
                r#"<img id="food-image" src="{}" alt="Analyzed food" style="max-width:100%;border-radius:12px">"#,
                encode_double_quoted_attribute(&image.to_data_url())
            )
        })
        .unwrap_or_default()
}

pub fn render_results_page(
    root_path: &str,
    view: &ResultsView,
    image_data_url: Option<&str>,
) -> String {
    let key_nutrients = view.key_nutrients.iter().fold(String::new(), |mut out, n| {
        let _ = write!(out, r#"<span class="chip">{}</span>"#, encode_text(n));
        out
    });

    let body = format!(
        r#"<section class="card">
<h1>{title}</h1>
{image}
<p id="summary-text">{summary}</p>
<a id="export-pdf" class="button" href="{pdf}">Export PDF</a>
<a class="button" href="{home}">Analyze another</a>
</section>
{profile}
{compatibility}
<section class="card"><h2>Nutritional Information</h2>
<div class="metrics">{calories}{protein}{carbs}{fat}{fiber}{sugar}{sodium}</div>
</section>
<section class="card"><h2>Key Nutrients</h2><div id="key-nutrients-container">{key_nutrients}</div></section>
<section class="card charts">{pie}{bar}</section>
{insights}"#,
        title = encode_text(view.food_item.as_deref().unwrap_or("Analysis Results")),
        image = render_image(image_data_url),
        summary = encode_text(&view.summary_text),
        pdf = encode_double_quoted_attribute(&format!("{}/results/report.pdf", root_path)),
        home = encode_double_quoted_attribute(&format!("{}/", root_path)),
        profile = render_profile(view),
        compatibility = render_compatibility(view),
        calories = metric("calories-value", "Calories", &view.calories_value),
        protein = metric("protein-value", "Protein", &view.protein_value),
        carbs = metric("carbs-value", "Carbs", &view.carbs_value),
        fat = metric("fat-value", "Fat", &view.fat_value),
        fiber = metric("fiber-value", "Fiber", &view.fiber_value),
        sugar = metric("sugar-value", "Sugar", &view.sugar_value),
        sodium = metric("sodium-value", "Sodium", &view.sodium_value),
        key_nutrients = key_nutrients,
        pie = render_pie_chart(&view.nutrition_chart),
        bar = render_bar_chart(&view.values_chart),
        insights = render_insights(view),
    );

    render_page(root_path, "Results", &body)
}

#[cfg(test)]
mod tests {
    use platewise_core::domain::food_analysis::entities::AnalysisResult;

    use super::*;

    fn view(record: &AnalysisResult) -> ResultsView {
        ResultsView::from_record(record)
    }

    #[test]
    fn test_list_items_are_escaped() {
        let record = AnalysisResult {
            food_item: Some("Apple".to_string()),
            health_benefits: Some(vec!["<script>alert(1)</script>".to_string()]),
            key_nutrients: Some(vec!["<img src=x onerror=alert(1)>".to_string()]),
            ..Default::default()
        };

        let html = render_results_page("", &view(&record), None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn test_risk_styling_and_missing_values() {
        let record = AnalysisResult {
            food_item: Some("Fries".to_string()),
            health_compatibility: Some("Caution: high sodium".to_string()),
            ..Default::default()
        };

        let html = render_results_page("", &view(&record), None);

        assert!(html.contains("health-compatibility-risk"));
        assert!(html.contains(r#"<div id="sodium-value" class="value">-</div>"#));
        assert!(!html.contains("user-health-info"));
        assert!(!html.contains("health-insights-section"));
    }

    #[test]
    fn test_only_image_data_urls_are_embedded() {
        let record = AnalysisResult {
            food_item: Some("Apple".to_string()),
            ..Default::default()
        };

        let html = render_results_page("", &view(&record), Some("javascript:alert(1)"));
        assert!(!html.contains("food-image"));

        let html = render_results_page("", &view(&record), Some("data:image/png;base64,AAAA"));
        assert!(html.contains(r#"src="data:image/png;base64,AAAA""#));
    }
}
