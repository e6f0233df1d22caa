use std::f64::consts::PI;
use std::fmt::Write;

use html_escape::encode_text;
use platewise_core::domain::report::ChartData;

const PIE_COLORS: [&str; 3] = [
    "rgba(75, 192, 192, 0.8)",
    "rgba(255, 205, 86, 0.8)",
    "rgba(255, 99, 132, 0.8)",
];

const BAR_COLORS: [&str; 4] = [
    "rgba(54, 162, 235, 0.8)",
    "rgba(75, 192, 192, 0.8)",
    "rgba(255, 205, 86, 0.8)",
    "rgba(255, 99, 132, 0.8)",
];

const RADIUS: f64 = 90.0;
const CENTER: f64 = 110.0;

fn point(angle: f64) -> (f64, f64) {
    // 0 rad points up, clockwise
    (
        CENTER + RADIUS * angle.sin(),
        CENTER - RADIUS * angle.cos(),
    )
}

fn legend(chart: &ChartData, colors: &[&str], y: f64) -> String {
    let mut out = String::new();
    for (i, label) in chart.labels.iter().enumerate() {
        let x = 10.0 + i as f64 * 90.0;
        let _ = write!(
            out,
            r#"<circle cx="{:.1}" cy="{:.1}" r="5" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="11">{}</text>"#,
            x,
            y,
            colors[i % colors.len()],
            x + 9.0,
            y + 4.0,
            encode_text(label)
        );
    }
    out
}

/// Proportions of the values as a pie. Non-positive values get no slice.
pub fn render_pie_chart(chart: &ChartData) -> String {
    let total: f64 = chart.values.iter().filter(|v| **v > 0.0).sum();
    let mut slices = String::new();

    if total <= 0.0 {
        let _ = write!(
            slices,
            r##"<circle cx="{CENTER}" cy="{CENTER}" r="{RADIUS}" fill="#e5e7eb"/><text x="{CENTER}" y="{CENTER}" text-anchor="middle" font-size="12">No data</text>"##
        );
    } else {
        let mut start = 0.0;
        for (i, value) in chart.values.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let color = PIE_COLORS[i % PIE_COLORS.len()];
            let sweep = value / total * 2.0 * PI;
            if sweep >= 2.0 * PI - 1e-9 {
                let _ = write!(
                    slices,
                    r#"<circle cx="{CENTER}" cy="{CENTER}" r="{RADIUS}" fill="{color}"/>"#
                );
                break;
            }
            let (x1, y1) = point(start);
            let (x2, y2) = point(start + sweep);
            let large_arc = if sweep > PI { 1 } else { 0 };
            let _ = write!(
                slices,
                r##"<path d="M{CENTER},{CENTER} L{x1:.2},{y1:.2} A{RADIUS},{RADIUS} 0 {large_arc} 1 {x2:.2},{y2:.2} Z" fill="{color}" stroke="#fff"/>"##
            );
            start += sweep;
        }
    }

    format!(
        r#"<figure class="chart"><figcaption>{}</figcaption><svg id="nutritionChart" viewBox="0 0 300 250" width="300" height="250" role="img">{}{}</svg></figure>"#,
        encode_text(&chart.title),
        slices,
        legend(chart, &PIE_COLORS, 238.0)
    )
}

/// Absolute magnitudes as vertical bars scaled to the largest value.
pub fn render_bar_chart(chart: &ChartData) -> String {
    let max = chart.max();
    let plot_height = 180.0;
    let baseline = 200.0;
    let mut bars = String::new();

    for (i, (label, value)) in chart.labels.iter().zip(&chart.values).enumerate() {
        let height = if max > 0.0 {
            value.max(0.0) / max * plot_height
        } else {
            0.0
        };
        let x = 20.0 + i as f64 * 70.0;
        let _ = write!(
            bars,
            r#"<rect x="{x:.1}" y="{:.2}" width="50" height="{height:.2}" fill="{}"/><text x="{:.1}" y="{:.2}" text-anchor="middle" font-size="11">{}</text><text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
            baseline - height,
            BAR_COLORS[i % BAR_COLORS.len()],
            x + 25.0,
            baseline - height - 4.0,
            value,
            x + 25.0,
            baseline + 16.0,
            encode_text(label)
        );
    }

    format!(
        r##"<figure class="chart"><figcaption>{}</figcaption><svg id="valuesChart" viewBox="0 0 310 230" width="310" height="230" role="img"><line x1="10" y1="{baseline}" x2="300" y2="{baseline}" stroke="#9ca3af"/>{}</svg></figure>"##,
        encode_text(&chart.title),
        bars
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(values: Vec<f64>) -> ChartData {
        ChartData {
            title: "Macronutrient Distribution".to_string(),
            labels: vec!["Protein".into(), "Carbs".into(), "Fat".into()],
            values,
        }
    }

    #[test]
    fn test_pie_draws_one_slice_per_positive_value() {
        let svg = render_pie_chart(&chart(vec![10.0, 20.0, 0.0]));
        assert_eq!(svg.matches("<path").count(), 2);
    }

    #[test]
    fn test_pie_without_data_shows_placeholder() {
        let svg = render_pie_chart(&chart(vec![0.0, 0.0, 0.0]));
        assert!(svg.contains("No data"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn test_single_value_is_full_circle() {
        let svg = render_pie_chart(&chart(vec![0.0, 5.0, 0.0]));
        assert!(!svg.contains("<path"));
        assert!(svg.contains(PIE_COLORS[1]));
    }

    #[test]
    fn test_tallest_bar_fills_plot() {
        let svg = render_bar_chart(&chart(vec![95.0, 25.0, 0.0]));
        assert!(svg.contains(r#"height="180.00""#));
        assert!(svg.contains(r#"height="0.00""#));
    }
}
