use html_escape::encode_double_quoted_attribute;
use platewise_core::domain::{
    food_analysis::entities::HealthProfile,
    pipeline::{CELLS_PER_GROUP, CellState, PipelineSnapshot, PipelineSequencer},
};

use super::{
    Notification,
    layout::{render_notifications, render_page},
};

fn cell_class(state: CellState) -> &'static str {
    match state {
        CellState::Idle => "cell",
        CellState::Active => "cell active",
        CellState::Completed => "cell completed",
    }
}

/// Both 3x3 grids in their initial state; the stream script updates them.
fn render_pipeline(snapshot: &PipelineSnapshot, stream_url: &str) -> String {
    let mut html = format!(
        r#"<div id="pipeline" class="pipeline hidden" data-stream="{}">"#,
        encode_double_quoted_attribute(stream_url)
    );
    for (group_index, group) in snapshot.groups.iter().enumerate() {
        html.push_str(r#"<div class="pipeline-group">"#);
        for cell in 0..CELLS_PER_GROUP {
            html.push_str(&format!(
                r#"<div id="g{}-c{}" class="{}"></div>"#,
                group_index + 1,
                cell + 1,
                cell_class(group.cells[cell])
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

const PIPELINE_SCRIPT: &str = r#"
<script>
document.getElementById('capture-form').addEventListener('submit', function () {
  var pipeline = document.getElementById('pipeline');
  pipeline.classList.remove('hidden');
  var source = new EventSource(pipeline.dataset.stream);
  source.addEventListener('tick', function (event) {
    var snapshot = JSON.parse(event.data);
    snapshot.groups.forEach(function (group, g) {
      group.cells.forEach(function (state, c) {
        var cell = document.getElementById('g' + (g + 1) + '-c' + (c + 1));
        cell.className = state === 'idle' ? 'cell' : 'cell ' + state;
      });
    });
  });
  source.addEventListener('complete', function () { source.close(); });
});
</script>
"#;

pub fn render_capture_page(
    root_path: &str,
    notification: Option<&Notification>,
    profile: &HealthProfile,
) -> String {
    let pipeline = render_pipeline(
        &PipelineSequencer::new().snapshot(),
        &format!("{}/api/pipeline/stream", root_path),
    );

    let body = format!(
        r#"<div id="notification-container">{notifications}</div>
<section class="card">
<h1>Analyze your food</h1>
<p>Upload a photo of your meal and get a nutritional breakdown tailored to your health profile.</p>
<form id="capture-form" method="post" action="{analyze}" enctype="multipart/form-data">
<label for="image">Food photo</label>
<input id="image" name="image" type="file" accept="image/*">
<label for="disease">Health conditions (optional)</label>
<input id="disease" name="disease" type="text" value="{disease}" placeholder="e.g. diabetes, hypertension">
<label for="allergies">Food allergies (optional)</label>
<input id="allergies" name="allergies" type="text" value="{allergies}" placeholder="e.g. peanuts, shellfish">
<p>
<button type="submit">Analyze</button>
<button type="submit" class="secondary" formaction="{demo}">Demo</button>
</p>
</form>
{pipeline}
</section>
{script}"#,
        notifications = render_notifications(notification),
        analyze = encode_double_quoted_attribute(&format!("{}/analyze", root_path)),
        demo = encode_double_quoted_attribute(&format!("{}/demo", root_path)),
        disease = encode_double_quoted_attribute(&profile.diseases),
        allergies = encode_double_quoted_attribute(&profile.allergies),
        pipeline = pipeline,
        script = PIPELINE_SCRIPT,
    );

    render_page(root_path, "Analyze", &body)
}
