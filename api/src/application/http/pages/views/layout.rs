use html_escape::encode_text;

use super::Notification;

const STYLES: &str = r#"
body { font-family: Helvetica, Arial, sans-serif; margin: 0; background: #f5f7ff; color: #1f2937; }
header { background: #3648e4; color: #fff; padding: 1rem 2rem; }
header a { color: #fff; text-decoration: none; font-weight: bold; }
main { max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.card { background: #fff; border-radius: 12px; padding: 1.5rem; margin-bottom: 1.5rem; box-shadow: 0 1px 4px rgba(0,0,0,.08); }
.hidden { display: none; }
.notification { display: flex; justify-content: space-between; padding: .75rem 1rem; border-radius: 8px; margin-bottom: 1rem; }
.notification-error { background: #fde8e8; color: #9b1c1c; }
.notification-success { background: #def7ec; color: #03543f; }
.notification-close { background: none; border: none; cursor: pointer; font-size: 1rem; }
.metrics { display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 1rem; }
.metric-card { background: #eef2ff; border-radius: 8px; padding: 1rem; text-align: center; }
.metric-card .value { font-size: 1.4rem; font-weight: bold; }
.health-compatibility-safe { border-left: 4px solid #0e9f6e; padding-left: 1rem; }
.health-compatibility-risk { border-left: 4px solid #e02424; padding-left: 1rem; }
.chip { display: inline-block; background: #e1effe; color: #1e429f; padding: .4rem .9rem; border-radius: 999px; margin: .2rem; }
.benefit-item { border: 1px solid #bcf0da; border-radius: 8px; padding: .75rem; margin-bottom: .5rem; color: #03543f; }
.risk-item { border: 1px solid #fbd5d5; border-radius: 8px; padding: .75rem; margin-bottom: .5rem; color: #9b1c1c; }
.pipeline { display: flex; gap: 2rem; justify-content: center; margin: 1.5rem 0; }
.pipeline-group { display: grid; grid-template-columns: repeat(3, 18px); gap: 4px; }
.cell { width: 18px; height: 18px; border-radius: 4px; background: #e5e7eb; }
.cell.active { background: #93c5fd; }
.cell.completed { background: #3648e4; }
.charts { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 1rem; }
button, .button { background: #3648e4; color: #fff; border: none; border-radius: 8px; padding: .7rem 1.4rem; cursor: pointer; text-decoration: none; display: inline-block; }
button.secondary { background: #6b7280; }
label { display: block; margin: 1rem 0 .3rem; font-weight: bold; }
input[type=text] { width: 100%; padding: .6rem; border: 1px solid #d1d5db; border-radius: 8px; box-sizing: border-box; }
"#;

pub fn render_notifications(notification: Option<&Notification>) -> String {
    let Some(notification) = notification else {
        return String::new();
    };
    format!(
        r#"<div class="notification {}" role="alert"><span class="notification-message">{}</span><button type="button" class="notification-close" onclick="this.parentElement.remove()">&times;</button></div>"#,
        notification.kind.class(),
        encode_text(&notification.message)
    )
}

/// Wraps `body` in the shared page shell. `title` is escaped here.
pub fn render_page(root_path: &str, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Platewise</title>
<style>{STYLES}</style>
</head>
<body>
<header><a href="{home}">Platewise</a></header>
<main>
{body}
</main>
</body>
</html>"#,
        title = encode_text(title),
        home = html_escape::encode_double_quoted_attribute(&format!("{}/", root_path)),
        body = body,
    )
}
