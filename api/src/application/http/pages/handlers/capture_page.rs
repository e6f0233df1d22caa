use axum::{extract::State, response::Html};
use platewise_core::domain::food_analysis::entities::HealthProfile;

use crate::application::http::{
    pages::views::render_capture_page, server::app_state::AppState,
};

pub async fn capture_page(State(state): State<AppState>) -> Html<String> {
    Html(render_capture_page(
        &state.args.server.root_path,
        None,
        &HealthProfile::default(),
    ))
}
