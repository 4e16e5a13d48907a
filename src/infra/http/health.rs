use axum::{extract::State, response::Response};

use super::{HttpState, db_health_response};

pub(super) async fn db_health(State(state): State<HttpState>) -> Response {
    db_health_response(state.health.health_check().await)
}
