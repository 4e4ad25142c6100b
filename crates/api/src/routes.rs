use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::state::{AppState, InputError, InputsRequest};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/sessions/:session_key/inputs",
            get(read_inputs).put(update_inputs),
        )
        .route("/sessions/:session_key/sizing", get(read_sizing))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct InputErrorResponse {
    error: String,
}

impl IntoResponse for InputError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(InputErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

async fn read_inputs(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
) -> impl IntoResponse {
    Json(state.inputs(&session_key).await)
}

async fn update_inputs(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
    Json(request): Json<InputsRequest>,
) -> Result<impl IntoResponse, InputError> {
    let evaluation = state.apply_update(&session_key, request).await?;

    Ok(Json(evaluation))
}

async fn read_sizing(
    State(state): State<AppState>,
    Path(session_key): Path<String>,
) -> impl IntoResponse {
    Json(state.evaluate(&session_key).await)
}
