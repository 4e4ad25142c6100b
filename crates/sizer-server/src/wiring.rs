use axum::{http::header, response::IntoResponse, routing::get, Router};

pub fn build_app() -> Router {
    debug_assert!(api::module_ready());
    debug_assert!(ui::module_ready());

    api::app()
        .route("/", get(index))
        .route("/static/styles.css", get(styles))
        .route("/static/app.js", get(app_js))
        .route("/health", get(healthcheck))
}

async fn healthcheck() -> &'static str {
    "ok"
}

async fn index() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        ui::index_html(),
    )
}

async fn styles() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        ui::styles_css(),
    )
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ui::app_js(),
    )
}
