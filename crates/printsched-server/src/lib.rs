//! # printsched-server
//!
//! HTTP run entrypoint: `POST /runs` and `POST /runs/cron` (spec §6). Built
//! on `axum`/`tower-http`, the one component in this workspace grounded
//! outside the teacher repo, since the teacher has no network surface.

mod error;
mod routes;
mod state;
mod types;

pub use error::ApiError;
pub use state::AppState;
pub use types::{CronTrigger, RunRequest, RunResponse};

use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/runs", post(routes::run_handler))
        .route("/runs/cron", post(routes::cron_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
