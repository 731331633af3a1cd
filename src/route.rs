use std::sync::Arc;

use axum::{response::Redirect, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{handler::*, AppState};

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let app = Router::new()
        .route("/", get(index).post(create_task))
        .route("/delete/:id", get(delete_task))
        .route("/update/:id", get(edit_task).post(update_task))
        .route("/user/", get(index).post(replace_user))
        .route("/user", get(|| async { Redirect::permanent("/user/") }))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());
    app
}
