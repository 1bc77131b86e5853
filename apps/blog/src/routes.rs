use crate::controllers::{page_controller, post_controller};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;

/// The blog's routes with state applied. HTTP layers (tracing, timeout,
/// body limit) are added by the caller.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(post_controller::index))
        .route("/post/", get(post_controller::show))
        .route(
            "/add/",
            get(post_controller::create).post(post_controller::store),
        )
        .route(
            "/edit/:post_id",
            get(post_controller::edit)
                .post(post_controller::update)
                .patch(post_controller::update),
        )
        .route(
            "/delete/:post_id",
            get(post_controller::destroy)
                .post(post_controller::destroy)
                .delete(post_controller::destroy),
        )
        .route("/about", get(page_controller::about))
        .route("/contact", get(page_controller::contact))
        .fallback(page_controller::not_found)
        .with_state(state)
}
