//! Route definitions for the `/recycler` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::recycler;
use crate::state::AppState;

/// Routes mounted at `/recycler`.
///
/// ```text
/// POST /register       -> register (public)
/// POST /login          -> login (public)
/// POST /logout         -> logout
/// GET  /me             -> me
/// PUT  /profile        -> update_profile
/// GET  /wallet         -> wallet
/// GET  /collections    -> collections (claim history)
/// POST /scan           -> scan (claim from a scanned transporter)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(recycler::register))
        .route("/login", post(recycler::login))
        .route("/logout", post(recycler::logout))
        .route("/me", get(recycler::me))
        .route("/profile", put(recycler::update_profile))
        .route("/wallet", get(recycler::wallet))
        .route("/collections", get(recycler::collections))
        .route("/scan", post(recycler::scan))
}
