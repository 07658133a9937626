//! Route definitions for the `/transporter` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::transporter;
use crate::state::AppState;

/// Routes mounted at `/transporter`.
///
/// ```text
/// POST /register       -> register (public)
/// POST /login          -> login (public)
/// POST /logout         -> logout
/// GET  /me             -> me
/// GET  /qr             -> qr (payload recyclers scan)
/// POST /collections    -> record_collection
/// GET  /collections    -> collections
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(transporter::register))
        .route("/login", post(transporter::login))
        .route("/logout", post(transporter::logout))
        .route("/me", get(transporter::me))
        .route("/qr", get(transporter::qr))
        .route(
            "/collections",
            post(transporter::record_collection).get(transporter::collections),
        )
}
