pub mod health;
pub mod recycler;
pub mod transporter;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /recycler/register          register (public)
/// /recycler/login             login (public)
/// /recycler/logout            logout
/// /recycler/me                profile of the session recycler
/// /recycler/profile           partial profile update (PUT)
/// /recycler/wallet            wallet balance
/// /recycler/collections       claim history
/// /recycler/scan              claim collections from a scanned transporter (POST)
///
/// /transporter/register       register (public)
/// /transporter/login          login (public)
/// /transporter/logout         logout
/// /transporter/me             profile of the session transporter
/// /transporter/qr             QR payload recyclers scan
/// /transporter/collections    record pickup (POST), list recorded pickups (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/recycler", recycler::router())
        .nest("/transporter", transporter::router())
}
