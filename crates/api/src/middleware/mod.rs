//! Authentication middleware extractors.
//!
//! - [`auth::AuthRecycler`] -- Extracts the authenticated recycler.
//! - [`auth::AuthTransporter`] -- Extracts the authenticated transporter.

pub mod auth;
