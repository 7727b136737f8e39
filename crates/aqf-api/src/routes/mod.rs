//! # Route Modules
//!
//! Each module defines an Axum Router for one API surface area.
//! Routers are assembled in `lib.rs` into the application.

pub mod admin;
pub mod dispatch;
pub mod quotes;
pub mod requests;
