//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own validation and persistence so route handlers can stay
//! focused on request/response translation.

pub mod contact;
pub mod status;

/// Stable machine-readable code for an error, sent to clients as `error`.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}
