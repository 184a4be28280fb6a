//! IPC Module for the Food Diary
//!
//! Models the call surface: every boundary operation as a serde request, a
//! typed response, and a handler that dispatches on behalf of a caller.

pub mod handler;
pub mod payloads;

pub use handler::DiaryCallHandler;
pub use payloads::*;
