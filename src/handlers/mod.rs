// handlers/mod.rs - HTTP boundary
//
// Handlers translate requests into service calls and typed errors into
// status codes. They hold no state beyond the shared AppState.

pub mod courses;
pub mod health;

pub use health::health;
