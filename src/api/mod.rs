pub mod response;
pub mod routes;
pub mod state;

pub use response::{ApiResponse, ApiResult, PageResponse};
pub use routes::app;
pub use state::AppState;
