use std::sync::Arc;
use std::time::Duration;

use crate::database::{CourseRepository, Deadline};
use crate::services::CourseService;

/// Shared, read-only handler state. Holds no per-request data.
#[derive(Clone)]
pub struct AppState {
    pub courses: CourseService,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(repository: Arc<dyn CourseRepository>, request_timeout: Duration) -> Self {
        Self {
            courses: CourseService::new(repository),
            request_timeout,
        }
    }

    /// Fresh deadline for one request's downstream work.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.request_timeout)
    }
}
