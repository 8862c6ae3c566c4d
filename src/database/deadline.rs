use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::database::repository::RepositoryError;

/// Absolute deadline for one request's store work. Created once per request
/// and handed to every repository call made on its behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(budget: Duration) -> Self {
        Self { at: Instant::now() + budget }
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Run a store operation, abandoning it when the deadline passes.
    pub async fn run<F, T, E>(&self, operation: F) -> Result<T, RepositoryError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<RepositoryError>,
    {
        match tokio::time::timeout_at(self.at, operation).await {
            Ok(result) => result.map_err(Into::into),
            Err(_) => Err(RepositoryError::Timeout),
        }
    }
}
