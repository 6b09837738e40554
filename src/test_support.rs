//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use async_trait::async_trait;

use crate::core::state::DraftMessage;
use crate::gateway::{EmailGateway, GatewayError};

/// A no-op gateway for tests that don't need real API calls.
pub struct NoopGateway;

#[async_trait]
impl EmailGateway for NoopGateway {
    fn name(&self) -> &str {
        "noop"
    }

    async fn send(&self, _draft: &DraftMessage) -> Result<(), GatewayError> {
        Ok(())
    }
}

/// Creates a test App with a NoopGateway.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopGateway))
}
