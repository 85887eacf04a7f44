//! Provider that always reports the same configured position.
//!
//! Useful on machines without a receiver, where the "current position" is
//! known in advance.

use async_trait::async_trait;
use tracing::debug;

use mylocation_types::{Coordinates, PermissionStatus};

use crate::error::Result;
use crate::traits::{LocationProvider, PositionOptions};

/// Always-granted provider returning a fixed position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedProvider {
    position: Coordinates,
}

impl FixedProvider {
    pub fn new(position: Coordinates) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }
}

#[async_trait]
impl LocationProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        debug!(position = %self.position, "Returning fixed position");
        Ok(self.position)
    }
}
