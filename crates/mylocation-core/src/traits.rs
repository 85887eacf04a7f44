//! Trait abstractions for location providers.
//!
//! This module provides the [`LocationProvider`] trait that abstracts over
//! real position sources (gpsd, a fixed point, a simulator) and mock
//! providers for testing.

use std::time::Duration;

use async_trait::async_trait;

use mylocation_types::{Coordinates, PermissionStatus};

use crate::error::Result;

/// Options for a single position request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PositionOptions {
    /// Upper bound for acquiring the fix. `None` uses the provider's default.
    pub timeout: Option<Duration>,
}

impl PositionOptions {
    /// Options with an explicit timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

/// Trait abstracting a one-shot position source.
///
/// # Example
///
/// ```ignore
/// use mylocation_core::{LocationProvider, PositionOptions, Result};
///
/// async fn print_fix<P: LocationProvider>(provider: &P) -> Result<()> {
///     let coords = provider.current_position(&PositionOptions::default()).await?;
///     println!("{}", coords);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Short name used in logs and status output.
    fn name(&self) -> &str;

    /// Ask for foreground location access.
    ///
    /// May suspend while the platform prompts the user.
    async fn request_permission(&self) -> Result<PermissionStatus>;

    /// Acquire a single current position.
    ///
    /// Callers must have been granted permission first.
    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates>;
}

#[async_trait]
impl<P: LocationProvider + ?Sized> LocationProvider for std::sync::Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        (**self).request_permission().await
    }

    async fn current_position(&self, options: &PositionOptions) -> Result<Coordinates> {
        (**self).current_position(options).await
    }
}
