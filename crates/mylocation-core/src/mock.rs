//! Mock location provider for testing.
//!
//! This module provides a scripted provider that can be used for unit
//! testing without a GPS receiver or a running gpsd.
//!
//! The [`MockProvider`] implements the [`LocationProvider`] trait, allowing it
//! to be used interchangeably with real providers in generic code.
//!
//! # Features
//!
//! - **Scripted permission**: grant, deny, or leave undetermined
//! - **Position queue**: return a sequence of fixes, then a default one
//! - **Failure injection**: fail always, or for the next N requests
//! - **Latency simulation**: delay fixes to exercise busy/cancel paths

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use mylocation_types::{Coordinates, PermissionStatus};

use crate::error::{Error, Result};
use crate::traits::{LocationProvider, PositionOptions};

/// A mock location provider for testing.
///
/// # Example
///
/// ```
/// use mylocation_core::{LocationProvider, MockProviderBuilder, PositionOptions};
///
/// #[tokio::main]
/// async fn main() {
///     let provider = MockProviderBuilder::new().position(10.0, 20.0).build();
///     let fix = provider.current_position(&PositionOptions::default()).await.unwrap();
///     assert_eq!(fix.latitude, 10.0);
/// }
/// ```
pub struct MockProvider {
    name: String,
    permission: RwLock<PermissionStatus>,
    default_position: RwLock<Coordinates>,
    queued_positions: RwLock<VecDeque<Coordinates>>,
    should_fail: AtomicBool,
    fail_message: RwLock<String>,
    /// Number of upcoming position requests that fail before succeeding again.
    remaining_failures: AtomicU32,
    /// Simulated fix latency in milliseconds (0 = no delay).
    latency_ms: AtomicU64,
    permission_requests: AtomicU32,
    position_requests: AtomicU32,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("name", &self.name)
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .field(
                "position_requests",
                &self.position_requests.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl MockProvider {
    /// Create a mock that grants access and reports `position`.
    pub fn new(position: Coordinates) -> Self {
        Self {
            name: "mock".to_string(),
            permission: RwLock::new(PermissionStatus::Granted),
            default_position: RwLock::new(position),
            queued_positions: RwLock::new(VecDeque::new()),
            should_fail: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
            remaining_failures: AtomicU32::new(0),
            latency_ms: AtomicU64::new(0),
            permission_requests: AtomicU32::new(0),
            position_requests: AtomicU32::new(0),
        }
    }

    /// Change the answer to permission requests.
    pub async fn set_permission(&self, status: PermissionStatus) {
        *self.permission.write().await = status;
    }

    /// Change the position returned once the queue is empty.
    pub async fn set_position(&self, position: Coordinates) {
        *self.default_position.write().await = position;
    }

    /// Queue a position to be returned by the next request.
    pub async fn push_position(&self, position: Coordinates) {
        self.queued_positions.write().await.push_back(position);
    }

    /// Make every position request fail (or stop failing).
    pub async fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Fail the next `count` position requests, then succeed.
    pub fn set_transient_failures(&self, count: u32) {
        self.remaining_failures.store(count, Ordering::Relaxed);
    }

    /// Delay every fix by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// How many times permission was requested.
    pub fn permission_requests(&self) -> u32 {
        self.permission_requests.load(Ordering::Relaxed)
    }

    /// How many times a position was requested.
    pub fn position_requests(&self) -> u32 {
        self.position_requests.load(Ordering::Relaxed)
    }

    async fn check_should_fail(&self) -> Result<()> {
        if self.remaining_failures.load(Ordering::Relaxed) > 0 {
            self.remaining_failures.fetch_sub(1, Ordering::Relaxed);
            return Err(Error::PositionUnavailable(
                self.fail_message.read().await.clone(),
            ));
        }

        if self.should_fail.load(Ordering::Relaxed) {
            Err(Error::PositionUnavailable(
                self.fail_message.read().await.clone(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl LocationProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        self.permission_requests.fetch_add(1, Ordering::Relaxed);
        Ok(*self.permission.read().await)
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        self.position_requests.fetch_add(1, Ordering::Relaxed);

        let latency = self.latency_ms.load(Ordering::Relaxed);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }

        self.check_should_fail().await?;

        if let Some(next) = self.queued_positions.write().await.pop_front() {
            return Ok(next);
        }
        Ok(*self.default_position.read().await)
    }
}

/// Builder for [`MockProvider`].
#[derive(Debug, Clone)]
pub struct MockProviderBuilder {
    name: String,
    permission: PermissionStatus,
    position: Coordinates,
    queued: Vec<Coordinates>,
    latency: Duration,
    transient_failures: u32,
}

impl Default for MockProviderBuilder {
    fn default() -> Self {
        Self {
            name: "mock".to_string(),
            permission: PermissionStatus::Granted,
            position: Coordinates::new_unchecked(-23.55052, -46.633308),
            queued: Vec::new(),
            latency: Duration::ZERO,
            transient_failures: 0,
        }
    }
}

impl MockProviderBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the provider name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Set the permission answer.
    #[must_use]
    pub fn permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }

    /// Set the default position.
    #[must_use]
    pub fn position(mut self, latitude: f64, longitude: f64) -> Self {
        self.position = Coordinates::new_unchecked(latitude, longitude);
        self
    }

    /// Queue positions returned before the default one.
    #[must_use]
    pub fn positions(mut self, positions: impl IntoIterator<Item = Coordinates>) -> Self {
        self.queued.extend(positions);
        self
    }

    /// Delay every fix.
    #[must_use]
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail the first `count` position requests.
    #[must_use]
    pub fn transient_failures(mut self, count: u32) -> Self {
        self.transient_failures = count;
        self
    }

    /// Build the mock provider.
    #[must_use]
    pub fn build(self) -> MockProvider {
        MockProvider {
            name: self.name,
            permission: RwLock::new(self.permission),
            default_position: RwLock::new(self.position),
            queued_positions: RwLock::new(self.queued.into()),
            should_fail: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
            remaining_failures: AtomicU32::new(self.transient_failures),
            latency_ms: AtomicU64::new(self.latency.as_millis() as u64),
            permission_requests: AtomicU32::new(0),
            position_requests: AtomicU32::new(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_defaults() {
        let provider = MockProviderBuilder::new().build();
        assert_eq!(provider.name(), "mock");
        assert_eq!(
            provider.request_permission().await.unwrap(),
            PermissionStatus::Granted
        );
        let fix = provider
            .current_position(&PositionOptions::default())
            .await
            .unwrap();
        assert_eq!(fix.latitude, -23.55052);
    }

    #[tokio::test]
    async fn test_mock_queue_then_default() {
        let provider = MockProviderBuilder::new()
            .position(0.0, 0.0)
            .positions([
                Coordinates::new(1.0, 1.0).unwrap(),
                Coordinates::new(2.0, 2.0).unwrap(),
            ])
            .build();
        let opts = PositionOptions::default();

        assert_eq!(provider.current_position(&opts).await.unwrap().latitude, 1.0);
        assert_eq!(provider.current_position(&opts).await.unwrap().latitude, 2.0);
        assert_eq!(provider.current_position(&opts).await.unwrap().latitude, 0.0);
        assert_eq!(provider.position_requests(), 3);
    }

    #[tokio::test]
    async fn test_mock_transient_failures() {
        let provider = MockProviderBuilder::new().transient_failures(2).build();
        let opts = PositionOptions::default();

        assert!(provider.current_position(&opts).await.is_err());
        assert!(provider.current_position(&opts).await.is_err());
        assert!(provider.current_position(&opts).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_runtime_changes() {
        let provider = MockProviderBuilder::new().build();
        provider.set_permission(PermissionStatus::Denied).await;
        provider
            .set_position(Coordinates::new(5.0, 6.0).unwrap())
            .await;
        provider
            .push_position(Coordinates::new(7.0, 8.0).unwrap())
            .await;

        assert_eq!(
            provider.request_permission().await.unwrap(),
            PermissionStatus::Denied
        );
        let opts = PositionOptions::default();
        assert_eq!(provider.current_position(&opts).await.unwrap().latitude, 7.0);
        assert_eq!(provider.current_position(&opts).await.unwrap().latitude, 5.0);
    }

    #[tokio::test]
    async fn test_mock_fail_message() {
        let provider = MockProviderBuilder::new().build();
        provider.set_should_fail(true, Some("receiver unplugged")).await;

        let err = provider
            .current_position(&PositionOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("receiver unplugged"));

        provider.set_should_fail(false, None).await;
        assert!(
            provider
                .current_position(&PositionOptions::default())
                .await
                .is_ok()
        );
    }
}
