//! One-shot location capture.
//!
//! [`capture_once`] is the only entry point the front ends use: it asks for
//! permission, then requests a single fix.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mylocation_types::Coordinates;

use crate::error::{Error, Result};
use crate::traits::{LocationProvider, PositionOptions};

/// Request permission, then a single position fix.
///
/// Returns [`Error::PermissionDenied`] if access is anything but granted.
/// When `options.timeout` is set the fix is bounded by it and
/// [`Error::Timeout`] is returned on expiry; otherwise the provider's own
/// default applies.
pub async fn capture_once<P>(provider: &P, options: &PositionOptions) -> Result<Coordinates>
where
    P: LocationProvider + ?Sized,
{
    let status = provider.request_permission().await?;
    debug!(provider = provider.name(), %status, "Location permission answered");

    if !status.is_granted() {
        warn!(provider = provider.name(), %status, "Location permission not granted");
        return Err(Error::PermissionDenied);
    }

    let coords = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, provider.current_position(options))
            .await
            .map_err(|_| Error::timeout("current_position", limit))??,
        None => provider.current_position(options).await?,
    };

    info!(
        provider = provider.name(),
        latitude = coords.latitude,
        longitude = coords.longitude,
        "Captured position"
    );
    Ok(coords)
}

/// Like [`capture_once`], but gives up with [`Error::Cancelled`] as soon as
/// `cancel` fires.
pub async fn capture_once_cancellable<P>(
    provider: &P,
    options: &PositionOptions,
    cancel: &CancellationToken,
) -> Result<Coordinates>
where
    P: LocationProvider + ?Sized,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            debug!(provider = provider.name(), "Capture cancelled");
            Err(Error::Cancelled)
        }
        result = capture_once(provider, options) => result,
    }
}
