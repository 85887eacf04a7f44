//! Integration tests for mylocation-core
//!
//! The gpsd test requires a running gpsd with a receiver attached and should
//! be run with:
//! `cargo test --package mylocation-core -- --ignored --nocapture`
//!
//! Set GPSD_HOST / GPSD_PORT to point at a remote daemon.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use mylocation_core::{
    Coordinates, Error, FixedProvider, GpsdConfig, GpsdProvider, LocationProvider,
    MockProviderBuilder, PermissionStatus, PositionOptions, SimulatedProvider, capture_once,
};

/// Route provider logs to the test output; `--nocapture` shows them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("mylocation_core=debug")
        .with_test_writer()
        .try_init();
}

fn providers() -> Vec<Arc<dyn LocationProvider>> {
    let base = Coordinates::new(-23.55052, -46.633308).unwrap();
    vec![
        Arc::new(FixedProvider::new(base)),
        Arc::new(
            SimulatedProvider::seeded(base, 250.0, 9)
                .unwrap()
                .with_fix_delay(Duration::ZERO),
        ),
        Arc::new(MockProviderBuilder::new().build()),
    ]
}

#[tokio::test]
async fn test_every_offline_provider_captures() {
    init_tracing();
    for provider in providers() {
        let coords = capture_once(provider.as_ref(), &PositionOptions::default())
            .await
            .unwrap_or_else(|e| panic!("{} failed: {}", provider.name(), e));
        assert!(coords.latitude.is_finite());
        assert!(coords.longitude.is_finite());
    }
}

#[tokio::test]
async fn test_denied_provider_behind_arc() {
    let provider: Arc<dyn LocationProvider> = Arc::new(
        MockProviderBuilder::new()
            .permission(PermissionStatus::Denied)
            .build(),
    );

    let err = capture_once(&provider, &PositionOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));
}

#[tokio::test]
#[ignore = "requires a running gpsd with a fix"]
async fn test_gpsd_capture() {
    init_tracing();
    let mut config = GpsdConfig::default();
    if let Ok(host) = env::var("GPSD_HOST") {
        config.host = host;
    }
    if let Some(port) = env::var("GPSD_PORT").ok().and_then(|p| p.parse().ok()) {
        config.port = port;
    }

    let provider = GpsdProvider::new(config);
    match capture_once(&provider, &PositionOptions::default()).await {
        Ok(coords) => println!("Fix: {}", coords),
        Err(e) => panic!("gpsd capture failed: {}", e),
    }
}
