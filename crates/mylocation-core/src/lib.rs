//! Location capture for the mylocation logger.
//!
//! This crate abstracts over where a position comes from and provides the
//! one-shot capture used by the screen and the CLI.
//!
//! # Features
//!
//! - **Provider trait**: [`LocationProvider`] with permission and position requests
//! - **gpsd**: fixes from a local or remote gpsd daemon over TCP
//! - **Fixed and simulated providers**: for machines without a receiver
//! - **Mock provider**: scripted permission, fixes, failures and latency for tests
//! - **Messages**: [`Command`] and [`ScreenEvent`] shared by UI and worker
//!
//! # Quick Start
//!
//! ```no_run
//! use mylocation_core::{GpsdProvider, PositionOptions, capture_once};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GpsdProvider::default();
//!     let coords = capture_once(&provider, &PositionOptions::default()).await?;
//!     println!("{coords}");
//!     Ok(())
//! }
//! ```

pub mod capture;
pub mod error;
pub mod fixed;
pub mod gpsd;
pub mod messages;
pub mod mock;
pub mod simulated;
pub mod traits;

pub use mylocation_types as types;

pub use capture::{capture_once, capture_once_cancellable};
pub use error::{Error, Result};
pub use fixed::FixedProvider;
pub use gpsd::{GpsdConfig, GpsdProvider};
pub use messages::{CaptureOutcome, Command, ScreenEvent};
pub use mock::{MockProvider, MockProviderBuilder};
pub use simulated::SimulatedProvider;
pub use traits::{LocationProvider, PositionOptions};

pub use mylocation_types::{Coordinates, LocationRecord, PermissionStatus, ThemeMode};
