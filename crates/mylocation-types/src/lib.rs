//! Platform-agnostic types for the mylocation location logger.
//!
//! This crate provides the value types shared by the location providers
//! (mylocation-core), the persistence layer (mylocation-store) and the
//! front ends (mylocation-cli).
//!
//! # Features
//!
//! - Validated [`Coordinates`] with the list-title formatting
//! - Persisted [`LocationRecord`]s
//! - [`ThemeMode`] and [`PermissionStatus`]
//! - Error types for value parsing
//!
//! # Example
//!
//! ```
//! use mylocation_types::{Coordinates, ThemeMode};
//!
//! let here: Coordinates = "-23.55052,-46.633308".parse()?;
//! assert_eq!(here.to_string(), "Lat: -23.55052, Lon: -46.63331");
//! assert_eq!(ThemeMode::from_dark(true), ThemeMode::Dark);
//! # Ok::<(), mylocation_types::ParseError>(())
//! ```

pub mod error;
pub mod types;

pub use error::{ParseError, ParseResult};
pub use types::{
    Coordinates, DISPLAY_PRECISION, LocationRecord, PermissionStatus, ThemeMode, format_title,
};
