//! Core types for captured locations.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Number of decimal places used when a coordinate is rendered for display.
pub const DISPLAY_PRECISION: usize = 5;

/// A geographic position in decimal degrees (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinates {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinates {
    /// Valid latitude range in degrees.
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    /// Valid longitude range in degrees.
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

    /// Create validated coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use mylocation_types::Coordinates;
    ///
    /// let sao_paulo = Coordinates::new(-23.55052, -46.633308).unwrap();
    /// assert_eq!(sao_paulo.to_string(), "Lat: -23.55052, Lon: -46.63331");
    ///
    /// assert!(Coordinates::new(91.0, 0.0).is_err());
    /// assert!(Coordinates::new(0.0, f64::NAN).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ParseError> {
        check_axis("latitude", latitude, Self::LATITUDE_RANGE)?;
        check_axis("longitude", longitude, Self::LONGITUDE_RANGE)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create coordinates without range checks.
    ///
    /// Values read back from storage go through here: they were validated
    /// when written and must be returned verbatim.
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to `other` in meters (haversine).
    #[must_use]
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        const EARTH_RADIUS_M: f64 = 6_371_000.0;

        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

fn check_axis(axis: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ParseError> {
    if !value.is_finite() {
        return Err(ParseError::NotFinite { axis });
    }
    if value < min || value > max {
        return Err(ParseError::OutOfRange {
            axis,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_title(self.latitude, self.longitude))
    }
}

impl FromStr for Coordinates {
    type Err = ParseError;

    /// Parse `"<latitude>,<longitude>"`, e.g. `"-23.55052,-46.633308"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ParseError::InvalidData(format!("expected 'lat,lon', got '{s}'")))?;

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| ParseError::InvalidData(format!("latitude '{}': {e}", lat.trim())))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| ParseError::InvalidData(format!("longitude '{}': {e}", lon.trim())))?;

        Self::new(latitude, longitude)
    }
}

/// Render a coordinate pair as the list title, `"Lat: {5dp}, Lon: {5dp}"`.
#[must_use]
pub fn format_title(latitude: f64, longitude: f64) -> String {
    format!(
        "Lat: {:.prec$}, Lon: {:.prec$}",
        latitude,
        longitude,
        prec = DISPLAY_PRECISION
    )
}

/// A location reading persisted by the store.
///
/// Records are immutable once written. `id` is assigned by the store and
/// increases monotonically; it is never reused, even after the table is
/// cleared.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LocationRecord {
    /// Surrogate key assigned on insert.
    pub id: i64,
    /// Latitude in degrees, copied verbatim from the fix.
    pub latitude: f64,
    /// Longitude in degrees, copied verbatim from the fix.
    pub longitude: f64,
    /// Local timestamp text formatted at insert time.
    pub captured_at: String,
}

impl LocationRecord {
    /// The coordinates of this record.
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new_unchecked(self.latitude, self.longitude)
    }

    /// List title, e.g. `"Lat: -23.55052, Lon: -46.63331"`.
    #[must_use]
    pub fn title(&self) -> String {
        format_title(self.latitude, self.longitude)
    }

    /// List description (the capture timestamp).
    #[must_use]
    pub fn description(&self) -> &str {
        &self.captured_at
    }
}

/// Light or dark color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThemeMode {
    /// Light palette (the default when no preference is stored).
    #[default]
    Light,
    /// Dark palette.
    Dark,
}

impl ThemeMode {
    /// Build from the persisted dark-mode flag.
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    /// Whether this is the dark palette.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The other mode.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseError::InvalidData(format!(
                "unknown theme '{other}' (expected 'light' or 'dark')"
            ))),
        }
    }
}

/// Result of asking the platform for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PermissionStatus {
    /// Access granted; a position may be requested.
    Granted,
    /// Access refused.
    Denied,
    /// The platform could not decide (treated as a refusal).
    Undetermined,
}

impl PermissionStatus {
    /// Whether a position may be requested.
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Undetermined => write!(f, "undetermined"),
        }
    }
}
