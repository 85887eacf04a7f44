//! Demo provider producing random positions around a base point.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mylocation_types::{Coordinates, PermissionStatus};

use crate::error::{Error, Result};
use crate::traits::{LocationProvider, PositionOptions};

/// Meters per degree of latitude (mean).
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Default radius around the base point, in meters.
pub const DEFAULT_RADIUS_M: f64 = 500.0;

/// Default simulated time to fix.
pub const DEFAULT_FIX_DELAY: Duration = Duration::from_millis(800);

/// Always-granted provider returning a random point within `radius_m` of a
/// base coordinate.
pub struct SimulatedProvider {
    base: Coordinates,
    radius_m: f64,
    fix_delay: Duration,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for SimulatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedProvider")
            .field("base", &self.base)
            .field("radius_m", &self.radius_m)
            .field("fix_delay", &self.fix_delay)
            .finish()
    }
}

impl SimulatedProvider {
    /// Create a simulator seeded from the OS.
    ///
    /// A negative or non-finite radius is rejected.
    pub fn new(base: Coordinates, radius_m: f64) -> Result<Self> {
        Self::with_rng(base, radius_m, StdRng::from_os_rng())
    }

    /// Create a reproducible simulator.
    pub fn seeded(base: Coordinates, radius_m: f64, seed: u64) -> Result<Self> {
        Self::with_rng(base, radius_m, StdRng::seed_from_u64(seed))
    }

    fn with_rng(base: Coordinates, radius_m: f64, rng: StdRng) -> Result<Self> {
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "simulation radius must be a non-negative number of meters, got {radius_m}"
            )));
        }
        Ok(Self {
            base,
            radius_m,
            fix_delay: DEFAULT_FIX_DELAY,
            rng: Mutex::new(rng),
        })
    }

    /// Override the simulated time to fix.
    #[must_use]
    pub fn with_fix_delay(mut self, delay: Duration) -> Self {
        self.fix_delay = delay;
        self
    }

    pub fn base(&self) -> Coordinates {
        self.base
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    fn next_point(&self) -> Result<Coordinates> {
        let (u, v): (f64, f64) = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            (rng.random(), rng.random())
        };

        // sqrt keeps the points uniform over the disc area.
        let distance = self.radius_m * u.sqrt();
        let bearing = v * std::f64::consts::TAU;

        let dlat = distance * bearing.cos() / METERS_PER_DEGREE;
        let cos_lat = self.base.latitude.to_radians().cos().max(1e-6);
        let dlon = distance * bearing.sin() / (METERS_PER_DEGREE * cos_lat);

        let latitude = (self.base.latitude + dlat).clamp(-90.0, 90.0);
        // Near a pole dlon can span several turns.
        let longitude = wrap_longitude(self.base.longitude + dlon);
        Ok(Coordinates::new(latitude, longitude)?)
    }
}

/// Fold any finite longitude into `[-180, 180]`, leaving in-range values as is.
fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        longitude
    } else {
        (longitude + 180.0).rem_euclid(360.0) - 180.0
    }
}

#[async_trait]
impl LocationProvider for SimulatedProvider {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinates> {
        if !self.fix_delay.is_zero() {
            tokio::time::sleep(self.fix_delay).await;
        }
        self.next_point()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Coordinates {
        Coordinates::new(-23.55052, -46.633308).unwrap()
    }

    #[tokio::test]
    async fn test_points_within_radius() {
        let provider = SimulatedProvider::seeded(base(), 500.0, 7)
            .unwrap()
            .with_fix_delay(Duration::ZERO);

        for _ in 0..200 {
            let point = provider
                .current_position(&PositionOptions::default())
                .await
                .unwrap();
            // Small slack for the flat-earth approximation.
            assert!(point.distance_to(&base()) <= 505.0);
        }
    }

    #[tokio::test]
    async fn test_zero_radius_returns_base() {
        let provider = SimulatedProvider::seeded(base(), 0.0, 1)
            .unwrap()
            .with_fix_delay(Duration::ZERO);
        let point = provider
            .current_position(&PositionOptions::default())
            .await
            .unwrap();
        assert!((point.latitude - base().latitude).abs() < 1e-12);
        assert!((point.longitude - base().longitude).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_seeded_is_reproducible() {
        let a = SimulatedProvider::seeded(base(), 1000.0, 42)
            .unwrap()
            .with_fix_delay(Duration::ZERO);
        let b = SimulatedProvider::seeded(base(), 1000.0, 42)
            .unwrap()
            .with_fix_delay(Duration::ZERO);
        let opts = PositionOptions::default();
        assert_eq!(
            a.current_position(&opts).await.unwrap(),
            b.current_position(&opts).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_points_near_pole_stay_in_range() {
        let near_pole = Coordinates::new(89.9999, 179.0).unwrap();
        let provider = SimulatedProvider::seeded(near_pole, 500.0, 11)
            .unwrap()
            .with_fix_delay(Duration::ZERO);

        for _ in 0..50 {
            let point = provider
                .current_position(&PositionOptions::default())
                .await
                .unwrap();
            assert!(
                Coordinates::new(point.latitude, point.longitude).is_ok(),
                "out of range: {point:?}"
            );
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(-46.5), -46.5);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert!((wrap_longitude(181.0) - -179.0).abs() < 1e-9);
        assert!((wrap_longitude(-190.0) - 170.0).abs() < 1e-9);
        assert!((wrap_longitude(1298.0897915117034) - -141.9102084882966).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(SimulatedProvider::new(base(), -1.0).is_err());
        assert!(SimulatedProvider::new(base(), f64::NAN).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fix_delay_applies() {
        let provider = SimulatedProvider::seeded(base(), 10.0, 3).unwrap();
        let start = tokio::time::Instant::now();
        provider
            .current_position(&PositionOptions::default())
            .await
            .unwrap();
        assert!(start.elapsed() >= DEFAULT_FIX_DELAY);
    }
}
