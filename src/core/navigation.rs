use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

/// Earth equatorial radius in meters
pub const EQUATOR_RADIUS: f64 = 6_378_160.0;

/// Earth polar radius in meters
pub const POLE_RADIUS: f64 = 6_356_780.0;

/// Default refraction index gradient (1/m). Together with the earth
/// radius this yields the usual ~4/3 effective radius for beam
/// propagation.
pub const DEFAULT_DNDH: f64 = -3.9e-8;

/// Navigator describing a radar site position and providing the
/// geometry transforms between geodetic coordinates and the polar
/// (distance, azimuth, elevation, range) domain.
///
/// Longitude and latitude are in radians, heights in meters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolarNavigator {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
    dndh: f64,
}

impl Default for PolarNavigator {
    fn default() -> Self {
        Self {
            longitude: 0.0,
            latitude: 0.0,
            height: 0.0,
            dndh: DEFAULT_DNDH,
        }
    }
}

/// Shared navigator handle. A volume and its scans jointly own one
/// navigator record, so a position change through either side is
/// observed by both. Volumes are single-threaded by design.
pub type SharedNavigator = Rc<RefCell<PolarNavigator>>;

/// Create a fresh shared navigator at (0, 0, 0)
pub fn shared_navigator() -> SharedNavigator {
    Rc::new(RefCell::new(PolarNavigator::default()))
}

impl PolarNavigator {
    /// Navigator for a site at the given position (radians, meters)
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
            dndh: DEFAULT_DNDH,
        }
    }

    /// Geocentric earth radius (meters) at the given latitude (radians)
    pub fn earth_radius(lat: f64) -> f64 {
        let a = lat.sin() * POLE_RADIUS;
        let b = lat.cos() * EQUATOR_RADIUS;
        (a * a + b * b).sqrt()
    }

    /// Earth radius at the radar site
    pub fn earth_radius_origin(&self) -> f64 {
        Self::earth_radius(self.latitude)
    }

    /// Effective earth radius for beam propagation at the site,
    /// accounting for standard atmospheric refraction
    pub fn effective_radius(&self) -> f64 {
        1.0 / (1.0 / self.earth_radius_origin() + self.dndh)
    }

    /// Great-circle surface distance (meters) and azimuth (radians,
    /// clockwise from north) from the site to a geodetic point.
    pub fn ll_to_da(&self, lon: f64, lat: f64) -> (f64, f64) {
        let dlon = lon - self.longitude;
        let cos_angle = (self.latitude.sin() * lat.sin()
            + self.latitude.cos() * lat.cos() * dlon.cos())
        .clamp(-1.0, 1.0);
        let distance = cos_angle.acos() * self.earth_radius_origin();
        let azimuth = (dlon.sin() * lat.cos()).atan2(
            self.latitude.cos() * lat.sin() - self.latitude.sin() * lat.cos() * dlon.cos(),
        );
        (distance, azimuth)
    }

    /// Elevation angle and slant range of a target at surface distance
    /// `distance` and height `height` above the ellipsoid.
    pub fn dh_to_ea(&self, distance: f64, height: f64) -> (f64, f64) {
        let rk = self.effective_radius();
        let alpha = distance / rk;
        let site = rk + self.height;
        let target = rk + height;

        let horizontal = target * alpha.sin();
        let vertical = target * alpha.cos() - site;
        let elangle = vertical.atan2(horizontal);
        let range = (site * site + target * target - 2.0 * site * target * alpha.cos()).sqrt();
        (elangle, range)
    }

    /// Slant range and beam height at surface distance `distance` for a
    /// fixed elevation angle `elangle`.
    pub fn de_to_rh(&self, distance: f64, elangle: f64) -> (f64, f64) {
        let rk = self.effective_radius();
        let alpha = distance / rk;
        let site = rk + self.height;

        let range = site * alpha.sin() / (elangle + alpha).cos();
        let height =
            (site * site + range * range + 2.0 * site * range * elangle.sin()).sqrt() - rk;
        (range, height)
    }
}

/// Normalize an azimuth to [0, 2*pi)
pub fn normalize_azimuth(azimuth: f64) -> f64 {
    let mut a = azimuth % (2.0 * PI);
    if a < 0.0 {
        a += 2.0 * PI;
    }
    a
}
