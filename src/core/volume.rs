use crate::core::navigation::{shared_navigator, SharedNavigator};
use crate::core::scan::PolarScan;
use crate::types::{RadarError, RadarResult, ValueType};
use chrono::{NaiveDate, NaiveTime};
use std::cmp::Ordering;

/// An ordered collection of polar scans from one radar site.
///
/// The volume owns the navigator; every added scan is re-pointed at it
/// so that position changes made through the volume or through any of
/// its scans are observed everywhere.
#[derive(Debug, Clone)]
pub struct PolarVolume {
    navigator: SharedNavigator,
    scans: Vec<PolarScan>,
    date: Option<String>,
    time: Option<String>,
}

impl Default for PolarVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarVolume {
    /// Create an empty volume with a navigator at (0, 0, 0)
    pub fn new() -> Self {
        Self {
            navigator: shared_navigator(),
            scans: Vec::new(),
            date: None,
            time: None,
        }
    }

    // --- navigator ---------------------------------------------------

    pub fn navigator(&self) -> SharedNavigator {
        SharedNavigator::clone(&self.navigator)
    }

    pub fn longitude(&self) -> f64 {
        self.navigator.borrow().longitude
    }

    pub fn set_longitude(&mut self, longitude: f64) {
        self.navigator.borrow_mut().longitude = longitude;
    }

    pub fn latitude(&self) -> f64 {
        self.navigator.borrow().latitude
    }

    pub fn set_latitude(&mut self, latitude: f64) {
        self.navigator.borrow_mut().latitude = latitude;
    }

    pub fn height(&self) -> f64 {
        self.navigator.borrow().height
    }

    pub fn set_height(&mut self, height: f64) {
        self.navigator.borrow_mut().height = height;
    }

    // --- nominal date and time ---------------------------------------

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Set the nominal date, format YYYYMMDD. Invalid input leaves the
    /// field unchanged.
    pub fn set_date(&mut self, date: &str) -> RadarResult<()> {
        NaiveDate::parse_from_str(date, "%Y%m%d")
            .map_err(|_| RadarError::InvalidDateTime(date.to_string()))?;
        self.date = Some(date.to_string());
        Ok(())
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    /// Set the nominal time, format HHMMSS. Invalid input leaves the
    /// field unchanged.
    pub fn set_time(&mut self, time: &str) -> RadarResult<()> {
        if time.len() != 6 {
            return Err(RadarError::InvalidDateTime(time.to_string()));
        }
        NaiveTime::parse_from_str(time, "%H%M%S")
            .map_err(|_| RadarError::InvalidDateTime(time.to_string()))?;
        self.time = Some(time.to_string());
        Ok(())
    }

    // --- scan management ---------------------------------------------

    /// Append a scan. The scan is re-pointed at the volume's navigator
    /// and drops whatever navigator it carried before.
    pub fn add_scan(&mut self, mut scan: PolarScan) {
        scan.set_navigator(self.navigator());
        self.scans.push(scan);
    }

    pub fn number_of_scans(&self) -> usize {
        self.scans.len()
    }

    pub fn get_scan(&self, index: usize) -> RadarResult<&PolarScan> {
        self.scans.get(index).ok_or(RadarError::IndexOutOfBounds {
            index,
            len: self.scans.len(),
        })
    }

    pub fn get_scan_mut(&mut self, index: usize) -> RadarResult<&mut PolarScan> {
        let len = self.scans.len();
        self.scans
            .get_mut(index)
            .ok_or(RadarError::IndexOutOfBounds { index, len })
    }

    pub fn scans(&self) -> &[PolarScan] {
        &self.scans
    }

    // --- scan selection ----------------------------------------------

    /// Scan whose elevation is closest to `elangle`; on a tie the
    /// earliest scan in sequence order wins. With `inside_range_only`,
    /// queries strictly outside the closed [min, max] elevation
    /// interval find nothing instead of clamping to a boundary scan.
    pub fn scan_closest_to_elevation(
        &self,
        elangle: f64,
        inside_range_only: bool,
    ) -> Option<&PolarScan> {
        if self.scans.is_empty() {
            return None;
        }
        if inside_range_only {
            let min = self.scans.iter().map(|s| s.elangle).fold(f64::MAX, f64::min);
            let max = self.scans.iter().map(|s| s.elangle).fold(f64::MIN, f64::max);
            if elangle < min || elangle > max {
                return None;
            }
        }

        let mut closest = &self.scans[0];
        let mut smallest = (closest.elangle - elangle).abs();
        for scan in &self.scans[1..] {
            let diff = (scan.elangle - elangle).abs();
            if diff < smallest {
                smallest = diff;
                closest = scan;
            }
        }
        Some(closest)
    }

    /// Value nearest to the geodetic point (lon, lat) at the given
    /// height above the ellipsoid.
    ///
    /// The point is projected through the volume navigator into a
    /// (surface distance, elevation angle) pair; the scan closest to
    /// that elevation supplies the value. Absence of a covering scan
    /// is reported as NODATA, not as an error.
    pub fn get_nearest(
        &self,
        lon: f64,
        lat: f64,
        height: f64,
        inside_range_only: bool,
    ) -> (ValueType, f64) {
        let (distance, _) = self.navigator.borrow().ll_to_da(lon, lat);
        let (elangle, _) = self.navigator.borrow().dh_to_ea(distance, height);
        log::debug!(
            "nearest lookup: distance {:.1} m, target elevation {:.4} rad",
            distance,
            elangle
        );
        match self.scan_closest_to_elevation(elangle, inside_range_only) {
            Some(scan) => scan.nearest_value(lon, lat, inside_range_only),
            None => (ValueType::Nodata, 0.0),
        }
    }

    // --- ordering ----------------------------------------------------

    /// Stable in-place sort of the scan sequence by elevation angle
    pub fn sort_by_elevations(&mut self, ascending: bool) {
        self.scans.sort_by(|a, b| {
            let ord = a
                .elangle
                .partial_cmp(&b.elangle)
                .unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    /// True when the scan sequence is non-decreasing in elevation, in
    /// its current order
    pub fn is_ascending_scans(&self) -> bool {
        self.scans.windows(2).all(|w| w[0].elangle <= w[1].elangle)
    }

    /// True when the volume holds at least one scan and the sequence
    /// is ascending by elevation
    pub fn is_transformable(&self) -> bool {
        !self.scans.is_empty() && self.is_ascending_scans()
    }
}
