use crate::core::navigation::{normalize_azimuth, shared_navigator, SharedNavigator};
use crate::core::quality::QualityField;
use crate::core::scan_param::PolarScanParameter;
use crate::types::{RadarDataType, RadarError, RadarResult, SampleGrid, ValueType};
use std::collections::HashMap;
use std::f64::consts::PI;

/// One elevation sweep: a default parameter plus any number of named
/// parameters, range-bin geometry and a navigator describing the
/// sensor position.
///
/// The navigator is a shared handle; a scan that belongs to a volume
/// observes (and propagates) position changes through it.
#[derive(Debug, Clone)]
pub struct PolarScan {
    /// Elevation angle of the sweep in radians
    pub elangle: f64,
    /// Range of the first bin in meters
    pub rstart: f64,
    /// Bin length in meters
    pub rscale: f64,
    navigator: SharedNavigator,
    default_param: PolarScanParameter,
    parameters: HashMap<String, PolarScanParameter>,
    quality_fields: Vec<QualityField>,
}

impl Default for PolarScan {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarScan {
    /// Create an empty scan with its own navigator at (0, 0, 0)
    pub fn new() -> Self {
        Self {
            elangle: 0.0,
            rstart: 0.0,
            rscale: 0.0,
            navigator: shared_navigator(),
            default_param: PolarScanParameter::new(),
            parameters: HashMap::new(),
            quality_fields: Vec::new(),
        }
    }

    // --- navigator ---------------------------------------------------

    pub fn navigator(&self) -> SharedNavigator {
        SharedNavigator::clone(&self.navigator)
    }

    /// Replace the navigator handle. Used by a containing volume to
    /// share its own navigator with the scan.
    pub fn set_navigator(&mut self, navigator: SharedNavigator) {
        self.navigator = navigator;
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

    // --- parameters --------------------------------------------------

    /// Assign sample data to the default parameter
    pub fn set_data<G: Into<SampleGrid>>(&mut self, data: G) {
        self.default_param.set_data(data);
    }

    pub fn default_parameter(&self) -> &PolarScanParameter {
        &self.default_param
    }

    pub fn default_parameter_mut(&mut self) -> &mut PolarScanParameter {
        &mut self.default_param
    }

    /// Add a named parameter; the parameter must carry a quantity
    pub fn add_parameter(&mut self, param: PolarScanParameter) -> RadarResult<()> {
        match &param.quantity {
            Some(quantity) => {
                self.parameters.insert(quantity.clone(), param);
                Ok(())
            }
            None => Err(RadarError::InvalidArgument(
                "parameter has no quantity".to_string(),
            )),
        }
    }

    pub fn parameter(&self, quantity: &str) -> Option<&PolarScanParameter> {
        self.parameters.get(quantity)
    }

    pub fn has_parameter(&self, quantity: &str) -> bool {
        self.parameters.contains_key(quantity)
    }

    pub fn nbins(&self) -> usize {
        self.default_param.nbins()
    }

    pub fn nrays(&self) -> usize {
        self.default_param.nrays()
    }

    pub fn datatype(&self) -> RadarDataType {
        self.default_param.datatype()
    }

    pub fn nodata(&self) -> f64 {
        self.default_param.nodata
    }

    pub fn set_nodata(&mut self, nodata: f64) {
        self.default_param.nodata = nodata;
    }

    pub fn undetect(&self) -> f64 {
        self.default_param.undetect
    }

    pub fn set_undetect(&mut self, undetect: f64) {
        self.default_param.undetect = undetect;
    }

    // --- quality fields ----------------------------------------------

    pub fn add_quality_field(&mut self, field: QualityField) {
        self.quality_fields.push(field);
    }

    /// Look up a quality field by the task that produced it
    pub fn find_quality_field_by_how_task(&self, how_task: &str) -> Option<&QualityField> {
        self.quality_fields.iter().find(|f| f.how_task == how_task)
    }

    // --- geometry ----------------------------------------------------

    /// Project a geodetic point onto this sweep, returning the bin
    /// index (unclamped, may be negative or past the last bin) and the
    /// wrapped ray index. None when the scan carries no data.
    pub fn nearest_index(&self, lon: f64, lat: f64) -> Option<(i64, usize)> {
        let (nrays, nbins) = (self.nrays(), self.nbins());
        if nrays == 0 || nbins == 0 || self.rscale <= 0.0 {
            return None;
        }
        let (azimuth, range) = {
            let nav = self.navigator.borrow();
            let (distance, azimuth) = nav.ll_to_da(lon, lat);
            let (range, _) = nav.de_to_rh(distance, self.elangle);
            (azimuth, range)
        };

        let bin = ((range - self.rstart) / self.rscale).round() as i64;
        let ray_width = 2.0 * PI / nrays as f64;
        let ray = (normalize_azimuth(azimuth) / ray_width).round() as usize % nrays;
        Some((bin, ray))
    }

    /// Raw classified value of the default parameter nearest to the
    /// geodetic point. With `inside_range_only`, a projection past the
    /// measured range yields NODATA; otherwise it is clamped to the
    /// closest valid bin.
    pub fn nearest_value(&self, lon: f64, lat: f64, inside_range_only: bool) -> (ValueType, f64) {
        let Some((bin, ray)) = self.nearest_index(lon, lat) else {
            return (ValueType::Nodata, self.nodata());
        };
        let nbins = self.nbins() as i64;
        let bin = if bin < 0 || bin >= nbins {
            if inside_range_only {
                return (ValueType::Nodata, self.nodata());
            }
            bin.clamp(0, nbins - 1)
        } else {
            bin
        };
        self.default_param.value(bin as usize, ray)
    }
}
