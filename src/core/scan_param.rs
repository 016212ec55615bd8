use crate::types::{RadarDataType, SampleGrid, ValueType};

/// One measured quantity of a polar scan: a typed grid of samples
/// (rays x bins) together with the linear calibration that converts
/// raw sample values into physical units.
#[derive(Debug, Clone)]
pub struct PolarScanParameter {
    /// Quantity identifier, e.g. "DBZH". None until assigned.
    pub quantity: Option<String>,
    /// Linear calibration: physical = raw * gain + offset
    pub gain: f64,
    pub offset: f64,
    /// Raw value marking positions outside the measured area
    pub nodata: f64,
    /// Raw value marking scanned positions with no echo
    pub undetect: f64,
    data: Option<SampleGrid>,
}

impl Default for PolarScanParameter {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarScanParameter {
    /// Create an empty parameter with zeroed calibration
    pub fn new() -> Self {
        Self {
            quantity: None,
            gain: 0.0,
            offset: 0.0,
            nodata: 0.0,
            undetect: 0.0,
            data: None,
        }
    }

    /// Assign the sample grid. Dimensions and data type are derived
    /// from the grid and are not assignable by themselves.
    pub fn set_data<G: Into<SampleGrid>>(&mut self, data: G) {
        self.data = Some(data.into());
    }

    pub fn data(&self) -> Option<&SampleGrid> {
        self.data.as_ref()
    }

    /// Number of range bins, 0 when no data has been assigned
    pub fn nbins(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.nbins())
    }

    /// Number of rays, 0 when no data has been assigned
    pub fn nrays(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.nrays())
    }

    pub fn datatype(&self) -> RadarDataType {
        self.data
            .as_ref()
            .map_or(RadarDataType::Undefined, |d| d.datatype())
    }

    /// Classify a raw sample. Undetect takes precedence over nodata
    /// when the two marker values coincide.
    pub fn classify(&self, raw: f64) -> ValueType {
        if raw == self.undetect {
            ValueType::Undetect
        } else if raw == self.nodata {
            ValueType::Nodata
        } else {
            ValueType::Data
        }
    }

    /// Raw value and classification at (bin, ray). Out-of-bounds
    /// positions report nodata; absence of data is not an error.
    pub fn value(&self, bin: usize, ray: usize) -> (ValueType, f64) {
        match self.data.as_ref().and_then(|d| d.get(bin, ray)) {
            Some(raw) => (self.classify(raw), raw),
            None => (ValueType::Nodata, self.nodata),
        }
    }

    /// Calibrated value at (bin, ray). Only DATA samples are converted;
    /// undetect/nodata keep their raw marker value.
    pub fn converted_value(&self, bin: usize, ray: usize) -> (ValueType, f64) {
        let (vtype, raw) = self.value(bin, ray);
        match vtype {
            ValueType::Data => (vtype, raw * self.gain + self.offset),
            _ => (vtype, raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    fn ramp_param() -> PolarScanParameter {
        // 5 rays x 6 bins, values 0..30 row-major, with a few marker
        // values patched in
        let mut param = PolarScanParameter::new();
        param.nodata = 255.0;
        param.undetect = 0.0;

        let mut a = Array2::<f64>::zeros((5, 6));
        for ray in 0..5 {
            for bin in 0..6 {
                a[[ray, bin]] = (ray * 6 + bin) as f64;
            }
        }
        a[[0, 0]] = param.undetect;
        a[[2, 1]] = param.nodata;
        a[[4, 5]] = param.undetect;
        param.set_data(a);
        param
    }

    #[test]
    fn test_new_param_is_empty() {
        let param = PolarScanParameter::new();
        assert_eq!(0, param.nbins());
        assert_eq!(0, param.nrays());
        assert_eq!(RadarDataType::Undefined, param.datatype());
        assert_eq!(None, param.quantity);
        assert_relative_eq!(0.0, param.gain);
        assert_relative_eq!(0.0, param.offset);
        assert_relative_eq!(0.0, param.nodata);
        assert_relative_eq!(0.0, param.undetect);
    }

    #[test]
    fn test_dimensions_follow_data() {
        let mut param = PolarScanParameter::new();
        param.set_data(Array2::<i8>::zeros((4, 5)));
        assert_eq!(5, param.nbins());
        assert_eq!(4, param.nrays());
        assert_eq!(RadarDataType::Char, param.datatype());
    }

    #[test]
    fn test_quantity() {
        let mut param = PolarScanParameter::new();
        param.quantity = Some("DBZH".to_string());
        assert_eq!(Some("DBZH"), param.quantity.as_deref());
        param.quantity = None;
        assert_eq!(None, param.quantity);
    }

    #[test]
    fn test_value_classification() {
        let param = ramp_param();
        let cases = [
            ((0, 0), ValueType::Undetect, 0.0),
            ((1, 0), ValueType::Data, 1.0),
            ((0, 1), ValueType::Data, 6.0),
            ((1, 2), ValueType::Nodata, 255.0),
            ((4, 4), ValueType::Data, 28.0),
            ((5, 4), ValueType::Undetect, 0.0),
            ((5, 5), ValueType::Nodata, 255.0),
        ];
        for ((bin, ray), expected_type, expected_value) in cases {
            let (vtype, value) = param.value(bin, ray);
            assert_eq!(expected_type, vtype, "at bin {} ray {}", bin, ray);
            assert_relative_eq!(expected_value, value);
        }
    }

    #[test]
    fn test_converted_value_only_converts_data() {
        let mut param = ramp_param();
        param.gain = 0.5;
        param.offset = 10.0;
        let cases = [
            ((0, 0), ValueType::Undetect, 0.0),
            ((1, 0), ValueType::Data, 10.5),
            ((0, 1), ValueType::Data, 13.0),
            ((1, 2), ValueType::Nodata, 255.0),
            ((4, 4), ValueType::Data, 24.0),
            ((5, 4), ValueType::Undetect, 0.0),
            ((5, 5), ValueType::Nodata, 255.0),
        ];
        for ((bin, ray), expected_type, expected_value) in cases {
            let (vtype, value) = param.converted_value(bin, ray);
            assert_eq!(expected_type, vtype, "at bin {} ray {}", bin, ray);
            assert_relative_eq!(expected_value, value);
        }
    }

    #[test]
    fn test_out_of_bounds_is_nodata() {
        let param = ramp_param();
        let (vtype, value) = param.value(6, 0);
        assert_eq!(ValueType::Nodata, vtype);
        assert_relative_eq!(255.0, value);
    }
}
