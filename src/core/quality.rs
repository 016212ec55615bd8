use crate::core::volume::PolarVolume;
use crate::types::{RadarError, RadarResult, RayField};
use std::collections::HashMap;

/// Auxiliary per-scan field produced by a quality-control check,
/// identified by the task that generated it
/// (e.g. "se.smhi.detector.poo").
#[derive(Debug, Clone)]
pub struct QualityField {
    pub how_task: String,
    data: RayField,
}

impl QualityField {
    pub fn new<S: Into<String>>(how_task: S, data: RayField) -> Self {
        Self {
            how_task: how_task.into(),
            data,
        }
    }

    pub fn data(&self) -> &RayField {
        &self.data
    }

    pub fn value(&self, bin: usize, ray: usize) -> Option<f64> {
        self.data.get((ray, bin)).copied()
    }
}

/// Outcome of one quality-control check.
///
/// A check always yields the (possibly mutated) volume; it may also
/// name the algorithm that produced auxiliary output. The pipeline
/// only ever forwards the volume.
#[derive(Debug)]
pub struct QualityProcessResult {
    pub volume: PolarVolume,
    pub algorithm: Option<String>,
}

impl QualityProcessResult {
    /// A bare volume result
    pub fn volume(volume: PolarVolume) -> Self {
        Self {
            volume,
            algorithm: None,
        }
    }

    /// A volume accompanied by an algorithm descriptor
    pub fn with_algorithm<S: Into<String>>(volume: PolarVolume, algorithm: S) -> Self {
        Self {
            volume,
            algorithm: Some(algorithm.into()),
        }
    }
}

/// A named quality-control check applied to a polar volume
pub trait QualityPlugin {
    fn process(&self, volume: PolarVolume) -> RadarResult<QualityProcessResult>;
}

/// Registry of quality-control plugins keyed by check name.
///
/// Constructed at startup and injected into the pipeline caller;
/// plugins are added and removed explicitly, there is no ambient
/// global registry.
#[derive(Default)]
pub struct QualityRegistry {
    plugins: HashMap<String, Box<dyn QualityPlugin>>,
}

impl QualityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_plugin<S: Into<String>>(&mut self, name: S, plugin: Box<dyn QualityPlugin>) {
        self.plugins.insert(name.into(), plugin);
    }

    pub fn remove_plugin(&mut self, name: &str) -> bool {
        self.plugins.remove(name).is_some()
    }

    pub fn get_plugin(&self, name: &str) -> Option<&dyn QualityPlugin> {
        self.plugins.get(name).map(|p| p.as_ref())
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }
}

/// Apply the named quality-control checks to `volume`, strictly in the
/// given order. Each check receives the volume produced by its
/// predecessor; auxiliary algorithm output is discarded. An unknown
/// check name aborts the pipeline with `RadarError::PluginNotFound`.
pub fn perform_quality_control<S: AsRef<str>>(
    registry: &QualityRegistry,
    volume: PolarVolume,
    checks: &[S],
) -> RadarResult<PolarVolume> {
    let mut volume = volume;
    for check in checks {
        let name = check.as_ref();
        let plugin = registry
            .get_plugin(name)
            .ok_or_else(|| RadarError::PluginNotFound(name.to_string()))?;
        log::debug!("applying quality control: {}", name);
        let result = plugin.process(volume)?;
        if let Some(algorithm) = &result.algorithm {
            log::debug!("check {} reported algorithm {}, discarded", name, algorithm);
        }
        volume = result.volume;
    }
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scan::PolarScan;
    use ndarray::Array2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records the number of scans it saw, marks the volume by
    /// appending a scan, and optionally reports an algorithm.
    struct RecordingPlugin {
        seen: Rc<RefCell<Vec<usize>>>,
        algorithm: Option<&'static str>,
    }

    impl QualityPlugin for RecordingPlugin {
        fn process(&self, mut volume: PolarVolume) -> RadarResult<QualityProcessResult> {
            self.seen.borrow_mut().push(volume.number_of_scans());
            volume.add_scan(PolarScan::new());
            Ok(match self.algorithm {
                Some(a) => QualityProcessResult::with_algorithm(volume, a),
                None => QualityProcessResult::volume(volume),
            })
        }
    }

    fn registry_with_two_checks(
        seen1: &Rc<RefCell<Vec<usize>>>,
        seen2: &Rc<RefCell<Vec<usize>>>,
        first_reports_algorithm: bool,
    ) -> QualityRegistry {
        let mut registry = QualityRegistry::new();
        registry.add_plugin(
            "qc.check.1",
            Box::new(RecordingPlugin {
                seen: Rc::clone(seen1),
                algorithm: first_reports_algorithm.then_some("poo-detector"),
            }),
        );
        registry.add_plugin(
            "qc.check.2",
            Box::new(RecordingPlugin {
                seen: Rc::clone(seen2),
                algorithm: None,
            }),
        );
        registry
    }

    #[test]
    fn test_checks_applied_in_order() {
        let seen1 = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::new(RefCell::new(Vec::new()));
        let registry = registry_with_two_checks(&seen1, &seen2, false);

        let result = perform_quality_control(
            &registry,
            PolarVolume::new(),
            &["qc.check.1", "qc.check.2"],
        )
        .unwrap();

        // Check 1 saw the empty input, check 2 saw check 1's output
        assert_eq!(vec![0], *seen1.borrow());
        assert_eq!(vec![1], *seen2.borrow());
        assert_eq!(2, result.number_of_scans());
    }

    #[test]
    fn test_algorithm_output_is_discarded() {
        let seen1 = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::new(RefCell::new(Vec::new()));
        let registry = registry_with_two_checks(&seen1, &seen2, true);

        let result = perform_quality_control(
            &registry,
            PolarVolume::new(),
            &["qc.check.1", "qc.check.2"],
        )
        .unwrap();

        // The second check still receives only the volume
        assert_eq!(vec![1], *seen2.borrow());
        assert_eq!(2, result.number_of_scans());
    }

    #[test]
    fn test_empty_check_list_returns_volume_unchanged() {
        let registry = QualityRegistry::new();
        let mut volume = PolarVolume::new();
        volume.add_scan(PolarScan::new());

        let result =
            perform_quality_control(&registry, volume, &Vec::<String>::new()).unwrap();
        assert_eq!(1, result.number_of_scans());
    }

    #[test]
    fn test_unknown_check_fails() {
        let registry = QualityRegistry::new();
        let result = perform_quality_control(&registry, PolarVolume::new(), &["missing"]);
        assert!(matches!(result, Err(RadarError::PluginNotFound(ref n)) if n == "missing"));
    }

    #[test]
    fn test_registry_lifecycle() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = QualityRegistry::new();
        registry.add_plugin(
            "qc.check.1",
            Box::new(RecordingPlugin {
                seen,
                algorithm: None,
            }),
        );
        assert!(registry.has_plugin("qc.check.1"));
        assert!(registry.remove_plugin("qc.check.1"));
        assert!(!registry.has_plugin("qc.check.1"));
        assert!(!registry.remove_plugin("qc.check.1"));
    }

    #[test]
    fn test_quality_field_lookup() {
        let field = QualityField::new("se.smhi.detector.poo", Array2::zeros((2, 3)));
        assert_eq!("se.smhi.detector.poo", field.how_task);
        assert_eq!(Some(0.0), field.value(2, 1));
        assert_eq!(None, field.value(3, 0));
    }
}
