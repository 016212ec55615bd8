use crate::core::quality::{perform_quality_control, QualityRegistry};
use crate::core::volume::PolarVolume;
use crate::types::RadarResult;
use std::path::Path;

/// File-format collaborator producing polar volumes. The concrete
/// format (ODIM HDF5 in the reference deployment) lives behind this
/// trait; callers inject an implementation.
pub trait VolumeLoader {
    fn load(&self, path: &Path) -> RadarResult<PolarVolume>;
}

/// Arguments for a quality-controlled volume generation job
#[derive(Debug, Clone, Default)]
pub struct QcRequest {
    /// Nominal date, YYYYMMDD
    pub date: Option<String>,
    /// Nominal time, HHMMSS
    pub time: Option<String>,
    /// Comma-delimited list of quality-control check names
    pub anomaly_qc: Option<String>,
}

impl QcRequest {
    /// The check names parsed from `anomaly_qc`, trimmed and with
    /// empty entries skipped
    pub fn checks(&self) -> Vec<String> {
        self.anomaly_qc
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Load a volume, stamp it with the requested nominal date/time and
/// run the requested quality-control chain over it.
pub fn generate_new_volume_with_qc<P: AsRef<Path>>(
    loader: &dyn VolumeLoader,
    registry: &QualityRegistry,
    filename: P,
    request: &QcRequest,
) -> RadarResult<PolarVolume> {
    log::info!(
        "generating quality-controlled volume from {}",
        filename.as_ref().display()
    );
    let mut volume = loader.load(filename.as_ref())?;

    if let Some(date) = &request.date {
        volume.set_date(date)?;
    }
    if let Some(time) = &request.time {
        volume.set_time(time)?;
    }

    let checks = request.checks();
    log::debug!("quality controls to apply: {:?}", checks);
    perform_quality_control(registry, volume, &checks)
}
