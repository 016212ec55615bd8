//! polarvol: A Fast, Modular Polar Radar Volume Processor
//!
//! This library provides the polar data model used by weather radar
//! processing chains (scan parameters, scans, volumes with shared site
//! navigation), geometric scan selection, and an injectable
//! quality-control plugin pipeline.

pub mod core;
pub mod io;
pub mod types;

// Re-export main types and functions for easier access
pub use types::{RadarDataType, RadarError, RadarResult, RayField, SampleGrid, ValueType};

pub use crate::core::{
    perform_quality_control, shared_navigator, PolarNavigator, PolarScan, PolarScanParameter,
    PolarVolume, QualityField, QualityPlugin, QualityProcessResult, QualityRegistry,
    SharedNavigator,
};

pub use io::{generate_new_volume_with_qc, QcRequest, VolumeLoader};
