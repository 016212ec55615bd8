//! Core polar volume data model and processing modules

pub mod navigation;
pub mod quality;
pub mod scan;
pub mod scan_param;
pub mod volume;

// Re-export main types
pub use navigation::{shared_navigator, PolarNavigator, SharedNavigator};
pub use quality::{
    perform_quality_control, QualityField, QualityPlugin, QualityProcessResult, QualityRegistry,
};
pub use scan::PolarScan;
pub use scan_param::PolarScanParameter;
pub use volume::PolarVolume;
