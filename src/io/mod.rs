//! I/O boundary for polar volume processing

pub mod loader;

pub use loader::{generate_new_volume_with_qc, QcRequest, VolumeLoader};
