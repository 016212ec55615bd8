use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Real-valued radar sample data
pub type RadarReal = f64;

/// 2D radar field (rays x bins)
pub type RayField = Array2<RadarReal>;

/// Classification of a single radar sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    /// Area was scanned but nothing was detected
    Undetect,
    /// No data available at the position
    Nodata,
    /// A valid measurement
    Data,
}

/// Storage type of a sample grid, derived from the assigned array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadarDataType {
    Undefined,
    Char,
    Uchar,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl std::fmt::Display for RadarDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RadarDataType::Undefined => write!(f, "UNDEFINED"),
            RadarDataType::Char => write!(f, "CHAR"),
            RadarDataType::Uchar => write!(f, "UCHAR"),
            RadarDataType::Short => write!(f, "SHORT"),
            RadarDataType::Int => write!(f, "INT"),
            RadarDataType::Long => write!(f, "LONG"),
            RadarDataType::Float => write!(f, "FLOAT"),
            RadarDataType::Double => write!(f, "DOUBLE"),
        }
    }
}

/// Typed sample grid, rows = rays and columns = range bins.
///
/// The storage type is kept so that products written back out retain
/// the resolution of the incoming data; all lookups widen to f64.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleGrid {
    U8(Array2<u8>),
    I8(Array2<i8>),
    U16(Array2<u16>),
    I16(Array2<i16>),
    I32(Array2<i32>),
    I64(Array2<i64>),
    F32(Array2<f32>),
    F64(Array2<f64>),
}

impl SampleGrid {
    /// Data type tag of this grid. Both 16-bit widths map to SHORT,
    /// matching the convention of a signed 16-bit container.
    pub fn datatype(&self) -> RadarDataType {
        match self {
            SampleGrid::U8(_) => RadarDataType::Uchar,
            SampleGrid::I8(_) => RadarDataType::Char,
            SampleGrid::U16(_) | SampleGrid::I16(_) => RadarDataType::Short,
            SampleGrid::I32(_) => RadarDataType::Int,
            SampleGrid::I64(_) => RadarDataType::Long,
            SampleGrid::F32(_) => RadarDataType::Float,
            SampleGrid::F64(_) => RadarDataType::Double,
        }
    }

    /// Number of range bins (columns)
    pub fn nbins(&self) -> usize {
        self.dim().1
    }

    /// Number of rays (rows)
    pub fn nrays(&self) -> usize {
        self.dim().0
    }

    /// (nrays, nbins)
    pub fn dim(&self) -> (usize, usize) {
        match self {
            SampleGrid::U8(a) => a.dim(),
            SampleGrid::I8(a) => a.dim(),
            SampleGrid::U16(a) => a.dim(),
            SampleGrid::I16(a) => a.dim(),
            SampleGrid::I32(a) => a.dim(),
            SampleGrid::I64(a) => a.dim(),
            SampleGrid::F32(a) => a.dim(),
            SampleGrid::F64(a) => a.dim(),
        }
    }

    /// Sample at (bin, ray) widened to f64, or None when out of bounds
    pub fn get(&self, bin: usize, ray: usize) -> Option<f64> {
        match self {
            SampleGrid::U8(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::I8(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::U16(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::I16(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::I32(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::I64(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::F32(a) => a.get((ray, bin)).map(|&v| v as f64),
            SampleGrid::F64(a) => a.get((ray, bin)).copied(),
        }
    }
}

impl From<Array2<u8>> for SampleGrid {
    fn from(a: Array2<u8>) -> Self {
        SampleGrid::U8(a)
    }
}

impl From<Array2<i8>> for SampleGrid {
    fn from(a: Array2<i8>) -> Self {
        SampleGrid::I8(a)
    }
}

impl From<Array2<u16>> for SampleGrid {
    fn from(a: Array2<u16>) -> Self {
        SampleGrid::U16(a)
    }
}

impl From<Array2<i16>> for SampleGrid {
    fn from(a: Array2<i16>) -> Self {
        SampleGrid::I16(a)
    }
}

impl From<Array2<i32>> for SampleGrid {
    fn from(a: Array2<i32>) -> Self {
        SampleGrid::I32(a)
    }
}

impl From<Array2<i64>> for SampleGrid {
    fn from(a: Array2<i64>) -> Self {
        SampleGrid::I64(a)
    }
}

impl From<Array2<f32>> for SampleGrid {
    fn from(a: Array2<f32>) -> Self {
        SampleGrid::F32(a)
    }
}

impl From<Array2<f64>> for SampleGrid {
    fn from(a: Array2<f64>) -> Self {
        SampleGrid::F64(a)
    }
}

/// Error types for polar volume processing
#[derive(Debug, thiserror::Error)]
pub enum RadarError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index out of bounds: {index} (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("quality plugin not found: {0}")]
    PluginNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("processing error: {0}")]
    Processing(String),
}

/// Result type for polar volume operations
pub type RadarResult<T> = Result<T, RadarError>;
