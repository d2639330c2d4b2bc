use std::path::PathBuf;

pub use crate::antenna::{AntennaPosition, AntennaSet, BaselineVector};
pub use crate::baseline::{BaselineKey, BaselineMultiplicityMap};
pub use crate::math::bounds::BoundingBox;
pub use crate::uv::{UvConfig, UvSample};

/// Errors raised while reading or writing a persisted antenna layout.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    #[error("malformed record on line {line} ({content:?}): {reason}")]
    MalformedRecord {
        line: usize,
        content: String,
        reason: String,
    },
    #[error("layout file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;
