use std::path::PathBuf;

/// `strata.ron` could not be read, written or understood.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{source}", path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("config not representable as RON: {0}")]
    Encode(#[from] ron::Error),
}

/// Out-of-range tall plant decoration settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlantConfigError {
    #[error("{field} must be within {min}..={max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("min_height {min_height} exceeds max_height {max_height}")]
    InvertedHeights { min_height: u32, max_height: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("preview size must be non-zero")]
    EmptyGrid,

    #[error("preview row {row} has {len} cells, expected {width}")]
    RaggedGrid { row: usize, len: usize, width: usize },

    #[error("failed to encode preview image: {0}")]
    Image(#[from] image::ImageError),
}
