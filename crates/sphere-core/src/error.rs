use thiserror::Error;

/// Errors surfaced by the core. Out-of-range control values are clamped and
/// low frame rates only drive the quality controller, so neither appears here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("point capacity must be at least 1 (got {max_count})")]
    InvalidCapacity { max_count: u32 },

    #[error("minimum particle count {min} exceeds capacity {max}")]
    InvalidCountRange { min: u32, max: u32 },

    #[error("point buffers are not attached yet")]
    NotReady,

    #[error("point cloud has been disposed")]
    Disposed,
}

pub type Result<T> = std::result::Result<T, CoreError>;
