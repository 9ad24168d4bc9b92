use crate::model::ObjIssue;

/// Errors raised while loading assets and configuration or writing output.
///
/// Problems inside asset data are not errors: textures that fail to decode are replaced, and malformed OBJ
/// statements are skipped (see [`ObjIssue`]).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config parse error: {0}")]
    Config(#[from] ron::error::SpannedError),

    /// Configuration serialization error
    #[error("Config serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Geometry that references attributes it does not have
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] ObjIssue),

    /// A draw target whose size differs from the depth buffer's
    #[error("Target is {target:?} but the depth buffer is {depth:?}")]
    SizeMismatch { target: [usize; 2], depth: [usize; 2] },

    /// Image error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
