use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("glTF decode failed: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("glTF primitive has no positions")]
    MissingPositions,
    #[error("glTF contains no triangle geometry")]
    Empty,
}

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("unsupported glTF image format {0:?}")]
    UnsupportedFormat(gltf::image::Format),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownKey(String),
    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}
