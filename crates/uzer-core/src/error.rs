use thiserror::Error;

/// Failure to turn a bundled resource into pixels.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image resource '{id}' could not be decoded: {reason}")]
    Decode { id: &'static str, reason: String },
    #[error("image resource '{id}' has unusable dimensions {width}x{height}")]
    Dimensions {
        id: &'static str,
        width: u32,
        height: u32,
    },
}
