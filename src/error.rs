use thiserror::Error;

/// Failures that can happen while talking to the dog API or decoding what it sends.
///
/// Every variant is recovered where the fetch resolves; none of them reach the
/// rendering layer as a panic. `Network` and `Status` are network failures,
/// `Decode` and `Image` are decode failures.
///
/// The type is `Clone` so it can travel inside iced messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    /// The request could not complete (DNS, connect, timeout, reset...)
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-success status code
    #[error("server responded with HTTP {0}")]
    Status(u16),

    /// The response body did not have the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Downloaded photo bytes could not be decoded
    #[error("could not decode image: {0}")]
    Image(String),
}

impl GalleryError {
    /// True for failures where the response never arrived intact
    pub fn is_network_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status(_))
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<image::ImageError> for GalleryError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}
