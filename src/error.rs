use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoinError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to parse SVG: {0}")]
    Svg(#[from] resvg::usvg::Error),

    #[error("SVG has an empty or invalid size")]
    InvalidSvgSize,

    #[error("decode task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("failed to decode flip sound: {0}")]
    Audio(#[from] rodio::decoder::DecoderError),

    #[error("no audio output device: {0}")]
    AudioDevice(#[from] rodio::StreamError),

    #[error("failed to create audio sink: {0}")]
    AudioSink(#[from] rodio::PlayError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable graphics adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open graphics device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

impl CoinError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoinError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CoinError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_file() {
        let err = CoinError::io(
            "assets/coin_head.svg",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "failed to read assets/coin_head.svg: missing");
        assert!(std::error::Error::source(&err).is_some());
    }
}
