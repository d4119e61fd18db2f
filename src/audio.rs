use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use crate::error::{CoinError, Result};

/// The flip sound, read once and replayed from the start on every flip.
pub struct FlipSound {
    // Dropping the stream silences every sink created from it.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    clip: Arc<[u8]>,
    sink: Option<Sink>,
    volume: f32,
}

impl FlipSound {
    pub fn load(path: &Path, volume: f32) -> Result<Self> {
        let clip: Arc<[u8]> = std::fs::read(path)
            .map_err(|e| CoinError::io(path, e))?
            .into();
        // Validate once so a bad file is reported at startup rather than on click.
        Decoder::new(Cursor::new(clip.clone()))?;

        let (stream, handle) = OutputStream::try_default()?;
        log::info!("loaded flip sound {}", path.display());

        Ok(Self {
            _stream: stream,
            handle,
            clip,
            sink: None,
            volume: clamp_volume(volume),
        })
    }

    /// Load the clip, logging and returning None when sound is unavailable.
    pub fn try_load(path: &Path, volume: f32) -> Option<Self> {
        match Self::load(path, volume) {
            Ok(sound) => Some(sound),
            Err(e) => {
                log::warn!("flip sound disabled: {e}");
                None
            }
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume);
        }
    }

    /// Restart the clip from the beginning.
    pub fn play(&mut self) -> Result<()> {
        if let Some(previous) = self.sink.take() {
            previous.stop();
        }

        let source = Decoder::new(Cursor::new(self.clip.clone()))?;
        let sink = Sink::try_new(&self.handle)?;
        sink.set_volume(self.volume);
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_is_clamped() {
        assert_eq!(clamp_volume(2.0), 1.0);
        assert_eq!(clamp_volume(-1.0), 0.0);
        assert_eq!(clamp_volume(0.25), 0.25);
        assert_eq!(clamp_volume(f32::NAN), 1.0);
    }

    #[test]
    fn bundled_clip_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/flip.wav");
        let clip = std::fs::read(path).unwrap();
        assert!(Decoder::new(Cursor::new(clip)).is_ok());
    }

    #[test]
    fn missing_clip_is_an_io_error() {
        let err = FlipSound::load(Path::new("no/such/flip.wav"), 1.0)
            .err()
            .expect("load should fail");
        assert!(matches!(err, CoinError::Io { .. }));
    }
}
