use std::{io::Cursor, sync::Arc};

use anyhow::{anyhow, Result};
use rodio::{decoder::DecoderError, Decoder, OutputStream, OutputStreamHandle, Sink};

/// An encoded sound effect held in memory.
///
/// The bytes are decoded once when the sound is created so that a broken file is
/// reported at load time; each playback decodes a fresh source from the shared bytes.
#[derive(Clone, Debug)]
pub struct Sound {
    bytes: Arc<[u8]>,
}

impl Sound {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Result<Self, DecoderError> {
        let bytes = bytes.into();
        Decoder::new(Cursor::new(Arc::clone(&bytes)))?;
        Ok(Self { bytes })
    }

    fn decoder(&self) -> Result<Decoder<Cursor<Arc<[u8]>>>, DecoderError> {
        Decoder::new(Cursor::new(Arc::clone(&self.bytes)))
    }
}

/// Plays sound effects on the default output device.
pub struct AudioSystem {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
}

impl AudioSystem {
    /// Open the default audio output device.
    ///
    /// A missing device is not an error: the system stays silent and
    /// [`AudioSystem::is_available`] reports false.
    pub fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, stream_handle)) => Self {
                _stream: Some(stream),
                stream_handle: Some(stream_handle),
            },
            Err(e) => {
                log::warn!("Failed to initialize audio: {}. Audio will be unavailable.", e);
                Self::silent()
            }
        }
    }

    /// An audio system without an output device. Every `play` is a no-op.
    pub fn silent() -> Self {
        Self {
            _stream: None,
            stream_handle: None,
        }
    }

    /// Check if audio is available and working.
    pub fn is_available(&self) -> bool {
        self.stream_handle.is_some()
    }

    /// Play a sound once. Multiple sounds can play simultaneously.
    pub fn play(&self, sound: &Sound) -> Result<()> {
        let Some(stream_handle) = self.stream_handle.as_ref() else {
            return Ok(());
        };

        let source = sound
            .decoder()
            .map_err(|e| anyhow!("Failed to decode sound: {}", e))?;
        let sink = Sink::try_new(stream_handle)
            .map_err(|e| anyhow!("Failed to create audio sink: {}", e))?;
        sink.append(source);
        sink.detach();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal 8-bit mono PCM WAV with `samples` samples of silence.
    fn silent_wav(samples: u32) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + samples).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&8000u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&samples.to_le_bytes());
        out.extend(std::iter::repeat(128u8).take(samples as usize));
        out
    }

    #[test]
    fn valid_wav_is_accepted() {
        assert!(Sound::from_bytes(silent_wav(64)).is_ok());
    }

    #[test]
    fn junk_is_rejected_at_load() {
        assert!(Sound::from_bytes(vec![1u8, 2, 3, 4]).is_err());
    }

    #[test]
    fn silent_system_swallows_playback() {
        let audio = AudioSystem::silent();
        let sound = Sound::from_bytes(silent_wav(16)).unwrap();
        assert!(!audio.is_available());
        assert!(audio.play(&sound).is_ok());
    }
}
