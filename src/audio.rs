// src/audio.rs
//! Ambient music and click feedback
//!
//! Audio is strictly optional: if no output device exists or a file is
//! missing, the scene runs silent and logs a warning. Music loops on a
//! dedicated sink so it can be paused and resumed; clicks are decoded
//! from a cached byte buffer and play on throwaway detached sinks.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device available: {0}")]
    DeviceInit(String),

    #[error("audio file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to decode audio file {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Music pause state, tracked separately from the sink so the toggle
/// logic stays testable without an output device
#[derive(Debug, Clone, Copy)]
pub struct MusicState {
    playing: bool,
}

impl MusicState {
    pub fn new() -> Self {
        Self { playing: true }
    }

    /// Flip the state and return the new value
    pub fn toggle(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl Default for MusicState {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns the output stream and both sound channels
pub struct AudioSystem {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    music_sink: Option<Sink>,
    music: MusicState,
    click_bytes: Option<Vec<u8>>,
    click_volume: f32,
}

impl AudioSystem {
    pub fn new() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::DeviceInit(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            stream_handle,
            music_sink: None,
            music: MusicState::new(),
            click_bytes: None,
            click_volume: 1.0,
        })
    }

    /// Start the looping background track
    pub fn play_music(&mut self, path: &Path, volume: f32) -> Result<(), AudioError> {
        let file = File::open(path).map_err(|_| AudioError::FileNotFound(path.to_path_buf()))?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;
        sink.set_volume(volume);
        sink.append(source.repeat_infinite());
        self.music_sink = Some(sink);
        self.music = MusicState::new();
        Ok(())
    }

    /// Read and validate the click sample so later plays cannot fail
    pub fn load_click(&mut self, path: &Path, volume: f32) -> Result<(), AudioError> {
        let bytes =
            std::fs::read(path).map_err(|_| AudioError::FileNotFound(path.to_path_buf()))?;
        Decoder::new(Cursor::new(bytes.clone())).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.click_bytes = Some(bytes);
        self.click_volume = volume;
        Ok(())
    }

    /// Fire the click sample, overlapping with any clicks still playing
    pub fn play_click(&self) {
        let Some(bytes) = &self.click_bytes else {
            return;
        };
        let Ok(source) = Decoder::new(Cursor::new(bytes.clone())) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(&self.stream_handle) {
            sink.set_volume(self.click_volume);
            sink.append(source);
            sink.detach();
        }
    }

    /// Pause or resume the music, returning true when now playing
    pub fn toggle_music(&mut self) -> bool {
        let playing = self.music.toggle();
        if let Some(sink) = &self.music_sink {
            if playing {
                sink.play();
            } else {
                sink.pause();
            }
        }
        playing
    }

    pub fn music_playing(&self) -> bool {
        self.music.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_toggle_alternates() {
        let mut state = MusicState::new();
        assert!(state.is_playing());
        assert!(!state.toggle());
        assert!(state.toggle());
        assert!(state.is_playing());
    }

    #[test]
    fn errors_name_the_file() {
        let err = AudioError::FileNotFound(PathBuf::from("piano.wav"));
        assert!(err.to_string().contains("piano.wav"));
        let err = AudioError::Decode {
            path: PathBuf::from("click.wav"),
            reason: "bad header".into(),
        };
        assert!(err.to_string().contains("click.wav"));
        assert!(err.to_string().contains("bad header"));
    }
}
