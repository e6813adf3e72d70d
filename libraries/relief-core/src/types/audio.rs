/// Audio collaborator types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a bundled sound asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options passed to `AudioEngine::load`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Restart from the beginning when the asset ends
    pub looping: bool,

    /// Start playing as soon as the asset is loaded
    pub autoplay: bool,

    /// Linear gain, 0.0 - 1.0
    pub volume: f32,
}

impl LoadOptions {
    /// Ambient loop: looping, not autoplaying
    pub fn ambient_loop(volume: f32) -> Self {
        Self {
            looping: true,
            autoplay: false,
            volume: volume.clamp(0.0, 1.0),
        }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::ambient_loop(1.0)
    }
}

/// Opaque handle to a loaded sound, issued by the audio engine
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundHandle(u64);

impl SoundHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Audio engine call, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioOperation {
    Load,
    Play,
    Pause,
    Stop,
    Unload,
}

impl AudioOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Unload => "unload",
        }
    }
}

impl fmt::Display for AudioOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambient_loop_clamps_volume() {
        let options = LoadOptions::ambient_loop(1.7);
        assert!(options.looping);
        assert!(!options.autoplay);
        assert_eq!(options.volume, 1.0);
    }
}
