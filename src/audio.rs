//! Sound cues and the fire-and-forget audio service
//!
//! Playback never fails the game: a missing or broken output device only
//! drops the cue.

use std::io::{self, Write};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Named sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Normal jump
    Jump,
    /// Jump launched while ducking
    MightyJump,
    /// Duck key pressed
    Duck,
    /// Runner hit an obstacle
    Die,
    /// Score reached a multiple of 100
    Checkpoint,
    /// Runner bounced off the top of the screen
    CeilingHit,
}

impl SoundCue {
    /// Cue to play for a simulation event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Jumped => Some(SoundCue::Jump),
            GameEvent::MightyJumped => Some(SoundCue::MightyJump),
            GameEvent::Ducked => Some(SoundCue::Duck),
            GameEvent::Died => Some(SoundCue::Die),
            GameEvent::Checkpoint(_) => Some(SoundCue::Checkpoint),
            GameEvent::CeilingHit => Some(SoundCue::CeilingHit),
            _ => None,
        }
    }
}

/// Consumer side: the game loop only ever calls `play`
pub trait AudioService {
    fn play(&mut self, cue: SoundCue);
}

/// An output device able to render cues
pub trait AudioBackend {
    fn emit(&mut self, cue: SoundCue, volume: f32) -> io::Result<()>;
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    dropped: u32,
}

impl AudioManager {
    pub fn new(backend: Option<Box<dyn AudioBackend>>) -> Self {
        if backend.is_none() {
            log::warn!("No audio backend available - audio disabled");
        }
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            dropped: 0,
        }
    }

    /// Manager with volume and mute taken from settings
    pub fn from_settings(settings: &Settings, backend: Option<Box<dyn AudioBackend>>) -> Self {
        let mut audio = Self::new(backend);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues the backend failed to play
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl AudioService for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.emit(cue, vol) {
            self.dropped += 1;
            log::debug!("Dropped {cue:?} cue: {e}");
        }
    }
}

/// Rings the terminal bell for the cues worth interrupting for
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioBackend for TerminalBell<W> {
    fn emit(&mut self, cue: SoundCue, _volume: f32) -> io::Result<()> {
        match cue {
            SoundCue::Die | SoundCue::Checkpoint => {
                self.out.write_all(b"\x07")?;
                self.out.flush()
            }
            _ => Ok(()),
        }
    }
}
