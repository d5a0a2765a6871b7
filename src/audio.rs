//! Sound effects and volume handling
//!
//! Maps gameplay events to named sounds and forwards them to whichever
//! `AudioPlayer` backend the platform provides.

use crate::platform::AudioPlayer;
use crate::settings::Settings;
use crate::sim::{GameEvent, Outcome};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player shot destroyed an invader
    HitInvader,
    /// Player lost a life
    HitPlayer,
    /// Formation wiped out
    Victory,
    /// Out of lives
    Defeat,
}

impl SoundEffect {
    /// Backend sound id
    pub fn id(self) -> &'static str {
        match self {
            SoundEffect::HitInvader => "hit_invader",
            SoundEffect::HitPlayer => "hit_player",
            SoundEffect::Victory => "victory",
            SoundEffect::Defeat => "defeat",
        }
    }

    /// Sound for a simulation event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::InvaderHit => Some(SoundEffect::HitInvader),
            GameEvent::PlayerHit => Some(SoundEffect::HitPlayer),
            GameEvent::PlayerFired | GameEvent::InvaderFired | GameEvent::InvaderEscaped => None,
        }
    }

    pub fn for_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Victory => SoundEffect::Victory,
            Outcome::Defeat => SoundEffect::Defeat,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager<A> {
    backend: A,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<A: AudioPlayer> AudioManager<A> {
    pub fn new(backend: A) -> Self {
        let mut manager = Self {
            backend,
            master_volume: 1.0,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.sync_volume();
        manager
    }

    /// Build a manager with volumes taken from settings
    pub fn from_settings(backend: A, settings: &Settings) -> Self {
        let mut manager = Self::new(backend);
        manager.master_volume = settings.master_volume.clamp(0.0, 1.0);
        manager.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        manager.muted = settings.muted;
        manager.sync_volume();
        manager
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.sync_volume();
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
        self.sync_volume();
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.sync_volume();
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn sync_volume(&mut self) {
        let vol = self.effective_volume();
        self.backend.set_volume(vol);
    }

    /// Play a sound effect once
    pub fn play(&mut self, effect: SoundEffect) {
        if self.effective_volume() <= 0.0 {
            return;
        }
        self.backend.play(effect.id(), false);
    }

    /// Play whatever sounds a batch of simulation events calls for
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().copied().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn stop(&mut self, effect: SoundEffect) {
        self.backend.stop(effect.id());
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }
}

/// Backend with no output device: logs what would have played
#[derive(Debug, Default)]
pub struct LogAudio {
    volume: f32,
}

impl AudioPlayer for LogAudio {
    fn play(&mut self, sound: &str, looping: bool) {
        log::debug!("play '{}' (loop: {}, volume: {:.2})", sound, looping, self.volume);
    }

    fn stop(&mut self, sound: &str) {
        log::debug!("stop '{}'", sound);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}
