//! Platform-supplied sound triggers for the Space Invaders cabinet.
//!
//! The cabinet itself never produces audio samples — it only detects the
//! port edges the original hardware used to fire fixed sound effects and
//! forwards them here. A GUI frontend would wire this to sample playback;
//! headless callers can use [`NullSoundAdapter`].

use crate::cabinet::SoundTrigger;

/// Receives cabinet sound-trigger events as they occur.
pub trait SoundAdapter {
    fn trigger(&mut self, sound: SoundTrigger);
}

/// Discards every trigger. Used by the headless `cabinet` CLI harness and
/// in tests where audio playback is irrelevant.
#[derive(Debug, Default)]
pub struct NullSoundAdapter;

impl SoundAdapter for NullSoundAdapter {
    fn trigger(&mut self, _sound: SoundTrigger) {}
}
