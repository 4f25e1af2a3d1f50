pub mod cabinet;
pub mod rom_loader;
pub mod sound;

pub use cabinet::{SoundTrigger, SpaceInvadersCabinet};
pub use sound::{NullSoundAdapter, SoundAdapter};
