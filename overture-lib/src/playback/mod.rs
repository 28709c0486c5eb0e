//! Playback control: the public controller, shared session state, and the
//! render thread that feeds the output device.

pub mod error;
pub mod player;
mod settings;
mod state;

pub use error::PlaybackError;
pub use player::Player;
pub use settings::PlayerSettings;
