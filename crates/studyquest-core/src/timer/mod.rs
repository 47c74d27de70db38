mod bell;

pub use bell::{BellTimer, TimerState};
