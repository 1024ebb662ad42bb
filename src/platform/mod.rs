//! Platform abstraction layer
//!
//! Handles everything outside the simulation:
//! - Frame pacing
//! - Input events
//! - The crossterm terminal frontend

pub mod clock;
pub mod input;
pub mod terminal;

pub use clock::FrameClock;
pub use input::{InputEvent, InputSource, Key, ScriptedInput, to_tick_input};
pub use terminal::{TerminalGuard, TerminalInput};
