//! Pulsegrid library - microphone-reactive quadrant shader display

pub mod audio;
pub mod cli;
pub mod layout;
pub mod params;
pub mod rendering;
pub mod state;
