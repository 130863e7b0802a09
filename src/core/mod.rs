pub mod blink;
pub mod character;
pub mod compositor;
pub mod config;
pub mod constants;
pub mod gaze;
pub mod interaction;
pub mod peek;
pub mod pointer;
pub mod rig;
pub mod timer;

