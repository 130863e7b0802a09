// DOM wiring constants for the browser front-end.

// Host page elements
pub const STAGE_ID: &str = "rig-stage"; // container the characters are built into
pub const PASSWORD_FIELD_ID: &str = "password";
pub const CONFIRM_PASSWORD_FIELD_ID: &str = "confirm-password";
pub const TYPING_ATTR: &str = "data-rig-typing"; // focused element with this attribute = typing

// Generated elements
pub const CHARACTER_ATTR: &str = "data-character";
pub const BODY_CLASS: &str = "rig-body";
pub const EYE_CLASS: &str = "rig-eye";
pub const PUPIL_CLASS: &str = "rig-pupil";

// Per-eye smoothing; body and socket moves use the shared timing transition
pub const EYE_TRANSITION_CSS: &str = "all 0.15s";
pub const PUPIL_TRANSITION_CSS: &str = "transform 0.1s ease-out";

// Yellow character's mouth bar
pub const MOUTH_WIDTH_PX: f32 = 80.0;
pub const MOUTH_HEIGHT_PX: f32 = 4.0;
pub const MOUTH_COLOR: &str = "#2D2D2D";
