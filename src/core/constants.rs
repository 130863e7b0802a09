/// Animation timing and tracking constants.
///
/// Durations are in milliseconds; distances in CSS pixels, angles in degrees.
// Blink loop: delay before each blink is redrawn every cycle
pub const BLINK_INTERVAL_MIN_MS: u64 = 3_000;
pub const BLINK_INTERVAL_MAX_MS: u64 = 7_000;
pub const BLINK_DURATION_MS: u64 = 150;

// Peek while the password is visible
pub const PEEK_INTERVAL_MIN_MS: u64 = 2_000;
pub const PEEK_INTERVAL_MAX_MS: u64 = 5_000;
pub const PEEK_DURATION_MS: u64 = 800;

// Glance at the partner after typing starts
pub const LOOK_AT_PARTNER_MS: u64 = 800;

// Face tracking: pointer delta divisors and clamps
pub const FACE_X_DIVISOR: f32 = 20.0;
pub const FACE_Y_DIVISOR: f32 = 30.0;
pub const FACE_X_LIMIT: f32 = 15.0;
pub const FACE_Y_LIMIT: f32 = 10.0;

// Body lean: skew = clamp(-dx / divisor, ±limit)
pub const BODY_SKEW_DIVISOR: f32 = 120.0;
pub const BODY_SKEW_LIMIT_DEG: f32 = 6.0;

// Vertical position of the face point as a fraction of body height
pub const FACE_POINT_HEIGHT_FRACTION: f32 = 1.0 / 3.0;

// Eye height while blinking
pub const CLOSED_EYE_HEIGHT_PX: f32 = 2.0;

// Shared smoothing for body/socket changes
pub const TRANSITION_DURATION_MS: u64 = 700;
pub const TRANSITION_EASING: &str = "ease-in-out";
