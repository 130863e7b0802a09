use super::constants::*;
use glam::Vec2;

/// Viewport-space bounding box of a rendered element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Zero-sized or non-finite boxes belong to elements that are not laid out yet.
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.left.is_finite()
            && self.top.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Point a body "looks from": horizontally centered, a third of the way down.
    pub fn face_point(&self) -> Vec2 {
        Vec2::new(
            self.left + self.width / 2.0,
            self.top + self.height * FACE_POINT_HEIGHT_FRACTION,
        )
    }
}

fn measured(anchor: Option<Rect>) -> Option<Rect> {
    anchor.filter(Rect::is_measurable)
}

/// Where a pupil takes its offset from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GazeSource {
    Tracking,
    Forced(Vec2),
}

/// Offset from `center` towards `target`, with length capped at `max_distance`.
pub fn gaze_vector(center: Vec2, target: Vec2, max_distance: f32) -> Vec2 {
    let delta = target - center;
    let distance = delta.length().min(max_distance.max(0.0));
    if distance == 0.0 {
        return Vec2::ZERO;
    }
    let angle = delta.y.atan2(delta.x);
    Vec2::new(angle.cos() * distance, angle.sin() * distance)
}

/// Resolve a pupil offset. A forced look always wins, even before layout.
pub fn resolve_gaze(
    source: GazeSource,
    anchor: Option<Rect>,
    pointer: Vec2,
    max_distance: f32,
) -> Vec2 {
    match source {
        GazeSource::Forced(v) => v,
        GazeSource::Tracking => match measured(anchor) {
            Some(rect) => gaze_vector(rect.center(), pointer, max_distance),
            None => Vec2::ZERO,
        },
    }
}

/// Pointer-derived face shift and body lean of one character.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FaceOffset {
    pub face: Vec2,
    pub body_skew_deg: f32,
}

pub fn face_offset(anchor: Option<Rect>, pointer: Vec2) -> FaceOffset {
    let Some(rect) = measured(anchor) else {
        return FaceOffset::default();
    };
    let delta = pointer - rect.face_point();
    FaceOffset {
        face: Vec2::new(
            (delta.x / FACE_X_DIVISOR).clamp(-FACE_X_LIMIT, FACE_X_LIMIT),
            (delta.y / FACE_Y_DIVISOR).clamp(-FACE_Y_LIMIT, FACE_Y_LIMIT),
        ),
        body_skew_deg: (-delta.x / BODY_SKEW_DIVISOR)
            .clamp(-BODY_SKEW_LIMIT_DEG, BODY_SKEW_LIMIT_DEG),
    }
}

/// Visible state of one eye or bare pupil.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeState {
    pub open: bool,
    pub height: f32,
    pub pupil: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeRig {
    pub max_distance: f32,
    pub open_height: f32,
    pub closed_height: f32,
}

impl EyeRig {
    pub const fn new(max_distance: f32, open_height: f32) -> Self {
        Self {
            max_distance,
            open_height,
            closed_height: CLOSED_EYE_HEIGHT_PX,
        }
    }

    pub fn state(
        &self,
        source: GazeSource,
        anchor: Option<Rect>,
        pointer: Vec2,
        blinking: bool,
    ) -> EyeState {
        EyeState {
            open: !blinking,
            height: if blinking {
                self.closed_height
            } else {
                self.open_height
            },
            pupil: resolve_gaze(source, anchor, pointer, self.max_distance),
        }
    }
}
