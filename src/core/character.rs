use glam::Vec2;

// Static cast table: look, layout and per-mode posture of each character.
// Positions are CSS pixels relative to the character's own box.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Character {
    Purple,
    Black,
    Orange,
    Yellow,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::Purple,
        Character::Black,
        Character::Orange,
        Character::Yellow,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Character::Purple => "purple",
            Character::Black => "black",
            Character::Orange => "orange",
            Character::Yellow => "yellow",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EyeKind {
    /// White eyeball with a pupil inside; can blink.
    Eyeball { sclera: &'static str },
    /// Bare pupil drawn straight on the body.
    Pupil,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EyeSpec {
    pub kind: EyeKind,
    pub size: f32,
    pub pupil_size: f32,
    pub pupil_color: &'static str,
    pub gap: f32,
    pub max_distance: f32,
}

/// Top-left of a feature group (eyes or mouth) in each interaction mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Offset by the clamped face shift while tracking the pointer.
    pub tracking: Vec2,
    pub revealed: Vec2,
    pub partner: Option<Vec2>,
}

/// Rendered body transform; CSS origin is bottom center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyTransform {
    pub skew_deg: f32,
    pub translate_x: f32,
}

impl BodyTransform {
    pub fn css(&self) -> String {
        if self.translate_x == 0.0 {
            format!("skewX({}deg)", self.skew_deg)
        } else {
            format!("skewX({}deg) translateX({}px)", self.skew_deg, self.translate_x)
        }
    }
}

/// Affine lean: `skew * multiplier + offset_deg`, plus a sideways shift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lean {
    pub multiplier: f32,
    pub offset_deg: f32,
    pub translate_x: f32,
}

impl Lean {
    pub const TRACKING: Lean = Lean {
        multiplier: 1.0,
        offset_deg: 0.0,
        translate_x: 0.0,
    };

    pub fn apply(&self, body_skew_deg: f32) -> BodyTransform {
        BodyTransform {
            skew_deg: body_skew_deg * self.multiplier + self.offset_deg,
            translate_x: self.translate_x,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeanRules {
    /// While typing or while a non-empty password is hidden.
    pub leaning_in: Option<Lean>,
    /// While looking at the partner; wins over `leaning_in`.
    pub partner: Option<Lean>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcedLooks {
    pub revealed: Vec2,
    pub peeking: Option<Vec2>,
    pub partner: Option<Vec2>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterSpec {
    pub character: Character,
    pub color: &'static str,
    pub left: f32,
    pub width: f32,
    pub height: f32,
    pub leaning_height: f32,
    pub border_radius: &'static str,
    pub z_index: i32,
    pub eyes: EyeSpec,
    pub socket: Placement,
    pub mouth: Option<Placement>,
    pub lean: LeanRules,
    pub forced: ForcedLooks,
}

impl CharacterSpec {
    pub fn blinks(&self) -> bool {
        matches!(self.eyes.kind, EyeKind::Eyeball { .. })
    }
}

const PUPIL_DARK: &str = "#2D2D2D";

pub static CAST: [CharacterSpec; 4] = [
    CharacterSpec {
        character: Character::Purple,
        color: "#6C3FF5",
        left: 70.0,
        width: 180.0,
        height: 400.0,
        leaning_height: 440.0,
        border_radius: "10px 10px 0 0",
        z_index: 1,
        eyes: EyeSpec {
            kind: EyeKind::Eyeball { sclera: "white" },
            size: 18.0,
            pupil_size: 7.0,
            pupil_color: PUPIL_DARK,
            gap: 32.0,
            max_distance: 5.0,
        },
        socket: Placement {
            tracking: Vec2::new(45.0, 40.0),
            revealed: Vec2::new(20.0, 35.0),
            partner: Some(Vec2::new(55.0, 65.0)),
        },
        mouth: None,
        lean: LeanRules {
            leaning_in: Some(Lean {
                multiplier: 1.0,
                offset_deg: -12.0,
                translate_x: 40.0,
            }),
            partner: None,
        },
        forced: ForcedLooks {
            revealed: Vec2::new(-4.0, -4.0),
            peeking: Some(Vec2::new(4.0, 5.0)),
            partner: Some(Vec2::new(3.0, 4.0)),
        },
    },
    CharacterSpec {
        character: Character::Black,
        color: "#2D2D2D",
        left: 240.0,
        width: 120.0,
        height: 310.0,
        leaning_height: 310.0,
        border_radius: "8px 8px 0 0",
        z_index: 2,
        eyes: EyeSpec {
            kind: EyeKind::Eyeball { sclera: "white" },
            size: 16.0,
            pupil_size: 6.0,
            pupil_color: PUPIL_DARK,
            gap: 24.0,
            max_distance: 4.0,
        },
        socket: Placement {
            tracking: Vec2::new(26.0, 32.0),
            revealed: Vec2::new(10.0, 28.0),
            partner: Some(Vec2::new(32.0, 12.0)),
        },
        mouth: None,
        lean: LeanRules {
            leaning_in: Some(Lean {
                multiplier: 1.5,
                offset_deg: 0.0,
                translate_x: 0.0,
            }),
            partner: Some(Lean {
                multiplier: 1.5,
                offset_deg: 10.0,
                translate_x: 20.0,
            }),
        },
        forced: ForcedLooks {
            revealed: Vec2::new(-4.0, -4.0),
            peeking: None,
            partner: Some(Vec2::new(0.0, -4.0)),
        },
    },
    CharacterSpec {
        character: Character::Orange,
        color: "#FF9B6B",
        left: 0.0,
        width: 240.0,
        height: 200.0,
        leaning_height: 200.0,
        border_radius: "120px 120px 0 0",
        z_index: 3,
        eyes: EyeSpec {
            kind: EyeKind::Pupil,
            size: 12.0,
            pupil_size: 12.0,
            pupil_color: PUPIL_DARK,
            gap: 32.0,
            max_distance: 5.0,
        },
        socket: Placement {
            tracking: Vec2::new(82.0, 90.0),
            revealed: Vec2::new(50.0, 85.0),
            partner: None,
        },
        mouth: None,
        lean: LeanRules {
            leaning_in: None,
            partner: None,
        },
        forced: ForcedLooks {
            revealed: Vec2::new(-5.0, -4.0),
            peeking: None,
            partner: None,
        },
    },
    CharacterSpec {
        character: Character::Yellow,
        color: "#E8D754",
        left: 310.0,
        width: 140.0,
        height: 230.0,
        leaning_height: 230.0,
        border_radius: "70px 70px 0 0",
        z_index: 4,
        eyes: EyeSpec {
            kind: EyeKind::Pupil,
            size: 12.0,
            pupil_size: 12.0,
            pupil_color: PUPIL_DARK,
            gap: 24.0,
            max_distance: 5.0,
        },
        socket: Placement {
            tracking: Vec2::new(52.0, 40.0),
            revealed: Vec2::new(20.0, 35.0),
            partner: None,
        },
        mouth: Some(Placement {
            tracking: Vec2::new(40.0, 88.0),
            revealed: Vec2::new(10.0, 88.0),
            partner: None,
        }),
        lean: LeanRules {
            leaning_in: None,
            partner: None,
        },
        forced: ForcedLooks {
            revealed: Vec2::new(-5.0, -4.0),
            peeking: None,
            partner: None,
        },
    },
];

#[inline]
pub fn spec(character: Character) -> &'static CharacterSpec {
    &CAST[character.index()]
}
