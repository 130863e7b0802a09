use super::character::{BodyTransform, Character, CharacterSpec, Lean, Placement};
use super::gaze::{face_offset, EyeRig, EyeState, Rect};
use super::interaction::{derive_mode, InteractionFlags, InteractionMode};
use glam::Vec2;

/// Everything one frame depends on, captured once so every character sees
/// the same pointer position and flags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RigInputs {
    pub pointer: Vec2,
    pub flags: InteractionFlags,
    pub blinking: [bool; 4],
    pub peeking: bool,
    pub looking_at_partner: bool,
    pub bodies: [Option<Rect>; 4],
    pub eyes: [[Option<Rect>; 2]; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterFrame {
    pub character: Character,
    pub body: BodyTransform,
    pub height: f32,
    /// Top-left of the eye group inside the body.
    pub socket: Vec2,
    pub mouth: Option<Vec2>,
    pub eyes: [EyeState; 2],
    pub blinking: bool,
    pub peeking: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigFrame {
    pub mode: InteractionMode,
    pub characters: [CharacterFrame; 4],
}

impl RigFrame {
    #[inline]
    pub fn get(&self, character: Character) -> &CharacterFrame {
        &self.characters[character.index()]
    }
}

pub fn compose(inputs: &RigInputs, cast: &[CharacterSpec; 4]) -> RigFrame {
    let mode = derive_mode(&inputs.flags, inputs.peeking, inputs.looking_at_partner);
    RigFrame {
        mode,
        characters: std::array::from_fn(|i| compose_character(&cast[i], inputs, mode)),
    }
}

fn compose_character(
    spec: &CharacterSpec,
    inputs: &RigInputs,
    mode: InteractionMode,
) -> CharacterFrame {
    let i = spec.character.index();
    let leaning_in = inputs.flags.is_leaning_in();
    let offset = face_offset(inputs.bodies[i], inputs.pointer);

    let blinking = spec.blinks() && inputs.blinking[i];
    let source = mode.gaze_source(spec);
    let rig = EyeRig::new(spec.eyes.max_distance, spec.eyes.size);
    let eyes = inputs.eyes[i].map(|anchor| rig.state(source, anchor, inputs.pointer, blinking));

    CharacterFrame {
        character: spec.character,
        body: body_transform(spec, mode, leaning_in, offset.body_skew_deg),
        height: if leaning_in {
            spec.leaning_height
        } else {
            spec.height
        },
        socket: place(&spec.socket, mode, offset.face),
        mouth: spec.mouth.as_ref().map(|m| place(m, mode, offset.face)),
        eyes,
        blinking,
        peeking: spec.forced.peeking.is_some()
            && mode == InteractionMode::PasswordRevealed { peeking: true },
    }
}

fn body_transform(
    spec: &CharacterSpec,
    mode: InteractionMode,
    leaning_in: bool,
    body_skew_deg: f32,
) -> BodyTransform {
    let lean = match (mode, spec.lean.partner, spec.lean.leaning_in) {
        (InteractionMode::PasswordRevealed { .. }, _, _) => return BodyTransform::default(),
        (InteractionMode::LookingAtPartner, Some(partner), _) => partner,
        (_, _, Some(lean)) if leaning_in => lean,
        _ => Lean::TRACKING,
    };
    lean.apply(body_skew_deg)
}

fn place(placement: &Placement, mode: InteractionMode, face: Vec2) -> Vec2 {
    match mode {
        InteractionMode::PasswordRevealed { .. } => placement.revealed,
        InteractionMode::LookingAtPartner => placement
            .partner
            .unwrap_or(placement.tracking + face),
        InteractionMode::Tracking => placement.tracking + face,
    }
}
