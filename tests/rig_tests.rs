// Host-side tests for the interaction state machine, compositor and rig runtime.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod core {
    pub mod blink {
        include!("../src/core/blink.rs");
    }
    pub mod character {
        include!("../src/core/character.rs");
    }
    pub mod compositor {
        include!("../src/core/compositor.rs");
    }
    pub mod config {
        include!("../src/core/config.rs");
    }
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod gaze {
        include!("../src/core/gaze.rs");
    }
    pub mod interaction {
        include!("../src/core/interaction.rs");
    }
    pub mod peek {
        include!("../src/core/peek.rs");
    }
    pub mod rig {
        include!("../src/core/rig.rs");
    }
    pub mod timer {
        include!("../src/core/timer.rs");
    }
}

use crate::core::character::*;
use crate::core::compositor::*;
use crate::core::config::*;
use crate::core::gaze::*;
use crate::core::interaction::*;
use crate::core::rig::*;
use crate::core::timer::Timers;
use glam::Vec2;
use std::time::Duration;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// Bodies laid out along a 480px stage whose floor is at y=600.
fn laid_out_inputs(pointer: Vec2) -> RigInputs {
    let bodies = std::array::from_fn(|i| {
        let s = &CAST[i];
        Some(Rect::new(s.left, 600.0 - s.height, s.width, s.height))
    });
    let eyes = std::array::from_fn(|i| {
        let s = &CAST[i];
        let top = 600.0 - s.height + s.socket.tracking.y;
        let left = s.left + s.socket.tracking.x;
        [
            Some(Rect::new(left, top, s.eyes.size, s.eyes.size)),
            Some(Rect::new(
                left + s.eyes.size + s.eyes.gap,
                top,
                s.eyes.size,
                s.eyes.size,
            )),
        ]
    });
    RigInputs {
        pointer,
        bodies,
        eyes,
        ..RigInputs::default()
    }
}

fn revealed() -> InteractionFlags {
    InteractionFlags {
        password_len: 8,
        show_password: true,
        ..InteractionFlags::default()
    }
}

// ---------------- Flags & modes ----------------

#[test]
fn password_visibility_per_field() {
    assert!(revealed().is_password_visible());
    let empty_shown = InteractionFlags {
        show_password: true,
        ..InteractionFlags::default()
    };
    assert!(!empty_shown.is_password_visible());
    let masked = InteractionFlags {
        password_len: 3,
        ..InteractionFlags::default()
    };
    assert!(masked.is_password_hidden());
    assert!(masked.is_leaning_in());
    let mixed = InteractionFlags {
        password_len: 3,
        show_password: true,
        confirm_password_len: 3,
        show_confirm_password: false,
        ..InteractionFlags::default()
    };
    assert!(mixed.is_password_visible());
    assert!(mixed.is_password_hidden());
}

#[test]
fn revealed_password_outranks_partner_look() {
    let flags = InteractionFlags {
        is_typing: true,
        ..revealed()
    };
    assert_eq!(
        derive_mode(&flags, false, true),
        InteractionMode::PasswordRevealed { peeking: false }
    );
    let typing = InteractionFlags {
        is_typing: true,
        ..InteractionFlags::default()
    };
    assert_eq!(derive_mode(&typing, false, true), InteractionMode::LookingAtPartner);
    assert_eq!(derive_mode(&typing, false, false), InteractionMode::Tracking);
}

#[test]
fn gaze_sources_follow_the_cast_table() {
    let purple = spec(Character::Purple);
    let black = spec(Character::Black);
    let orange = spec(Character::Orange);
    let hidden = InteractionMode::PasswordRevealed { peeking: false };
    let peeking = InteractionMode::PasswordRevealed { peeking: true };

    assert_eq!(hidden.gaze_source(purple), GazeSource::Forced(Vec2::new(-4.0, -4.0)));
    assert_eq!(peeking.gaze_source(purple), GazeSource::Forced(Vec2::new(4.0, 5.0)));
    assert_eq!(peeking.gaze_source(black), GazeSource::Forced(Vec2::new(-4.0, -4.0)));
    assert_eq!(peeking.gaze_source(orange), GazeSource::Forced(Vec2::new(-5.0, -4.0)));
    assert_eq!(
        InteractionMode::LookingAtPartner.gaze_source(orange),
        GazeSource::Tracking
    );
    assert_eq!(InteractionMode::Tracking.gaze_source(purple), GazeSource::Tracking);
}

#[test]
fn partner_look_persists_through_the_window() {
    let mut timers = Timers::new();
    let mut look = PartnerLook::new(ms(800), 0u8);
    assert!(look.sync(true, ms(100), &mut timers));
    assert!(look.is_active());
    // Typing stops early; the glance keeps going.
    assert!(!look.sync(false, ms(300), &mut timers));
    assert!(look.is_active());

    let f = timers.pop_due(ms(10_000)).unwrap();
    assert_eq!(f.due, ms(900));
    assert!(look.on_wake(f.handle, f.due));
    assert!(!look.is_active());
}

#[test]
fn new_typing_edge_restarts_the_window() {
    let mut timers = Timers::new();
    let mut look = PartnerLook::new(ms(800), 0u8);
    look.sync(true, ms(0), &mut timers);
    let first = look.pending().unwrap();
    look.sync(false, ms(200), &mut timers);
    look.sync(true, ms(500), &mut timers);
    assert!(!timers.is_pending(first));
    assert_eq!(timers.len(), 1);
    assert_eq!(timers.next_deadline(), Some(ms(1300)));
    assert!(!look.on_wake(first, ms(800)));
    assert!(look.is_active());
}

// ---------------- Compositor ----------------

#[test]
fn free_tracking_projects_pointer_onto_every_character() {
    let pointer = Vec2::new(900.0, 100.0);
    let inputs = laid_out_inputs(pointer);
    let frame = compose(&inputs, &CAST);
    assert_eq!(frame.mode, InteractionMode::Tracking);

    for s in CAST.iter() {
        let cf = frame.get(s.character);
        let off = face_offset(inputs.bodies[s.character.index()], pointer);
        assert!(approx(cf.body.skew_deg, off.body_skew_deg));
        assert_eq!(cf.body.translate_x, 0.0);
        assert_eq!(cf.socket, s.socket.tracking + off.face);
        assert_eq!(cf.height, s.height);
        for eye in cf.eyes.iter() {
            assert!(eye.open);
            assert!(eye.pupil.length() <= s.eyes.max_distance + 1e-4);
            // Pointer is up and to the right of everyone.
            assert!(eye.pupil.x > 0.0 && eye.pupil.y < 0.0);
        }
    }
    let yellow = frame.get(Character::Yellow);
    let off = face_offset(inputs.bodies[Character::Yellow.index()], pointer);
    assert_eq!(yellow.mouth, Some(Vec2::new(40.0, 88.0) + off.face));
}

#[test]
fn revealed_password_freezes_bodies_and_forces_eyes() {
    let mut inputs = laid_out_inputs(Vec2::new(900.0, 100.0));
    inputs.flags = InteractionFlags {
        is_typing: true,
        ..revealed()
    };
    inputs.looking_at_partner = true;
    let frame = compose(&inputs, &CAST);
    assert_eq!(frame.mode, InteractionMode::PasswordRevealed { peeking: false });

    for s in CAST.iter() {
        let cf = frame.get(s.character);
        assert_eq!(cf.body.skew_deg, 0.0);
        assert_eq!(cf.body.translate_x, 0.0);
        assert_eq!(cf.body.css(), "skewX(0deg)");
        assert_eq!(cf.socket, s.socket.revealed);
        for eye in cf.eyes.iter() {
            assert_eq!(eye.pupil, s.forced.revealed);
        }
        assert!(!cf.peeking);
    }
    assert_eq!(frame.get(Character::Yellow).mouth, Some(Vec2::new(10.0, 88.0)));
}

#[test]
fn purple_peeks_while_black_keeps_looking_away() {
    let mut inputs = laid_out_inputs(Vec2::ZERO);
    inputs.flags = revealed();
    inputs.peeking = true;
    let frame = compose(&inputs, &CAST);
    let purple = frame.get(Character::Purple);
    let black = frame.get(Character::Black);
    assert!(purple.peeking);
    assert!(!black.peeking);
    assert_eq!(purple.eyes[0].pupil, Vec2::new(4.0, 5.0));
    assert_eq!(purple.eyes[1].pupil, Vec2::new(4.0, 5.0));
    assert_eq!(black.eyes[0].pupil, Vec2::new(-4.0, -4.0));
}

#[test]
fn peeking_flag_is_ignored_once_password_is_hidden() {
    let mut inputs = laid_out_inputs(Vec2::new(900.0, 100.0));
    inputs.peeking = true;
    let frame = compose(&inputs, &CAST);
    assert_eq!(frame.mode, InteractionMode::Tracking);
    assert!(!frame.get(Character::Purple).peeking);
}

#[test]
fn partner_look_turns_the_tall_pair_to_each_other() {
    let pointer = Vec2::new(900.0, 100.0);
    let mut inputs = laid_out_inputs(pointer);
    inputs.flags.is_typing = true;
    inputs.looking_at_partner = true;
    let frame = compose(&inputs, &CAST);
    assert_eq!(frame.mode, InteractionMode::LookingAtPartner);

    let purple = frame.get(Character::Purple);
    assert_eq!(purple.socket, Vec2::new(55.0, 65.0));
    assert_eq!(purple.eyes[0].pupil, Vec2::new(3.0, 4.0));

    let black = frame.get(Character::Black);
    let skew = face_offset(inputs.bodies[Character::Black.index()], pointer).body_skew_deg;
    assert_eq!(black.socket, Vec2::new(32.0, 12.0));
    assert_eq!(black.eyes[1].pupil, Vec2::new(0.0, -4.0));
    assert!(approx(black.body.skew_deg, skew * 1.5 + 10.0));
    assert_eq!(black.body.translate_x, 20.0);

    // The short pair keeps tracking.
    let orange = frame.get(Character::Orange);
    let off = face_offset(inputs.bodies[Character::Orange.index()], pointer);
    assert_eq!(orange.socket, Vec2::new(82.0, 90.0) + off.face);
    assert!(orange.eyes[0].pupil.x > 0.0);
}

#[test]
fn typing_without_glance_leans_in() {
    let pointer = Vec2::new(0.0, 0.0);
    let mut inputs = laid_out_inputs(pointer);
    inputs.flags.is_typing = true;
    let frame = compose(&inputs, &CAST);

    let skew_of = |c: Character| face_offset(inputs.bodies[c.index()], pointer).body_skew_deg;
    let purple = frame.get(Character::Purple);
    assert!(approx(purple.body.skew_deg, skew_of(Character::Purple) - 12.0));
    assert_eq!(purple.body.translate_x, 40.0);
    assert_eq!(purple.height, 440.0);
    assert!(purple.body.css().contains("translateX(40px)"));

    let black = frame.get(Character::Black);
    assert!(approx(black.body.skew_deg, skew_of(Character::Black) * 1.5));
    assert_eq!(black.body.translate_x, 0.0);

    let yellow = frame.get(Character::Yellow);
    assert!(approx(yellow.body.skew_deg, skew_of(Character::Yellow)));
}

#[test]
fn blinking_only_closes_eyeballs() {
    let mut inputs = laid_out_inputs(Vec2::new(300.0, 300.0));
    inputs.blinking = [true, false, true, true];
    let frame = compose(&inputs, &CAST);
    let purple = frame.get(Character::Purple);
    assert!(purple.blinking);
    assert!(purple.eyes.iter().all(|e| !e.open && e.height == 2.0));
    assert!(frame.get(Character::Black).eyes.iter().all(|e| e.open));
    // Bare pupils have nothing to close.
    assert!(!frame.get(Character::Orange).blinking);
    assert!(frame.get(Character::Orange).eyes.iter().all(|e| e.open));
}

#[test]
fn unmounted_elements_render_neutral() {
    let inputs = RigInputs {
        pointer: Vec2::new(900.0, 900.0),
        ..RigInputs::default()
    };
    let frame = compose(&inputs, &CAST);
    for s in CAST.iter() {
        let cf = frame.get(s.character);
        assert_eq!(cf.body.skew_deg, 0.0);
        assert_eq!(cf.socket, s.socket.tracking);
        assert!(cf.eyes.iter().all(|e| e.pupil == Vec2::ZERO));
    }
}

#[test]
fn compose_is_idempotent() {
    let mut inputs = laid_out_inputs(Vec2::new(123.0, 456.0));
    inputs.flags.is_typing = true;
    assert_eq!(compose(&inputs, &CAST), compose(&inputs, &CAST));
}

// ---------------- Rig runtime ----------------

fn mounted(seed: u64) -> Rig {
    Rig::mount(AnimationTiming::default(), &CAST, seed, ms(0)).expect("valid timing")
}

#[test]
fn mount_starts_one_blink_loop_per_eyeball_character() {
    let rig = mounted(42);
    assert!(rig.is_mounted());
    assert_eq!(rig.pending_tasks(), 2);
    assert!(Character::ALL.iter().all(|c| !rig.is_blinking(*c)));
}

#[test]
fn mount_rejects_invalid_timing() {
    let timing = AnimationTiming {
        blink_interval: IntervalRange::from_millis(7000, 3000),
        ..AnimationTiming::default()
    };
    assert!(Rig::mount(timing, &CAST, 1, ms(0)).is_err());
}

#[test]
fn rig_blinks_both_characters_within_the_window() {
    let mut rig = mounted(42);
    let mut first_blink = [None; 2];
    for t in 0..=7_000u64 {
        rig.advance(ms(t));
        for (slot, c) in [Character::Purple, Character::Black].iter().enumerate() {
            if rig.is_blinking(*c) && first_blink[slot].is_none() {
                first_blink[slot] = Some(t);
            }
        }
    }
    for t in first_blink {
        let t = t.expect("blinked before the window closed");
        assert!((3_000..=7_000).contains(&t), "{}", t);
    }
    assert!(!rig.is_blinking(Character::Orange));
}

#[test]
fn rig_glance_outlives_a_short_burst_of_typing() {
    let mut rig = mounted(1);
    let typing = InteractionFlags {
        is_typing: true,
        ..InteractionFlags::default()
    };
    assert!(rig.set_flags(typing, ms(100)));
    assert!(rig.is_looking_at_partner());
    rig.set_flags(InteractionFlags::default(), ms(400));
    assert!(rig.is_looking_at_partner());
    rig.advance(ms(899));
    assert!(rig.is_looking_at_partner());
    rig.advance(ms(900));
    assert!(!rig.is_looking_at_partner());
}

#[test]
fn rig_peeks_only_while_password_is_shown() {
    let mut rig = mounted(9);
    rig.set_flags(revealed(), ms(0));
    let mut peeked_at = None;
    for t in 0..=5_000u64 {
        rig.advance(ms(t));
        if rig.is_peeking() {
            peeked_at = Some(t);
            break;
        }
    }
    let t = peeked_at.expect("peeked within the window");
    assert!((2_000..=5_000).contains(&t));

    // Hiding mid-peek clears it in the same call.
    rig.set_flags(InteractionFlags::default(), ms(t + 1));
    assert!(!rig.is_peeking());
    for t in (t + 2)..(t + 10_000) {
        rig.advance(ms(t));
        assert!(!rig.is_peeking());
    }
}

#[test]
fn snapshot_carries_rig_state() {
    let mut rig = mounted(3);
    let typing = InteractionFlags {
        is_typing: true,
        ..InteractionFlags::default()
    };
    rig.set_flags(typing, ms(10));
    let inputs = rig.inputs(Vec2::new(5.0, 6.0), [None; 4], [[None; 2]; 4]);
    assert_eq!(inputs.pointer, Vec2::new(5.0, 6.0));
    assert!(inputs.flags.is_typing);
    assert!(inputs.looking_at_partner);
    assert!(!inputs.peeking);
    assert_eq!(inputs.blinking, [false; 4]);
}

#[test]
fn unmount_cancels_everything_and_freezes_state() {
    let mut rig = mounted(4);
    rig.set_flags(
        InteractionFlags {
            is_typing: true,
            ..revealed()
        },
        ms(0),
    );
    assert!(rig.pending_tasks() >= 3);
    rig.unmount();
    assert!(!rig.is_mounted());
    assert_eq!(rig.pending_tasks(), 0);
    assert!(!rig.is_looking_at_partner());
    assert_eq!(rig.advance(ms(60_000)), 0);
    assert!(!rig.set_flags(revealed(), ms(61_000)));
    assert!(Character::ALL.iter().all(|c| !rig.is_blinking(*c)));
    assert!(!rig.is_peeking());
}

#[test]
fn clock_never_runs_backwards() {
    let mut rig = mounted(8);
    rig.advance(ms(5_000));
    rig.advance(ms(1_000));
    assert_eq!(rig.now(), ms(5_000));
}
