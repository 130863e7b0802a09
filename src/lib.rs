#![cfg(target_arch = "wasm32")]
use crate::core::character::CAST;
use crate::core::config::AnimationTiming;
use crate::core::interaction::InteractionFlags;
use crate::core::pointer::PointerHub;
use crate::core::rig::Rig;
use instant::Instant;
use rand::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;

struct Mounted {
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    animation: frame::AnimationLoop,
}

thread_local! {
    // Pointer state lives as long as the page; the listener only while a rig holds it.
    static POINTER: PointerHub = events::pointer::window_pointer_hub();
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gaze-rig starting");

    let has_stage = dom::window_document()
        .and_then(|d| d.get_element_by_id(constants::STAGE_ID))
        .is_some();
    if has_stage {
        mount_rig();
    } else {
        log::info!("no #{} on this page; waiting for mount_rig()", constants::STAGE_ID);
    }
    Ok(())
}

/// Build the characters inside `#rig-stage` and start animating. No-op when
/// already mounted.
#[wasm_bindgen]
pub fn mount_rig() {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        return;
    }
    match mount() {
        Ok(mounted) => MOUNTED.with(|m| *m.borrow_mut() = Some(mounted)),
        Err(e) => log::error!("mount error: {:?}", e),
    }
}

fn mount() -> anyhow::Result<Mounted> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let root = document
        .get_element_by_id(constants::STAGE_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::STAGE_ID))?;

    let timing = AnimationTiming::default();
    let stage = dom::Stage::build(&document, &root, &CAST, &timing.transition)?;
    let started = Instant::now();
    let rig = Rig::mount(timing, &CAST, StdRng::from_entropy().gen(), started.elapsed())?;
    let pointer = POINTER.with(|hub| hub.subscribe());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        rig,
        stage,
        pointer,
        document,
        host_flags: None,
        started,
    }));
    let animation = frame::start_loop(frame_ctx.clone());
    Ok(Mounted {
        frame_ctx,
        animation,
    })
}

/// Push form state from the host page. Once called, the form fields are no
/// longer polled.
#[wasm_bindgen]
pub fn set_form_flags(
    is_typing: bool,
    password_len: i32,
    show_password: bool,
    confirm_password_len: i32,
    show_confirm_password: bool,
) {
    let flags = InteractionFlags {
        is_typing,
        password_len: input::length_from_js(password_len),
        show_password,
        confirm_password_len: input::length_from_js(confirm_password_len),
        show_confirm_password,
    };
    MOUNTED.with(|m| match m.borrow().as_ref() {
        Some(mounted) => mounted.frame_ctx.borrow_mut().host_flags = Some(flags),
        None => log::warn!("set_form_flags called with no rig mounted"),
    });
}

/// Stop the loop, cancel every timer and release the pointer listener.
#[wasm_bindgen]
pub fn unmount_rig() {
    let Some(mounted) = MOUNTED.with(|m| m.borrow_mut().take()) else {
        return;
    };
    mounted.animation.stop();
    mounted.frame_ctx.borrow_mut().teardown();
    // Dropping the context drops the last pointer subscription.
    drop(mounted);
    log::info!(
        "rig unmounted; pointer listener active={}",
        POINTER.with(|h| h.is_active())
    );
}
