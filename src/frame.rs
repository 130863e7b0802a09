use crate::core::character::CAST;
use crate::core::compositor::compose;
use crate::core::interaction::InteractionFlags;
use crate::core::pointer::PointerSubscription;
use crate::core::rig::Rig;
use crate::dom::Stage;
use crate::events::form;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub rig: Rig,
    pub stage: Stage,
    pub pointer: PointerSubscription,
    pub document: web::Document,
    /// Flags pushed by the host; `None` polls the form fields instead.
    pub host_flags: Option<InteractionFlags>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = self.started.elapsed();
        let flags = self
            .host_flags
            .unwrap_or_else(|| form::read_form_flags(&self.document));
        if self.rig.set_flags(flags, now) {
            log::debug!("[frame] state changed at {:?}: {:?}", now, flags);
        }

        // One snapshot per frame so every character sees the same pointer.
        let inputs = self
            .rig
            .inputs(self.pointer.position(), self.stage.bodies(), self.stage.eyes());
        let frame = compose(&inputs, &CAST);
        self.stage.apply(&frame);
    }

    /// Cancel every pending task and remove the generated elements.
    pub fn teardown(&mut self) {
        self.rig.unmount();
        self.stage.remove();
    }
}

/// Running `requestAnimationFrame` loop; `stop` breaks the self-reference.
pub struct AnimationLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    handle: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.handle.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, handle: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        handle.set(
            w.request_animation_frame(closure.as_ref().unchecked_ref())
                .ok(),
        );
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> AnimationLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let handle = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let handle_clone = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &handle_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    AnimationLoop { tick, handle }
}
