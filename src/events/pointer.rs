use crate::core::pointer::PointerHub;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type MoveListener = Closure<dyn FnMut(web::PointerEvent)>;

/// Pointer hub fed by a window-level `pointermove` listener.
///
/// The listener is attached when the first rig subscribes and removed when the
/// last subscription is dropped.
pub fn window_pointer_hub() -> PointerHub {
    let hub = PointerHub::new();
    let publisher = hub.publisher();
    let slot: Rc<RefCell<Option<MoveListener>>> = Rc::new(RefCell::new(None));

    let slot_acquire = slot.clone();
    let slot_release = slot;
    hub.set_lifecycle(
        move || {
            let publisher = publisher.clone();
            let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
                publisher.publish(ev.client_x() as f32, ev.client_y() as f32);
            }) as Box<dyn FnMut(_)>);
            if let Some(wnd) = web::window() {
                _ = wnd.add_event_listener_with_callback(
                    "pointermove",
                    closure.as_ref().unchecked_ref(),
                );
            }
            *slot_acquire.borrow_mut() = Some(closure);
            log::info!("[pointer] listening");
        },
        move || {
            if let Some(closure) = slot_release.borrow_mut().take() {
                if let Some(wnd) = web::window() {
                    _ = wnd.remove_event_listener_with_callback(
                        "pointermove",
                        closure.as_ref().unchecked_ref(),
                    );
                }
                log::info!("[pointer] stopped listening");
            }
        },
    );
    hub
}
