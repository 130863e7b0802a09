use glam::Vec2;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

// Shared pointer position, scoped to the rigs that read it.
//
// The first live subscription runs the acquire hook (attach the DOM listener)
// and dropping the last one runs the release hook. Moves published while
// nobody is subscribed are dropped.

type Hook = Box<dyn FnMut()>;

struct HubState {
    position: Vec2,
    subscribers: usize,
    on_acquire: Option<Hook>,
    on_release: Option<Hook>,
}

#[derive(Clone)]
pub struct PointerHub {
    state: Rc<RefCell<HubState>>,
}

impl Default for PointerHub {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerHub {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(HubState {
                position: Vec2::ZERO,
                subscribers: 0,
                on_acquire: None,
                on_release: None,
            })),
        }
    }

    /// Install the hooks run when the first subscriber arrives and the last one leaves.
    pub fn set_lifecycle(
        &self,
        on_acquire: impl FnMut() + 'static,
        on_release: impl FnMut() + 'static,
    ) {
        let mut s = self.state.borrow_mut();
        s.on_acquire = Some(Box::new(on_acquire));
        s.on_release = Some(Box::new(on_release));
    }

    /// Write handle for event listeners; does not keep the hub alive.
    pub fn publisher(&self) -> PointerPublisher {
        PointerPublisher {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn subscribe(&self) -> PointerSubscription {
        let first = {
            let mut s = self.state.borrow_mut();
            s.subscribers += 1;
            s.subscribers == 1
        };
        if first {
            log::debug!("[pointer] acquire");
            run_hook(&self.state, |s| &mut s.on_acquire);
        }
        PointerSubscription {
            state: self.state.clone(),
        }
    }

    pub fn publish(&self, x: f32, y: f32) {
        publish(&self.state, x, y);
    }

    pub fn position(&self) -> Vec2 {
        self.state.borrow().position
    }

    pub fn subscribers(&self) -> usize {
        self.state.borrow().subscribers
    }

    pub fn is_active(&self) -> bool {
        self.subscribers() > 0
    }
}

fn publish(state: &RefCell<HubState>, x: f32, y: f32) {
    let mut s = state.borrow_mut();
    if s.subscribers > 0 {
        s.position = Vec2::new(x, y);
    }
}

#[derive(Clone)]
pub struct PointerPublisher {
    state: Weak<RefCell<HubState>>,
}

impl PointerPublisher {
    pub fn publish(&self, x: f32, y: f32) {
        if let Some(state) = self.state.upgrade() {
            publish(&state, x, y);
        }
    }
}

// Hooks run without the state borrowed so they may call back into the hub.
fn run_hook(state: &RefCell<HubState>, pick: impl Fn(&mut HubState) -> &mut Option<Hook>) {
    let hook = pick(&mut *state.borrow_mut()).take();
    if let Some(mut hook) = hook {
        hook();
        let mut s = state.borrow_mut();
        let slot = pick(&mut *s);
        if slot.is_none() {
            *slot = Some(hook);
        }
    }
}

/// Keeps the hub live; dropping the last one releases the listener.
pub struct PointerSubscription {
    state: Rc<RefCell<HubState>>,
}

impl PointerSubscription {
    pub fn position(&self) -> Vec2 {
        self.state.borrow().position
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        let last = {
            let mut s = self.state.borrow_mut();
            s.subscribers = s.subscribers.saturating_sub(1);
            s.subscribers == 0
        };
        if last {
            log::debug!("[pointer] release");
            run_hook(&self.state, |s| &mut s.on_release);
            self.state.borrow_mut().position = Vec2::ZERO;
        }
    }
}
