//! Timer sources for the game clock and the fade-out delay.
//!
//! Handles cancel on drop, the way `gloo_timers` handles do. The browser
//! build uses [`BrowserScheduler`]; native builds and tests drive a
//! [`VirtualClock`] by hand.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::{Interval, Timeout};

pub trait Scheduler {
    /// Live periodic callback; dropping it stops the callback.
    type Interval;
    /// Pending one-shot callback; dropping it cancels the callback.
    type Timeout;

    fn interval(&self, millis: u32, tick: Box<dyn FnMut()>) -> Self::Interval;
    fn timeout(&self, millis: u32, fire: Box<dyn FnOnce()>) -> Self::Timeout;
}

/// `setInterval` / `setTimeout` through gloo-timers.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    type Interval = Interval;
    type Timeout = Timeout;

    fn interval(&self, millis: u32, mut tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(millis, move || tick())
    }

    fn timeout(&self, millis: u32, fire: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(millis, fire)
    }
}

type Callback = Rc<RefCell<Box<dyn FnMut()>>>;

struct Entry {
    id: u64,
    due: u64,
    period: Option<u64>,
    callback: Callback,
}

#[derive(Default)]
struct ClockInner {
    now: u64,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Manually advanced clock, in milliseconds.
///
/// Clones share the same timeline.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Rc<RefCell<ClockInner>>,
}

/// Registration on a [`VirtualClock`]; dropping it removes the callback.
pub struct VirtualHandle {
    id: u64,
    clock: Weak<RefCell<ClockInner>>,
}

impl Drop for VirtualHandle {
    fn drop(&mut self) {
        if let Some(inner) = self.clock.upgrade() {
            inner.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.inner.borrow().now
    }

    /// Registered callbacks of either kind.
    pub fn pending(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn pending_intervals(&self) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.period.is_some())
            .count()
    }

    fn register(&self, delay: u64, period: Option<u64>, callback: Box<dyn FnMut()>) -> VirtualHandle {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.entries.push(Entry {
            id,
            due,
            period,
            callback: Rc::new(RefCell::new(callback)),
        });
        VirtualHandle {
            id,
            clock: Rc::downgrade(&self.inner),
        }
    }

    /// Move time forward by `millis`, firing everything that falls due on the way.
    ///
    /// Callbacks run with no borrow of the clock held, so they may register or
    /// drop handles, including their own.
    pub fn advance(&self, millis: u64) {
        let target = self.now() + millis;
        while let Some(callback) = self.pop_due(target) {
            let mut run = callback.borrow_mut();
            (*run)();
        }
        self.inner.borrow_mut().now = target;
    }

    /// Earliest entry due at or before `target`; ties go to the oldest registration.
    fn pop_due(&self, target: u64) -> Option<Callback> {
        let mut inner = self.inner.borrow_mut();
        let idx = inner
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= target)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(idx, _)| idx)?;

        let due = inner.entries[idx].due;
        inner.now = due;
        match inner.entries[idx].period {
            Some(period) => {
                let entry = &mut inner.entries[idx];
                entry.due += period.max(1);
                Some(entry.callback.clone())
            }
            None => Some(inner.entries.remove(idx).callback),
        }
    }
}

impl Scheduler for VirtualClock {
    type Interval = VirtualHandle;
    type Timeout = VirtualHandle;

    fn interval(&self, millis: u32, tick: Box<dyn FnMut()>) -> VirtualHandle {
        let period = u64::from(millis);
        self.register(period, Some(period), tick)
    }

    fn timeout(&self, millis: u32, fire: Box<dyn FnOnce()>) -> VirtualHandle {
        let mut fire = Some(fire);
        self.register(
            u64::from(millis),
            None,
            Box::new(move || {
                if let Some(f) = fire.take() {
                    f();
                }
            }),
        )
    }
}
