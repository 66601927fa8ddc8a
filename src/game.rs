//! The game controller.
//!
//! [`Game`] owns the round state together with the two timers that act on it:
//! the 100 ms clock that runs while a round is active and the fade delay that
//! clears clicked targets off the board. Both are plain handles; replacing or
//! dropping one cancels it.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::config::{GameConfig, FADE_MS, MIN_COUNT, TICK_MS};
use crate::placement::{deal_targets, Canvas};
use crate::scheduler::Scheduler;
use crate::state::{GameAction, GameState, GameStatus, Tone};

/// Render-ready view of a single target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    /// Turns red once clicked.
    pub clicked: bool,
    /// Drawn at opacity 0 while waiting for removal.
    pub fading: bool,
    /// Lower numbers stack on top.
    pub z_index: i64,
}

/// Everything a renderer needs to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub headline: &'static str,
    pub tone: Tone,
    pub message: String,
    pub elapsed_seconds: f64,
    pub elapsed_label: String,
    pub count: u32,
    pub configured_count: u32,
    pub expected_next: u32,
    pub targets: Vec<TargetView>,
    pub play_button_label: &'static str,
}

impl Snapshot {
    pub fn of(state: &GameState) -> Self {
        let targets = state
            .visible
            .iter()
            .map(|t| TargetView {
                id: t.id,
                x: t.position.x,
                y: t.position.y,
                clicked: state.is_clicked(t.id),
                fading: state.is_fading(t.id),
                z_index: state.configured_count as i64 - t.id as i64,
            })
            .collect();

        Self {
            status: state.status,
            headline: state.headline(),
            tone: state.tone(),
            message: state.message.clone(),
            elapsed_seconds: state.elapsed_seconds(),
            elapsed_label: state.elapsed_label(),
            count: state.count,
            configured_count: state.configured_count,
            expected_next: state.expected_next,
            targets,
            play_button_label: if state.is_running() { "Restart" } else { "Play" },
        }
    }
}

type Listener = Rc<dyn Fn(Snapshot)>;

struct Shared<S: Scheduler> {
    scheduler: S,
    canvas: Cell<Canvas>,
    state: RefCell<GameState>,
    rng: RefCell<StdRng>,
    ticker: RefCell<Option<S::Interval>>,
    fade: RefCell<Option<S::Timeout>>,
    listener: RefCell<Option<Listener>>,
}

/// A single player's game, wired to a [`Scheduler`].
pub struct Game<S: Scheduler + 'static> {
    shared: Rc<Shared<S>>,
}

impl<S: Scheduler + 'static> fmt::Debug for Game<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &*self.shared.state.borrow())
            .field("ticking", &self.shared.ticker.borrow().is_some())
            .field("fade_pending", &self.shared.fade.borrow().is_some())
            .finish()
    }
}

impl<S: Scheduler + 'static> Game<S> {
    /// New game with an OS-seeded RNG.
    pub fn new(scheduler: S) -> Self {
        Self::with_rng(scheduler, StdRng::from_os_rng())
    }

    /// New game whose boards are reproducible from `seed`.
    pub fn with_seed(scheduler: S, seed: u64) -> Self {
        Self::with_rng(scheduler, StdRng::seed_from_u64(seed))
    }

    fn with_rng(scheduler: S, rng: StdRng) -> Self {
        Self {
            shared: Rc::new(Shared {
                scheduler,
                canvas: Cell::new(Canvas::default()),
                state: RefCell::new(GameState::default()),
                rng: RefCell::new(rng),
                ticker: RefCell::new(None),
                fade: RefCell::new(None),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Replace the arena bounds used by later rounds.
    pub fn with_canvas(self, canvas: Canvas) -> Self {
        self.shared.canvas.set(canvas);
        self
    }

    /// Call `listener` with a fresh snapshot after every change.
    pub fn subscribe(&self, listener: impl Fn(Snapshot) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Settings for the next round. A count below 1 is raised to 1.
    pub fn configure(&self, config: GameConfig) {
        dispatch(&self.shared, GameAction::Configure(config.count.max(MIN_COUNT)));
    }

    /// Settings the next `start` will use.
    pub fn config(&self) -> GameConfig {
        GameConfig {
            count: self.shared.state.borrow().configured_count,
        }
    }

    /// Deal a new board and start the clock, replacing any round in progress.
    pub fn start(&self) {
        let count = self.shared.state.borrow().configured_count;
        let targets = {
            let mut rng = self.shared.rng.borrow_mut();
            deal_targets(count, &self.shared.canvas.get(), &mut *rng)
        };
        dispatch(&self.shared, GameAction::Start(targets));
    }

    pub fn reset(&self) {
        dispatch(&self.shared, GameAction::Reset);
    }

    pub fn click(&self, number: u32) {
        dispatch(&self.shared, GameAction::Click(number));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.shared.state.borrow())
    }

    pub fn state(&self) -> GameState {
        self.shared.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.state.borrow().is_running()
    }

    pub fn is_ticking(&self) -> bool {
        self.shared.ticker.borrow().is_some()
    }

    pub fn has_pending_fade(&self) -> bool {
        self.shared.fade.borrow().is_some()
    }
}

/// What the timers care about, captured before an action runs.
struct Marks {
    session: u64,
    fading: Vec<u32>,
}

impl Marks {
    fn of(state: &GameState) -> Self {
        Self {
            session: state.session,
            fading: state.fading.iter().copied().collect(),
        }
    }
}

fn dispatch<S: Scheduler + 'static>(shared: &Rc<Shared<S>>, action: GameAction) {
    let (changed, before, after) = {
        let mut state = shared.state.borrow_mut();
        let before = Marks::of(&state);
        let changed = state.apply(action);
        (changed, before, Marks::of(&state))
    };
    if !changed {
        return;
    }

    sync_ticker(shared, &before, &after);
    sync_fade(shared, &before, &after);

    let listener = shared.listener.borrow().clone();
    if let Some(listener) = listener {
        let snapshot = Snapshot::of(&shared.state.borrow());
        listener(snapshot);
    }
}

/// Exactly one clock while a round runs, none otherwise.
fn sync_ticker<S: Scheduler + 'static>(shared: &Rc<Shared<S>>, before: &Marks, after: &Marks) {
    let running = shared.state.borrow().is_running();
    if !running {
        if shared.ticker.borrow_mut().take().is_some() {
            debug!("Clock stopped for round {}", after.session);
        }
        return;
    }
    if before.session == after.session && shared.ticker.borrow().is_some() {
        return;
    }

    // Drop the old clock before the new one exists.
    shared.ticker.borrow_mut().take();
    let weak = Rc::downgrade(shared);
    let session = after.session;
    let handle = shared.scheduler.interval(
        TICK_MS,
        Box::new(move || fire(&weak, GameAction::Tick { session })),
    );
    *shared.ticker.borrow_mut() = Some(handle);
    info!("Clock started for round {}", session);
}

/// Every change to the fading set pushes the removal out by a full delay.
fn sync_fade<S: Scheduler + 'static>(shared: &Rc<Shared<S>>, before: &Marks, after: &Marks) {
    if after.fading.is_empty() {
        shared.fade.borrow_mut().take();
        return;
    }
    if before.session == after.session && before.fading == after.fading {
        return;
    }

    shared.fade.borrow_mut().take();
    let weak = Rc::downgrade(shared);
    let session = after.session;
    let handle = shared.scheduler.timeout(
        FADE_MS,
        Box::new(move || fire(&weak, GameAction::FadeElapsed { session })),
    );
    *shared.fade.borrow_mut() = Some(handle);
    debug!("Fade scheduled for {:?}", after.fading);
}

fn fire<S: Scheduler + 'static>(weak: &Weak<Shared<S>>, action: GameAction) {
    if let Some(shared) = weak.upgrade() {
        dispatch(&shared, action);
    }
}
