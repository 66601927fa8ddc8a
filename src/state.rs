//! Round state and the reducer that drives it.
//!
//! Every mutation goes through [`GameState::apply`]: clicks, timer ticks and
//! fade expiry are all [`GameAction`]s. Nothing in here touches a clock or an
//! RNG, so a round can be replayed action by action.

use std::collections::BTreeSet;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_COUNT, TICKS_PER_SECOND};
use crate::placement::Target;

pub const GAME_OVER_MESSAGE: &str = "Game Over";

/// Phase of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameStatus {
    /// Nothing on the board, waiting for Play
    #[default]
    Idle,
    /// Clock running, clicks accepted
    Active,
    /// Every number found
    Won,
    /// Wrong number clicked
    Lost,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GameStatus::Won | GameStatus::Lost)
    }
}

/// Colour hint for the headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Neutral,
    Danger,
    Success,
}

impl Tone {
    pub fn css_color(&self) -> &'static str {
        match self {
            Tone::Neutral => "black",
            Tone::Danger => "red",
            Tone::Success => "green",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Count used by the next `Start`.
    Configure(u32),
    /// Begin a round (or restart the running one) with a freshly dealt board.
    Start(Vec<Target>),
    Reset,
    Click(u32),
    /// One timer period elapsed in round `session`.
    Tick { session: u64 },
    /// The fade delay scheduled in round `session` ran out.
    FadeElapsed { session: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub status: GameStatus,
    /// Count for the next round.
    pub configured_count: u32,
    /// Count the current round was started with.
    pub count: u32,
    pub expected_next: u32,
    /// Correct clicks in the order they happened.
    pub clicked: Vec<u32>,
    /// Clicked targets still on the board, waiting for the fade to finish.
    pub fading: BTreeSet<u32>,
    pub visible: Vec<Target>,
    pub ticks: u32,
    pub message: String,
    /// Bumped on every start; timer and fade callbacks from older rounds are ignored.
    pub session: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT)
    }
}

impl GameState {
    pub fn new(configured_count: u32) -> Self {
        Self {
            status: GameStatus::Idle,
            configured_count,
            count: 0,
            expected_next: 1,
            clicked: Vec::new(),
            fading: BTreeSet::new(),
            visible: Vec::new(),
            ticks: 0,
            message: String::new(),
            session: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Active
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// Elapsed time with one decimal, e.g. `"3.4"`.
    pub fn elapsed_label(&self) -> String {
        format!("{:.1}", self.elapsed_seconds())
    }

    pub fn headline(&self) -> &'static str {
        match self.status {
            GameStatus::Idle | GameStatus::Active => "LET'S PLAY",
            GameStatus::Lost => "GAME OVER",
            GameStatus::Won => "ALL CLEARED",
        }
    }

    pub fn tone(&self) -> Tone {
        match self.status {
            GameStatus::Idle | GameStatus::Active => Tone::Neutral,
            GameStatus::Lost => Tone::Danger,
            GameStatus::Won => Tone::Success,
        }
    }

    /// Correct clicks always come in order, so the clicked ids are `1..expected_next`.
    pub fn is_clicked(&self, id: u32) -> bool {
        id >= 1 && id < self.expected_next
    }

    pub fn is_fading(&self, id: u32) -> bool {
        self.fading.contains(&id)
    }

    /// Pure form of [`apply`](Self::apply).
    pub fn reduce(&self, action: GameAction) -> GameState {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    /// Apply `action` in place. Returns `false` when the action was ignored.
    pub fn apply(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Configure(count) => {
                if self.configured_count == count {
                    return false;
                }
                self.configured_count = count;
                true
            }
            GameAction::Start(targets) => {
                self.start(targets);
                true
            }
            GameAction::Reset => self.reset(),
            GameAction::Click(number) => self.click(number),
            GameAction::Tick { session } => {
                if !self.is_running() || session != self.session {
                    return false;
                }
                self.ticks = self.ticks.saturating_add(1);
                true
            }
            GameAction::FadeElapsed { session } => self.finish_fade(session),
        }
    }

    fn start(&mut self, targets: Vec<Target>) {
        if self.is_running() {
            debug!("Restarting round {} before it finished", self.session);
        }
        self.session = self.session.wrapping_add(1);
        self.status = GameStatus::Active;
        self.count = self.configured_count;
        self.expected_next = 1;
        self.clicked.clear();
        self.fading.clear();
        self.visible = targets;
        self.ticks = 0;
        self.message.clear();
        info!(
            "Round {} started with {} targets",
            self.session,
            self.visible.len()
        );
    }

    fn reset(&mut self) -> bool {
        let mut cleared = GameState::new(self.configured_count);
        cleared.session = self.session;
        if *self == cleared {
            return false;
        }
        *self = cleared;
        debug!("Board reset");
        true
    }

    fn click(&mut self, number: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        if number != self.expected_next {
            info!(
                "Clicked {} while expecting {}, round {} lost",
                number, self.expected_next, self.session
            );
            self.status = GameStatus::Lost;
            self.message = GAME_OVER_MESSAGE.to_string();
            return true;
        }

        self.clicked.push(number);
        self.fading.insert(number);
        self.expected_next += 1;

        if self.expected_next > self.count {
            self.status = GameStatus::Won;
            self.message = format!(
                "Congratulations! You have found all the numbers. Completion time: {} seconds.",
                self.elapsed_label()
            );
            info!(
                "Round {} cleared {} targets in {}s",
                self.session,
                self.count,
                self.elapsed_label()
            );
        }
        true
    }

    fn finish_fade(&mut self, session: u64) -> bool {
        if session != self.session || self.fading.is_empty() {
            return false;
        }
        let fading = std::mem::take(&mut self.fading);
        self.visible.retain(|t| !fading.contains(&t.id));
        debug!("Removed {} faded targets", fading.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Position;
    use proptest::prelude::*;

    fn board(count: u32) -> Vec<Target> {
        (1..=count)
            .map(|id| Target {
                id,
                position: Position::new(id as f64 * 10.0, 0.0),
            })
            .collect()
    }

    fn started(count: u32) -> GameState {
        let mut state = GameState::new(count);
        state.apply(GameAction::Start(board(count)));
        state
    }

    #[test]
    fn start_enters_active_with_clean_fields() {
        let state = started(4);
        assert_eq!(state.status, GameStatus::Active);
        assert_eq!(state.count, 4);
        assert_eq!(state.expected_next, 1);
        assert_eq!(state.visible.len(), 4);
        assert_eq!(state.session, 1);
        assert_eq!(state.headline(), "LET'S PLAY");
    }

    #[test]
    fn three_correct_clicks_win() {
        let mut state = started(3);
        state.apply(GameAction::Tick { session: 1 });
        state.apply(GameAction::Tick { session: 1 });
        for n in 1..=3 {
            assert!(state.apply(GameAction::Click(n)));
        }
        assert_eq!(state.status, GameStatus::Won);
        assert!(state.message.contains("Completion time: 0.2 seconds"));
        assert_eq!(state.headline(), "ALL CLEARED");
        assert_eq!(state.tone(), Tone::Success);
    }

    #[test]
    fn wrong_first_click_loses() {
        let mut state = started(3);
        state.apply(GameAction::Click(2));
        assert_eq!(state.status, GameStatus::Lost);
        assert_eq!(state.message, GAME_OVER_MESSAGE);
        assert_eq!(state.headline(), "GAME OVER");
        assert_eq!(state.tone(), Tone::Danger);
    }

    #[test]
    fn clicking_a_fading_target_again_loses() {
        let mut state = started(3);
        state.apply(GameAction::Click(1));
        state.apply(GameAction::Click(1));
        assert_eq!(state.status, GameStatus::Lost);
    }

    #[test]
    fn clicked_marks_cover_only_correct_clicks() {
        let mut state = started(4);
        state.apply(GameAction::Click(1));
        state.apply(GameAction::Click(2));
        state.apply(GameAction::Click(4));
        assert_eq!(state.status, GameStatus::Lost);
        assert!(state.is_clicked(1) && state.is_clicked(2));
        assert!(!state.is_clicked(0) && !state.is_clicked(3) && !state.is_clicked(4));

        state.apply(GameAction::Reset);
        assert!(!state.is_clicked(1));
    }

    #[test]
    fn clicks_outside_a_round_are_ignored() {
        let mut idle = GameState::new(3);
        assert!(!idle.apply(GameAction::Click(1)));
        assert_eq!(idle, GameState::new(3));

        let mut lost = started(3);
        lost.apply(GameAction::Click(3));
        let frozen = lost.clone();
        assert!(!lost.apply(GameAction::Click(1)));
        assert_eq!(lost, frozen);
    }

    #[test]
    fn ticks_only_count_for_the_running_session() {
        let mut state = started(2);
        assert!(!state.apply(GameAction::Tick { session: 0 }));
        assert!(state.apply(GameAction::Tick { session: 1 }));
        state.apply(GameAction::Click(2));
        assert!(!state.apply(GameAction::Tick { session: 1 }));
        assert_eq!(state.ticks, 1);
        assert_eq!(state.elapsed_label(), "0.1");
    }

    #[test]
    fn fade_removes_every_fading_target_at_once() {
        let mut state = started(4);
        state.apply(GameAction::Click(1));
        state.apply(GameAction::Click(2));
        assert!(state.is_fading(1) && state.is_fading(2));
        assert!(state.apply(GameAction::FadeElapsed { session: 1 }));
        assert!(state.fading.is_empty());
        let ids: Vec<u32> = state.visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert!(state.is_clicked(1));
    }

    #[test]
    fn stale_fade_is_a_no_op() {
        let mut state = started(4);
        state.apply(GameAction::Click(1));
        state.apply(GameAction::Start(board(4)));
        assert!(!state.apply(GameAction::FadeElapsed { session: 1 }));
        assert_eq!(state.visible.len(), 4);
    }

    #[test]
    fn last_target_still_fades_after_a_win() {
        let mut state = started(1);
        state.apply(GameAction::Click(1));
        assert_eq!(state.status, GameStatus::Won);
        state.apply(GameAction::FadeElapsed { session: 1 });
        assert!(state.visible.is_empty());
        assert_eq!(state.status, GameStatus::Won);
    }

    #[test]
    fn configure_applies_to_the_next_round_only() {
        let mut state = started(3);
        state.apply(GameAction::Configure(5));
        for n in 1..=3 {
            state.apply(GameAction::Click(n));
        }
        assert_eq!(state.status, GameStatus::Won);
        state.apply(GameAction::Start(board(5)));
        assert_eq!(state.count, 5);
    }

    #[test]
    fn reset_twice_equals_reset_once() {
        let mut state = started(5);
        state.apply(GameAction::Click(1));
        state.apply(GameAction::Tick { session: 1 });
        let once = state.reduce(GameAction::Reset);
        let twice = once.reduce(GameAction::Reset);
        assert_eq!(once, twice);
        assert_eq!(once.status, GameStatus::Idle);
        assert!(once.visible.is_empty() && once.clicked.is_empty() && once.fading.is_empty());
        assert_eq!(once.ticks, 0);
        assert_eq!(once.configured_count, 5);
    }

    proptest! {
        #[test]
        fn expected_next_never_goes_backwards(count in 1u32..30, clicks in proptest::collection::vec(1u32..35, 0..60)) {
            let mut state = started(count);
            for n in clicks {
                let before = state.clone();
                state.apply(GameAction::Click(n));
                prop_assert!(state.expected_next >= before.expected_next);
                if before.is_running() {
                    if n == before.expected_next {
                        prop_assert_eq!(state.expected_next, before.expected_next + 1);
                    } else {
                        prop_assert_eq!(state.status, GameStatus::Lost);
                    }
                } else {
                    prop_assert_eq!(&state, &before);
                }
                prop_assert!(state.clicked.iter().all(|id| (1..=count).contains(id)));
                for id in 0..=count + 1 {
                    prop_assert_eq!(state.is_clicked(id), state.clicked.contains(&id));
                }
            }
        }
    }
}
