//! Round controller
//!
//! Owns the [`GameState`] and every transition between rounds. The host
//! forwards input and frame ticks to the named handlers and renders
//! [`RoundController::view`] afterwards.

use rand_pcg::Pcg32;

use super::clock::AnimationClock;
use super::state::{Direction, GamePhase, GameState, RoundEvent};
use super::tick::{TickOutcome, tick};
use crate::config::GameConfig;
use crate::view::RoundView;

/// Drives rounds, scoring, pause and reset for one session
#[derive(Debug, Clone)]
pub struct RoundController {
    config: GameConfig,
    state: GameState,
    clock: AnimationClock,
    rng: Pcg32,
    events: Vec<RoundEvent>,
}

impl RoundController {
    /// New session with the default configuration; the first round is already running
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// New session with an explicit configuration
    pub fn with_config(config: GameConfig, seed: u64) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let state = GameState::new(seed, &config);
        let rng = state.rng_state.to_rng();
        let mut controller = Self {
            config,
            state,
            clock: AnimationClock::new(),
            rng,
            events: Vec::new(),
        };
        controller.start_round();
        controller
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Snapshot for the presentation layer
    pub fn view(&self) -> RoundView {
        RoundView::capture(&self.state, &self.clock)
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Begin the next round, or end the game if the miss threshold is reached
    pub fn start_round(&mut self) {
        if self.state.misses >= self.config.miss_threshold {
            self.end_game();
            return;
        }

        let direction = Direction::random(&mut self.rng);
        self.state.round += 1;
        self.state.ball.pos = self.config.center();
        self.state.ball.direction = direction;
        self.state.ball.visible = true;
        self.state.phase = GamePhase::Running;
        self.clock.start();

        log::debug!("Round {} started, heading {:?}", self.state.round, direction);
        self.events.push(RoundEvent::RoundStarted {
            round: self.state.round,
            direction,
        });
    }

    /// Apply one animation frame. Returns false if the frame was ignored.
    pub fn frame_tick(&mut self) -> bool {
        if self.state.phase != GamePhase::Running || !self.clock.accept_frame() {
            return false;
        }

        if tick(&mut self.state, &self.config) == TickOutcome::OutOfBounds {
            self.state.misses += 1;
            log::debug!(
                "Ball escaped at x={} (misses: {})",
                self.state.ball.pos.x,
                self.state.misses
            );
            self.events.push(RoundEvent::Missed {
                misses: self.state.misses,
            });
            self.clock.stop();
            self.start_round();
        }
        true
    }

    /// Score a hit. Ignored unless a round is running.
    pub fn on_ball_clicked(&mut self) -> bool {
        if self.state.phase != GamePhase::Running {
            log::debug!("Ignoring click while {:?}", self.state.phase);
            return false;
        }

        self.state.hits += 1;
        log::debug!("Hit! (hits: {})", self.state.hits);
        self.events.push(RoundEvent::Hit {
            hits: self.state.hits,
        });
        self.clock.stop();
        self.start_round();
        true
    }

    /// Toggle between Running and Paused; does nothing after game over
    pub fn on_pause_toggled(&mut self) {
        match self.state.phase {
            GamePhase::Running => {
                self.clock.stop();
                self.state.phase = GamePhase::Paused;
                log::debug!("Paused at x={}", self.state.ball.pos.x);
                self.events.push(RoundEvent::Paused);
            }
            GamePhase::Paused => {
                self.state.phase = GamePhase::Running;
                self.clock.start();
                log::debug!("Resumed");
                self.events.push(RoundEvent::Resumed);
            }
            GamePhase::GameOver => {}
        }
    }

    /// Clear the score and start over, from any phase
    pub fn on_reset_requested(&mut self) {
        self.clock.stop();
        self.state.clear_score();
        self.state.phase = GamePhase::Running;
        log::info!("Game reset");
        self.events.push(RoundEvent::Reset);
        self.start_round();
    }

    fn end_game(&mut self) {
        self.clock.stop();
        self.state.ball.visible = false;
        if self.state.phase == GamePhase::GameOver {
            return;
        }

        self.state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: {} hits, {} misses",
            self.state.hits,
            self.state.misses
        );
        self.events.push(RoundEvent::GameOver {
            hits: self.state.hits,
            misses: self.state.misses,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    /// Tick until the current round ends in a miss
    fn play_until_miss(controller: &mut RoundController) {
        let misses = controller.state().misses;
        for _ in 0..1000 {
            controller.frame_tick();
            if controller.state().misses > misses {
                return;
            }
        }
        panic!("ball never left the bounds");
    }

    /// Reset until the running round heads `direction`
    fn heading(seed: u64, direction: Direction) -> RoundController {
        let mut controller = RoundController::new(seed);
        for _ in 0..64 {
            if controller.state().ball.direction == direction {
                controller.drain_events();
                return controller;
            }
            controller.on_reset_requested();
        }
        panic!("no {direction:?} round drawn");
    }

    #[test]
    fn test_fresh_controller_is_running() {
        let mut controller = RoundController::new(12345);
        let state = controller.state();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.hits, 0);
        assert_eq!(state.misses, 0);
        assert_eq!(state.round, 1);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 150.0));
        assert!(controller.clock().is_active());

        let events = controller.drain_events();
        assert!(matches!(events.as_slice(), [RoundEvent::RoundStarted { round: 1, .. }]));
        assert!(controller.drain_events().is_empty());
    }

    #[test]
    fn test_five_hits() {
        let mut controller = RoundController::new(1);
        for _ in 0..5 {
            controller.frame_tick();
            assert!(controller.on_ball_clicked());
        }
        let state = controller.state();
        assert_eq!(state.hits, 5);
        assert_eq!(state.misses, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.round, 6);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 150.0));
    }

    #[test]
    fn test_five_misses_end_game() {
        let mut controller = RoundController::new(2);
        for expected in 1..=4 {
            play_until_miss(&mut controller);
            assert_eq!(controller.state().misses, expected);
            assert_eq!(controller.phase(), GamePhase::Running);
        }
        play_until_miss(&mut controller);

        let state = controller.state();
        assert_eq!(state.misses, 5);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.ball.visible);
        assert!(!controller.clock().is_active());

        let view = controller.view();
        assert!(view.game_over_visible);
        assert!(!view.ball_visible);
        assert!(!view.ticking);

        let events = controller.drain_events();
        assert_eq!(
            events.last(),
            Some(&RoundEvent::GameOver { hits: 0, misses: 5 })
        );
    }

    #[test]
    fn test_game_over_ignores_input() {
        let mut controller = RoundController::new(3);
        for _ in 0..5 {
            play_until_miss(&mut controller);
        }
        let before = controller.state().clone();

        assert!(!controller.frame_tick());
        assert!(!controller.on_ball_clicked());
        controller.on_pause_toggled();

        let after = controller.state();
        assert_eq!(after.phase, GamePhase::GameOver);
        assert_eq!(after.hits, before.hits);
        assert_eq!(after.misses, 5);
        assert_eq!(after.ball, before.ball);
    }

    #[test]
    fn test_reset_after_game_over() {
        let mut controller = RoundController::new(4);
        for _ in 0..5 {
            play_until_miss(&mut controller);
        }
        controller.on_reset_requested();

        let state = controller.state();
        assert_eq!(state.hits, 0);
        assert_eq!(state.misses, 0);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.ball.visible);
        assert_eq!(state.ball.pos, Vec2::new(200.0, 150.0));
        assert!(controller.clock().is_active());
        assert!(!controller.view().game_over_visible);
    }

    #[test]
    fn test_reset_twice_matches_reset_once() {
        let mut controller = RoundController::new(5);
        controller.on_ball_clicked();
        play_until_miss(&mut controller);

        controller.on_reset_requested();
        let once = controller.state().clone();
        controller.on_reset_requested();
        let twice = controller.state();

        assert_eq!(twice.hits, once.hits);
        assert_eq!(twice.misses, once.misses);
        assert_eq!(twice.phase, once.phase);
        assert_eq!(twice.round, once.round);
        assert_eq!(twice.ball.pos, once.ball.pos);
    }

    #[test]
    fn test_miss_registers_on_tick_111() {
        let mut controller = heading(6, Direction::Right);

        for _ in 0..110 {
            assert!(controller.frame_tick());
        }
        assert_eq!(controller.state().ball.pos.x, 420.0);
        assert_eq!(controller.state().misses, 0);

        assert!(controller.frame_tick());
        assert_eq!(controller.state().misses, 1);
        // Next round already started from the center
        assert_eq!(controller.state().ball.pos, Vec2::new(200.0, 150.0));

        let events = controller.drain_events();
        assert!(matches!(
            events.as_slice(),
            [RoundEvent::Missed { misses: 1 }, RoundEvent::RoundStarted { round: 2, .. }]
        ));
    }

    #[test]
    fn test_pause_twice_restores_state() {
        let mut controller = RoundController::new(7);
        for _ in 0..10 {
            controller.frame_tick();
        }
        let before = controller.state().clone();

        controller.on_pause_toggled();
        assert_eq!(controller.phase(), GamePhase::Paused);
        assert!(!controller.clock().is_active());
        assert_eq!(controller.state().ball, before.ball);

        controller.on_pause_toggled();
        let after = controller.state();
        assert_eq!(after.phase, GamePhase::Running);
        assert_eq!(after.ball, before.ball);
        assert_eq!(after.hits, before.hits);
        assert_eq!(after.misses, before.misses);
        assert!(controller.clock().is_active());
    }

    #[test]
    fn test_paused_controller_ignores_ticks_and_clicks() {
        let mut controller = RoundController::new(8);
        controller.frame_tick();
        controller.on_pause_toggled();
        let ball = controller.state().ball;

        for _ in 0..200 {
            assert!(!controller.frame_tick());
        }
        assert!(!controller.on_ball_clicked());
        assert_eq!(controller.state().ball, ball);
        assert_eq!(controller.state().hits, 0);
        assert_eq!(controller.state().misses, 0);
    }

    #[test]
    fn test_reset_while_paused_resumes() {
        let mut controller = RoundController::new(9);
        controller.on_ball_clicked();
        controller.on_pause_toggled();
        controller.on_reset_requested();

        assert_eq!(controller.phase(), GamePhase::Running);
        assert_eq!(controller.state().hits, 0);
        assert!(controller.clock().is_active());
    }

    #[test]
    fn test_same_seed_same_directions() {
        let mut a = RoundController::new(99999);
        let mut b = RoundController::new(99999);
        for _ in 0..20 {
            assert_eq!(a.state().ball.direction, b.state().ball.direction);
            a.on_ball_clicked();
            b.on_ball_clicked();
        }
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = GameConfig {
            ball_speed: -1.0,
            ..Default::default()
        };
        assert!(RoundController::with_config(config, 1).is_err());
    }

    #[test]
    fn test_custom_threshold() {
        let config = GameConfig {
            miss_threshold: 1,
            ..Default::default()
        };
        let mut controller = RoundController::with_config(config, 10).unwrap();
        play_until_miss(&mut controller);
        assert_eq!(controller.phase(), GamePhase::GameOver);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Click,
        Pause,
        Reset,
        Ticks(u16),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            3 => Just(Action::Click),
            1 => Just(Action::Pause),
            1 => Just(Action::Reset),
            6 => (1u16..300).prop_map(Action::Ticks),
        ]
    }

    proptest! {
        #[test]
        fn prop_misses_never_exceed_threshold(
            seed in any::<u64>(),
            actions in proptest::collection::vec(action(), 0..60),
        ) {
            let mut controller = RoundController::new(seed);
            for action in actions {
                match action {
                    Action::Click => { controller.on_ball_clicked(); }
                    Action::Pause => controller.on_pause_toggled(),
                    Action::Reset => controller.on_reset_requested(),
                    Action::Ticks(n) => for _ in 0..n { controller.frame_tick(); },
                }
                let state = controller.state();
                prop_assert!(state.misses <= 5);
                prop_assert_eq!(state.misses == 5, state.phase == GamePhase::GameOver);
                prop_assert_eq!(state.ball.visible, state.phase != GamePhase::GameOver);
                prop_assert_eq!(
                    controller.clock().is_active(),
                    state.phase == GamePhase::Running
                );
            }
        }

        #[test]
        fn prop_ticks_move_by_speed(seed in any::<u64>(), ticks in 1usize..110) {
            let mut controller = RoundController::new(seed);
            let sign = controller.state().ball.direction.sign();
            let y = controller.state().ball.pos.y;
            let mut last_x = controller.state().ball.pos.x;
            for _ in 0..ticks {
                prop_assert!(controller.frame_tick());
                let pos = controller.state().ball.pos;
                prop_assert_eq!(pos.x - last_x, sign * 2.0);
                prop_assert_eq!(pos.y, y);
                last_x = pos.x;
            }
        }
    }
}
