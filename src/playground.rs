//! The coordinator the UI layer talks to.
//!
//! [`Playground`] owns the stats counters, both controllers, the current array
//! and the random source. Every entry point records its clicks / animations /
//! function calls here, so engines stay pure and tests can run independent
//! playgrounds side by side.

use std::collections::HashSet;

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::animation::AnimationKind;
use crate::config::PlaygroundConfig;
use crate::engine::{self, Calculation, ColorSample, MathOp, TextOp, TextResult};
use crate::error::{PlaygroundError, Result};
use crate::game::{Bounds, GameController, GameEvent, GameSnapshot, Position};
use crate::loading::{LoadingEvent, LoadingKind, LoadingSession, LoadingSnapshot};
use crate::stats::{StatsCounter, StatsSnapshot};
use crate::timer::TimerSlot;

/// Something that happened while polling timers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
#[derive(Clone, Debug, PartialEq)]
pub enum PlaygroundEvent {
    TargetMoved(Position),
    GameExpired { score: u32, clicks: u32 },
    LoadingCompleted { kind: LoadingKind },
    LoadingIdle,
    StatsRefreshed(StatsSnapshot),
}

/// Sum and mean of the current array.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArraySummary {
    pub sum: i64,
    pub average: f64,
}

/// Outcome of [`Playground::demonstrate_scope`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScopeReport {
    /// Playground-wide count of scope demos so far.
    pub counter: u64,
    pub message: String,
    /// Fresh per call, in `0..100`.
    pub local_random: u32,
}

pub struct Playground {
    config: PlaygroundConfig,
    stats: StatsCounter,
    game: GameController,
    loading: LoadingSession,
    current_array: Vec<i32>,
    flipped_cards: HashSet<String>,
    modal_open: bool,
    scope_counter: u64,
    stats_refresh: TimerSlot,
    rng: StdRng,
}

impl Playground {
    /// A playground seeded from system entropy.
    pub fn new(config: PlaygroundConfig, now_ms: f64) -> Result<Self> {
        Self::with_rng(config, now_ms, StdRng::from_entropy())
    }

    /// A playground with a fixed seed, for reproducible runs.
    pub fn with_seed(config: PlaygroundConfig, now_ms: f64, seed: u64) -> Result<Self> {
        Self::with_rng(config, now_ms, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PlaygroundConfig, now_ms: f64, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let game = GameController::new(config.game)?;
        let mut stats_refresh = TimerSlot::new();
        stats_refresh.arm_repeating(now_ms, config.stats_refresh_ms);
        info!("playground initialised");
        Ok(Self {
            config,
            stats: StatsCounter::new(now_ms),
            game,
            loading: LoadingSession::new(config.loading),
            current_array: Vec::new(),
            flipped_cards: HashSet::new(),
            modal_open: false,
            scope_counter: 0,
            stats_refresh,
            rng,
        })
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    // --- Engines ---------------------------------------------------------------

    pub fn calculate(&mut self, a: f64, b: f64, op: &str) -> Result<Calculation> {
        self.stats.record_click();
        self.stats.record_function_call();
        let op: MathOp = op.parse()?;
        Calculation::new(a, b, op)
    }

    pub fn process_text(&mut self, text: &str, op: &str) -> Result<TextResult> {
        self.stats.record_click();
        self.stats.record_function_call();
        let op: TextOp = op.parse()?;
        engine::process(text, op)
    }

    pub fn generate_color(&mut self) -> ColorSample {
        self.stats.record_click();
        self.stats.record_function_call();
        ColorSample::generate(&mut self.rng)
    }

    // --- Array workspace -------------------------------------------------------

    /// Replace the current array with a fresh one drawn per [`ArrayDefaults`](crate::ArrayDefaults).
    pub fn array_generate(&mut self) -> Result<&[i32]> {
        let defaults = self.config.array;
        self.array_generate_with(defaults.length, defaults.min, defaults.max)
    }

    pub fn array_generate_with(&mut self, length: i64, min: i32, max: i32) -> Result<&[i32]> {
        self.record_array_call();
        self.current_array = engine::generate(&mut self.rng, length, min, max)?;
        Ok(&self.current_array)
    }

    pub fn array_sort(&mut self) -> Result<&[i32]> {
        self.record_array_call();
        self.require_array()?;
        self.current_array = engine::sort(&self.current_array);
        Ok(&self.current_array)
    }

    pub fn array_reverse(&mut self) -> Result<&[i32]> {
        self.record_array_call();
        self.require_array()?;
        self.current_array = engine::reverse(&self.current_array);
        Ok(&self.current_array)
    }

    pub fn array_sum(&mut self) -> Result<ArraySummary> {
        self.record_array_call();
        let (sum, average) = engine::sum_and_average(&self.current_array)?;
        Ok(ArraySummary { sum, average })
    }

    pub fn current_array(&self) -> &[i32] {
        &self.current_array
    }

    fn record_array_call(&mut self) {
        self.stats.record_click();
        self.stats.record_function_call();
    }

    fn require_array(&self) -> Result<()> {
        if self.current_array.is_empty() { Err(PlaygroundError::EmptyArray) } else { Ok(()) }
    }

    // --- Animations ------------------------------------------------------------

    /// Record an animation trigger and return how long it runs.
    pub fn trigger_animation(&mut self, name: &str) -> u32 {
        self.stats.record_click();
        self.stats.record_animation();
        self.stats.record_function_call();
        debug!("triggered {} animation", name);
        crate::animation::animation_duration(name)
    }

    pub fn trigger(&mut self, kind: AnimationKind) -> u32 {
        self.trigger_animation(kind.name())
    }

    pub fn reset_animations(&mut self) {
        self.stats.record_click();
        debug!("animations reset");
    }

    // --- Cards & modal ---------------------------------------------------------

    /// Toggle `card` and return whether it now shows its back.
    pub fn flip_card(&mut self, card: &str) -> bool {
        self.record_animated_call();
        let flipped = if self.flipped_cards.remove(card) {
            false
        } else {
            self.flipped_cards.insert(card.to_string());
            true
        };
        debug!("card {} flipped: {}", card, flipped);
        flipped
    }

    pub fn is_flipped(&self, card: &str) -> bool {
        self.flipped_cards.contains(card)
    }

    pub fn show_modal(&mut self, animation: &str) {
        self.record_animated_call();
        self.modal_open = true;
        debug!("modal shown with {} animation", animation);
    }

    pub fn close_modal(&mut self) {
        self.stats.record_click();
        self.modal_open = false;
        debug!("modal closed");
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    fn record_animated_call(&mut self) {
        self.stats.record_click();
        self.stats.record_animation();
        self.stats.record_function_call();
    }

    // --- Misc ------------------------------------------------------------------

    /// Count a click on a button that has no dedicated operation.
    pub fn record_click(&mut self) {
        self.stats.record_click();
    }

    pub fn demonstrate_scope(&mut self) -> ScopeReport {
        self.stats.record_click();
        self.stats.record_function_call();
        self.scope_counter = self.scope_counter.saturating_add(1);
        ScopeReport {
            counter: self.scope_counter,
            message: format!("Updated by function call #{}", self.scope_counter),
            local_random: self.rng.gen_range(0..100),
        }
    }

    // --- Game ------------------------------------------------------------------

    pub fn game_start(&mut self, now_ms: f64) -> bool {
        self.stats.record_click();
        self.stats.record_function_call();
        self.game.start(now_ms, &mut self.rng)
    }

    pub fn game_catch(&mut self) -> bool {
        let caught = self.game.catch(&mut self.rng);
        if caught {
            self.stats.record_click();
        }
        caught
    }

    pub fn game_tick(&mut self, bounds: Bounds) -> Result<Position> {
        self.game.tick(bounds, &mut self.rng)
    }

    pub fn game_set_bounds(&mut self, bounds: Bounds) -> Result<()> {
        self.game.set_bounds(bounds)
    }

    pub fn game_stop(&mut self) -> bool {
        self.game.stop()
    }

    pub fn game_reset(&mut self) {
        self.stats.record_click();
        self.game.reset();
    }

    pub fn game(&self, now_ms: f64) -> GameSnapshot {
        self.game.snapshot(now_ms)
    }

    // --- Loading ---------------------------------------------------------------

    pub fn loading_start(&mut self, kind: &str, duration_ms: f64, now_ms: f64) -> Result<()> {
        self.stats.record_click();
        self.stats.record_animation();
        self.stats.record_function_call();
        let kind: LoadingKind = kind.parse()?;
        self.loading.start(kind, duration_ms, now_ms)
    }

    pub fn loading_stop(&mut self, now_ms: f64) {
        self.stats.record_click();
        self.loading.stop(now_ms);
    }

    pub fn loading(&self, now_ms: f64) -> LoadingSnapshot {
        self.loading.snapshot(now_ms)
    }

    // --- Stats & timers --------------------------------------------------------

    pub fn stats(&self, now_ms: f64) -> StatsSnapshot {
        self.stats.snapshot(now_ms)
    }

    /// Fire every timer due at `now_ms`, in game, loading, stats order.
    /// Missed stats refreshes collapse into a single event.
    pub fn poll(&mut self, now_ms: f64) -> Vec<PlaygroundEvent> {
        let mut events: Vec<PlaygroundEvent> = self
            .game
            .poll(now_ms, &mut self.rng)
            .into_iter()
            .map(|event| match event {
                GameEvent::TargetMoved(pos) => PlaygroundEvent::TargetMoved(pos),
                GameEvent::Expired { score, clicks } => PlaygroundEvent::GameExpired { score, clicks },
            })
            .collect();
        events.extend(self.loading.poll(now_ms).into_iter().map(|event| match event {
            LoadingEvent::Completed(kind) => PlaygroundEvent::LoadingCompleted { kind },
            LoadingEvent::Idle => PlaygroundEvent::LoadingIdle,
        }));
        if self.stats_refresh.poll(now_ms) > 0 {
            events.push(PlaygroundEvent::StatsRefreshed(self.stats.snapshot(now_ms)));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playground() -> Playground {
        Playground::with_seed(PlaygroundConfig::default(), 0.0, 17).unwrap()
    }

    #[test]
    fn test_calculate_counts_click_and_call() {
        let mut pg = playground();
        assert_eq!(pg.calculate(6.0, 3.0, "add").map(|c| c.result), Ok(9.0));
        assert_eq!(
            pg.calculate(6.0, 3.0, "mod"),
            Err(PlaygroundError::InvalidOperation("mod".into()))
        );
        let stats = pg.stats(0.0);
        assert_eq!((stats.clicks, stats.function_calls), (2, 2));
    }

    #[test]
    fn test_array_ops_need_generated_array() {
        let mut pg = playground();
        assert_eq!(pg.array_sort().err(), Some(PlaygroundError::EmptyArray));
        assert_eq!(pg.array_sum().err(), Some(PlaygroundError::EmptyArray));
        assert_eq!(pg.array_generate().unwrap().len(), 8);
        let sorted = pg.array_sort().unwrap().to_vec();
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
        assert!(sorted.iter().all(|v| (1..=100).contains(v)));
    }

    #[test]
    fn test_stats_refresh_collapses() {
        let mut pg = playground();
        let events = pg.poll(3_500.0);
        let refreshes = events
            .iter()
            .filter(|e| matches!(e, PlaygroundEvent::StatsRefreshed(_)))
            .count();
        assert_eq!(refreshes, 1);
        assert!(pg.poll(3_900.0).is_empty());
    }

    #[test]
    fn test_animation_counts() {
        let mut pg = playground();
        assert_eq!(pg.trigger_animation("flip"), 1000);
        assert_eq!(pg.trigger(AnimationKind::Shake), 600);
        let stats = pg.stats(0.0);
        assert_eq!((stats.clicks, stats.animations, stats.function_calls), (2, 2, 2));
    }

    #[test]
    fn test_constructor_validates_config() {
        let mut config = PlaygroundConfig::default();
        config.game.target_size = -40.0;
        assert!(matches!(
            Playground::with_seed(config, 0.0, 1),
            Err(PlaygroundError::InvalidConfig(_))
        ));
        let config = PlaygroundConfig { stats_refresh_ms: 0.0, ..Default::default() };
        assert!(matches!(Playground::new(config, 0.0), Err(PlaygroundError::InvalidConfig(_))));
    }

    #[test]
    fn test_flip_card_toggles_per_card() {
        let mut pg = playground();
        assert!(pg.flip_card("front"));
        assert!(pg.flip_card("back"));
        assert!(!pg.flip_card("front"));
        assert!(!pg.is_flipped("front"));
        assert!(pg.is_flipped("back"));
    }

    #[test]
    fn test_modal_open_close() {
        let mut pg = playground();
        assert!(!pg.modal_open());
        pg.show_modal("zoom");
        assert!(pg.modal_open());
        pg.close_modal();
        assert!(!pg.modal_open());
        // Closing twice is harmless but still a click.
        pg.close_modal();
        assert_eq!(pg.stats(0.0).clicks, 3);
    }

    #[test]
    fn test_scope_counter_increments() {
        let mut pg = playground();
        let first = pg.demonstrate_scope();
        let second = pg.demonstrate_scope();
        assert_eq!((first.counter, second.counter), (1, 2));
        assert_eq!(second.message, "Updated by function call #2");
        assert!(first.local_random < 100 && second.local_random < 100);
    }
}
