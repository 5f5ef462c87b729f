//! Catch-the-target mini game.
//!
//! `Idle -> Active` on [`GameController::start`]. While active the target hops
//! to a random spot every `tick_interval_ms` and the round ends on its own
//! `duration_ms` after the start. Each catch is worth [`POINTS_PER_CATCH`], so
//! `score == POINTS_PER_CATCH * clicks` holds until the next start or reset.
//!
//! Both timers live in [`TimerSlot`]s owned by the controller; a duplicate
//! `start` leaves them alone and `stop` disarms them, so no stale tick can move
//! the target after the round ends.

use log::{debug, info};
use rand::Rng;

use crate::error::{PlaygroundError, Result};
use crate::timer::TimerSlot;

pub const POINTS_PER_CATCH: u32 = 10;

/// Most relocations a single poll replays after the host stalls; only the
/// final position is visible anyway.
pub const MAX_CATCH_UP_MOVES: u32 = 64;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub tick_interval_ms: f64,
    pub duration_ms: f64,
    /// Edge length of the (square) target.
    pub target_size: f64,
    /// Play area used until the host reports its real size.
    pub area_width: f64,
    pub area_height: f64,
}

impl GameConfig {
    /// Periods must be positive and finite and the target must have a size.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("game.tick_interval_ms", self.tick_interval_ms)?;
        ensure_positive("game.duration_ms", self.duration_ms)?;
        ensure_positive("game.target_size", self.target_size)?;
        Ok(())
    }
}

pub(crate) fn ensure_positive(field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PlaygroundError::InvalidConfig(format!("{field} must be positive and finite, got {value}")))
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1500.0,
            duration_ms: 30_000.0,
            target_size: 50.0,
            area_width: 600.0,
            area_height: 300.0,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner of the target inside the play area.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    TargetMoved(Position),
    /// The round ran out of time.
    Expired { score: u32, clicks: u32 },
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameSnapshot {
    pub active: bool,
    pub score: u32,
    pub clicks: u32,
    pub target: Position,
    /// Time left before the round ends on its own; 0 while idle.
    pub remaining_ms: f64,
}

#[derive(Clone, Debug)]
pub struct GameController {
    config: GameConfig,
    bounds: Bounds,
    active: bool,
    score: u32,
    clicks: u32,
    target: Position,
    tick: TimerSlot,
    auto_stop: TimerSlot,
}

impl GameController {
    /// Fails with [`PlaygroundError::InvalidConfig`] for bad periods or target size,
    /// and [`PlaygroundError::InvalidBounds`] if the configured area cannot hold the target.
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let bounds = Bounds { width: config.area_width, height: config.area_height };
        check_bounds(bounds, config.target_size)?;
        Ok(Self {
            config,
            bounds,
            active: false,
            score: 0,
            clicks: 0,
            target: centered(bounds, config.target_size),
            tick: TimerSlot::new(),
            auto_stop: TimerSlot::new(),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn target(&self) -> Position {
        self.target
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Generation of the relocation timer; unchanged by a duplicate `start`.
    pub fn tick_generation(&self) -> u64 {
        self.tick.generation()
    }

    /// Begin a round. Returns `false` (and changes nothing) if one is already running.
    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        if self.active {
            debug!("game already active, ignoring start");
            return false;
        }
        self.active = true;
        self.score = 0;
        self.clicks = 0;
        self.tick.arm_repeating(now_ms, self.config.tick_interval_ms);
        self.auto_stop.arm_once(now_ms, self.config.duration_ms);
        self.relocate(rng);
        info!("game started");
        true
    }

    /// Remember new play-area bounds for subsequent moves.
    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<()> {
        check_bounds(bounds, self.config.target_size)?;
        self.bounds = bounds;
        Ok(())
    }

    /// Move the target somewhere inside `bounds`. No-op while idle.
    ///
    /// If `bounds` is too small on an axis the target is pinned to 0 on that
    /// axis and [`PlaygroundError::InvalidBounds`] is returned; the stored
    /// bounds are left untouched in that case.
    pub fn tick<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> Result<Position> {
        if !self.active {
            return Ok(self.target);
        }
        let size = self.config.target_size;
        match check_bounds(bounds, size) {
            Ok(()) => {
                self.bounds = bounds;
                self.relocate(rng);
                Ok(self.target)
            }
            Err(err) => {
                self.target = Position {
                    x: random_offset(rng, bounds.width - size),
                    y: random_offset(rng, bounds.height - size),
                };
                Err(err)
            }
        }
    }

    /// Count a catch and move the target. Returns `false` while idle.
    pub fn catch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.active {
            return false;
        }
        self.clicks += 1;
        self.score += POINTS_PER_CATCH;
        self.relocate(rng);
        debug!("target caught, score {}", self.score);
        true
    }

    /// End the round, keeping score and clicks. Returns whether a round was running.
    pub fn stop(&mut self) -> bool {
        self.tick.cancel();
        self.auto_stop.cancel();
        if !self.active {
            return false;
        }
        self.active = false;
        info!("game stopped, final score {}", self.score);
        true
    }

    /// Stop, zero the score and put the target back in the middle.
    pub fn reset(&mut self) {
        self.stop();
        self.score = 0;
        self.clicks = 0;
        self.target = centered(self.bounds, self.config.target_size);
    }

    /// Fire whichever timers are due at `now_ms`.
    ///
    /// Relocation ticks that fall due before the end of the round fire first;
    /// the round then expires and nothing further is scheduled. A stalled host
    /// gets at most [`MAX_CATCH_UP_MOVES`] moves per poll.
    pub fn poll<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.active {
            return events;
        }
        let expiry = self.auto_stop.due_ms().filter(|&due| due <= now_ms);
        let ticks = match expiry {
            Some(due) => self.tick.poll_before(due),
            None => self.tick.poll(now_ms),
        };
        for _ in 0..ticks.min(MAX_CATCH_UP_MOVES) {
            self.relocate(rng);
            events.push(GameEvent::TargetMoved(self.target));
        }
        if expiry.is_some() && self.auto_stop.poll(now_ms) > 0 {
            self.stop();
            events.push(GameEvent::Expired { score: self.score, clicks: self.clicks });
        }
        events
    }

    pub fn snapshot(&self, now_ms: f64) -> GameSnapshot {
        GameSnapshot {
            active: self.active,
            score: self.score,
            clicks: self.clicks,
            target: self.target,
            remaining_ms: self.auto_stop.due_ms().map_or(0.0, |due| (due - now_ms).max(0.0)),
        }
    }

    // Stored bounds are validated on the way in, so this cannot fail.
    fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let size = self.config.target_size;
        self.target = Position {
            x: random_offset(rng, self.bounds.width - size),
            y: random_offset(rng, self.bounds.height - size),
        };
    }
}

fn check_bounds(bounds: Bounds, size: f64) -> Result<()> {
    let fits = |extent: f64| extent.is_finite() && extent >= size;
    if fits(bounds.width) && fits(bounds.height) {
        Ok(())
    } else {
        Err(PlaygroundError::InvalidBounds { width: bounds.width, height: bounds.height, size })
    }
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, room: f64) -> f64 {
    if room.is_finite() && room > 0.0 { rng.gen_range(0.0..=room) } else { 0.0 }
}

fn centered(bounds: Bounds, size: f64) -> Position {
    Position {
        x: ((bounds.width - size) / 2.0).max(0.0),
        y: ((bounds.height - size) / 2.0).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn controller() -> GameController {
        GameController::new(GameConfig::default()).unwrap()
    }

    fn moves(events: &[GameEvent]) -> usize {
        events.iter().filter(|e| matches!(e, GameEvent::TargetMoved(_))).count()
    }

    #[test]
    fn test_new_centres_target() {
        let game = controller();
        assert_eq!(game.target(), Position { x: 275.0, y: 125.0 });
        assert!(!game.is_active());
    }

    #[test]
    fn test_new_rejects_tiny_area() {
        let config = GameConfig { area_width: 10.0, ..GameConfig::default() };
        assert!(matches!(GameController::new(config), Err(PlaygroundError::InvalidBounds { .. })));
    }

    #[test]
    fn test_catch_scores_only_while_active() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = controller();
        assert!(!game.catch(&mut rng));
        assert!(game.start(0.0, &mut rng));
        assert!(game.catch(&mut rng));
        assert!(game.catch(&mut rng));
        assert_eq!((game.score(), game.clicks()), (20, 2));
    }

    #[test]
    fn test_duplicate_start_keeps_single_timer_set() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut game = controller();
        assert!(game.start(0.0, &mut rng));
        let generation = game.tick_generation();
        assert!(!game.start(700.0, &mut rng));
        assert_eq!(game.tick_generation(), generation);
        assert_eq!(moves(&game.poll(1_500.0, &mut rng)), 1);
        assert_eq!(moves(&game.poll(2_999.0, &mut rng)), 0);
        assert_eq!(moves(&game.poll(3_000.0, &mut rng)), 1);
    }

    #[test]
    fn test_auto_stop_after_duration() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut game = controller();
        game.start(0.0, &mut rng);
        game.catch(&mut rng);
        let events = game.poll(45_000.0, &mut rng);
        assert_eq!(moves(&events), 19);
        assert_eq!(events.last(), Some(&GameEvent::Expired { score: 10, clicks: 1 }));
        assert!(!game.is_active());
        assert!(game.poll(60_000.0, &mut rng).is_empty());
        assert_eq!(game.snapshot(60_000.0).score, 10);
    }

    #[test]
    fn test_stop_cancels_timers() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut game = controller();
        game.start(0.0, &mut rng);
        assert!(game.stop());
        assert!(!game.stop());
        assert!(game.poll(31_000.0, &mut rng).is_empty());
        assert_eq!(game.snapshot(31_000.0).remaining_ms, 0.0);
    }

    #[test]
    fn test_reset_zeroes_and_recentres() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut game = controller();
        game.start(0.0, &mut rng);
        game.catch(&mut rng);
        game.reset();
        let snap = game.snapshot(100.0);
        assert!(!snap.active);
        assert_eq!((snap.score, snap.clicks), (0, 0));
        assert_eq!(snap.target, Position { x: 275.0, y: 125.0 });
    }

    #[test]
    fn test_tick_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut game = controller();
        game.start(0.0, &mut rng);
        let bounds = Bounds { width: 120.0, height: 80.0 };
        for _ in 0..200 {
            let p = game.tick(bounds, &mut rng).unwrap();
            assert!((0.0..=70.0).contains(&p.x));
            assert!((0.0..=30.0).contains(&p.y));
        }
        assert_eq!(game.bounds(), bounds);
    }

    #[test]
    fn test_tick_invalid_bounds_clamps() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut game = controller();
        game.start(0.0, &mut rng);
        let err = game.tick(Bounds { width: 30.0, height: 40.0 }, &mut rng).unwrap_err();
        assert!(matches!(err, PlaygroundError::InvalidBounds { .. }));
        assert_eq!(game.target(), Position { x: 0.0, y: 0.0 });
        assert_eq!(game.bounds(), Bounds { width: 600.0, height: 300.0 });
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let negative_size = GameConfig { target_size: -40.0, ..GameConfig::default() };
        assert!(matches!(GameController::new(negative_size), Err(PlaygroundError::InvalidConfig(_))));
        let zero_tick = GameConfig { tick_interval_ms: 0.0, ..GameConfig::default() };
        assert!(matches!(GameController::new(zero_tick), Err(PlaygroundError::InvalidConfig(_))));
        let nan_duration = GameConfig { duration_ms: f64::NAN, ..GameConfig::default() };
        assert!(matches!(GameController::new(nan_duration), Err(PlaygroundError::InvalidConfig(_))));
    }

    #[test]
    fn test_tick_pins_only_the_short_axis() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut game = controller();
        game.start(0.0, &mut rng);
        let bounds = Bounds { width: 200.0, height: 30.0 };
        let mut xs = Vec::new();
        for _ in 0..50 {
            let err = game.tick(bounds, &mut rng).unwrap_err();
            assert!(matches!(err, PlaygroundError::InvalidBounds { .. }));
            let p = game.target();
            assert_eq!(p.y, 0.0);
            assert!((0.0..=150.0).contains(&p.x));
            xs.push(p.x);
        }
        assert!(xs.iter().any(|&x| x != xs[0]), "x axis was not randomised");
    }

    #[test]
    fn test_tick_and_expiry_in_same_poll_after_catch() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut game = controller();
        game.start(0.0, &mut rng);
        let generation = game.tick_generation();
        assert!(game.catch(&mut rng));
        assert_eq!(game.tick_generation(), generation);
        let events = game.poll(30_000.0, &mut rng);
        assert_eq!(moves(&events), 19);
        assert_eq!(events.last(), Some(&GameEvent::Expired { score: 10, clicks: 1 }));
        assert!(!game.is_active());
    }

    #[test]
    fn test_stalled_poll_caps_moves() {
        let mut rng = StdRng::seed_from_u64(16);
        let config = GameConfig { tick_interval_ms: 1.0, duration_ms: 1e12, ..GameConfig::default() };
        let mut game = GameController::new(config).unwrap();
        game.start(0.0, &mut rng);
        let events = game.poll(5e9, &mut rng);
        assert_eq!(moves(&events), MAX_CATCH_UP_MOVES as usize);
        assert!(game.is_active());
        assert_eq!(moves(&game.poll(5e9 + 1.0, &mut rng)), 1);
    }

    #[test]
    fn test_tick_while_idle_is_noop() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut game = controller();
        let before = game.target();
        assert_eq!(game.tick(Bounds { width: 1.0, height: 1.0 }, &mut rng), Ok(before));
    }
}
