//! Application lifecycle management.
//!
//! Headless game loop: replays the scripted key timeline through the input
//! manager, spawns enemies on a timer, steps the session and logs what the
//! gameplay layer reports.

use anyhow::Result;
use tracing::{debug, info, warn};

use runner_common::RunnerResult;

use runner_gameplay::enemy::{Enemy, EnemyKind};
use runner_gameplay::events::GameEvent;
use runner_gameplay::input::{InputManager, Vec2};
use runner_gameplay::player_state::PlayerState;
use runner_gameplay::session::Session;

use crate::config::{EngineConfig, ScriptStep};
use crate::timing::FrameTiming;

/// Totals reported when the run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames stepped, including paused ones
    pub frames: u64,
    /// Frames the session actually simulated
    pub simulated: u64,
    /// Enemies defeated
    pub score: u32,
    /// Times the player was hit
    pub hits: u32,
    /// Enemies spawned
    pub spawned: u32,
    /// Enemies removed by the sweep
    pub removed: u32,
    /// State changes
    pub state_changes: u32,
    /// Player state at the end of the run
    pub final_state: PlayerState,
}

/// A configured headless run.
#[derive(Debug)]
pub struct RunnerApp {
    /// Engine configuration
    config: EngineConfig,
    /// Level state
    session: Session,
    /// Key state and bindings
    input: InputManager,
    /// Frame timing
    timing: FrameTiming,
    /// Randomness for spawn placement
    rng: fastrand::Rng,
    /// Next unapplied script step
    script_cursor: usize,
    /// Milliseconds since the last spawn
    spawn_timer: f32,
    /// Frames stepped so far
    frame: u64,
    /// Running totals
    summary: RunSummary,
}

impl RunnerApp {
    /// Build a run from validated configuration.
    pub fn new(config: EngineConfig) -> RunnerResult<Self> {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let session = Session::try_new(&config.game, seed)?;
        let timing = FrameTiming::new(config.target_fps).with_realtime(config.realtime);

        info!(seed, frames = config.frames, fps = config.target_fps, "run configured");

        Ok(Self {
            config,
            session,
            input: InputManager::new(),
            timing,
            rng: fastrand::Rng::with_seed(seed),
            script_cursor: 0,
            spawn_timer: 0.0,
            frame: 0,
            summary: RunSummary::default(),
        })
    }

    /// The running session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Step every configured frame and return the totals.
    pub fn run(&mut self) -> RunSummary {
        while self.frame < self.config.frames {
            self.step();
            self.timing.sleep_remainder();
        }
        self.summary()
    }

    /// Step one frame.
    pub fn step(&mut self) {
        self.apply_script();

        let delta_ms = self.timing.delta_ms();
        if !self.session.is_paused() {
            self.tick_spawner(delta_ms);
        }

        let input = self.input.process();
        let before = self.session.frame();
        self.session.update(&input, delta_ms);
        if self.session.frame() > before {
            self.summary.simulated += 1;
        }

        self.drain_events();
        self.frame += 1;
    }

    /// Totals so far.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.frame,
            score: self.session.score(),
            final_state: self.session.player().state(),
            ..self.summary
        }
    }

    /// Apply every script step due at the current frame.
    fn apply_script(&mut self) {
        while let Some(step) = self.config.script.get(self.script_cursor) {
            if step.frame > self.frame {
                break;
            }
            let step = step.clone();
            self.script_cursor += 1;
            self.apply_step(&step);
        }
    }

    fn apply_step(&mut self, step: &ScriptStep) {
        for key in &step.press {
            self.input.update_key(*key, true);
        }
        for key in &step.release {
            self.input.update_key(*key, false);
        }
        if step.toggle_debug {
            self.session.toggle_debug();
        }
        if let Some(paused) = step.paused {
            self.session.set_paused(paused);
            if !paused {
                self.timing.reset();
            }
            info!(frame = self.frame, paused, "pause state changed");
        }
        debug!(frame = self.frame, input = %self.input.process(), "script step applied");
    }

    /// Spawn an enemy at the right edge whenever the interval elapses.
    fn tick_spawner(&mut self, delta_ms: f32) {
        if self.config.spawn_interval_ms <= 0.0 {
            return;
        }
        self.spawn_timer += delta_ms;
        if self.spawn_timer < self.config.spawn_interval_ms {
            return;
        }
        self.spawn_timer = 0.0;

        let enemy = self.random_enemy();
        self.session.spawn_enemy(enemy);
    }

    fn random_enemy(&mut self) -> Enemy {
        let world = self.config.game.world.clone();
        let kind = match self.rng.u8(0..3) {
            0 => EnemyKind::Ground,
            1 => EnemyKind::Flying,
            _ => EnemyKind::Climbing,
        };
        let size = kind.size();
        let ground = world.height - world.ground_margin - size.y;
        let y = match kind {
            EnemyKind::Ground => ground,
            EnemyKind::Flying => self.rng.f32() * (ground * 0.5).max(0.0),
            EnemyKind::Climbing => 0.0,
        };
        Enemy::new(kind, Vec2::new(world.width, y))
    }

    /// Log and count everything the session reported this frame.
    fn drain_events(&mut self) {
        let log_events = self.config.log_events;
        for event in self.session.drain_events() {
            if log_events {
                debug!(frame = self.frame, ?event, "gameplay event");
            }
            match event {
                GameEvent::StateChanged { .. } => self.summary.state_changes += 1,
                GameEvent::PlayerHit { enemy } => {
                    self.summary.hits += 1;
                    info!(frame = self.frame, %enemy, "player hit");
                },
                GameEvent::EnemyDefeated { enemy, score, .. } => {
                    info!(frame = self.frame, %enemy, score, "enemy defeated");
                },
                GameEvent::EnemySpawned { .. } => self.summary.spawned += 1,
                GameEvent::EnemyRemoved { .. } => self.summary.removed += 1,
            }
        }
    }
}

/// Runs the main application loop.
pub fn run() -> Result<()> {
    // Load configuration
    let mut config = EngineConfig::load();
    config.validate();

    info!("Configuration loaded:");
    info!("  Frames: {} at {} fps", config.frames, config.target_fps);
    info!("  Frame delta: {:.2} ms", config.frame_ms());
    info!("  Realtime: {}", config.realtime);
    info!(
        "  World: {}x{}",
        config.game.world.width, config.game.world.height
    );
    if config.script.is_empty() {
        warn!("Input script is empty, the player will sit still");
    }

    let mut app = RunnerApp::new(config)?;
    let summary = app.run();

    info!(
        frames = summary.frames,
        simulated = summary.simulated,
        score = summary.score,
        hits = summary.hits,
        spawned = summary.spawned,
        removed = summary.removed,
        state_changes = summary.state_changes,
        final_state = %summary.final_state,
        "run finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runner_gameplay::input::KeyCode;

    fn quiet_config() -> EngineConfig {
        EngineConfig {
            frames: 10,
            seed: Some(7),
            spawn_interval_ms: 0.0,
            script: Vec::new(),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_idle_run() {
        let mut app = RunnerApp::new(quiet_config()).expect("valid config");
        let summary = app.run();

        assert_eq!(summary.frames, 10);
        assert_eq!(summary.simulated, 10);
        assert_eq!(summary.final_state, PlayerState::Sitting);
        assert_eq!(summary.spawned, 0);
    }

    #[test]
    fn test_script_drives_player() {
        let mut config = quiet_config();
        config.script = vec![
            ScriptStep::press(0, &[KeyCode::D]),
            ScriptStep::press(3, &[KeyCode::S]),
        ];
        let mut app = RunnerApp::new(config).expect("valid config");

        for _ in 0..3 {
            app.step();
        }
        assert_eq!(app.session().player().state(), PlayerState::Running);

        app.step();
        assert_eq!(app.session().player().state(), PlayerState::Rolling);
    }

    #[test]
    fn test_pause_step() {
        let mut config = quiet_config();
        config.script = vec![
            ScriptStep {
                frame: 2,
                paused: Some(true),
                ..ScriptStep::default()
            },
            ScriptStep {
                frame: 5,
                paused: Some(false),
                toggle_debug: true,
                ..ScriptStep::default()
            },
        ];
        let mut app = RunnerApp::new(config).expect("valid config");
        let summary = app.run();

        assert_eq!(summary.frames, 10);
        assert_eq!(summary.simulated, 7);
        assert!(app.session().context().debug());
    }

    #[test]
    fn test_spawner_interval() {
        let mut config = quiet_config();
        config.target_fps = 10;
        config.frames = 25;
        config.spawn_interval_ms = 1000.0;
        let mut app = RunnerApp::new(config).expect("valid config");
        let summary = app.run();

        assert_eq!(summary.spawned, 2);
        for enemy in app.session().context().enemies() {
            assert!(enemy.position().x <= 900.0);
        }
    }

    #[test]
    fn test_default_run_is_deterministic() {
        let config = EngineConfig {
            seed: Some(99),
            ..EngineConfig::default()
        };
        let first = RunnerApp::new(config.clone()).expect("valid config").run();
        let second = RunnerApp::new(config).expect("valid config").run();

        assert_eq!(first, second);
        assert_eq!(first.frames, 600);
        assert!(first.state_changes > 0);
    }
}
