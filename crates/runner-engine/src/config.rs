//! Engine configuration.
//!
//! Provides the gameplay tunables, frame pacing, enemy spawning and the
//! scripted input timeline for a headless run.
//! Configuration can be loaded from and saved to a file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use runner_common::RunnerResult;
use runner_gameplay::config::GameConfig;
use runner_gameplay::input::KeyCode;

/// Configuration file name.
const CONFIG_FILE: &str = "runner.toml";

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "RUNNER_CONFIG";

/// One entry of the input timeline, applied before the given frame runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    /// Frame number (0-based) this step applies to
    pub frame: u64,
    /// Keys pressed at this frame
    pub press: Vec<KeyCode>,
    /// Keys released at this frame
    pub release: Vec<KeyCode>,
    /// Flip debug outlines
    pub toggle_debug: bool,
    /// Pause (`true`) or resume (`false`)
    pub paused: Option<bool>,
}

impl ScriptStep {
    /// Step that presses `keys` at `frame`.
    #[must_use]
    pub fn press(frame: u64, keys: &[KeyCode]) -> Self {
        Self {
            frame,
            press: keys.to_vec(),
            ..Self::default()
        }
    }

    /// Step that releases `keys` at `frame`.
    #[must_use]
    pub fn release(frame: u64, keys: &[KeyCode]) -> Self {
        Self {
            frame,
            release: keys.to_vec(),
            ..Self::default()
        }
    }
}

/// Engine configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Simulation Settings ===
    /// Simulated frames per second (sets the per-frame delta)
    pub target_fps: u32,
    /// Frames to simulate before exiting
    pub frames: u64,
    /// Pace frames against the wall clock instead of running flat out
    pub realtime: bool,
    /// RNG seed for spawns and effects (None = random)
    pub seed: Option<u64>,

    // === Spawning ===
    /// Milliseconds between enemy spawns (0 = disabled)
    pub spawn_interval_ms: f32,

    // === Debug Settings ===
    /// Log every drained gameplay event
    pub log_events: bool,

    // === Gameplay Settings ===
    /// Player and world tunables
    pub game: GameConfig,

    // === Input Timeline ===
    /// Scripted key presses and releases
    pub script: Vec<ScriptStep>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            // Simulation
            target_fps: 60,
            frames: 600,
            realtime: false,
            seed: None,

            // Spawning
            spawn_interval_ms: 1000.0,

            // Debug
            log_events: false,

            // Gameplay
            game: GameConfig::default(),

            // Input: run, roll, jump, dive, run, stop
            script: vec![
                ScriptStep::press(0, &[KeyCode::ArrowRight]),
                ScriptStep::press(120, &[KeyCode::ArrowDown]),
                ScriptStep::release(180, &[KeyCode::ArrowDown]),
                ScriptStep::press(240, &[KeyCode::ArrowUp]),
                ScriptStep::release(245, &[KeyCode::ArrowUp]),
                ScriptStep::press(250, &[KeyCode::ArrowDown]),
                ScriptStep::release(260, &[KeyCode::ArrowDown]),
                ScriptStep::release(540, &[KeyCode::ArrowRight]),
            ],
        }
    }
}

impl EngineConfig {
    /// Load configuration from the default file location.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Self {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found, using defaults");
            return Self::default();
        }

        match fs::File::open(path) {
            Ok(mut file) => {
                let mut contents = String::new();
                if let Err(e) = file.read_to_string(&mut contents) {
                    warn!("Failed to read config file: {e}");
                    return Self::default();
                }

                match toml::from_str(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    },
                    Err(e) => {
                        warn!("Failed to parse config file: {e}");
                        Self::default()
                    },
                }
            },
            Err(e) => {
                warn!("Failed to open config file: {e}");
                Self::default()
            },
        }
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> RunnerResult<()> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut file = fs::File::create(path)?;
        file.write_all(contents.as_bytes())?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Config file path: `$RUNNER_CONFIG`, else `runner.toml` in the working
    /// directory.
    fn config_path() -> PathBuf {
        std::env::var(CONFIG_ENV).map_or_else(|_| PathBuf::from(CONFIG_FILE), PathBuf::from)
    }

    /// Validate and clamp configuration values to sensible ranges.
    ///
    /// Gameplay tunables that cannot be simulated are replaced by defaults.
    pub fn validate(&mut self) {
        // Simulation
        self.target_fps = self.target_fps.clamp(1, 240);
        self.frames = self.frames.min(1_000_000);

        // Spawning
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms < 0.0 {
            self.spawn_interval_ms = 0.0;
        }

        // Gameplay
        if let Err(e) = self.game.check() {
            warn!("Invalid gameplay config ({e}), using defaults");
            self.game = GameConfig::default();
        }

        // Input timeline runs in frame order
        self.script.sort_by_key(|step| step.frame);
    }

    /// Milliseconds per simulated frame.
    #[must_use]
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.target_fps.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.frames, 600);
        assert!(!config.realtime);
        assert_eq!(config.game.world.width, 900.0);
        assert_eq!(config.script[0].press, vec![KeyCode::ArrowRight]);
    }

    #[test]
    fn test_config_validation() {
        let mut config = EngineConfig::default();

        // Set invalid values
        config.target_fps = 0;
        config.spawn_interval_ms = -5.0;
        config.game.player.height = 1000.0;
        config.script = vec![
            ScriptStep::press(9, &[KeyCode::Space]),
            ScriptStep::press(2, &[KeyCode::A]),
        ];

        config.validate();

        // Should be clamped
        assert_eq!(config.target_fps, 1);
        assert_eq!(config.spawn_interval_ms, 0.0);
        assert_eq!(config.game, GameConfig::default());
        assert_eq!(config.script[0].frame, 2);
    }

    #[test]
    fn test_config_save_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        // Create and save config
        let mut config = EngineConfig::default();
        config.frames = 42;
        config.seed = Some(12345);
        config.game.debug = true;
        config.script.push(ScriptStep {
            frame: 30,
            paused: Some(true),
            ..ScriptStep::default()
        });

        config.save_to(&config_path).expect("Failed to save config");

        // Load and verify
        let loaded = EngineConfig::load_from(&config_path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from("/nonexistent/path/runner.toml");
        // Should return defaults
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_config_load_partial_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("runner.toml");
        fs::write(
            &config_path,
            "frames = 10\n\n[game.world]\nmax_speed = 5.0\n\n[[script]]\nframe = 3\npress = [\"Space\"]\n",
        )
        .expect("Failed to write config");

        let config = EngineConfig::load_from(&config_path);
        assert_eq!(config.frames, 10);
        assert_eq!(config.game.world.max_speed, 5.0);
        assert_eq!(config.game.world.width, 900.0);
        assert_eq!(config.script, vec![ScriptStep::press(3, &[KeyCode::Space])]);
    }

    #[test]
    fn test_config_load_garbage_falls_back() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("runner.toml");
        fs::write(&config_path, "frames = \"many\"").expect("Failed to write config");

        assert_eq!(EngineConfig::load_from(&config_path), EngineConfig::default());
    }

    #[test]
    fn test_frame_ms() {
        let mut config = EngineConfig::default();
        config.target_fps = 50;
        assert_eq!(config.frame_ms(), 20.0);
    }
}
