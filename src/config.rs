/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub snake: SnakeConfig,
    pub chase: ChaseConfig,
    /// Fixed RNG seed for reproducible runs. `None` = seed from entropy.
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnakeConfig {
    pub tick_rate_ms: u64,
    pub grid_size: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChaseConfig {
    pub frame_ms: u64,
    pub gravity: f32,
    pub run_speed: f32,     // horizontal speed while a direction key is held
    pub jump_impulse: f32,  // applied as vy = -jump_impulse
    pub pursuer_speed: f32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        SnakeConfig {
            tick_rate_ms: default_tick_rate(),
            grid_size: default_grid_size(),
        }
    }
}

impl Default for ChaseConfig {
    fn default() -> Self {
        ChaseConfig {
            frame_ms: default_frame_ms(),
            gravity: default_gravity(),
            run_speed: default_run_speed(),
            jump_impulse: default_jump_impulse(),
            pursuer_speed: default_pursuer_speed(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    snake: TomlSnake,
    #[serde(default)]
    chase: TomlChase,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSnake {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_grid_size")]
    grid_size: i32,
}

#[derive(Deserialize, Debug)]
struct TomlChase {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default = "default_gravity")]
    gravity: f32,
    #[serde(default = "default_run_speed")]
    run_speed: f32,
    #[serde(default = "default_jump_impulse")]
    jump_impulse: f32,
    #[serde(default = "default_pursuer_speed")]
    pursuer_speed: f32,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGeneral {
    #[serde(default)]
    seed: Option<u64>,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 150 }
fn default_grid_size() -> i32 { 20 }
fn default_frame_ms() -> u64 { 16 }     // ~60 fps display refresh
fn default_gravity() -> f32 { 0.5 }
fn default_run_speed() -> f32 { 3.0 }
fn default_jump_impulse() -> f32 { 12.0 }
fn default_pursuer_speed() -> f32 { 1.0 }

impl Default for TomlSnake {
    fn default() -> Self {
        TomlSnake {
            tick_rate_ms: default_tick_rate(),
            grid_size: default_grid_size(),
        }
    }
}

impl Default for TomlChase {
    fn default() -> Self {
        TomlChase {
            frame_ms: default_frame_ms(),
            gravity: default_gravity(),
            run_speed: default_run_speed(),
            jump_impulse: default_jump_impulse(),
            pursuer_speed: default_pursuer_speed(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        GameConfig::from_toml(toml_cfg)
    }

    /// Parse config text directly. Invalid text falls back to defaults.
    #[cfg(test)]
    pub fn parse(text: &str) -> Self {
        GameConfig::from_toml(parse_toml(text, "config text"))
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let mut snake = SnakeConfig {
            tick_rate_ms: cfg.snake.tick_rate_ms,
            grid_size: cfg.snake.grid_size,
        };
        if snake.grid_size < 1 {
            log::warn!("snake.grid_size {} is not positive; using {}", snake.grid_size, default_grid_size());
            snake.grid_size = default_grid_size();
        }
        GameConfig {
            snake,
            chase: ChaseConfig {
                frame_ms: cfg.chase.frame_ms,
                gravity: cfg.chase.gravity,
                run_speed: cfg.chase.run_speed,
                jump_impulse: cfg.chase.jump_impulse,
                pursuer_speed: cfg.chase.pursuer_speed,
            },
            seed: cfg.general.seed,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => {
                log::info!("loading {}", path.display());
                return parse_toml(&text, &path.display().to_string());
            }
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
            }
        }
    }
    TomlConfig::default()
}

/// Parse TOML text; a syntax or type error means all defaults.
fn parse_toml(text: &str, source: &str) -> TomlConfig {
    toml::from_str::<TomlConfig>(text).unwrap_or_else(|e| {
        log::warn!("{source}: parse error: {e}; using default settings");
        TomlConfig::default()
    })
}
