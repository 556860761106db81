use crate::events::AppEvent;
use crate::gui::theme::HexColor;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use reel_core::carousel::{GestureConfig, Layout, LayoutError};
use reel_core::motion::ticker::TICKER_DURATION_MS;
use reel_core::selection::AUTO_ADVANCE_MS;
use reel_core::types::{ContentItem, default_items};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Zero turns auto-advance off.
    pub auto_advance_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: AUTO_ADVANCE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub ticker_ms: u64,
    pub title_speed_ms: u64,
    pub description_speed_ms: u64,
    pub pause_ms: u64,
    /// Delay between clicking a progress bar and the selection moving.
    pub nav_delay_ms: u64,
    pub pulse_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            ticker_ms: TICKER_DURATION_MS,
            title_speed_ms: 80,
            description_speed_ms: 1,
            pause_ms: 1500,
            nav_delay_ms: 300,
            pulse_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub active: HexColor,
    pub active_text: HexColor,
    pub inactive: HexColor,
    pub inactive_border: HexColor,
    pub inactive_text: HexColor,
    pub panel: HexColor,
    pub panel_text: HexColor,
    pub ticker: HexColor,
    pub bar_track: HexColor,
    pub bar_fill: HexColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            active: HexColor::rgb(0x5C, 0x89, 0x8E),
            active_text: HexColor::rgb(0xFF, 0xFF, 0xFF),
            inactive: HexColor::rgb(0xFF, 0xFF, 0xFF),
            inactive_border: HexColor::rgb(0xEB, 0xEB, 0xEB),
            inactive_text: HexColor::rgb(0x1E, 0x2A, 0x31),
            panel: HexColor::rgb(0x4D, 0x4E, 0x69),
            panel_text: HexColor::rgb(0xFF, 0xFF, 0xFF),
            ticker: HexColor::rgb(0x99, 0x9F, 0xB6),
            bar_track: HexColor::rgb(0x23, 0x27, 0x33),
            bar_fill: HexColor::rgb(0x99, 0x9F, 0xB6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub items: Vec<ContentItem>,
    pub vertical: Layout,
    pub horizontal: Layout,
    pub gestures: GestureConfig,
    pub selection: SelectionConfig,
    pub panel: PanelConfig,
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items: default_items(),
            vertical: Layout::vertical(),
            horizontal: Layout::horizontal(),
            gestures: GestureConfig::default(),
            selection: SelectionConfig::default(),
            panel: PanelConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.vertical
            .validate()
            .map_err(|source| ConfigError::Layout {
                section: "vertical",
                source,
            })?;
        self.horizontal
            .validate()
            .map_err(|source| ConfigError::Layout {
                section: "horizontal",
                source,
            })?;
        if self.items.is_empty() {
            log::warn!("Config has no items; carousels will show empty cards");
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid [{section}] layout: {source}")]
    Layout {
        section: &'static str,
        source: LayoutError,
    },
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "reel", "reel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("REEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Reads `path` (if present) with `REEL_*` environment overrides on top, e.g.
/// `REEL_SELECTION__AUTO_ADVANCE_MS=3000`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_config_with(path, environment())
}

fn load_config_with(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

/// Never fails: a missing file is seeded with the defaults and a broken one is
/// reported and ignored.
pub fn load_or_default() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

fn write_default_config_to(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

fn watch_dir(
    dir: &Path,
    bridge_tx: Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    // dropping the watcher stops the notifications
    let _watcher = match watch_dir(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_dir.display(), e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
