use anyhow::{Context, Result};
use dirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::player::types::{OptionCategory, OptionValue, PlayerOption};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// What the chrome does when playback starts on its own after `prepared`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayChrome {
    /// Keep the controls up; the auto-hide countdown takes them down later.
    #[default]
    KeepVisible,
    /// Hide the controls as soon as playback starts.
    Hide,
}

impl AutoplayChrome {
    /// Forced visibility handed to the overlay when autoplay kicks in.
    pub fn force_show(self) -> bool {
        matches!(self, AutoplayChrome::KeepVisible)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    #[serde(default = "default_auto_hide_seconds")]
    pub auto_hide_seconds: u32,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    #[serde(default = "default_true")]
    pub show_back_button: bool,

    #[serde(default = "default_true")]
    pub show_fullscreen_button: bool,

    #[serde(default)]
    pub autoplay_chrome: AutoplayChrome,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Start playing as soon as the player reports `prepared`
    #[serde(default = "default_true")]
    pub autoplay: bool,

    #[serde(default = "default_aspect_ratio")]
    pub default_aspect_ratio: f32,

    #[serde(default = "default_player_options")]
    pub player_options: Vec<PlayerOption>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let contents =
                fs::read_to_string(config_path).context("Failed to read config file")?;
            let config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("playback-overlay").join("config.toml"))
    }
}

impl OverlayConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

impl PlaybackConfig {
    /// Options handed to every freshly created native player, including the
    /// autoplay switch.
    pub fn effective_player_options(&self) -> Vec<PlayerOption> {
        let mut options: Vec<PlayerOption> = self
            .player_options
            .iter()
            .filter(|option| option.name != "start-on-prepared")
            .cloned()
            .collect();
        options.push(PlayerOption::new(
            OptionCategory::Player,
            "start-on-prepared",
            OptionValue::Int(i64::from(self.autoplay)),
        ));
        options
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            auto_hide_seconds: default_auto_hide_seconds(),
            tick_interval_ms: default_tick_interval_ms(),
            transition_ms: default_transition_ms(),
            show_back_button: default_true(),
            show_fullscreen_button: default_true(),
            autoplay_chrome: AutoplayChrome::default(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: default_true(),
            default_aspect_ratio: default_aspect_ratio(),
            player_options: default_player_options(),
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_auto_hide_seconds() -> u32 { crate::constants::AUTO_HIDE_SECONDS }
fn default_tick_interval_ms() -> u64 { crate::constants::TICK_INTERVAL_MS }
fn default_transition_ms() -> u64 { crate::constants::CHROME_TRANSITION_MS }
fn default_aspect_ratio() -> f32 { crate::constants::DEFAULT_ASPECT_RATIO }

fn default_player_options() -> Vec<PlayerOption> {
    use OptionCategory::{Codec, Format, Player};
    use OptionValue::{Int, Str};

    vec![
        PlayerOption::new(Player, "mediacodec", Int(1)),
        // Force RTSP over TCP
        PlayerOption::new(Format, "rtsp_transport", Str("tcp".into())),
        PlayerOption::new(Player, "framedrop", Int(60)),
        PlayerOption::new(Player, "max-fps", Int(0)),
        PlayerOption::new(Player, "fps", Int(30)),
        PlayerOption::new(Codec, "skip_loop_filter", Int(48)),
        PlayerOption::new(
            Player,
            "overlay-format",
            Int(i64::from(crate::constants::FOURCC_YV12)),
        ),
        PlayerOption::new(Player, "packet-buffering", Int(0)),
        PlayerOption::new(Format, "fflags", Str("nobuffer".into())),
        PlayerOption::new(Format, "max-buffer-size", Int(1024)),
        PlayerOption::new(Player, "min-frames", Int(10)),
        PlayerOption::new(Format, "probesize", Str("4096".into())),
        PlayerOption::new(Format, "analyzeduration", Str("2000000".into())),
    ]
}
