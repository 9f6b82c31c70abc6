use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

use crate::catalog::{Catalog, Category, FilterMode};

pub mod themes;

pub use themes::{Palette, ThemeName};

const APP_DOMAIN: &str = "io";
const APP_ORG: &str = "Studytrack";
const APP_NAME: &str = "studytrack";

pub const CONFIG_ENV: &str = "STUDYTRACK_CONFIG";

pub struct ConfigLoader {
    paths: ConfigPaths,
}

impl ConfigLoader {
    pub fn discover() -> Result<Self> {
        let paths = ConfigPaths::discover()?;
        Ok(Self { paths })
    }

    pub fn with_paths(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    pub fn load_or_init(&self) -> Result<AppConfig> {
        self.paths.ensure_directories()?;
        if !self.paths.config_file.exists() {
            let default_cfg = AppConfig::default();
            self.write_default_config(&default_cfg)?;
            tracing::info!(path = %self.paths.config_file.display(), "wrote default config");
            return Ok(default_cfg);
        }

        self.load()
    }

    pub fn load(&self) -> Result<AppConfig> {
        let raw = fs::read_to_string(&self.paths.config_file)
            .with_context(|| format!("reading config {}", self.paths.config_file.display()))?;
        let mut cfg: AppConfig = toml::from_str(&raw).context("parsing config toml")?;
        cfg.post_load(&self.paths);
        Ok(cfg)
    }

    fn write_default_config(&self, cfg: &AppConfig) -> Result<()> {
        let toml = toml::to_string_pretty(cfg).context("serializing default config")?;
        if let Some(parent) = self.paths.config_file.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let mut file = fs::File::create(&self.paths.config_file)
            .with_context(|| format!("creating config {}", self.paths.config_file.display()))?;
        file.write_all(toml.as_bytes())
            .context("writing default config")?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_dir: PathBuf,
    pub config_file: PathBuf,
    pub state_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl ConfigPaths {
    pub fn discover() -> Result<Self> {
        let override_config = env::var(CONFIG_ENV).ok().map(PathBuf::from);

        let project_dirs = ProjectDirs::from(APP_DOMAIN, APP_ORG, APP_NAME)
            .context("resolving XDG project directories")?;

        let config_dir = override_config
            .clone()
            .map(|p| {
                if p.is_dir() {
                    p
                } else {
                    p.parent().map(Path::to_path_buf).unwrap_or(p)
                }
            })
            .unwrap_or_else(|| project_dirs.config_dir().to_path_buf());

        let config_file = override_config
            .filter(|p| p.is_file() || p.extension().is_some())
            .unwrap_or_else(|| config_dir.join("config.toml"));

        let state_dir = project_dirs
            .state_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| project_dirs.data_local_dir().join("state"));
        let log_dir = state_dir.join("logs");

        Ok(Self {
            config_dir,
            config_file,
            state_dir,
            log_dir,
        })
    }

    pub fn rooted_at(root: &Path) -> Self {
        let config_dir = root.join("config");
        let state_dir = root.join("state");
        Self {
            config_file: config_dir.join("config.toml"),
            config_dir,
            log_dir: state_dir.join("logs"),
            state_dir,
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.config_dir, &self.state_dir, &self.log_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating application directory {}", dir.display()))?;
        }
        Ok(())
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("studytrack.log")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeName,
    pub default_filter: FilterMode,
    /// Section expanded at startup; `none` starts with both collapsed.
    pub expanded_section: SectionChoice,
    pub tick_rate_ms: u64,
    pub keybindings: KeybindingProfile,
    /// Optional TOML file replacing the built-in question lists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub status: StatusConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
            default_filter: FilterMode::All,
            expanded_section: SectionChoice::Common,
            tick_rate_ms: 250,
            keybindings: KeybindingProfile::Vim,
            catalog_path: None,
            status: StatusConfig::default(),
        }
    }
}

impl AppConfig {
    fn post_load(&mut self, paths: &ConfigPaths) {
        if self.theme == ThemeName::Unknown {
            tracing::warn!("unknown theme in config, falling back to Dark");
            self.theme = ThemeName::Dark;
        }
        if let Some(path) = self.catalog_path.as_mut() {
            if path.is_relative() {
                *path = paths.config_dir.join(&*path);
            }
        }
        if self.tick_rate_ms == 0 {
            tracing::warn!("tick_rate_ms must be positive, using 250");
            self.tick_rate_ms = 250;
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("loading catalog {}", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// How long the synced badge stays up after a change.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "revert_ms")]
    pub revert_after: Duration,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            revert_after: Duration::from_millis(2000),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SectionChoice {
    #[default]
    Common,
    Unique,
    None,
}

impl SectionChoice {
    pub fn category(self) -> Option<Category> {
        match self {
            SectionChoice::Common => Some(Category::Common),
            SectionChoice::Unique => Some(Category::Unique),
            SectionChoice::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum KeybindingProfile {
    #[default]
    Vim,
    Emacs,
}
