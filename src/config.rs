use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "snake-term";
const CONFIG_FILE_NAME: &str = "config.json";

/// Surface dimensions in terminal cells, including the border.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the number of playable cells once the 1-cell border is removed.
    #[must_use]
    pub fn interior_cells(self) -> usize {
        usize::from(self.width.saturating_sub(2)) * usize::from(self.height.saturating_sub(2))
    }

    /// Returns the center cell, where a new snake's head is placed.
    #[must_use]
    pub fn center(self) -> (i32, i32) {
        (i32::from(self.width / 2), i32::from(self.height / 2))
    }
}

impl From<(u16, u16)> for GridSize {
    fn from((width, height): (u16, u16)) -> Self {
        Self { width, height }
    }
}

/// Head glyph in ASCII mode.
pub const GLYPH_SNAKE_HEAD: &str = "@";

/// Body glyph in ASCII mode.
pub const GLYPH_SNAKE_BODY: &str = "#";

/// Fruit glyph in both render modes.
pub const GLYPH_FRUIT: &str = "*";

/// Title drawn on the top border.
pub const TITLE: &str = "Snake";

/// Column of the title on the top border.
pub const TITLE_X: u16 = 1;

/// Label preceding the score on the top border.
pub const SCORE_LABEL: &str = "Score: ";

/// Column of the score label.
pub const SCORE_LABEL_X: u16 = 8;

/// Column of the score value.
pub const SCORE_X: u16 = 15;

/// Message shown when the session ends.
pub const DEATH_MESSAGE: &str = "you died";

/// Input timeout per tick in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 300;

/// Snake length at game start.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Forced render mode, or `Auto` to follow the terminal's color support.
#[derive(Debug, Clone, Copy, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Auto,
    Ascii,
    Color,
}

/// User settings read from the optional JSON settings file.
#[derive(Debug, Clone, Copy, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tick_ms: u64,
    pub initial_length: usize,
    pub render_mode: RenderMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_INTERVAL_MS,
            initial_length: INITIAL_SNAKE_LENGTH,
            render_mode: RenderMode::Auto,
        }
    }
}

/// Failure to load the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

impl Settings {
    /// Returns the platform-correct settings file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads settings from `path`.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error, surfaced before the terminal enters raw
    /// mode.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        settings.validate()
    }

    /// Rejects values the tick loop cannot run with.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be greater than zero"));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{ConfigError, GridSize, RenderMode, Settings};

    #[test]
    fn interior_excludes_border() {
        let size = GridSize {
            width: 10,
            height: 6,
        };
        assert_eq!(size.interior_cells(), 8 * 4);
        assert_eq!(size.center(), (5, 3));
    }

    #[test]
    fn tiny_surface_has_no_interior() {
        assert_eq!(GridSize::from((2, 9)).interior_cells(), 0);
        assert_eq!(GridSize::from((1, 1)).interior_cells(), 0);
    }

    #[test]
    fn partial_settings_fall_back_to_defaults() {
        let settings = Settings::parse(r#"{ "render_mode": "ascii" }"#, Path::new("a.json"))
            .expect("should parse");

        assert_eq!(settings.render_mode, RenderMode::Ascii);
        assert_eq!(settings.tick_ms, 300);
        assert_eq!(settings.initial_length, 3);
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(matches!(
            Settings::parse(r#"{ "tick_ms": 0 }"#, Path::new("b.json")),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(
            Settings::parse(r#"{ "speed": 4 }"#, Path::new("c.json")),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_settings_file_returns_defaults() {
        let path = unique_test_path("missing");
        let settings = Settings::load(&path).expect("missing file should return defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_settings_file_reports_path() {
        let path = unique_test_path("malformed");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&path, "not-json").expect("test file write should succeed");

        match Settings::load(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-term-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }
}
