use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Guess from the terminal's `COLORFGBG` ("fg;bg"); dark backgrounds are 0-6 and 8.
    fn from_terminal_hint(hint: Option<&str>) -> Self {
        let bg = hint
            .and_then(|v| v.rsplit(';').next())
            .and_then(|bg| bg.trim().parse::<u8>().ok());
        match bg {
            Some(0..=6) | Some(8) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Italian,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::English => Language::Italian,
            Language::Italian => Language::English,
        }
    }
}

/// Display preferences, read once at startup and handed to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::from_terminal_hint(std::env::var("COLORFGBG").ok().as_deref()),
            language: Language::English,
            path: None,
        }
    }
}

impl Preferences {
    fn path() -> PathBuf {
        Config::dir().join("preferences.json")
    }

    /// Load from disk, returning defaults if missing.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        let mut prefs: Self = match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        prefs.path = Some(path.to_path_buf());
        prefs
    }

    /// Persist to the file this was loaded from.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.path.clone().unwrap_or_else(Self::path);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)?;
        Ok(())
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn toggle_language(&mut self) -> Language {
        self.language = self.language.toggled();
        self.language
    }
}
