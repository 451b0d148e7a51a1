// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::path::PathBuf;

use memocards_core::ReviewConfig;
use memocards_core::VerdictPolicy;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

pub const DEFAULT_CONFIG_FILE: &str = "memocards.toml";
pub const DEFAULT_DATABASE_FILE: &str = "memocards.db";

/// Settings read from `memocards.toml`. Every key is optional.
#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: Option<PathBuf>,
    pub review: ReviewConfig,
    pub verdicts: VerdictPolicy,
}

impl Config {
    pub fn parse(text: &str) -> Fallible<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ErrorReport::new(format!("invalid config: {e}")))?;
        config
            .review
            .validate()
            .map_err(|e| ErrorReport::new(format!("invalid config: {}", e.message())))?;
        Ok(config)
    }

    /// Load the config. An explicit path must exist; the default file is
    /// only read when present.
    pub fn load(path: Option<&Path>) -> Fallible<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            log::debug!("No config file, using defaults");
            return Ok(Self::default());
        }
        log::debug!("Loading config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|e| {
            ErrorReport::new(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&text)
    }

    /// The database to open: the command-line flag wins over the file.
    pub fn database_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use memocards_core::CardStatus;
    use memocards_core::StatusChange;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_empty_config_is_default() -> Fallible<()> {
        let config = Config::parse("")?;
        assert_eq!(config, Config::default());
        assert_eq!(config.review.swipe_threshold, 50.0);
        Ok(())
    }

    #[test]
    fn test_full_config() -> Fallible<()> {
        let text = r#"
            database = "cards.db"

            [review]
            swipe_threshold = 80.0
            flip_before_swipe = true

            [verdicts]
            right = "promote"
            down = "to_learn"
        "#;
        let config = Config::parse(text)?;
        assert_eq!(config.database, Some(PathBuf::from("cards.db")));
        assert_eq!(config.review.swipe_threshold, 80.0);
        assert!(config.review.flip_before_swipe);
        assert_eq!(config.review.animation_ms, 600);
        assert_eq!(config.verdicts.right, StatusChange::Promote);
        assert_eq!(config.verdicts.down, StatusChange::Set(CardStatus::ToLearn));
        assert_eq!(config.verdicts.left, StatusChange::Set(CardStatus::ToLearn));
        Ok(())
    }

    #[test]
    fn test_unknown_key() {
        assert!(Config::parse("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_review_settings_are_checked() {
        for text in [
            "[review]\nswipe_threshold = 0.0",
            "[review]\nswipe_threshold = -50.0",
            "[review]\nexit_distance = -2000.0",
            "[review]\nstack_depth = 0",
        ] {
            assert!(Config::parse(text).is_err(), "{text}");
        }
        let Err(e) = Config::parse("[review]\nstack_depth = 0") else {
            panic!("zero stack depth should be rejected");
        };
        assert_eq!(e.message(), "invalid config: stack_depth must be at least 1");
    }

    #[test]
    fn test_bad_verdict() {
        assert!(Config::parse("[verdicts]\nright = \"mastered\"").is_err());
    }

    #[test]
    fn test_database_path_precedence() {
        let config = Config {
            database: Some(PathBuf::from("file.db")),
            ..Config::default()
        };
        assert_eq!(
            config.database_path(Some(PathBuf::from("flag.db"))),
            PathBuf::from("flag.db")
        );
        assert_eq!(config.database_path(None), PathBuf::from("file.db"));
        assert_eq!(
            Config::default().database_path(None),
            PathBuf::from(DEFAULT_DATABASE_FILE)
        );
    }

    #[test]
    fn test_load_explicit_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("custom.toml");
        std::fs::write(&path, "[review]\nallow_up = true\n")?;
        let config = Config::load(Some(&path))?;
        assert!(config.review.allow_up);
        assert!(Config::load(Some(&dir.join("missing.toml"))).is_err());
        Ok(())
    }
}
