// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Command-line configuration file.
//!
//! ```toml
//! [render]
//! size = 300
//! foreground = "#000000"
//! background = "#ffffff"
//! error_correction = "low"
//!
//! [log]
//! filter = "ips_qr=debug"
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use crate::render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

impl Config {
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Color, ErrorCorrection};

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn partial_render_section() {
        let config = Config::from_toml_str(
            r##"
            [render]
            size = 320
            foreground = "#102030"
            error_correction = "medium"
            "##,
        )
        .unwrap();

        assert_eq!(config.render.size, 320);
        assert_eq!(config.render.foreground, Color([0x10, 0x20, 0x30]));
        assert_eq!(config.render.background, Color::WHITE);
        assert_eq!(config.render.error_correction, ErrorCorrection::Medium);
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn invalid_color_is_a_parse_error() {
        let result = Config::from_toml_str("[render]\nforeground = \"black\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = Config::from_toml_file("/nonexistent/ips-qr.toml");
        assert!(matches!(result, Err(ConfigError::Read(_))));
    }
}
