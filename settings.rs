/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Editor tunables, loadable from a TOML file supplied by the host.

use serde::Deserialize;
use std::path::Path;

/// Authoring tunables fed into [`crate::registry::KindRegistry`] at
/// construction time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorSettings {
    /// Maximum number of corridor children a single node may accept.
    pub max_child_corridors: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_child_corridors: 3,
        }
    }
}

impl EditorSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Load settings from a TOML file, falling back to defaults when the
    /// file is missing or malformed. A malformed file is logged; a
    /// missing file is the normal first-run case.
    pub fn load_or_default(path: &Path) -> Self {
        let Ok(raw) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_toml_str(&raw) {
            Ok(settings) => settings,
            Err(error) => {
                log::warn!("ignoring invalid settings file {}: {error}", path.display());
                Self::default()
            }
        }
    }
}
