//! Settings read from an optional YAML file
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fs::read_to_string;
use std::path::Path;
use serde::Deserialize;
use log::debug;
use chess::AttackTableBuilder;
use crate::Error;

/// Settings shared by every subcommand
///
/// Any key may be left out of the file. Command line flags take precedence over the file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Seed for the magic number search, or `None` for the built-in seed
    pub seed: Option<u64>,
    /// Whether to generate promotions to bishop and rook
    pub underpromotions: bool,
}

impl Settings {
    /// Reads settings from the YAML file at `path`
    pub fn load(path: &Path) -> Result<Settings, Error> {
        let s = read_to_string(path).map_err(|err| Error(format!("{}: {}", path.display(), err)))?;
        let settings = Settings::from_yaml(&s)
            .map_err(|err| Error(format!("{}: {}", path.display(), err)))?;

        debug!("loaded {:?} from {}", settings, path.display());
        Ok(settings)
    }

    /// Parses settings from a YAML string
    pub fn from_yaml(s: &str) -> Result<Settings, serde_yaml::Error> {
        if s.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml::from_str(s)
    }

    /// Returns the seed to build attack tables with
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(AttackTableBuilder::DEFAULT_SEED)
    }
}
