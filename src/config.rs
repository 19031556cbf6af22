//! Configuration for the presentation layer and session defaults
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Settings the presentation collaborator reads: sprite set, square colors, cell geometry,
/// plus the optional named-positions file. Stored as YAML; every field falls back to the
/// bundled defaults when absent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Sprite sheet piece images are loaded from
    pub piece_set: PathBuf,
    /// Fill color of the light squares
    pub light_squares: String,
    /// Fill color of the dark squares
    pub dark_squares: String,
    /// Edge length of one board square, in pixels
    pub cell_size: u32,
    /// YAML file mapping position names to FEN strings
    pub positions_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            piece_set: PathBuf::from("resources/pieces/Neo.png"),
            light_squares: "#C4AD7C".to_owned(),
            dark_squares: "#674B2F".to_owned(),
            cell_size: 80,
            positions_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_bundled_resources() {
        let config = Config::default();
        assert_eq!(config.piece_set, PathBuf::from("resources/pieces/Neo.png"));
        assert_eq!(config.light_squares, "#C4AD7C");
        assert_eq!(config.dark_squares, "#674B2F");
        assert_eq!(config.cell_size, 80);
        assert!(config.positions_file.is_none());
    }

    #[test]
    fn yaml_round_trip_preserves_every_field() {
        let mut config = Config::default();
        config.cell_size = 64;
        config.positions_file = Some(PathBuf::from("openings.yaml"));

        let text = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = serde_yaml::from_str("cell_size: 100\n").unwrap();
        assert_eq!(parsed.cell_size, 100);
        assert_eq!(parsed.light_squares, Config::default().light_squares);
    }
}
