use std::{fs, path::Path};

use anyhow::Context;
use buscaminas_core::{CellCount, Coord, GameConfig, Placement};
use serde::Deserialize;

/// Named board sizes; shorthand for a rows/cols/mines triple.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Preset {
    #[default]
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub(crate) const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

/// Game settings, every field optional so a file or the command line can
/// each provide only part of them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::Args)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameSettings {
    /// Board size preset, overridden by explicit dimensions
    #[arg(long, value_enum)]
    pub preset: Option<Preset>,

    /// Number of rows
    #[arg(long)]
    pub rows: Option<Coord>,

    /// Number of columns
    #[arg(long)]
    pub cols: Option<Coord>,

    /// Number of mines
    #[arg(long)]
    pub mines: Option<CellCount>,

    /// Mine placement strategy: rejection or shuffle
    #[arg(long)]
    pub placement: Option<Placement>,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl GameSettings {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Could not parse config file {}", path.display()))
    }

    /// Fills every unset field of `self` from `fallback`.
    pub(crate) fn or(self, fallback: Self) -> Self {
        Self {
            preset: self.preset.or(fallback.preset),
            rows: self.rows.or(fallback.rows),
            cols: self.cols.or(fallback.cols),
            mines: self.mines.or(fallback.mines),
            placement: self.placement.or(fallback.placement),
            seed: self.seed.or(fallback.seed),
        }
    }

    pub(crate) fn game_config(&self) -> anyhow::Result<GameConfig> {
        let base = self.preset.unwrap_or_default().config();
        let config = GameConfig::new(
            self.rows.unwrap_or(base.rows),
            self.cols.unwrap_or(base.cols),
            self.mines.unwrap_or(base.mines),
        )?;
        Ok(config.with_placement(self.placement.unwrap_or_default()))
    }
}
