//! TOML-backed game configuration.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use lane_defence_core::AttackerStats;
use lane_defence_system_spawning::{AssaultPlan, Wave};
use serde::Deserialize;

const DEFAULT_SEED: u64 = 0x1a4e_defe;

/// Explicit wave entry in a configuration file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveConfig {
    /// Turn on which the wave is released.
    pub turn: u64,
    /// Number of attackers in the wave.
    pub count: u32,
    /// Armor of each attacker.
    pub armor: i32,
    /// Sting damage of each attacker.
    pub damage: i32,
}

/// Parameters used to build a [`crate::Game`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Starting food.
    pub food: u32,
    /// Number of lanes.
    pub lanes: u32,
    /// Cells per lane.
    pub steps: u32,
    /// Every `hazard_period`-th step is hazardous; zero disables hazards.
    pub hazard_period: u32,
    /// Seed for the simulation's random source.
    pub seed: u64,
    /// Optional assault-plan preset name.
    pub plan: Option<String>,
    /// Waves scheduled in addition to the preset.
    pub waves: Vec<WaveConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            food: 2,
            lanes: 3,
            steps: 8,
            hazard_period: 0,
            seed: DEFAULT_SEED,
            plan: None,
            waves: Vec::new(),
        }
    }
}

impl GameConfig {
    /// Reads and validates a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read game config at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid game config at {}", path.display()))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse game config toml contents")?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects boards without cells, unknown plans, and waves that cannot survive entry.
    pub fn validate(&self) -> Result<()> {
        if self.lanes == 0 || self.steps == 0 {
            bail!(
                "board must have at least one cell; got {} lanes of {} steps",
                self.lanes,
                self.steps
            );
        }
        if let Some(name) = &self.plan {
            if AssaultPlan::preset(name).is_none() {
                bail!(
                    "unknown assault plan `{name}`; expected one of {}",
                    AssaultPlan::PRESETS.join(", ")
                );
            }
        }
        for wave in &self.waves {
            if wave.armor <= 0 {
                bail!("wave on turn {} has non-positive armor {}", wave.turn, wave.armor);
            }
            if wave.damage < 0 {
                bail!("wave on turn {} has negative damage {}", wave.turn, wave.damage);
            }
        }
        Ok(())
    }

    /// Combines the named preset with the explicit waves.
    pub fn assault_plan(&self) -> Result<AssaultPlan> {
        let mut plan = match &self.plan {
            Some(name) => AssaultPlan::preset(name)
                .with_context(|| format!("unknown assault plan `{name}`"))?,
            None => AssaultPlan::default(),
        };
        for wave in &self.waves {
            plan.push(Wave::new(
                wave.turn,
                wave.count,
                AttackerStats::new(wave.armor, wave.damage),
            ));
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = GameConfig::from_toml_str("").expect("defaults");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.food, 2);
        assert_eq!(config.lanes, 3);
        assert_eq!(config.steps, 8);
    }

    #[test]
    fn parses_plan_and_explicit_waves() {
        let config = GameConfig::from_toml_str(
            r#"
            food = 10
            lanes = 1
            steps = 5
            hazard_period = 2
            plan = "test"

            [[waves]]
            turn = 7
            count = 2
            armor = 4
            damage = 1
            "#,
        )
        .expect("valid config");
        let plan = config.assault_plan().expect("plan");
        assert_eq!(plan.waves().len(), 3);
        assert_eq!(plan.waves()[2], Wave::new(7, 2, AttackerStats::new(4, 1)));
    }

    #[test]
    fn rejects_unknown_plan() {
        let error = GameConfig::from_toml_str("plan = \"nightmare\"").expect_err("unknown plan");
        assert!(error.to_string().contains("nightmare"));
    }

    #[test]
    fn rejects_empty_board() {
        assert!(GameConfig::from_toml_str("lanes = 0").is_err());
        assert!(GameConfig::from_toml_str("steps = 0").is_err());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(GameConfig::from_toml_str("colour = \"red\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = GameConfig::from_path("/nonexistent/lane-defence.toml").expect_err("missing");
        assert!(format!("{error:#}").contains("/nonexistent/lane-defence.toml"));
    }
}
