//! Optional TOML configuration layered beneath the command-line flags.

use anyhow::{bail, Context, Result};
use bayou_core::{Difficulty, EnemyCount, EnemyPower, MapSize, Rules};
use serde::Deserialize;
use std::{fs, path::Path};

/// Contents of a configuration file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) difficulty: Difficulty,
    pub(crate) rules: Rules,
    pub(crate) seed: Option<u64>,
}

/// Values supplied on the command line; `None` keeps the file's choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    pub(crate) map: Option<MapSize>,
    pub(crate) enemy_count: Option<EnemyCount>,
    pub(crate) enemy_power: Option<EnemyPower>,
    pub(crate) seed: Option<u64>,
}

/// Fully resolved session settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Settings {
    pub(crate) difficulty: Difficulty,
    pub(crate) rules: Rules,
    pub(crate) seed: Option<u64>,
}

impl FileConfig {
    /// Reads and validates the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse configuration toml contents")?;

        let rules = &config.rules;
        if rules.starting_health <= 0 {
            bail!(
                "starting_health must be positive (received {})",
                rules.starting_health
            );
        }
        if rules.respawn_health <= 0 {
            bail!(
                "respawn_health must be positive (received {})",
                rules.respawn_health
            );
        }
        for (name, value) in [
            ("thorn_penalty", rules.thorn_penalty),
            ("encounter_damage", rules.encounter_damage),
            ("food_heal", rules.food_heal),
            ("health_pack_heal", rules.health_pack_heal),
        ] {
            if value < 0 {
                bail!("{name} must not be negative (received {value})");
            }
        }
        if rules.snake_shot_interval == 0 {
            bail!("snake_shot_interval must be at least one enemy phase");
        }
        if rules.player_shot_damage == 0 {
            bail!("player_shot_damage must be positive or the boss cannot be defeated");
        }

        Ok(config)
    }

    /// Applies the command-line overrides on top of the file.
    pub(crate) fn layer(self, overrides: Overrides) -> Settings {
        let mut difficulty = self.difficulty;
        if let Some(map) = overrides.map {
            difficulty.map = map;
        }
        if let Some(enemy_count) = overrides.enemy_count {
            difficulty.enemy_count = enemy_count;
        }
        if let Some(enemy_power) = overrides.enemy_power {
            difficulty.enemy_power = enemy_power;
        }

        Settings {
            difficulty,
            rules: self.rules,
            seed: overrides.seed.or(self.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_example_matches_the_defaults() {
        let config = FileConfig::parse(include_str!("../bayou.example.toml"))
            .expect("example configuration parses");

        assert_eq!(config.difficulty, Difficulty::default());
        assert_eq!(config.rules, Rules::default());
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = FileConfig::parse("[rules]\nthorn_penalty = 25\n").expect("partial config");

        assert_eq!(config.difficulty, Difficulty::default());
        assert_eq!(config.rules.thorn_penalty, 25);
        assert_eq!(config.rules.starting_health, 100);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let error = FileConfig::parse("[rules]\nlaser_damage = 3\n")
            .expect_err("unknown rule must be rejected");

        assert!(format!("{error:#}").contains("laser_damage"));
    }

    #[test]
    fn negative_damage_and_heal_values_are_rejected() {
        for key in [
            "thorn_penalty",
            "encounter_damage",
            "food_heal",
            "health_pack_heal",
        ] {
            let error = FileConfig::parse(&format!("[rules]\n{key} = -5\n"))
                .expect_err("negative value must be rejected");
            assert!(error.to_string().contains(key), "{key}: {error:#}");
        }

        let config = FileConfig::parse("[rules]\nthorn_penalty = 0\n").expect("zero is allowed");
        assert_eq!(config.rules.thorn_penalty, 0);
    }

    #[test]
    fn zero_snake_interval_is_rejected() {
        let error = FileConfig::parse("[rules]\nsnake_shot_interval = 0\n")
            .expect_err("zero interval must be rejected");

        assert!(error.to_string().contains("snake_shot_interval"));
    }

    #[test]
    fn flags_override_the_file() {
        let file = FileConfig::parse(
            "seed = 9\n[difficulty]\nmap = \"large\"\nenemy_count = \"many\"\n",
        )
        .expect("config parses");

        let settings = file.layer(Overrides {
            map: Some(MapSize::Small),
            enemy_power: Some(EnemyPower::Strong),
            ..Overrides::default()
        });

        assert_eq!(
            settings.difficulty,
            Difficulty::new(MapSize::Small, EnemyCount::Many, EnemyPower::Strong)
        );
        assert_eq!(settings.seed, Some(9));
    }
}
