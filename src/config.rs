/// Simulation parameters and tuning constants
use crate::error::{ConfigError, Result};
use crate::generation::Generation;
use crate::species::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// LIMITS
// ============================================================================

/// Largest population target accepted for one species
pub const MAX_POPULATION_PER_SPECIES: usize = 600;

/// Largest food supply accepted per epoch
pub const MAX_FOOD_QUANTITY: usize = 2500;

// ============================================================================
// INTERACTION SETTINGS
// ============================================================================

/// Search radius used to re-home a mover whose target cell is taken
pub const FALLBACK_RADIUS: u32 = 5;

/// Search radius used to place newborns around the breeding parent
pub const MATING_RADIUS: u32 = 15;

/// Offspring per mating are drawn from 1..=MAX_OFFSPRING
pub const MAX_OFFSPRING: usize = 5;

/// Meals granted to every newborn
pub const NEWBORN_MEALS: u32 = 3;

/// Energy gained from one food ration
pub const FOOD_ENERGY: u32 = 10;

/// How square neighborhood scans decide a cell is on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchBounds {
    /// Only the combined linear index is range-checked. Neighborhoods that
    /// straddle a column edge wrap into the adjacent column.
    LinearIndex,
    /// Each axis is range-checked before combining into a linear index.
    #[default]
    PerAxis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,

    /// Population target per species for the first epoch
    pub population: Generation,

    /// Food rations scattered at every board regeneration
    pub food_quantity: usize,

    /// Ticks per epoch used by `Simulation::run_epoch`
    pub epoch_ticks: u32,

    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,

    pub search_bounds: SearchBounds,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            population: Generation::uniform(100),
            food_quantity: 1500,
            // Three seconds at fifteen frames a second
            epoch_ticks: 45,
            seed: None,
            search_bounds: SearchBounds::default(),
        }
    }
}

impl SimConfig {
    pub fn new(population: Generation, food_quantity: usize, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            population,
            food_quantity,
            ..Default::default()
        }
    }

    /// Load from a TOML file; missing keys fall back to defaults
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for species in Species::ALL {
            let count = self.population.get(species);
            if count > MAX_POPULATION_PER_SPECIES {
                return Err(ConfigError::PopulationOutOfRange {
                    species,
                    count,
                    max: MAX_POPULATION_PER_SPECIES,
                });
            }
        }

        if self.food_quantity > MAX_FOOD_QUANTITY {
            return Err(ConfigError::FoodOutOfRange {
                count: self.food_quantity,
                max: MAX_FOOD_QUANTITY,
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let required = self.population.total() + self.food_quantity;
        if required > self.cell_count() {
            return Err(ConfigError::BoardTooSmall {
                required,
                capacity: self.cell_count(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_count(), 10_000);
        assert_eq!(config.search_bounds, SearchBounds::PerAxis);
    }

    #[test]
    fn test_population_upper_bound() {
        let mut config = SimConfig::default();
        config.population.set(Species::RedBull, MAX_POPULATION_PER_SPECIES);
        assert!(config.validate().is_ok());

        config.population.set(Species::RedBull, MAX_POPULATION_PER_SPECIES + 1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::PopulationOutOfRange {
                species: Species::RedBull,
                count: 601,
                max: 600,
            })
        );
    }

    #[test]
    fn test_food_upper_bound() {
        let mut config = SimConfig::default();
        config.food_quantity = MAX_FOOD_QUANTITY + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FoodOutOfRange { count: 2501, .. })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let config = SimConfig::new(Generation::default(), 0, 0, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_board_capacity_checked() {
        let config = SimConfig::new(Generation::uniform(10), 10, 5, 10);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall {
                required: 60,
                capacity: 50,
            })
        );
    }

    #[test]
    fn test_toml_partial_overrides() {
        let text = r#"
            width = 20
            height = 30
            food_quantity = 40
            seed = 99
            search_bounds = "linear_index"

            [population]
            keystone = 5
            suitor = 2
        "#;
        let config = SimConfig::from_toml_str(text).unwrap();
        assert_eq!(config.width, 20);
        assert_eq!(config.height, 30);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.search_bounds, SearchBounds::LinearIndex);
        assert_eq!(config.population.get(Species::Keystone), 5);
        assert_eq!(config.population.get(Species::Clairvoyant), 0);
        assert_eq!(config.population.get(Species::Suitor), 2);
        assert_eq!(config.epoch_ticks, 45);
    }

    #[test]
    fn test_toml_out_of_range_rejected() {
        let text = "food_quantity = 3000";
        assert!(matches!(
            SimConfig::from_toml_str(text),
            Err(SimError::Config(ConfigError::FoodOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_toml_negative_count_is_parse_error() {
        let text = "[population]\nkeystone = -1";
        assert!(matches!(
            SimConfig::from_toml_str(text),
            Err(SimError::Toml(_))
        ));
    }
}
