//! Species tags, per-species traits and the mating table

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cosmetic RGB tag handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const PINK: Color = Color::rgb(255, 105, 180);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    pub const ORANGE: Color = Color::rgb(255, 140, 0);
    pub const CYAN: Color = Color::rgb(0, 200, 200);
}

/// Species tag used for population targets and survivor counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Keystone = 0,
    Clairvoyant = 1,
    RedBull = 2,
    Ascendant = 3,
    Suitor = 4,
}

/// Movement and metabolism parameters of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Traits {
    /// Foraging radius (square neighborhood half-side)
    pub vision: u32,
    /// Cells covered by one step
    pub speed: u32,
    /// Energy spent per step
    pub hunger: u32,
    pub starting_energy: u32,
}

impl Species {
    pub const COUNT: usize = 5;

    /// All tags in board generation order
    pub const ALL: [Species; Species::COUNT] = [
        Species::Keystone,
        Species::Clairvoyant,
        Species::RedBull,
        Species::Ascendant,
        Species::Suitor,
    ];

    /// Species a suitor can court
    pub const BREEDS: [Species; 4] = [
        Species::Keystone,
        Species::Clairvoyant,
        Species::RedBull,
        Species::Ascendant,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_breed(self) -> bool {
        self != Species::Suitor
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Keystone => "Keystone",
            Species::Clairvoyant => "Clairvoyant",
            Species::RedBull => "RedBull",
            Species::Ascendant => "Ascendant",
            Species::Suitor => "Suitor",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Species::Keystone => Color::YELLOW,
            Species::Clairvoyant => Color::BLUE,
            Species::RedBull => Color::RED,
            Species::Ascendant => Color::PINK,
            Species::Suitor => Color::GRAY,
        }
    }

    pub fn traits(self) -> Traits {
        match self {
            // Sustains on little food, nothing else special
            Species::Keystone => Traits {
                vision: 2,
                speed: 1,
                hunger: 1,
                starting_energy: 20,
            },
            Species::Clairvoyant => Traits {
                vision: 6,
                speed: 1,
                hunger: 1,
                starting_energy: 20,
            },
            // Fast on its feet but burns twice the energy
            Species::RedBull => Traits {
                vision: 2,
                speed: 2,
                hunger: 2,
                starting_energy: 20,
            },
            Species::Ascendant => Traits {
                vision: 2,
                speed: 1,
                hunger: 1,
                starting_energy: 20,
            },
            Species::Suitor => Traits {
                vision: 2,
                speed: 1,
                hunger: 1,
                starting_energy: 20,
            },
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full identity of an individual
///
/// A suitor carries the breed it wants to mate with; every other kind maps
/// one-to-one onto its species tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Keystone,
    Clairvoyant,
    RedBull,
    Ascendant,
    Suitor { target: Species },
}

impl Kind {
    /// Plain kind for a breed; `Species::Suitor` needs a target, use `Kind::suitor`
    pub fn breed(species: Species) -> Option<Kind> {
        match species {
            Species::Keystone => Some(Kind::Keystone),
            Species::Clairvoyant => Some(Kind::Clairvoyant),
            Species::RedBull => Some(Kind::RedBull),
            Species::Ascendant => Some(Kind::Ascendant),
            Species::Suitor => None,
        }
    }

    /// Suitor courting `target`; suitors never court other suitors
    pub fn suitor(target: Species) -> Option<Kind> {
        target.is_breed().then_some(Kind::Suitor { target })
    }

    /// Suitor with a uniformly drawn target breed
    pub fn random_suitor<R: Rng + ?Sized>(rng: &mut R) -> Kind {
        let target = Species::BREEDS[rng.gen_range(0..Species::BREEDS.len())];
        Kind::Suitor { target }
    }

    pub fn species(self) -> Species {
        match self {
            Kind::Keystone => Species::Keystone,
            Kind::Clairvoyant => Species::Clairvoyant,
            Kind::RedBull => Species::RedBull,
            Kind::Ascendant => Species::Ascendant,
            Kind::Suitor { .. } => Species::Suitor,
        }
    }

    /// Breed this individual courts, if it is a suitor
    pub fn courts(self) -> Option<Species> {
        match self {
            Kind::Suitor { target } => Some(target),
            _ => None,
        }
    }

    /// Mating table: `self` courts `other`
    pub fn courts_kind(self, other: Kind) -> bool {
        match self {
            Kind::Suitor { target } => other.species() == target,
            _ => false,
        }
    }

    /// Identify the (breed, suitor) roles of a colliding pair
    ///
    /// Returns the breed that will produce offspring, or None when neither
    /// side courts the other.
    pub fn fertile_pair(a: Kind, b: Kind) -> Option<Species> {
        if a.courts_kind(b) {
            Some(b.species())
        } else if b.courts_kind(a) {
            Some(a.species())
        } else {
            None
        }
    }
}
