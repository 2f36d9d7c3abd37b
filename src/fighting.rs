//! Pluggable combat behaviour for individuals that contest a cell

use crate::species::Color;
use std::fmt;

/// Result of a fight, from the attacker's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FightingOutcome {
    Win,
    Lose,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Offensive,
    Defensive,
}

pub trait FightingStrategy: fmt::Debug + Send + Sync {
    fn stance(&self) -> Stance;

    /// Resolve an attack by `self` on an occupant using `other`
    fn fight(&self, other: &dyn FightingStrategy) -> FightingOutcome;

    /// Accent color shown for individuals carrying this strategy
    fn color(&self) -> Color;

    fn clone_box(&self) -> Box<dyn FightingStrategy>;
}

impl Clone for Box<dyn FightingStrategy> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Attacks; drives defenders off a contested cell
#[derive(Debug, Clone, Copy, Default)]
pub struct OffensiveFightingStrategy;

impl FightingStrategy for OffensiveFightingStrategy {
    fn stance(&self) -> Stance {
        Stance::Offensive
    }

    fn fight(&self, other: &dyn FightingStrategy) -> FightingOutcome {
        match other.stance() {
            Stance::Defensive => FightingOutcome::Win,
            Stance::Offensive => FightingOutcome::Draw,
        }
    }

    fn color(&self) -> Color {
        Color::ORANGE
    }

    fn clone_box(&self) -> Box<dyn FightingStrategy> {
        Box::new(*self)
    }
}

/// Never dislodges anyone; loses to an attacker
#[derive(Debug, Clone, Copy, Default)]
pub struct DefensiveFightingStrategy;

impl FightingStrategy for DefensiveFightingStrategy {
    fn stance(&self) -> Stance {
        Stance::Defensive
    }

    fn fight(&self, other: &dyn FightingStrategy) -> FightingOutcome {
        match other.stance() {
            Stance::Offensive => FightingOutcome::Lose,
            Stance::Defensive => FightingOutcome::Draw,
        }
    }

    fn color(&self) -> Color {
        Color::CYAN
    }

    fn clone_box(&self) -> Box<dyn FightingStrategy> {
        Box::new(*self)
    }
}
