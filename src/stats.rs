use crate::generation::{percentage, total_survival_rate, Generation};
use crate::species::Species;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesStats {
    pub species: Species,
    pub survivors: usize,
    pub target: usize,
    /// Survivors over target, truncated percentage
    pub percentage: u32,
}

/// Outcome of an epoch boundary, for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochReport {
    /// Number of the epoch that just ended (1-based)
    pub epoch: u32,
    pub species: Vec<SpeciesStats>,
    pub total_survival_rate: u32,
    pub targets: Generation,
    pub survivors: Generation,
    /// Targets derived for the epoch about to start
    pub next_generation: Generation,
}

impl EpochReport {
    pub fn new(
        epoch: u32,
        targets: &Generation,
        survivors: &Generation,
        next_generation: Generation,
    ) -> Self {
        let species = Species::ALL
            .iter()
            .map(|s| SpeciesStats {
                species: *s,
                survivors: survivors.get(*s),
                target: targets.get(*s),
                percentage: percentage(survivors.get(*s), targets.get(*s)),
            })
            .collect();

        Self {
            epoch,
            species,
            total_survival_rate: total_survival_rate(targets, survivors),
            targets: *targets,
            survivors: *survivors,
            next_generation,
        }
    }

    pub fn stats_for(&self, species: Species) -> Option<&SpeciesStats> {
        self.species.iter().find(|s| s.species == species)
    }
}

impl fmt::Display for EpochReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Epoch {} has ended", self.epoch)?;
        for stats in &self.species {
            writeln!(
                f,
                "{}: {}% ( {} / {})",
                stats.species, stats.percentage, stats.survivors, stats.target
            )?;
        }
        writeln!(f, "Total survival rate: {}%", self.total_survival_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let targets = Generation::from_pairs(&[(Species::Keystone, 100), (Species::RedBull, 10)]);
        let survivors = Generation::from_pairs(&[(Species::Keystone, 50), (Species::RedBull, 5)]);
        let report = EpochReport::new(3, &targets, &survivors, targets);

        assert_eq!(report.total_survival_rate, 50);
        let keystone = report.stats_for(Species::Keystone).copied();
        assert_eq!(keystone.map(|s| s.percentage), Some(50));

        let text = report.to_string();
        assert!(text.contains("Epoch 3 has ended"));
        assert!(text.contains("Keystone: 50% ( 50 / 100)"));
        assert!(text.contains("Suitor: 0% ( 0 / 0)"));
        assert!(text.ends_with("Total survival rate: 50%\n"));
    }
}
