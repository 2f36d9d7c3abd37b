/// Diagnostic tools for analyzing population dynamics

use crate::species::Species;
use crate::world::Simulation;

/// Analyze the individuals currently on the board
pub fn analyze_population(sim: &Simulation) -> PopulationStats {
    let mut stats = PopulationStats::default();
    let board = sim.board();

    for (_, id) in board.current_ids() {
        let occupant = board.occupant(id);
        let Some(ind) = occupant.as_individual() else {
            stats.food_on_board += 1;
            continue;
        };

        let slot = ind.species().index();
        if ind.is_alive() {
            stats.alive[slot] += 1;
            stats.energy_sum[slot] += ind.energy as u64;
        } else {
            stats.dead[slot] += 1;
        }

        stats.meals_eaten += ind.food_eaten as u64;

        if ind.boosted {
            stats.boosted_ascendants += 1;
        }

        // Track which breeds the suitors are after
        if let Some(target) = ind.kind.courts() {
            stats.suitor_targets[target.index()] += 1;
        }
    }

    stats
}

#[derive(Debug, Default)]
pub struct PopulationStats {
    pub alive: [usize; Species::COUNT],
    pub dead: [usize; Species::COUNT],
    pub energy_sum: [u64; Species::COUNT],
    pub suitor_targets: [usize; Species::COUNT],
    pub boosted_ascendants: usize,
    pub meals_eaten: u64,
    pub food_on_board: usize,
}

impl PopulationStats {
    pub fn total_alive(&self) -> usize {
        self.alive.iter().sum()
    }

    /// Mean energy of the living members of a species
    pub fn average_energy(&self, species: Species) -> f64 {
        let alive = self.alive[species.index()];
        if alive == 0 {
            0.0
        } else {
            self.energy_sum[species.index()] as f64 / alive as f64
        }
    }

    pub fn print_report(&self) {
        println!("\n=== Population Analysis ===");
        println!("Living individuals: {}", self.total_alive());
        println!("Food on board: {}", self.food_on_board);
        println!("Meals eaten: {}", self.meals_eaten);
        println!("\nPer species (alive / dead, avg energy):");
        for species in Species::ALL {
            println!(
                "  {}: {} / {}, {:.1}",
                species,
                self.alive[species.index()],
                self.dead[species.index()],
                self.average_energy(species)
            );
        }
        println!("\nBoosted Ascendants: {}", self.boosted_ascendants);
        println!("Suitor targets:");
        for species in Species::BREEDS {
            let count = self.suitor_targets[species.index()];
            if count > 0 {
                println!("  {}: {}", species, count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::generation::Generation;
    use crate::occupant::{Individual, Occupant};
    use crate::species::Kind;

    fn empty_sim() -> Simulation {
        let mut config = SimConfig::new(Generation::default(), 0, 10, 10);
        config.seed = Some(1);
        Simulation::configure(config).unwrap()
    }

    #[test]
    fn test_analyze_counts_alive_and_dead() {
        let mut sim = empty_sim();
        sim.inject(Occupant::Individual(Individual::new(Kind::Keystone, 0, 0)), 1);
        sim.inject(Occupant::Individual(Individual::new(Kind::Keystone, 0, 0)), 2);
        sim.inject(Occupant::Individual(Individual::new(Kind::RedBull, 0, 0)), 3);
        sim.individual_mut(3).unwrap().energy = 0;

        let stats = analyze_population(&sim);
        assert_eq!(stats.alive[Species::Keystone.index()], 2);
        assert_eq!(stats.dead[Species::RedBull.index()], 1);
        assert_eq!(stats.total_alive(), 2);
        assert_eq!(
            stats.average_energy(Species::Keystone),
            Species::Keystone.traits().starting_energy as f64
        );
        assert_eq!(stats.average_energy(Species::Clairvoyant), 0.0);
    }

    #[test]
    fn test_analyze_tracks_suitors_and_boosts() {
        let mut sim = empty_sim();
        let suitor = Kind::suitor(Species::Clairvoyant).unwrap();
        sim.inject(Occupant::Individual(Individual::new(suitor, 0, 0)), 5);
        let mut ascendant = Individual::new(Kind::Ascendant, 0, 0);
        ascendant.eat();
        sim.inject(Occupant::Individual(ascendant), 6);

        let stats = analyze_population(&sim);
        assert_eq!(stats.suitor_targets[Species::Clairvoyant.index()], 1);
        assert_eq!(stats.boosted_ascendants, 1);
        assert_eq!(stats.meals_eaten, 1);
        assert_eq!(stats.food_on_board, 0);
    }

    #[test]
    fn test_analyze_counts_food() {
        let mut config = SimConfig::new(Generation::uniform(3), 25, 10, 10);
        config.seed = Some(2);
        let sim = Simulation::configure(config).unwrap();
        let stats = analyze_population(&sim);
        assert_eq!(stats.food_on_board, 25);
        assert_eq!(stats.total_alive(), 15);
        assert_eq!(stats.suitor_targets.iter().sum::<usize>(), 3);
    }
}
