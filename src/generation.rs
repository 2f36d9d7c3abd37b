//! Per-species population counters and the proportional reselection rule

use crate::species::Species;
use serde::{Deserialize, Serialize};

/// Count per species tag
///
/// Used both for population targets and observed survivors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Generation {
    pub keystone: usize,
    pub clairvoyant: usize,
    pub red_bull: usize,
    pub ascendant: usize,
    pub suitor: usize,
}

impl Generation {
    /// Same count for every species
    pub fn uniform(count: usize) -> Self {
        Self {
            keystone: count,
            clairvoyant: count,
            red_bull: count,
            ascendant: count,
            suitor: count,
        }
    }

    pub fn from_pairs(pairs: &[(Species, usize)]) -> Self {
        let mut generation = Self::default();
        for (species, count) in pairs {
            generation.set(*species, *count);
        }
        generation
    }

    pub fn get(&self, species: Species) -> usize {
        match species {
            Species::Keystone => self.keystone,
            Species::Clairvoyant => self.clairvoyant,
            Species::RedBull => self.red_bull,
            Species::Ascendant => self.ascendant,
            Species::Suitor => self.suitor,
        }
    }

    fn slot_mut(&mut self, species: Species) -> &mut usize {
        match species {
            Species::Keystone => &mut self.keystone,
            Species::Clairvoyant => &mut self.clairvoyant,
            Species::RedBull => &mut self.red_bull,
            Species::Ascendant => &mut self.ascendant,
            Species::Suitor => &mut self.suitor,
        }
    }

    pub fn set(&mut self, species: Species, count: usize) {
        *self.slot_mut(species) = count;
    }

    pub fn increment(&mut self, species: Species) {
        *self.slot_mut(species) += 1;
    }

    pub fn total(&self) -> usize {
        Species::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// (species, count) in board generation order
    pub fn iter(&self) -> impl Iterator<Item = (Species, usize)> + '_ {
        Species::ALL.iter().map(move |s| (*s, self.get(*s)))
    }

    /// Element-wise sum, used when merging parallel partial counts
    pub fn merge(mut self, other: Generation) -> Generation {
        for species in Species::ALL {
            *self.slot_mut(species) += other.get(species);
        }
        self
    }
}

/// Integer percentage of survivors over targets, truncated
pub fn percentage(survivors: usize, target: usize) -> u32 {
    if target == 0 {
        0
    } else {
        (100 * survivors / target) as u32
    }
}

/// Aggregate survival percentage over all species
pub fn total_survival_rate(targets: &Generation, survivors: &Generation) -> u32 {
    percentage(survivors.total(), targets.total())
}

/// Derive the next generation's targets from this epoch's survivors
///
/// Each species receives a share of the old total proportional to its
/// absolute survivor count:
/// `new[s] = floor(survivors[s] * total_individuals / total_survivors)`.
/// `total_survivors` is the exact survivor count over species that had a
/// non-zero target, so the new targets never sum past `total_individuals`.
/// Species with a zero target stay at zero. When the truncated survival
/// rate rounds the survivor pool down to nothing, the targets are returned
/// unchanged.
pub fn reselect(targets: &Generation, survivors: &Generation) -> Generation {
    let total_individuals = targets.total();
    let total_survivors: usize = Species::ALL
        .iter()
        .filter(|s| targets.get(**s) > 0)
        .map(|s| survivors.get(*s))
        .sum();

    let rounded_survivors =
        total_survival_rate(targets, survivors) as usize * total_individuals / 100;
    if rounded_survivors == 0 || total_survivors == 0 {
        return *targets;
    }

    let mut next = Generation::default();
    for species in Species::ALL {
        if targets.get(species) == 0 {
            continue;
        }
        next.set(
            species,
            survivors.get(species) * total_individuals / total_survivors,
        );
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_uniform_survival_is_stable() {
        let targets = Generation::from_pairs(&[(Species::Keystone, 100)]);
        let survivors = Generation::from_pairs(&[(Species::Keystone, 50)]);
        assert_eq!(total_survival_rate(&targets, &survivors), 50);

        let next = reselect(&targets, &survivors);
        assert_eq!(next.get(Species::Keystone), 100);
        assert_eq!(next.total(), 100);
    }

    #[test]
    fn test_extinction_keeps_targets() {
        let targets = Generation::uniform(40);
        let survivors = Generation::default();
        assert_eq!(reselect(&targets, &survivors), targets);
    }

    #[test]
    fn test_sub_percent_survival_keeps_targets() {
        let targets = Generation::uniform(100);
        let survivors = Generation::from_pairs(&[(Species::Keystone, 2)]);
        assert_eq!(total_survival_rate(&targets, &survivors), 0);
        assert_eq!(reselect(&targets, &survivors), targets);
    }

    #[test]
    fn test_one_percent_survival_reselects() {
        let targets = Generation::uniform(100);
        let survivors = Generation::from_pairs(&[(Species::Keystone, 5)]);
        assert_eq!(total_survival_rate(&targets, &survivors), 1);
        let next = reselect(&targets, &survivors);
        assert_eq!(next.get(Species::Keystone), 500);
        assert_eq!(next.get(Species::RedBull), 0);
    }

    #[test]
    fn test_share_follows_survivors() {
        let targets = Generation::from_pairs(&[
            (Species::Keystone, 100),
            (Species::RedBull, 100),
        ]);
        let survivors = Generation::from_pairs(&[
            (Species::Keystone, 30),
            (Species::RedBull, 10),
        ]);
        let next = reselect(&targets, &survivors);
        assert_eq!(next.get(Species::Keystone), 150);
        assert_eq!(next.get(Species::RedBull), 50);
        assert_eq!(next.get(Species::Suitor), 0);
    }

    #[test]
    fn test_zero_target_never_originates() {
        let targets = Generation::from_pairs(&[(Species::Clairvoyant, 10)]);
        // Survivors recorded for a species that had no target are ignored
        let survivors = Generation::from_pairs(&[
            (Species::Clairvoyant, 5),
            (Species::Ascendant, 5),
        ]);
        let next = reselect(&targets, &survivors);
        assert_eq!(next.get(Species::Ascendant), 0);
        assert_eq!(next.get(Species::Clairvoyant), 10);
    }

    #[test]
    fn test_births_above_target_still_bounded() {
        let targets = Generation::from_pairs(&[
            (Species::Keystone, 10),
            (Species::Suitor, 10),
        ]);
        let survivors = Generation::from_pairs(&[
            (Species::Keystone, 35),
            (Species::Suitor, 2),
        ]);
        let next = reselect(&targets, &survivors);
        assert!(next.total() <= targets.total());
        assert_eq!(next.get(Species::Keystone), 18);
        assert_eq!(next.get(Species::Suitor), 1);
    }

    #[test]
    fn test_percentage_truncates() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 66);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn test_iter_order_and_total() {
        let generation = Generation {
            keystone: 1,
            clairvoyant: 2,
            red_bull: 3,
            ascendant: 4,
            suitor: 5,
        };
        let collected: Vec<_> = generation.iter().collect();
        assert_eq!(collected[0], (Species::Keystone, 1));
        assert_eq!(collected[4], (Species::Suitor, 5));
        assert_eq!(generation.total(), 15);
        assert_eq!(generation.merge(generation).total(), 30);
    }

    fn arb_generation() -> impl Strategy<Value = Generation> {
        prop::array::uniform5(0usize..=600).prop_map(|c| Generation {
            keystone: c[0],
            clairvoyant: c[1],
            red_bull: c[2],
            ascendant: c[3],
            suitor: c[4],
        })
    }

    proptest! {
        #[test]
        fn prop_reselection_never_grows_population(
            targets in arb_generation(),
            survivors in arb_generation(),
        ) {
            let next = reselect(&targets, &survivors);
            prop_assert!(next.total() <= targets.total());
            for species in Species::ALL {
                if targets.get(species) == 0 {
                    prop_assert_eq!(next.get(species), 0);
                }
            }
        }
    }
}
