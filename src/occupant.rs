use crate::config::FOOD_ENERGY;
use crate::fighting::{DefensiveFightingStrategy, FightingStrategy, OffensiveFightingStrategy};
use crate::species::{Color, Kind, Species};
use rand::Rng;

/// Unit step vectors for the eight neighbouring cells
const DIRECTIONS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Extra vision granted to an Ascendant by its first meal
const ASCENDANT_VISION_BONUS: u32 = 3;
const ASCENDANT_BOOSTED_SPEED: u32 = 2;

/// Anything that can sit in a board slot
#[derive(Debug, Clone)]
pub enum Occupant {
    Food(Food),
    Individual(Individual),
}

/// Inert food ration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub x: usize,
    pub y: usize,
}

impl Food {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A foraging agent
#[derive(Debug, Clone)]
pub struct Individual {
    pub kind: Kind,
    pub x: usize,
    pub y: usize,

    /// Remaining energy; the individual starves when this hits zero
    pub energy: u32,

    /// Number of meals eaten over its lifetime
    pub food_eaten: u32,

    /// Latched to false once energy runs out, never revived
    pub alive: bool,

    pub vision: u32,
    pub speed: u32,

    /// Energy spent per step
    pub hunger: u32,

    /// Ascendant only: set by the first meal
    pub boosted: bool,

    /// Combat behaviour, if this individual fights over contested cells
    pub strategy: Option<Box<dyn FightingStrategy>>,
}

impl Individual {
    pub fn new(kind: Kind, x: usize, y: usize) -> Self {
        let traits = kind.species().traits();
        let strategy: Option<Box<dyn FightingStrategy>> = match kind {
            Kind::Keystone => Some(Box::new(DefensiveFightingStrategy)),
            _ => None,
        };

        Self {
            kind,
            x,
            y,
            energy: traits.starting_energy,
            food_eaten: 0,
            alive: true,
            vision: traits.vision,
            speed: traits.speed,
            hunger: traits.hunger,
            boosted: false,
            strategy,
        }
    }

    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn set_coords(&mut self, x: usize, y: usize) {
        self.x = x;
        self.y = y;
    }

    /// Linear board index of the stored coordinates
    pub fn position(&self, height: usize) -> usize {
        self.x * height + self.y
    }

    pub fn vision(&self) -> u32 {
        self.vision
    }

    pub fn color(&self) -> Color {
        self.kind.species().color()
    }

    /// Take one random step and pay for it
    ///
    /// Returns the candidate linear index `x * height + y` of the step target.
    /// The result may fall outside the board; the engine wraps it. Stored
    /// coordinates are left alone until the engine settles the individual.
    pub fn move_step<R: Rng + ?Sized>(&mut self, rng: &mut R, height: usize) -> i64 {
        let (dx, dy) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
        let speed = self.speed as i64;
        let nx = self.x as i64 + dx * speed;
        let ny = self.y as i64 + dy * speed;

        self.energy = self.energy.saturating_sub(self.hunger);

        nx * height as i64 + ny
    }

    /// Consume one food ration
    pub fn eat(&mut self) {
        self.food_eaten += 1;
        self.energy = self.energy.saturating_add(FOOD_ENERGY);

        // Ascendants become permanently stronger after their first meal
        if self.kind == Kind::Ascendant && !self.boosted {
            self.boosted = true;
            self.vision += ASCENDANT_VISION_BONUS;
            self.speed = ASCENDANT_BOOSTED_SPEED;
            self.strategy = Some(Box::new(OffensiveFightingStrategy));
        }
    }

    /// Re-evaluate hunger; once dead, stays dead
    pub fn check_if_alive(&mut self) -> bool {
        if self.alive && self.energy == 0 {
            self.alive = false;
        }
        self.alive
    }

    /// Read-only aliveness check (does not latch)
    pub fn is_alive(&self) -> bool {
        self.alive && self.energy > 0
    }
}

impl Occupant {
    pub fn coords(&self) -> (usize, usize) {
        match self {
            Occupant::Food(food) => (food.x, food.y),
            Occupant::Individual(ind) => (ind.x, ind.y),
        }
    }

    pub fn set_coords(&mut self, x: usize, y: usize) {
        match self {
            Occupant::Food(food) => {
                food.x = x;
                food.y = y;
            }
            Occupant::Individual(ind) => ind.set_coords(x, y),
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Occupant::Food(_) => Color::DARK_GREEN,
            Occupant::Individual(ind) => ind.color(),
        }
    }

    /// Species tag, None for food
    pub fn species(&self) -> Option<Species> {
        match self {
            Occupant::Food(_) => None,
            Occupant::Individual(ind) => Some(ind.species()),
        }
    }

    pub fn is_food(&self) -> bool {
        matches!(self, Occupant::Food(_))
    }

    pub fn is_live_individual(&self) -> bool {
        matches!(self, Occupant::Individual(ind) if ind.is_alive())
    }

    pub fn as_individual(&self) -> Option<&Individual> {
        match self {
            Occupant::Individual(ind) => Some(ind),
            Occupant::Food(_) => None,
        }
    }

    pub fn as_individual_mut(&mut self) -> Option<&mut Individual> {
        match self {
            Occupant::Individual(ind) => Some(ind),
            Occupant::Food(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_individual_uses_species_traits() {
        let ind = Individual::new(Kind::Clairvoyant, 3, 4);
        let traits = Species::Clairvoyant.traits();
        assert_eq!(ind.vision(), traits.vision);
        assert_eq!(ind.energy, traits.starting_energy);
        assert!(ind.alive);
        assert_eq!(ind.position(10), 34);
    }

    #[test]
    fn test_eat_adds_energy() {
        let mut ind = Individual::new(Kind::Keystone, 0, 0);
        let before = ind.energy;
        ind.eat();
        assert_eq!(ind.energy, before + FOOD_ENERGY);
        assert_eq!(ind.food_eaten, 1);
    }

    #[test]
    fn test_ascendant_boost_is_one_time() {
        let mut ind = Individual::new(Kind::Ascendant, 0, 0);
        let base_vision = ind.vision;
        assert!(ind.strategy.is_none());

        ind.eat();
        assert!(ind.boosted);
        assert_eq!(ind.vision, base_vision + ASCENDANT_VISION_BONUS);
        assert_eq!(ind.speed, ASCENDANT_BOOSTED_SPEED);
        assert!(ind.strategy.is_some());

        ind.eat();
        assert_eq!(ind.vision, base_vision + ASCENDANT_VISION_BONUS);
    }

    #[test]
    fn test_non_ascendant_never_boosts() {
        let mut ind = Individual::new(Kind::RedBull, 0, 0);
        ind.eat();
        assert!(!ind.boosted);
        assert_eq!(ind.vision, Species::RedBull.traits().vision);
    }

    #[test]
    fn test_move_step_is_unit_step_times_speed() {
        let mut rng = SmallRng::seed_from_u64(5);
        let height = 10;
        for kind in [Kind::Keystone, Kind::RedBull] {
            let mut ind = Individual::new(kind, 5, 5);
            for _ in 0..50 {
                let candidate = ind.move_step(&mut rng, height);
                let origin = 55i64;
                let delta = candidate - origin;
                let speed = ind.speed as i64;
                let valid: Vec<i64> = DIRECTIONS
                    .iter()
                    .map(|(dx, dy)| dx * speed * height as i64 + dy * speed)
                    .collect();
                assert!(valid.contains(&delta), "unexpected delta {}", delta);
            }
        }
    }

    #[test]
    fn test_move_step_spends_hunger() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut ind = Individual::new(Kind::RedBull, 5, 5);
        let before = ind.energy;
        ind.move_step(&mut rng, 10);
        assert_eq!(ind.energy, before - Species::RedBull.traits().hunger);
    }

    #[test]
    fn test_starvation_is_terminal() {
        let mut ind = Individual::new(Kind::Keystone, 0, 0);
        ind.energy = 0;
        assert!(!ind.check_if_alive());

        // Food after death does not revive
        ind.eat();
        assert!(!ind.check_if_alive());
        assert!(!ind.is_alive());
    }

    #[test]
    fn test_occupant_accessors() {
        let food = Occupant::Food(Food::new(1, 2));
        assert!(food.is_food());
        assert!(!food.is_live_individual());
        assert_eq!(food.species(), None);
        assert_eq!(food.color(), Color::DARK_GREEN);

        let mut ind = Occupant::Individual(Individual::new(Kind::RedBull, 0, 0));
        assert!(ind.is_live_individual());
        assert_eq!(ind.species(), Some(Species::RedBull));
        ind.set_coords(7, 8);
        assert_eq!(ind.coords(), (7, 8));
    }
}
