use crate::board::{Board, BoardView, OccupantId, Snapshot};
use crate::config::{
    SimConfig, FALLBACK_RADIUS, MATING_RADIUS, MAX_OFFSPRING, NEWBORN_MEALS,
};
use crate::debug::{self, bump};
use crate::error::ConfigError;
use crate::fighting::FightingOutcome;
use crate::generation::{reselect, total_survival_rate, Generation};
use crate::occupant::{Food, Individual, Occupant};
use crate::species::{Kind, Species};
use crate::stats::EpochReport;
use crate::utils::{distinct_random_indices, random_int};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// The simulation engine
///
/// Owns the board, the per-species counters and the RNG. Every public
/// operation runs to completion; callers never observe a half-swapped board.
pub struct Simulation {
    config: SimConfig,
    board: Board,

    /// Population targets for the running epoch
    current_generation: Generation,

    /// Live individuals per species, refreshed after every tick
    survivors: Generation,

    /// Completed epochs
    epoch: u32,
    ticks_in_epoch: u32,
    total_ticks: u64,

    /// Set at every epoch boundary until the driver calls `resume`
    awaiting_resume: bool,

    /// Fast RNG for better performance (no synchronization overhead like thread_rng)
    rng: SmallRng,
}

impl Simulation {
    /// Validate `config` and generate the first board
    pub fn configure(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut sim = Self {
            board: Board::new(config.width, config.height, config.search_bounds),
            current_generation: config.population,
            survivors: Generation::default(),
            epoch: 0,
            ticks_in_epoch: 0,
            total_ticks: 0,
            awaiting_resume: false,
            rng,
            config,
        };
        sim.regenerate_board();
        sim.survivors = sim.census();

        tracing::info!(
            width = sim.config.width,
            height = sim.config.height,
            individuals = sim.current_generation.total(),
            food = sim.config.food_quantity,
            "simulation configured"
        );
        Ok(sim)
    }

    pub fn new(
        population: Generation,
        food_quantity: usize,
        width: usize,
        height: usize,
    ) -> Result<Self, ConfigError> {
        Self::configure(SimConfig::new(population, food_quantity, width, height))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Read-only view of the current board for renderers
    pub fn board_snapshot(&self) -> BoardView<'_> {
        self.board.view()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn ticks_in_epoch(&self) -> u32 {
        self.ticks_in_epoch
    }

    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    pub fn current_generation(&self) -> &Generation {
        &self.current_generation
    }

    pub fn survivors(&self) -> &Generation {
        &self.survivors
    }

    /// Aggregate survival percentage of the running epoch so far
    pub fn total_survival_rate(&self) -> u32 {
        total_survival_rate(&self.current_generation, &self.survivors)
    }

    pub fn is_awaiting_resume(&self) -> bool {
        self.awaiting_resume
    }

    pub fn resume(&mut self) {
        self.awaiting_resume = false;
    }

    pub fn food_count(&self) -> usize {
        self.board.view().food_count()
    }

    pub fn population_count(&self) -> usize {
        self.board.view().individual_count()
    }

    /// Place an occupant on an empty cell of the current board, for scripted
    /// setups and tests
    ///
    /// Returns None if the index is off the board or the cell is taken.
    pub fn inject(&mut self, occupant: Occupant, index: usize) -> Option<OccupantId> {
        if index >= self.board.len() || self.board.id_at(Snapshot::Current, index).is_some() {
            return None;
        }
        let id = self.board.spawn(occupant);
        self.board.place(Snapshot::Current, id, index);
        self.survivors = self.census();
        Some(id)
    }

    /// Individual standing on `index` of the current board, for scripted
    /// setups and tests
    pub fn individual_mut(&mut self, index: usize) -> Option<&mut Individual> {
        let id = self.board.id_at(Snapshot::Current, index)?;
        self.board.occupant_mut(id).as_individual_mut()
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self) -> BoardView<'_> {
        for (index, id) in self.board.current_ids() {
            if self.board.occupant(id).is_food() {
                // Food stays put unless someone already took its cell
                if self.board.id_at(Snapshot::Next, index).is_none() {
                    self.board.place(Snapshot::Next, id, index);
                }
                continue;
            }
            self.step_individual(index, id);
        }

        self.board.swap_snapshots();
        self.survivors = self.census();
        self.ticks_in_epoch += 1;
        self.total_ticks += 1;

        self.board.view()
    }

    /// Forage, otherwise wander; corpses stay where they fell
    fn step_individual(&mut self, index: usize, id: OccupantId) {
        let height = self.board.height();
        let Some(individual) = self.board.occupant_mut(id).as_individual_mut() else {
            return;
        };

        let was_alive = individual.alive;
        if !individual.check_if_alive() {
            if was_alive {
                bump(&debug::STARVED);
                debug::log_event(format!("[STARVED] {} at {}", individual.species(), index));
            }
            if self.board.id_at(Snapshot::Next, index).is_none() {
                self.board.place(Snapshot::Next, id, index);
            }
            return;
        }

        let vision = individual.vision();
        if let Some(food_index) = self.board.find_food_in_radius(index, vision) {
            self.board.place(Snapshot::Next, id, food_index);
            if let Some(individual) = self.board.occupant_mut(id).as_individual_mut() {
                individual.eat();
            }
            bump(&debug::MEALS);
            return;
        }

        let candidate = match self.board.occupant_mut(id).as_individual_mut() {
            Some(individual) => individual.move_step(&mut self.rng, height),
            None => return,
        };
        let target = self.board.wrap_index(candidate);
        self.resolve_arrival(id, target);
    }

    /// Settle a mover on `target` in the next board
    fn resolve_arrival(&mut self, id: OccupantId, target: usize) {
        match self.board.id_at(Snapshot::Next, target) {
            Some(incumbent)
                if incumbent != id && self.board.occupant(incumbent).is_live_individual() =>
            {
                self.resolve_conflict(id, incumbent, target);
            }
            // Empty, or food / a corpse that gets trampled
            _ => self.board.place(Snapshot::Next, id, target),
        }
    }

    /// Two live individuals want the same cell
    fn resolve_conflict(&mut self, mover: OccupantId, incumbent: OccupantId, target: usize) {
        let (Some(mover_kind), Some(incumbent_kind)) = (self.kind_of(mover), self.kind_of(incumbent))
        else {
            return;
        };

        if let Some(breed) = Kind::fertile_pair(mover_kind, incumbent_kind) {
            self.mate(target, breed);
        } else if self.fight(mover, incumbent) == Some(FightingOutcome::Win) {
            // The winner takes the cell; the loser looks for another one
            self.board.clear_slot(Snapshot::Next, target);
            self.board.place(Snapshot::Next, mover, target);
            self.relocate(incumbent, target);
            return;
        }

        self.relocate(mover, target);
    }

    fn kind_of(&self, id: OccupantId) -> Option<Kind> {
        self.board.occupant(id).as_individual().map(|ind| ind.kind)
    }

    /// Fight only happens when both sides carry a strategy
    fn fight(&self, attacker: OccupantId, defender: OccupantId) -> Option<FightingOutcome> {
        let attacker = self.board.occupant(attacker).as_individual()?;
        let defender = self.board.occupant(defender).as_individual()?;
        let outcome = attacker
            .strategy
            .as_ref()?
            .fight(&**defender.strategy.as_ref()?);

        bump(&debug::FIGHTS);
        tracing::trace!(
            attacker = %attacker.species(),
            defender = %defender.species(),
            ?outcome,
            "fight"
        );
        Some(outcome)
    }

    /// Move `id` to the first free next-board cell around `around`, or drop it
    fn relocate(&mut self, id: OccupantId, around: usize) {
        match self
            .board
            .find_first_empty_in_radius(Snapshot::Next, around, FALLBACK_RADIUS)
        {
            Some(free) => {
                self.board.place(Snapshot::Next, id, free);
                bump(&debug::DISPLACEMENTS);
            }
            None => {
                // No room: the occupant is absent from the next board
                bump(&debug::DROPPED);
                debug::log_event(format!("[DROPPED] occupant {} near {}", id, around));
            }
        }
    }

    /// A fertile pair met at `parent_index`; breed 1..=MAX_OFFSPRING newborns
    fn mate(&mut self, parent_index: usize, breed: Species) {
        let offspring = random_int(&mut self.rng, 1, MAX_OFFSPRING);
        let matings = bump(&debug::MATINGS);
        tracing::debug!(%breed, parent_index, offspring, "mating");
        debug::log_event(format!(
            "[MATING #{}] {} at {} -> {} offspring",
            matings, breed, parent_index, offspring
        ));

        for _ in 0..offspring {
            self.produce_offspring(parent_index, breed);
        }
    }

    fn produce_offspring(&mut self, parent_index: usize, breed: Species) {
        let Some(kind) = Kind::breed(breed) else {
            return;
        };
        let Some(spot) = self
            .board
            .find_first_empty_in_radius(Snapshot::Next, parent_index, MATING_RADIUS)
        else {
            bump(&debug::FAILED_BIRTHS);
            return;
        };

        let (x, y) = self.board.to_xy(spot);
        let mut newborn = Individual::new(kind, x, y);
        // Each baby starts off with a few meals
        for _ in 0..NEWBORN_MEALS {
            newborn.eat();
        }

        let id = self.board.spawn(Occupant::Individual(newborn));
        self.board.place(Snapshot::Next, id, spot);
        bump(&debug::BIRTHS);
    }

    /// Live individuals per species on the current board (parallel)
    fn census(&self) -> Generation {
        let board = &self.board;
        board
            .current_ids()
            .par_iter()
            .filter_map(|(_, id)| board.occupant(*id).as_individual())
            .filter(|ind| ind.is_alive())
            .fold(Generation::default, |mut acc, ind| {
                acc.increment(ind.species());
                acc
            })
            .reduce(Generation::default, Generation::merge)
    }

    /// Count survivors per species and clear the dead off the board
    fn fitness_tally(&mut self) -> Generation {
        let mut survivors = Generation::default();
        for (index, id) in self.board.current_ids() {
            let Some(individual) = self.board.occupant_mut(id).as_individual_mut() else {
                continue;
            };
            if individual.check_if_alive() {
                survivors.increment(individual.species());
            } else {
                self.board.clear_slot(Snapshot::Current, index);
            }
        }
        survivors
    }

    /// Close the running epoch and spawn the reselected generation
    pub fn end_epoch(&mut self) -> EpochReport {
        let targets = self.current_generation;
        let survivors = self.fitness_tally();
        let next_generation = reselect(&targets, &survivors);

        self.epoch += 1;
        let report = EpochReport::new(self.epoch, &targets, &survivors, next_generation);
        tracing::info!(
            epoch = self.epoch,
            ticks = self.ticks_in_epoch,
            survival_rate = report.total_survival_rate,
            survivors = survivors.total(),
            next_total = next_generation.total(),
            "epoch ended"
        );

        self.current_generation = next_generation;
        self.survivors = Generation::default();
        self.regenerate_board();
        self.survivors = self.census();
        self.ticks_in_epoch = 0;
        self.awaiting_resume = true;

        report
    }

    /// Run `epoch_ticks` ticks and close the epoch
    pub fn run_epoch(&mut self) -> EpochReport {
        self.resume();
        for _ in 0..self.config.epoch_ticks {
            self.tick();
        }
        self.end_epoch()
    }

    /// Scatter the current targets and the food supply on a fresh board
    ///
    /// Blocks are laid out in species order, food last.
    fn regenerate_board(&mut self) {
        self.board.reset();

        let total = self.current_generation.total() + self.config.food_quantity;
        let positions = distinct_random_indices(&mut self.rng, total, 0, self.board.len());
        let mut cursor = positions.iter().copied();

        for (species, count) in self.current_generation.iter() {
            for index in cursor.by_ref().take(count) {
                let (x, y) = self.board.to_xy(index);
                let kind = Kind::breed(species).unwrap_or_else(|| Kind::random_suitor(&mut self.rng));
                let id = self.board.spawn(Occupant::Individual(Individual::new(kind, x, y)));
                self.board.place(Snapshot::Current, id, index);
            }
        }

        for index in cursor {
            let (x, y) = self.board.to_xy(index);
            let id = self.board.spawn(Occupant::Food(Food::new(x, y)));
            self.board.place(Snapshot::Current, id, index);
        }
    }
}
