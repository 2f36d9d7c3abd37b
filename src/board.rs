use crate::config::SearchBounds;
use crate::occupant::Occupant;
use crate::species::{Color, Species};
use rayon::prelude::*;

/// Stable handle into the occupant arena
pub type OccupantId = usize;

/// Which of the two slot grids an operation reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot {
    Current,
    Next,
}

/// Grid of occupant slots, double-buffered
///
/// Occupant data lives in an arena; `current` and `next` only hold ids, so an
/// individual in transit during a tick can be referenced from both grids.
/// Cell `(x, y)` lives at linear index `x * height + y`.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    search_bounds: SearchBounds,
    occupants: Vec<Occupant>,
    current: Vec<Option<OccupantId>>,
    next: Vec<Option<OccupantId>>,
}

impl Board {
    pub fn new(width: usize, height: usize, search_bounds: SearchBounds) -> Self {
        let cells = width * height;
        Self {
            width,
            height,
            search_bounds,
            occupants: Vec::new(),
            current: vec![None; cells],
            next: vec![None; cells],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn search_bounds(&self) -> SearchBounds {
        self.search_bounds
    }

    /// Convert 2D coordinates to flat array index
    #[inline]
    pub fn linear_index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    #[inline]
    pub fn to_xy(&self, index: usize) -> (usize, usize) {
        (index / self.height, index % self.height)
    }

    /// Wrap a possibly out-of-range candidate index onto the board
    pub fn wrap_index(&self, candidate: i64) -> usize {
        candidate.rem_euclid(self.len() as i64) as usize
    }

    /// Drop every occupant and empty both grids
    pub fn reset(&mut self) {
        self.occupants.clear();
        self.current.iter_mut().for_each(|slot| *slot = None);
        self.next.iter_mut().for_each(|slot| *slot = None);
    }

    /// Add an occupant to the arena without placing it
    pub fn spawn(&mut self, occupant: Occupant) -> OccupantId {
        self.occupants.push(occupant);
        self.occupants.len() - 1
    }

    pub fn occupant(&self, id: OccupantId) -> &Occupant {
        &self.occupants[id]
    }

    pub fn occupant_mut(&mut self, id: OccupantId) -> &mut Occupant {
        &mut self.occupants[id]
    }

    fn grid(&self, snapshot: Snapshot) -> &[Option<OccupantId>] {
        match snapshot {
            Snapshot::Current => &self.current,
            Snapshot::Next => &self.next,
        }
    }

    fn grid_mut(&mut self, snapshot: Snapshot) -> &mut [Option<OccupantId>] {
        match snapshot {
            Snapshot::Current => &mut self.current,
            Snapshot::Next => &mut self.next,
        }
    }

    pub fn id_at(&self, snapshot: Snapshot, index: usize) -> Option<OccupantId> {
        self.grid(snapshot).get(index).copied().flatten()
    }

    pub fn occupant_at(&self, snapshot: Snapshot, index: usize) -> Option<&Occupant> {
        self.id_at(snapshot, index).map(|id| &self.occupants[id])
    }

    /// Put `id` into a slot and move its coordinates there
    pub fn place(&mut self, snapshot: Snapshot, id: OccupantId, index: usize) {
        let (x, y) = self.to_xy(index);
        self.occupants[id].set_coords(x, y);
        self.grid_mut(snapshot)[index] = Some(id);
    }

    /// Empty a slot, returning whatever was there
    pub fn clear_slot(&mut self, snapshot: Snapshot, index: usize) -> Option<OccupantId> {
        self.grid_mut(snapshot)[index].take()
    }

    /// Promote `next` to `current` and start a fresh empty `next`
    pub fn swap_snapshots(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.iter_mut().for_each(|slot| *slot = None);
    }

    /// Square neighborhood of side `2 * radius + 1` around `center`
    ///
    /// Row-major from `(x - radius, y - radius)`. Which cells count as on the
    /// board depends on `search_bounds`: in `LinearIndex` mode only the
    /// combined index is range-checked, so a neighborhood crossing the
    /// `y == 0` or `y == height - 1` edge spills into the neighbouring column.
    pub fn neighborhood(&self, center: usize, radius: u32) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = self.to_xy(center);
        let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
        let width = self.width as i64;
        let height = self.height as i64;
        let cells = self.len() as i64;
        let bounds = self.search_bounds;

        (cx - r..=cx + r)
            .flat_map(move |j| (cy - r..=cy + r).map(move |k| (j, k)))
            .filter_map(move |(j, k)| {
                let on_board = match bounds {
                    SearchBounds::LinearIndex => {
                        let index = j * height + k;
                        index >= 0 && index < cells
                    }
                    SearchBounds::PerAxis => j >= 0 && j < width && k >= 0 && k < height,
                };
                on_board.then(|| (j * height + k) as usize)
            })
    }

    /// First empty slot of `snapshot` in the neighborhood scan order
    pub fn find_first_empty_in_radius(
        &self,
        snapshot: Snapshot,
        center: usize,
        radius: u32,
    ) -> Option<usize> {
        let grid = self.grid(snapshot);
        self.neighborhood(center, radius)
            .find(|index| grid[*index].is_none())
    }

    /// First food cell in range that no live individual has claimed yet
    ///
    /// A cell qualifies when it holds food in `current` and its `next` slot
    /// does not already hold a live individual.
    pub fn find_food_in_radius(&self, center: usize, radius: u32) -> Option<usize> {
        self.neighborhood(center, radius).find(|index| {
            let has_food = self
                .occupant_at(Snapshot::Current, *index)
                .is_some_and(Occupant::is_food);
            has_food && !self.next_holds_live_individual(*index)
        })
    }

    pub fn next_holds_live_individual(&self, index: usize) -> bool {
        self.occupant_at(Snapshot::Next, index)
            .is_some_and(Occupant::is_live_individual)
    }

    /// Ids placed in `current`, in scan order
    pub fn current_ids(&self) -> Vec<(usize, OccupantId)> {
        self.current
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|id| (index, id)))
            .collect()
    }

    pub fn view(&self) -> BoardView<'_> {
        BoardView { board: self }
    }
}

/// What the renderer needs to know about one occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub x: usize,
    pub y: usize,
    pub color: Color,
    /// None for food
    pub species: Option<Species>,
    /// Fighting strategy color, if the occupant carries one
    pub accent: Option<Color>,
    pub alive: bool,
}

/// Read-only view of `current`
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
}

impl<'a> BoardView<'a> {
    pub fn dimensions(&self) -> (usize, usize) {
        self.board.dimensions()
    }

    pub fn get(&self, index: usize) -> Option<CellView> {
        let occupant = self.board.occupant_at(Snapshot::Current, index)?;
        let (x, y) = occupant.coords();
        let individual = occupant.as_individual();
        Some(CellView {
            index,
            x,
            y,
            color: occupant.color(),
            species: occupant.species(),
            accent: individual.and_then(|ind| ind.strategy.as_ref().map(|s| s.color())),
            alive: individual.map_or(false, |ind| ind.is_alive()),
        })
    }

    /// Occupied cells in index order
    pub fn cells(&self) -> impl Iterator<Item = CellView> + 'a {
        let view = *self;
        (0..self.board.len()).filter_map(move |index| view.get(index))
    }

    pub fn food_count(&self) -> usize {
        self.board
            .current
            .par_iter()
            .filter(|slot| slot.is_some_and(|id| self.board.occupants[id].is_food()))
            .count()
    }

    pub fn individual_count(&self) -> usize {
        self.board
            .current
            .par_iter()
            .filter(|slot| slot.is_some_and(|id| !self.board.occupants[id].is_food()))
            .count()
    }

    /// Color per cell, black where empty; handy for pixel-buffer renderers
    pub fn color_buffer(&self) -> Vec<Color> {
        (0..self.board.len())
            .map(|index| {
                self.board
                    .occupant_at(Snapshot::Current, index)
                    .map_or(Color::BLACK, Occupant::color)
            })
            .collect()
    }
}
