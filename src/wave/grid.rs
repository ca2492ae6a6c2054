//! The alien formation: a fixed rows × columns grid with tombstoned cells.

use rand::Rng;
use tracing::debug;

use super::draw::{Drawable, Surface};
use super::models::{Alien, Bolt, Heading};

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Alive(Alien),
    Empty,
}

impl Cell {
    pub fn alien(&self) -> Option<&Alien> {
        match self {
            Cell::Alive(alien) => Some(alien),
            Cell::Empty => None,
        }
    }
}

/// Row 0 is the top row. Cells are stored row-major and the dimensions are
/// fixed at construction; only cell contents change.
#[derive(Clone, Debug)]
pub struct AlienGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl AlienGrid {
    /// A full formation in its starting position.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_fn(rows, cols, |row, col| Cell::Alive(Alien::for_cell(row, col)))
    }

    pub fn from_fn(rows: usize, cols: usize, mut cell: impl FnMut(usize, usize) -> Cell) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(cell(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].alien()
    }

    /// Live aliens in row-major order.
    pub fn aliens(&self) -> impl Iterator<Item = &Alien> {
        self.cells.iter().filter_map(Cell::alien)
    }

    fn aliens_mut(&mut self) -> impl Iterator<Item = &mut Alien> {
        self.cells.iter_mut().filter_map(|cell| match cell {
            Cell::Alive(alien) => Some(alien),
            Cell::Empty => None,
        })
    }

    pub fn alive_count(&self) -> usize {
        self.aliens().count()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens().next().is_none()
    }

    /// True when any live alien's lower edge is at or below `line`.
    pub fn breaches(&self, line: f64) -> bool {
        self.aliens().any(|alien| alien.bounds().bottom() <= line)
    }

    fn column_is_empty(&self, col: usize) -> bool {
        (0..self.rows).all(|row| self.get(row, col).is_none())
    }

    /// Tombstones the first live alien, top row downward, that `bolt` hits.
    pub(crate) fn strike(&mut self, bolt: &Bolt) -> Option<(usize, usize)> {
        let idx = self
            .cells
            .iter()
            .position(|cell| matches!(cell, Cell::Alive(alien) if alien.collides_with(bolt)))?;
        self.cells[idx] = Cell::Empty;
        Some((idx / self.cols, idx % self.cols))
    }

    /// Aliens of the outermost live columns, each the topmost live cell of
    /// its column. Every alien in a column shares the same x, so these are
    /// the true horizontal extremes.
    fn edge_aliens(&self) -> Option<(&Alien, &Alien)> {
        let left = (0..self.cols).find_map(|col| self.topmost_in(col))?;
        let right = (0..self.cols).rev().find_map(|col| self.topmost_in(col))?;
        Some((left, right))
    }

    fn topmost_in(&self, col: usize) -> Option<&Alien> {
        (0..self.rows).find_map(|row| self.get(row, col))
    }

    /// One march step: shift sideways, then drop a row and reverse if an
    /// outermost alien is near the edge it is heading for. Returns the
    /// heading for the next step.
    pub(crate) fn march(&mut self, heading: Heading) -> Heading {
        for alien in self.aliens_mut() {
            alien.walk(heading);
        }
        let at_edge = self
            .edge_aliens()
            .map(|(left, right)| left.approaching_edge(heading) || right.approaching_edge(heading))
            .unwrap_or(false);
        if !at_edge {
            return heading;
        }
        for alien in self.aliens_mut() {
            alien.descend();
        }
        debug!(?heading, "grid reached edge, reversing");
        heading.reversed()
    }

    /// Picks the alien that fires next: a uniformly random non-empty column,
    /// then the lowest live alien in it. `None` only for an empty grid.
    pub fn pick_shooter<R: Rng>(&self, rng: &mut R) -> Option<&Alien> {
        if self.cols == 0 {
            return None;
        }
        let max_draws = self.cols * 4;
        let mut col = None;
        for _ in 0..max_draws {
            let candidate = rng.gen_range(0..self.cols);
            if !self.column_is_empty(candidate) {
                col = Some(candidate);
                break;
            }
        }
        // Out of draws: choose among the occupied columns directly, which
        // has the same distribution as continuing to sample.
        let col = match col {
            Some(col) => col,
            None => {
                let occupied: Vec<usize> =
                    (0..self.cols).filter(|&c| !self.column_is_empty(c)).collect();
                if occupied.is_empty() {
                    return None;
                }
                occupied[rng.gen_range(0..occupied.len())]
            }
        };
        (0..self.rows).rev().find_map(|row| self.get(row, col))
    }
}

impl Drawable for AlienGrid {
    fn draw(&self, surface: &mut dyn Surface) {
        for alien in self.aliens() {
            alien.draw(surface);
        }
    }
}
