//! 2D grid for the world.

use life_core::{Census, Error, Position, Result, Species, MAX_CELLS, NEIGHBOR_OFFSETS};
use rand::Rng;

/// A 2D toroidal grid of species
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Species>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = width as usize * height as usize;
        if size > MAX_CELLS {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![Species::Empty; size],
        })
    }

    /// Create a grid, optionally filling each cell with Normal or Empty at even odds
    pub fn create<R: Rng>(width: i32, height: i32, randomize: bool, rng: &mut R) -> Result<Self> {
        let mut grid = Self::new(width, height)?;

        if randomize {
            for cell in &mut grid.cells {
                *cell = if rng.gen_bool(0.5) {
                    Species::Normal
                } else {
                    Species::Empty
                };
            }
        }

        Ok(grid)
    }

    /// Build a grid from rows of species (row 0 is y = 0)
    pub fn from_rows(rows: Vec<Vec<Species>>) -> Result<Self> {
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |row| row.len()) as i32;
        if let Some(bad) = rows.iter().find(|row| row.len() as i32 != width) {
            return Err(Error::InvalidDimensions {
                width: bad.len() as i32,
                height,
            });
        }

        let mut grid = Self::new(width, height)?;
        grid.cells = rows.into_iter().flatten().collect();
        Ok(grid)
    }

    /// An all-empty grid with the same dimensions
    pub fn empty_like(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            cells: vec![Species::Empty; self.cells.len()],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get species at position (with toroidal wrapping)
    pub fn get(&self, pos: Position) -> Species {
        self.cells[self.pos_to_index(pos)]
    }

    /// Set species at position (with toroidal wrapping)
    pub fn set(&mut self, pos: Position, species: Species) {
        let index = self.pos_to_index(pos);
        self.cells[index] = species;
    }

    /// Place `species`, or clear the cell if it already holds it
    pub fn toggle(&mut self, pos: Position, species: Species) {
        let next = if self.get(pos) == species {
            Species::Empty
        } else {
            species
        };
        self.set(pos, next);
    }

    /// The eight wrapped neighbor positions, always in `NEIGHBOR_OFFSETS` order
    pub fn neighbors(&self, pos: Position) -> [Position; 8] {
        // Wrap before offsetting so coordinates near i32::MIN/MAX cannot overflow
        let origin = pos.wrap(self.width, self.height);
        NEIGHBOR_OFFSETS.map(|(dx, dy)| origin.add(dx, dy).wrap(self.width, self.height))
    }

    /// Count neighbors whose species satisfies `predicate`
    pub fn count_neighbors_matching<F>(&self, pos: Position, predicate: F) -> usize
    where
        F: Fn(Species) -> bool,
    {
        self.neighbors(pos)
            .into_iter()
            .filter(|&neighbor| predicate(self.get(neighbor)))
            .count()
    }

    /// Per-species population of the whole grid
    pub fn census(&self) -> Census {
        self.cells.iter().copied().collect()
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        let wrapped = pos.wrap(self.width, self.height);
        wrapped.y as usize * self.width as usize + wrapped.x as usize
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Iterator over all positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.cells.len()).map(move |i| self.index_to_pos(i))
    }

    /// Iterator over all cells with positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, Species)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &species)| (self.index_to_pos(i), species))
    }
}
