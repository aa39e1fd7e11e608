use std::collections::VecDeque;
use std::fmt;

use log::info;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::error::ConfigError;

/// Grid cell as `(row, col)`
pub type CellPos = (usize, usize);

/// Carving jumps two cells so a wall always remains between passages
const STEPS: [(isize, isize); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];
const NEIGHBOURS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A rectangular maze of walls and passages with an outer wall border.
///
/// Dimensions are always odd; passages sit on odd rows and columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    walls: Vec<bool>,
    start: CellPos,
    goal: CellPos,
}

impl Maze {
    /// Generate a maze, seeded for reproducibility when `seed` is given.
    pub fn with_seed(rows: usize, cols: usize, seed: Option<u64>) -> Result<Self, ConfigError> {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let maze = Self::generate(rows, cols, &mut rng)?;
        info!("generated {}x{} maze with seed {}", maze.rows, maze.cols, seed);
        Ok(maze)
    }

    /// Recursive-backtracker generation from the top-left passage cell to the
    /// bottom-right one. Even sizes shrink by one.
    pub fn generate<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self, ConfigError> {
        if rows < 5 || cols < 5 {
            return Err(ConfigError::InvalidMaze { rows, cols });
        }
        let rows = if rows % 2 == 0 { rows - 1 } else { rows };
        let cols = if cols % 2 == 0 { cols - 1 } else { cols };

        let mut maze = Self {
            rows,
            cols,
            walls: vec![true; rows * cols],
            start: (1, 1),
            goal: (rows - 2, cols - 2),
        };

        let start = maze.start;
        maze.set_wall(start, false);
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let candidates: Vec<CellPos> = STEPS
                .iter()
                .filter_map(|&step| maze.offset(current, step))
                .filter(|&cell| maze.is_wall(cell))
                .collect();

            if candidates.is_empty() {
                stack.pop();
                continue;
            }

            let next = candidates[rng.random_range(0..candidates.len())];
            let between = ((current.0 + next.0) / 2, (current.1 + next.1) / 2);
            maze.set_wall(between, false);
            maze.set_wall(next, false);
            stack.push(next);
        }

        // The goal is an odd cell and therefore already carved, but keep it
        // open and reachable regardless.
        let goal = maze.goal;
        maze.set_wall(goal, false);
        if maze.open_neighbours(goal).next().is_none() && goal.1 + 1 < cols {
            maze.set_wall((goal.0, goal.1 + 1), false);
        }

        Ok(maze)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> CellPos {
        self.start
    }

    pub fn goal(&self) -> CellPos {
        self.goal
    }

    /// Cells outside the grid count as walls
    pub fn is_wall(&self, (row, col): CellPos) -> bool {
        if row >= self.rows || col >= self.cols {
            return true;
        }
        self.walls[row * self.cols + col]
    }

    /// Every wall cell in row-major order
    pub fn wall_cells(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.cols).map(move |col| (row, col)))
            .filter(move |&cell| self.is_wall(cell))
    }

    /// Shortest passage path from start to goal, both ends included
    pub fn solve(&self) -> Option<Vec<CellPos>> {
        let mut previous: Vec<Option<CellPos>> = vec![None; self.rows * self.cols];
        let mut visited = vec![false; self.rows * self.cols];
        let mut queue = VecDeque::from([self.start]);
        visited[self.index(self.start)] = true;

        while let Some(cell) = queue.pop_front() {
            if cell == self.goal {
                let mut path = vec![cell];
                let mut cursor = cell;
                while let Some(prev) = previous[self.index(cursor)] {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Some(path);
            }
            for next in self.open_neighbours(cell) {
                let index = self.index(next);
                if !visited[index] {
                    visited[index] = true;
                    previous[index] = Some(cell);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn index(&self, (row, col): CellPos) -> usize {
        row * self.cols + col
    }

    fn set_wall(&mut self, cell: CellPos, wall: bool) {
        let index = self.index(cell);
        self.walls[index] = wall;
    }

    fn offset(&self, (row, col): CellPos, (dr, dc): (isize, isize)) -> Option<CellPos> {
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    fn open_neighbours(&self, cell: CellPos) -> impl Iterator<Item = CellPos> + '_ {
        NEIGHBOURS
            .iter()
            .filter_map(move |&step| self.offset(cell, step))
            .filter(move |&next| !self.is_wall(next))
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let glyph = if (row, col) == self.start {
                    'S'
                } else if (row, col) == self.goal {
                    'G'
                } else if self.is_wall((row, col)) {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_sizes_become_odd() {
        let maze = Maze::with_seed(16, 10, Some(1)).unwrap();
        assert_eq!((maze.rows(), maze.cols()), (15, 9));
        assert_eq!(maze.goal(), (13, 7));
    }

    #[test]
    fn test_border_is_solid() {
        let maze = Maze::with_seed(15, 15, Some(7)).unwrap();
        for i in 0..15 {
            assert!(maze.is_wall((0, i)) && maze.is_wall((14, i)));
            assert!(maze.is_wall((i, 0)) && maze.is_wall((i, 14)));
        }
    }

    #[test]
    fn test_every_odd_cell_is_carved() {
        let maze = Maze::with_seed(11, 13, Some(3)).unwrap();
        for row in (1..11).step_by(2) {
            for col in (1..13).step_by(2) {
                assert!(!maze.is_wall((row, col)), "({row}, {col})");
            }
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Maze::with_seed(21, 21, Some(42)).unwrap();
        let b = Maze::with_seed(21, 21, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_solution_is_connected_walk() {
        let maze = Maze::with_seed(15, 15, Some(9)).unwrap();
        let path = maze.solve().unwrap();
        assert_eq!(path.first(), Some(&maze.start()));
        assert_eq!(path.last(), Some(&maze.goal()));
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!(a.0.abs_diff(b.0) + a.1.abs_diff(b.1), 1);
            assert!(!maze.is_wall(b));
        }
    }

    #[test]
    fn test_too_small_rejected() {
        assert_eq!(
            Maze::with_seed(3, 9, Some(0)).unwrap_err(),
            ConfigError::InvalidMaze { rows: 3, cols: 9 }
        );
    }

    #[test]
    fn test_display_marks_endpoints() {
        let maze = Maze::with_seed(5, 5, Some(0)).unwrap();
        let text = maze.to_string();
        assert_eq!(text.lines().count(), 5);
        assert_eq!(text.lines().nth(1).and_then(|l| l.chars().nth(1)), Some('S'));
        assert_eq!(text.lines().nth(3).and_then(|l| l.chars().nth(3)), Some('G'));
    }
}
