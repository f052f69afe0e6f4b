use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid cell {symbol:?} at row {row}, column {col}")]
    InvalidCell { symbol: char, row: usize, col: usize },
    #[error("row {row} has width {found}, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid has no start marker 'S'")]
    MissingStart,
    #[error("second start marker at row {row}, column {col}")]
    DuplicateStart { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Splitter,
}

/// A beam grid. Beams travel downward and fork at splitters into the two diagonal cells below.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
    start: Option<(usize, usize)>,
}

impl Grid {
    pub fn parse(input: &str) -> Result<Self, GridError> {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;
        let mut start = None;

        for (row, line) in input.trim_end().lines().enumerate() {
            let line = line.as_bytes();
            if row == 0 {
                width = line.len();
            } else if line.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: line.len(),
                });
            }

            if let Some(col) = memchr::memchr(b'S', line) {
                if start.is_some() {
                    return Err(GridError::DuplicateStart { row, col });
                }
                if let Some(second) = memchr::memchr(b'S', &line[col + 1..]) {
                    return Err(GridError::DuplicateStart {
                        row,
                        col: col + 1 + second,
                    });
                }
                start = Some((row, col));
            }

            for (col, &b) in line.iter().enumerate() {
                cells.push(match b {
                    b'.' | b'|' | b'S' => Cell::Empty,
                    b'^' => Cell::Splitter,
                    _ => {
                        return Err(GridError::InvalidCell {
                            symbol: b as char,
                            row,
                            col,
                        })
                    }
                });
            }
            height += 1;
        }

        if height > 0 && start.is_none() {
            return Err(GridError::MissingStart);
        }

        Ok(Self {
            cells,
            width,
            height,
            start,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Option<(usize, usize)> {
        self.start
    }

    /// `None` for anything outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Number of splitters hit by the beam entering at the start marker.
    ///
    /// Merging beams share the cells below the merge point, so every cell is walked at most once.
    pub fn count_splits(&self) -> u64 {
        let Some(start) = self.start else {
            return 0;
        };

        let mut visited = FxHashSet::default();
        let mut stack = vec![start];
        let mut splits = 0;

        while let Some((row, col)) = stack.pop() {
            let Some(cell) = self.get(row, col) else {
                continue;
            };
            if !visited.insert((row, col)) {
                continue;
            }
            match cell {
                Cell::Splitter => {
                    splits += 1;
                    stack.push((row + 1, col + 1));
                    if col > 0 {
                        stack.push((row + 1, col - 1));
                    }
                }
                Cell::Empty => stack.push((row + 1, col)),
            }
        }
        splits
    }

    /// Number of distinct routes a single particle can take from the start marker off the grid.
    pub fn count_paths(&self) -> u64 {
        match self.start {
            Some((row, col)) => PathCounter::new(self).count_from(row, col),
            None => 0,
        }
    }
}

/// Memoized path counter. Results only depend on the cell, since the grid never changes.
pub struct PathCounter<'g> {
    grid: &'g Grid,
    memo: FxHashMap<(usize, usize), u64>,
}

impl<'g> PathCounter<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        Self {
            grid,
            memo: FxHashMap::default(),
        }
    }

    pub fn count_from(&mut self, row: usize, col: usize) -> u64 {
        let Some(cell) = self.grid.get(row, col) else {
            return 1;
        };
        if let Some(&count) = self.memo.get(&(row, col)) {
            return count;
        }

        let count = match cell {
            Cell::Splitter => {
                let right = self.count_from(row + 1, col + 1);
                // Leaving past the left edge is a finished path as well.
                let left = if col > 0 {
                    self.count_from(row + 1, col - 1)
                } else {
                    1
                };
                right + left
            }
            Cell::Empty => self.count_from(row + 1, col),
        };
        self.memo.insert((row, col), count);
        count
    }

    pub fn cached(&self) -> usize {
        self.memo.len()
    }

    pub fn clear_memo(&mut self) {
        self.memo.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        .......S.......
        ...............
        .......^.......
        ...............
        ......^.^......
        ...............
        .....^.^.^.....
        ...............
        ....^.^...^....
        ...............
        ...^.^...^.^...
        ...............
        ..^...^.....^..
        ...............
        .^.^.^.^.^...^.
        ...............
    "};

    #[test]
    fn single_splitter() -> Result<(), GridError> {
        let grid = Grid::parse("S\n^\n.\n")?;
        assert_eq!(grid.count_splits(), 1);
        assert_eq!(grid.count_paths(), 2);

        let grid = Grid::parse(".S.\n.^.\n...\n")?;
        assert_eq!(grid.count_splits(), 1);
        assert_eq!(grid.count_paths(), 2);
        Ok(())
    }

    #[test]
    fn example() -> Result<(), GridError> {
        let grid = Grid::parse(EXAMPLE)?;
        assert_eq!(grid.start(), Some((0, 7)));
        assert_eq!((grid.width(), grid.height()), (15, 16));
        assert_eq!(grid.count_splits(), 21);
        assert_eq!(grid.count_paths(), 40);
        Ok(())
    }

    #[test]
    fn no_splitters() -> Result<(), GridError> {
        let grid = Grid::parse("..S\n...\n|||\n")?;
        assert_eq!(grid.count_splits(), 0);
        assert_eq!(grid.count_paths(), 1);
        Ok(())
    }

    #[test]
    fn adjacent_splitters_terminate() -> Result<(), GridError> {
        let grid = Grid::parse("..S..\n..^^.\n.....\n")?;
        assert_eq!(grid.count_splits(), 1);
        assert_eq!(grid.count_paths(), 2);
        Ok(())
    }

    #[test]
    fn memo_is_transparent() -> Result<(), GridError> {
        let grid = Grid::parse(EXAMPLE)?;
        let mut counter = PathCounter::new(&grid);
        let first = counter.count_from(0, 7);
        assert!(counter.cached() > 0);
        assert_eq!(counter.count_from(0, 7), first);
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                let warm = counter.count_from(row, col);
                counter.clear_memo();
                assert_eq!(counter.count_from(row, col), warm);
            }
        }
        Ok(())
    }

    #[test]
    fn empty_grid() -> Result<(), GridError> {
        let grid = Grid::parse("")?;
        assert_eq!(grid.start(), None);
        assert_eq!(grid.count_splits(), 0);
        assert_eq!(grid.count_paths(), 0);
        Ok(())
    }

    #[test]
    fn malformed() {
        assert_eq!(
            Grid::parse("...\n.^.\n").unwrap_err(),
            GridError::MissingStart
        );
        assert_eq!(
            Grid::parse(".S.\n..\n").unwrap_err(),
            GridError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            }
        );
        assert_eq!(
            Grid::parse("S.S\n...\n").unwrap_err(),
            GridError::DuplicateStart { row: 0, col: 2 }
        );
        assert_eq!(
            Grid::parse(".S.\n.#.\n").unwrap_err(),
            GridError::InvalidCell {
                symbol: '#',
                row: 1,
                col: 1
            }
        );
    }
}
