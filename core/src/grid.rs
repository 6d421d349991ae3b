use ndarray::Array2;

use crate::*;

/// Board position as `(row, col)`, zero-indexed from the top-left corner.
pub type Pos = (usize, usize);

/// Builds a `rows` x `cols` grid with every cell set to `value`.
pub fn init_board<T: Clone>(rows: usize, cols: usize, value: T) -> Result<Array2<T>> {
    if rows == 0 || cols == 0 {
        return Err(GameError::InvalidDimension);
    }
    Ok(Array2::from_elem((rows, cols), value))
}

pub trait NeighborIterExt {
    fn contains_pos(&self, pos: Pos) -> bool;
    fn iter_neighbors(&self, pos: Pos) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn contains_pos(&self, pos: Pos) -> bool {
        let (rows, cols) = self.dim();
        pos.0 < rows && pos.1 < cols
    }

    fn iter_neighbors(&self, pos: Pos) -> NeighborIter {
        NeighborIter::new(pos, self.dim())
    }
}

pub trait GridQueryExt<T> {
    /// Number of cells in the whole grid equal to `value`.
    fn count_total(&self, value: T) -> usize;
    /// Number of neighbors of `pos` equal to `value`.
    fn count_neighbors(&self, pos: Pos, value: T) -> usize;
}

impl<T: Copy + PartialEq> GridQueryExt<T> for Array2<T> {
    fn count_total(&self, value: T) -> usize {
        self.iter().filter(|&&cell| cell == value).count()
    }

    fn count_neighbors(&self, pos: Pos, value: T) -> usize {
        self.iter_neighbors(pos)
            .filter(|&npos| self[npos] == value)
            .count()
    }
}

// Row-major: row deltas outermost so neighbors come back in reading order.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains in bounds.
fn apply_delta(pos: Pos, delta: (isize, isize), bounds: Pos) -> Option<Pos> {
    let (row, col) = pos;
    let (drow, dcol) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(drow)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(dcol)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Debug)]
pub struct NeighborIter {
    center: Pos,
    bounds: Pos,
    index: u8,
}

impl NeighborIter {
    fn new(center: Pos, bounds: Pos) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn neighbors_of(board: &Array2<u8>, pos: Pos) -> Vec<Pos> {
        board.iter_neighbors(pos).collect()
    }

    #[test]
    fn init_board_fills_every_cell() {
        let board = init_board(2, 3, 7u8).unwrap();

        assert_eq!(board.dim(), (2, 3));
        assert!(board.iter().all(|&cell| cell == 7));
    }

    #[test]
    fn init_board_rejects_zero_dimensions() {
        assert_eq!(
            init_board(0, 3, 0u8).unwrap_err(),
            GameError::InvalidDimension
        );
        assert_eq!(
            init_board(3, 0, 0u8).unwrap_err(),
            GameError::InvalidDimension
        );
    }

    #[test]
    fn contains_pos_checks_both_axes() {
        let board = init_board(4, 4, 0u8).unwrap();

        assert!(board.contains_pos((3, 3)));
        assert!(!board.contains_pos((4, 3)));
        assert!(!board.contains_pos((3, 4)));
    }

    #[test]
    fn interior_neighbors_come_back_in_reading_order() {
        let board = init_board(4, 4, 0u8).unwrap();

        assert_eq!(
            neighbors_of(&board, (2, 2)),
            vec![
                (1, 1),
                (1, 2),
                (1, 3),
                (2, 1),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3)
            ]
        );
    }

    #[test]
    fn border_neighbors_skip_out_of_bounds_positions() {
        let board = init_board(4, 4, 0u8).unwrap();

        assert_eq!(
            neighbors_of(&board, (3, 1)),
            vec![(2, 0), (2, 1), (2, 2), (3, 0), (3, 2)]
        );
        assert_eq!(neighbors_of(&board, (0, 0)), vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn neighbor_counts_depend_on_position() {
        let board = init_board(3, 3, 0u8).unwrap();

        assert_eq!(neighbors_of(&board, (1, 1)).len(), 8);
        assert_eq!(neighbors_of(&board, (0, 1)).len(), 5);
        assert_eq!(neighbors_of(&board, (2, 2)).len(), 3);
    }

    #[test]
    fn count_total_scans_the_whole_grid() {
        let board = arr2(&[[5, 5, 5], [2, 2, 2], [6, 6, 7]]);

        assert_eq!(board.count_total(2), 3);
        assert_eq!(board.count_total(5), 3);
        assert_eq!(board.count_total(9), 0);
    }

    #[test]
    fn count_neighbors_agrees_with_enumeration() {
        let board = arr2(&[[4, 5, 4, 5], [2, 3, 4, 5], [6, 7, 6, 7], [8, 8, 2, 2]]);

        assert_eq!(board.count_neighbors((2, 1), 8), 2);

        for row in 0..4 {
            for col in 0..4 {
                for value in [2, 4, 8] {
                    let by_enumeration = board
                        .iter_neighbors((row, col))
                        .filter(|&pos| board[pos] == value)
                        .count();
                    assert_eq!(board.count_neighbors((row, col), value), by_enumeration);
                }
            }
        }
    }
}
