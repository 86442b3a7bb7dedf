//! Piece catalog - the seven tetromino shape matrices
//!
//! Each shape is a square matrix (4x4 for I, 3x3 for the rest) whose nonzero
//! cells carry the piece-type id. The templates here are immutable; the
//! active piece works on a copy, and rotation produces a new matrix value
//! rather than mutating in place.

use anyhow::{bail, Result};

use crate::types::{Cell, PieceKind};

/// Backing storage is always 4x4; only the upper-left `size x size` square is
/// meaningful. Keeping the array fixed makes `Shape` a cheap `Copy` value.
const MAX_SIZE: usize = 4;

/// A square shape matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SIZE]; MAX_SIZE],
}

impl Shape {
    /// Matrix side length (3 or 4).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Cell value at local (x, y). Out-of-matrix coordinates read as empty.
    pub fn get(&self, x: u8, y: u8) -> Cell {
        if x < self.size && y < self.size {
            self.cells[y as usize][x as usize]
        } else {
            0
        }
    }

    /// 90-degree clockwise rotation: transpose, then reverse each row.
    ///
    /// Returns a new matrix; the receiver is untouched, so a failed rotation
    /// attempt can simply keep the old value.
    pub fn rotated_cw(&self) -> Shape {
        let n = self.size as usize;
        let mut out = Shape {
            size: self.size,
            cells: [[0; MAX_SIZE]; MAX_SIZE],
        };
        for y in 0..n {
            for x in 0..n {
                out.cells[y][x] = self.cells[n - 1 - x][y];
            }
        }
        out
    }

    /// Exact inverse of [`Shape::rotated_cw`]: reverse each row, then
    /// transpose.
    pub fn rotated_ccw(&self) -> Shape {
        let n = self.size as usize;
        let mut out = Shape {
            size: self.size,
            cells: [[0; MAX_SIZE]; MAX_SIZE],
        };
        for y in 0..n {
            for x in 0..n {
                out.cells[y][x] = self.cells[x][n - 1 - y];
            }
        }
        out
    }

    /// Iterate over the occupied cells as (x, y, id) triples.
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u8, Cell)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let v = self.get(x, y);
                (v != 0).then_some((x, y, v))
            })
        })
    }
}

impl PieceKind {
    /// The spawn-orientation template for this kind.
    pub fn shape(self) -> Shape {
        match self {
            PieceKind::I => I_SHAPE,
            PieceKind::J => J_SHAPE,
            PieceKind::L => L_SHAPE,
            PieceKind::O => O_SHAPE,
            PieceKind::S => S_SHAPE,
            PieceKind::T => T_SHAPE,
            PieceKind::Z => Z_SHAPE,
        }
    }
}

const I_SHAPE: Shape = Shape {
    size: 4,
    cells: [
        [0, 0, 0, 0],
        [1, 1, 1, 1],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const J_SHAPE: Shape = Shape {
    size: 3,
    cells: [
        [2, 0, 0, 0],
        [2, 2, 2, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const L_SHAPE: Shape = Shape {
    size: 3,
    cells: [
        [0, 0, 3, 0],
        [3, 3, 3, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const O_SHAPE: Shape = Shape {
    size: 3,
    cells: [
        [0, 4, 4, 0],
        [0, 4, 4, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const S_SHAPE: Shape = Shape {
    size: 3,
    cells: [
        [0, 5, 5, 0],
        [5, 5, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const T_SHAPE: Shape = Shape {
    size: 3,
    cells: [
        [0, 6, 0, 0],
        [6, 6, 6, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const Z_SHAPE: Shape = Shape {
    size: 3,
    cells: [
        [7, 7, 0, 0],
        [0, 7, 7, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

/// Validate every catalog entry once at startup.
///
/// A template must contain exactly four occupied cells, all carrying the
/// single id belonging to its kind. A mismatch is a programmer error, so the
/// binary refuses to start rather than limping along.
pub fn validate_catalog() -> Result<()> {
    for kind in PieceKind::ALL {
        let shape = kind.shape();
        let mut count = 0usize;
        for (_, _, id) in shape.occupied() {
            if id != kind.id() {
                bail!(
                    "catalog entry {} holds id {} (expected {})",
                    kind.as_str(),
                    id,
                    kind.id()
                );
            }
            count += 1;
        }
        if count != 4 {
            bail!(
                "catalog entry {} has {} occupied cells (expected 4)",
                kind.as_str(),
                count
            );
        }
        if shape.size() != 3 && shape.size() != 4 {
            bail!(
                "catalog entry {} has unsupported matrix size {}",
                kind.as_str(),
                shape.size()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_valid() {
        validate_catalog().unwrap();
    }

    #[test]
    fn test_i_is_4x4_others_3x3() {
        assert_eq!(PieceKind::I.shape().size(), 4);
        for kind in PieceKind::ALL.iter().filter(|k| **k != PieceKind::I) {
            assert_eq!(kind.shape().size(), 3, "{}", kind.as_str());
        }
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let original = kind.shape();
            let rotated = original
                .rotated_cw()
                .rotated_cw()
                .rotated_cw()
                .rotated_cw();
            assert_eq!(rotated, original, "{}", kind.as_str());
        }
    }

    #[test]
    fn test_ccw_inverts_cw() {
        for kind in PieceKind::ALL {
            let original = kind.shape();
            assert_eq!(original.rotated_cw().rotated_ccw(), original);
            assert_eq!(original.rotated_ccw().rotated_cw(), original);
        }
    }

    #[test]
    fn test_t_rotation_matrix() {
        // T clockwise once: middle column full, stem pointing right.
        let t = PieceKind::T.shape().rotated_cw();
        assert_eq!(t.get(1, 0), 6);
        assert_eq!(t.get(1, 1), 6);
        assert_eq!(t.get(1, 2), 6);
        assert_eq!(t.get(2, 1), 6);
        assert_eq!(t.get(0, 1), 0);
    }

    #[test]
    fn test_occupied_yields_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().occupied().count(), 4);
        }
    }

    #[test]
    fn test_get_outside_matrix_is_empty() {
        let t = PieceKind::T.shape();
        assert_eq!(t.get(3, 0), 0);
        assert_eq!(t.get(0, 3), 0);
    }
}
