/// Row or column index into the board grid
pub type Idx = u8;

/// Count of cells or mines, wide enough for a full board
pub type Total = u16;

/// Board position as `(row, col)`
pub type Pos = (Idx, Idx);

pub trait GridIndex {
    type Output;
    fn nd(self) -> Self::Output;
}

impl GridIndex for Pos {
    type Output = [usize; 2];

    fn nd(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(rows: Idx, cols: Idx) -> Total {
    let rows = rows as Total;
    let cols = cols as Total;
    rows.saturating_mul(cols)
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Iterates the in-bounds 8-neighborhood of `pos`, clipped at the grid
/// edges. Both adjacency counting and reveal propagation go through this,
/// so their clipping can never disagree.
pub fn neighbors((row, col): Pos, (rows, cols): Pos) -> impl Iterator<Item = Pos> {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let r = i16::from(row) + i16::from(dr);
        let c = i16::from(col) + i16::from(dc);
        if (0..i16::from(rows)).contains(&r) && (0..i16::from(cols)).contains(&c) {
            Some((r as Idx, c as Idx))
        } else {
            None
        }
    })
}
