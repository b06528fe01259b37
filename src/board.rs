use serde::Serialize;

/// Authoritative data for one position. Only `mine` is written, once, while the board is seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CellRecord {
    pub x: usize,
    pub y: usize,
    pub mine: bool,
}

/// The mine matrix, indexed `[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    rows: Vec<Vec<CellRecord>>,
}

impl Board {
    /// Allocates a `height × width` board with every record mine-free.
    pub fn new(width: usize, height: usize) -> Self {
        let rows = (0..height)
            .map(|y| (0..width).map(|x| CellRecord { x, y, mine: false }).collect())
            .collect();
        Self { width, height, rows }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn total_cells(&self) -> usize { self.width * self.height }

    pub fn get(&self, x: usize, y: usize) -> Option<&CellRecord> {
        self.rows.get(y).and_then(|row| row.get(x))
    }

    pub fn is_mine(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(|record| record.mine)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellRecord]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn records(&self) -> impl Iterator<Item = &CellRecord> {
        self.rows.iter().flatten()
    }

    pub fn mine_count(&self) -> usize {
        self.records().filter(|record| record.mine).count()
    }

    /// Marks `(x, y)` as a mine. Returns false if it already was one or is out of bounds.
    pub(crate) fn plant(&mut self, x: usize, y: usize) -> bool {
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(record) if !record.mine => {
                record.mine = true;
                true
            }
            _ => false,
        }
    }

    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        neighbors(self.width, self.height, x, y)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn neighbors(w: usize, h: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    DISPLACEMENTS.iter().filter_map(move |&(dx, dy)| {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < w && ny < h).then_some((nx, ny))
    })
}
