use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Contents, MapCell, Pos};
use crate::vec2d::Vec2d;

pub struct MapFormatter<'a> {
    grid: &'a Vec2d<MapCell>,
    worker: Option<Pos>,
    boxes: &'a [Pos],
}

impl<'a> MapFormatter<'a> {
    pub(crate) fn new(grid: &'a Vec2d<MapCell>, worker: Option<Pos>, boxes: &'a [Pos]) -> Self {
        Self {
            grid,
            worker,
            boxes,
        }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut state_grid: Vec2d<Contents> = self.grid.scratchpad();
        for &b in self.boxes {
            if self.grid.contains(b) {
                state_grid[b] = Contents::Box;
            }
        }
        if let Some(worker) = self.worker {
            if self.grid.contains(worker) {
                state_grid[worker] = Contents::Worker;
            }
        }

        for r in 0..self.grid.rows() as i32 {
            // don't print trailing empty cells to match the input level strings
            let mut row_len = 0;
            for c in 0..self.grid.cols() as i32 {
                let pos = Pos::new(r, c);
                if self.grid[pos] != MapCell::Empty || state_grid[pos] != Contents::Empty {
                    row_len = c + 1;
                }
            }

            for c in 0..row_len {
                let pos = Pos::new(r, c);
                Self::write_cell(self.grid[pos], state_grid[pos], f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell(cell: MapCell, contents: Contents, f: &mut Formatter<'_>) -> fmt::Result {
        match (cell, contents) {
            (MapCell::Empty, Contents::Empty) => write!(f, " "),
            (MapCell::Empty, Contents::Box) => write!(f, "$"),
            (MapCell::Empty, Contents::Worker) => write!(f, "@"),
            (MapCell::Wall, Contents::Empty) => write!(f, "#"),
            (MapCell::Wall, _) => unreachable!("Wall with non-empty contents"),
            (MapCell::Target, Contents::Empty) => write!(f, "."),
            (MapCell::Target, Contents::Box) => write!(f, "*"),
            (MapCell::Target, Contents::Worker) => write!(f, "!"),
        }
    }
}

impl<'a> Display for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for MapFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
