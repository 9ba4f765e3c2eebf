use std::fmt::{self, Debug, Display, Formatter};

use log::debug;

use crate::data::{Dir, MapCell, Pos};
use crate::vec2d::Vec2d;
use crate::warehouse::Warehouse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabooCell {
    /// Not reachable from the inside of the warehouse - never classified.
    Outside,
    Wall,
    Free,
    Taboo,
    Target,
}

impl Display for TabooCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            TabooCell::Wall => write!(f, "#"),
            TabooCell::Taboo => write!(f, "X"),
            TabooCell::Outside | TabooCell::Free | TabooCell::Target => write!(f, " "),
        }
    }
}

/// Result of taboo analysis - which cells a box must never be pushed to.
#[derive(Clone, PartialEq, Eq)]
pub struct TabooMap {
    cells: Vec2d<TabooCell>,
}

impl TabooMap {
    /// Cells outside the grid are walls.
    pub fn get(&self, pos: Pos) -> TabooCell {
        self.cells.get(pos).cloned().unwrap_or(TabooCell::Wall)
    }

    pub fn is_taboo(&self, pos: Pos) -> bool {
        self.get(pos) == TabooCell::Taboo
    }

    pub fn taboo_cells(&self) -> Vec<Pos> {
        self.cells
            .positions()
            .filter(|&pos| self.cells[pos] == TabooCell::Taboo)
            .collect()
    }
}

impl Display for TabooMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..self.cells.rows() as i32 {
            let mut line = String::new();
            for c in 0..self.cells.cols() as i32 {
                line.push_str(&self.cells[Pos::new(r, c)].to_string());
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

impl Debug for TabooMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Static dead cell detection.
///
/// Only looks at walls and targets (plus optional extra walls),
/// never at the boxes themselves.
#[derive(Debug, Clone)]
pub struct TabooAnalyzer {
    grid: Vec2d<MapCell>,
    inside: Vec2d<bool>,
}

impl TabooAnalyzer {
    /// The inside is everything the worker can walk to, ignoring boxes.
    pub fn new(warehouse: &Warehouse) -> Self {
        Self::with_seed(&warehouse.grid, warehouse.worker)
    }

    pub(crate) fn with_seed(grid: &Vec2d<MapCell>, seed: Pos) -> Self {
        let inside = flood_fill(grid, seed);
        Self {
            grid: grid.clone(),
            inside,
        }
    }

    pub fn is_inside(&self, pos: Pos) -> bool {
        self.inside.get(pos).cloned().unwrap_or(false)
    }

    /// Row-major order
    pub fn inside_cells(&self) -> Vec<Pos> {
        self.inside
            .positions()
            .filter(|&pos| self.is_inside(pos))
            .collect()
    }

    pub fn analyze(&self) -> TabooMap {
        let taboo = self.analyze_with_walls(&[]);
        debug!(
            "Taboo analysis: {} inside cells, {} taboo",
            self.inside_cells().len(),
            taboo.taboo_cells().len()
        );
        taboo
    }

    /// Same as `analyze` but pretends every position in `extra_walls` is a wall.
    pub fn analyze_with_walls(&self, extra_walls: &[Pos]) -> TabooMap {
        let mut walls: Vec2d<bool> = self.grid.scratchpad();
        for pos in self.grid.positions() {
            walls[pos] = self.grid[pos] == MapCell::Wall;
        }
        for &pos in extra_walls {
            if walls.contains(pos) {
                walls[pos] = true;
            }
        }

        let mut cells = self.grid.scratchpad_with_default(TabooCell::Outside);
        for pos in self.grid.positions() {
            cells[pos] = if walls[pos] {
                TabooCell::Wall
            } else if !self.is_inside(pos) {
                TabooCell::Outside
            } else if self.grid[pos] == MapCell::Target {
                // a box may always rest on a target
                TabooCell::Target
            } else {
                TabooCell::Free
            };
        }

        for pos in self.grid.positions() {
            if cells[pos] == TabooCell::Free && is_corner(&walls, pos) {
                cells[pos] = TabooCell::Taboo;
            }
        }

        for &(along, side) in &[
            (Dir::Right, Dir::Up),
            (Dir::Right, Dir::Down),
            (Dir::Down, Dir::Left),
            (Dir::Down, Dir::Right),
        ] {
            mark_corridors(&mut cells, &walls, along, side);
        }

        TabooMap { cells }
    }

    /// Would a box at `pos` be taboo if `extra_walls` were walls?
    pub fn is_stuck(&self, pos: Pos, extra_walls: &[Pos]) -> bool {
        self.analyze_with_walls(extra_walls).is_taboo(pos)
    }
}

/// Rendered taboo layout of a warehouse: `#` for walls, `X` for taboo cells.
///
/// Only walls and targets matter, the inside is found by `probe_inside`
/// (falling back to the worker's position).
pub fn taboo_cells(warehouse: &Warehouse) -> String {
    let seed = probe_inside(&warehouse.grid).unwrap_or(warehouse.worker);
    TabooAnalyzer::with_seed(&warehouse.grid, seed)
        .analyze()
        .to_string()
}

/// Walks the main diagonal until it gets past the first wall.
pub(crate) fn probe_inside(grid: &Vec2d<MapCell>) -> Option<Pos> {
    let mut wall_found = false;
    for i in 0..grid.rows().min(grid.cols()) as i32 {
        let pos = Pos::new(i, i);
        let is_wall = grid[pos] == MapCell::Wall;
        if !wall_found {
            wall_found = is_wall;
        } else if !is_wall {
            return Some(pos);
        }
    }
    None
}

fn flood_fill(grid: &Vec2d<MapCell>, seed: Pos) -> Vec2d<bool> {
    let mut visited: Vec2d<bool> = grid.scratchpad();
    let walkable = |pos: Pos| grid.get(pos).map_or(false, |&cell| cell != MapCell::Wall);

    let start = if walkable(seed) {
        Some(seed)
    } else {
        seed.neighbors().iter().cloned().find(|&pos| walkable(pos))
    };

    let mut to_visit: Vec<Pos> = start.into_iter().collect();
    while let Some(cur) = to_visit.pop() {
        if visited[cur] {
            continue;
        }
        visited[cur] = true;
        for &next in &cur.neighbors() {
            if walkable(next) && !visited[next] {
                to_visit.push(next);
            }
        }
    }
    visited
}

fn wall_at(walls: &Vec2d<bool>, pos: Pos) -> bool {
    walls.get(pos).cloned().unwrap_or(true)
}

fn is_corner(walls: &Vec2d<bool>, pos: Pos) -> bool {
    let up = wall_at(walls, pos + Dir::Up);
    let down = wall_at(walls, pos + Dir::Down);
    let left = wall_at(walls, pos + Dir::Left);
    let right = wall_at(walls, pos + Dir::Right);
    (up || down) && (left || right)
}

/// Marks runs of cells between two taboo cells on the same line as taboo
/// if the whole run is backed by a wall on `side` and contains no target.
fn mark_corridors(cells: &mut Vec2d<TabooCell>, walls: &Vec2d<bool>, along: Dir, side: Dir) {
    for start in cells.positions() {
        if cells[start] != TabooCell::Taboo {
            continue;
        }

        let mut run = Vec::new();
        let mut cur = start + along;
        let closed = loop {
            match cells.get(cur) {
                Some(TabooCell::Taboo) => break true,
                Some(TabooCell::Free) | Some(TabooCell::Target) => run.push(cur),
                _ => break false,
            }
            cur = cur + along;
        };
        if !closed || run.is_empty() {
            continue;
        }

        let dead = run
            .iter()
            .all(|&pos| cells[pos] == TabooCell::Free && wall_at(walls, pos + side));
        if dead {
            for pos in run {
                cells[pos] = TabooCell::Taboo;
            }
        }
    }
}
