use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::moves::Moves;
use crate::solution_formatter::SolutionFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// Decoded form of a level: walls, targets, boxes and the worker.
///
/// Treated as immutable once parsed - moves produce new values.
#[derive(Clone, PartialEq, Eq)]
pub struct Warehouse {
    pub(crate) grid: Vec2d<MapCell>,
    pub(crate) targets: Vec<Pos>,
    pub(crate) boxes: Vec<Pos>,
    pub(crate) worker: Pos,
}

impl Warehouse {
    pub(crate) fn new(grid: Vec2d<MapCell>, targets: Vec<Pos>, boxes: Vec<Pos>, worker: Pos) -> Self {
        Warehouse {
            grid,
            targets,
            boxes,
            worker,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn worker(&self) -> Pos {
        self.worker
    }

    /// In the order they appear in the level, not sorted.
    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn targets(&self) -> &[Pos] {
        &self.targets
    }

    pub fn walls(&self) -> Vec<Pos> {
        self.grid
            .positions()
            .filter(|&pos| self.grid[pos] == MapCell::Wall)
            .collect()
    }

    /// Anything outside the grid counts as a wall.
    pub fn is_wall(&self, pos: Pos) -> bool {
        is_wall(&self.grid, pos)
    }

    pub fn is_target(&self, pos: Pos) -> bool {
        self.grid.get(pos) == Some(&MapCell::Target)
    }

    pub fn is_solved(&self) -> bool {
        self.state().boxes == sorted(&self.targets)
    }

    pub fn state(&self) -> State {
        State::new(self.worker, self.boxes.clone())
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.grid, Some(self.worker), &self.boxes)
    }

    /// Only walls and targets.
    pub fn layout(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.grid, None, &[])
    }

    pub fn xsb_solution<'a>(&'a self, moves: &'a Moves, include_steps: bool) -> SolutionFormatter<'a> {
        SolutionFormatter::new(self, moves, include_steps)
    }
}

pub(crate) fn is_wall(grid: &Vec2d<MapCell>, pos: Pos) -> bool {
    grid.get(pos).map_or(true, |&cell| cell == MapCell::Wall)
}

pub(crate) fn sorted(positions: &[Pos]) -> Vec<Pos> {
    let mut ret = positions.to_vec();
    ret.sort();
    ret
}

impl Display for Warehouse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Warehouse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
