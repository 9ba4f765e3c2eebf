// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused)]
// Clippy
#![warn(clippy::all)]

pub mod config;
pub mod map_formatter;
pub mod moves;
pub mod parser;
pub mod solution_formatter;
pub mod solver;
pub mod warehouse;

mod data;
mod fs;
mod state;
mod vec2d;

use std::error::Error;

use crate::config::SolverConfig;
use crate::moves::{MacroAction, Moves};
use crate::solver::SolverOk;
use crate::warehouse::Warehouse;

pub use crate::data::{Dir, MapCell, Pos};
pub use crate::solver::replay::check_action_seq;
pub use crate::solver::taboo::taboo_cells;
pub use crate::state::State;

pub trait LoadWarehouse {
    fn load_warehouse(&self) -> Result<Warehouse, Box<dyn Error>>;
}

pub trait Solve {
    /// Every worker move, `Plan::Impossible` if there is no solution.
    fn solve_elem(&self, config: &SolverConfig) -> SolverOk<Moves>;

    /// Only the pushes.
    fn solve_macro(&self, config: &SolverConfig) -> SolverOk<Vec<MacroAction>>;
}
