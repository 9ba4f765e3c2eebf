pub mod deadlock;
pub mod heuristic;
pub mod lookup;
pub mod puzzle;
pub mod replay;
pub mod search;
pub mod taboo;

use std::fmt::{self, Debug, Formatter};

use log::{debug, info};

use crate::config::{Algorithm, SolverConfig};
use crate::data::Dir;
use crate::moves::{MacroAction, Move, Moves, Plan};
use crate::state::State;
use crate::warehouse::Warehouse;
use crate::Solve;

use self::heuristic::SearchContext;
use self::puzzle::Puzzle;
use self::search::{Node, Path, Stats};

pub struct SolverOk<T> {
    pub plan: Plan<T>,
    pub stats: Stats,
    pub context: Option<SearchContext>,
}

impl<T> SolverOk<T> {
    fn new(plan: Plan<T>, stats: Stats, context: Option<SearchContext>) -> Self {
        Self {
            plan,
            stats,
            context,
        }
    }

    fn already_solved(actions: T) -> Self {
        Self::new(Plan::Solved(actions), Stats::default(), None)
    }
}

impl Debug for SolverOk<Moves> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.plan {
            Plan::Impossible => writeln!(f, "No solution")?,
            Plan::Solved(ref moves) => {
                writeln!(f, "Moves: {}", moves.move_cnt())?;
                writeln!(f, "Pushes: {}", moves.push_cnt())?;
            }
        }
        write!(f, "{}", self.stats)
    }
}

impl Debug for SolverOk<Vec<MacroAction>> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.plan {
            Plan::Impossible => writeln!(f, "No solution")?,
            Plan::Solved(ref actions) => writeln!(f, "Pushes: {}", actions.len())?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Warehouse {
    fn solve_elem(&self, config: &SolverConfig) -> SolverOk<Moves> {
        if self.is_solved() {
            return SolverOk::already_solved(Moves::default());
        }
        let (path, stats, context) = run_search(self, config);
        SolverOk::new(path.map(|path| elementary(&path)).into(), stats, Some(context))
    }

    fn solve_macro(&self, config: &SolverConfig) -> SolverOk<Vec<MacroAction>> {
        if self.is_solved() {
            return SolverOk::already_solved(Vec::new());
        }
        let (path, stats, context) = run_search(self, config);
        SolverOk::new(path.map(|path| macros(&path)).into(), stats, Some(context))
    }
}

fn run_search(
    warehouse: &Warehouse,
    config: &SolverConfig,
) -> (Option<Path<State, Dir>>, Stats, SearchContext) {
    debug!("Processing warehouse...");
    let puzzle = Puzzle::new(warehouse, config);
    debug!("Processed warehouse");

    let mut context = SearchContext::new(config.deadlock_check_interval);
    let heuristic = config.heuristic;
    let h = |node: &Node<'_, Puzzle>| {
        context.enter_node(node.path_cost);
        heuristic.estimate(&puzzle, &mut context, &node.state)
    };

    info!("Searching using {} with {} heuristic", config.algorithm, heuristic);
    let result = match config.algorithm {
        Algorithm::AStar => search::astar_graph_search(&puzzle, h, config.print_status),
        Algorithm::BestFirst => search::best_first_graph_search(&puzzle, h, config.print_status),
    };

    match result.path {
        Some(ref path) => info!("Found solution with {} moves", path.actions.len()),
        None => info!("No solution"),
    }
    debug!(
        "Deadlock checks: {}, unreachable boxes: {}, mutual deadlocks: {}",
        context.deadlock_checks(),
        context.unreachable_boxes(),
        context.mutual_deadlocks()
    );
    (result.path, result.stats, context)
}

fn elementary(path: &Path<State, Dir>) -> Moves {
    let mut moves = Moves::default();
    for (i, &dir) in path.actions.iter().enumerate() {
        let is_push = path.states[i].boxes != path.states[i + 1].boxes;
        moves.add(Move::new(dir, is_push));
    }
    moves
}

/// Only the pushes - the worker ends up where the box was.
fn macros(path: &Path<State, Dir>) -> Vec<MacroAction> {
    path.actions
        .iter()
        .enumerate()
        .filter(|&(i, _)| path.states[i].boxes != path.states[i + 1].boxes)
        .map(|(i, &dir)| MacroAction::new(path.states[i + 1].worker, dir))
        .collect()
}
