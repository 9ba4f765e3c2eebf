use log::debug;

use crate::config::HeuristicKind;
use crate::data::Pos;
use crate::solver::deadlock;
use crate::solver::lookup::DistanceLookup;
use crate::solver::puzzle::Puzzle;
use crate::solver::search::Estimate;
use crate::state::State;

/// Bookkeeping of a single search run.
///
/// Create a new one for every search, never share it between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchContext {
    check_interval: u32,
    evaluations: u32,
    prev_estimate: Option<Estimate>,
    last_path_cost: u32,
    deadlock_checks: usize,
    unreachable_boxes: usize,
    mutual_deadlocks: usize,
}

impl SearchContext {
    /// The expensive deadlock checks run once every `check_interval` evaluations.
    pub fn new(check_interval: u32) -> Self {
        SearchContext {
            check_interval: check_interval.max(1),
            evaluations: 0,
            prev_estimate: None,
            last_path_cost: 0,
            deadlock_checks: 0,
            unreachable_boxes: 0,
            mutual_deadlocks: 0,
        }
    }

    pub fn prev_estimate(&self) -> Option<Estimate> {
        self.prev_estimate
    }

    pub fn last_path_cost(&self) -> u32 {
        self.last_path_cost
    }

    /// How many times the deadlock checks actually ran.
    pub fn deadlock_checks(&self) -> usize {
        self.deadlock_checks
    }

    pub fn unreachable_boxes(&self) -> usize {
        self.unreachable_boxes
    }

    pub fn mutual_deadlocks(&self) -> usize {
        self.mutual_deadlocks
    }

    pub(crate) fn enter_node(&mut self, path_cost: u32) {
        self.last_path_cost = path_cost;
    }

    fn check_due(&mut self) -> bool {
        self.evaluations += 1;
        if self.evaluations >= self.check_interval {
            self.evaluations = 0;
            true
        } else {
            false
        }
    }
}

impl HeuristicKind {
    pub fn is_admissible(self) -> bool {
        self == HeuristicKind::Manhattan
    }

    /// Estimated remaining cost from `state` to the goal.
    pub fn estimate(self, puzzle: &Puzzle, ctx: &mut SearchContext, state: &State) -> Estimate {
        let estimate = match self {
            HeuristicKind::Manhattan => Estimate::Finite(manhattan(puzzle.targets(), state)),
            HeuristicKind::LookupWeighted => Estimate::Finite(lookup_weighted(puzzle, state)),
            HeuristicKind::DeadlockAware => deadlock_aware(puzzle, ctx, state),
        };
        ctx.prev_estimate = Some(estimate);
        estimate
    }
}

fn nearest_target<F>(targets: &[Pos], box_pos: Pos, dist: F) -> u32
where
    F: Fn(Pos, Pos) -> u32,
{
    targets
        .iter()
        .map(|&target| dist(box_pos, target))
        .min()
        .unwrap_or(0)
}

fn manhattan(targets: &[Pos], state: &State) -> u32 {
    state
        .boxes
        .iter()
        .map(|&box_pos| nearest_target(targets, box_pos, Pos::dist))
        .sum()
}

fn lookup_weighted(puzzle: &Puzzle, state: &State) -> u32 {
    let lookup = puzzle.lookup();
    let dist = |a: Pos, b: Pos| lookup.distance_or_manhattan(a, b);

    let mut total: u32 = 0;
    let mut squares: u32 = 0;
    let mut worker_to_boxes: u32 = 0;
    for &box_pos in &state.boxes {
        let nearest = nearest_target(puzzle.targets(), box_pos, dist);
        total = total.saturating_add(nearest);
        squares = squares.saturating_add(nearest.saturating_mul(nearest));
        worker_to_boxes = worker_to_boxes.saturating_add(dist(state.worker, box_pos));
    }
    total
        .saturating_mul(total)
        .saturating_add(squares)
        .saturating_add(worker_to_boxes.saturating_mul(3))
}

fn deadlock_aware(puzzle: &Puzzle, ctx: &mut SearchContext, state: &State) -> Estimate {
    let h = boxes_and_worker(puzzle.targets(), puzzle.lookup(), state);

    if ctx.check_due() {
        ctx.deadlock_checks += 1;
        if !deadlock::box_can_reach_target(puzzle.grid(), puzzle.targets(), &state.boxes) {
            ctx.unreachable_boxes += 1;
            debug!("Pruning state, some box can't reach any target");
            return Estimate::Unreachable;
        }
        if deadlock::is_deadlocked(puzzle.analyzer(), &state.boxes) {
            ctx.mutual_deadlocks += 1;
            return Estimate::Unreachable;
        }
    }

    Estimate::Finite(h)
}

/// Boxes already on a target cost nothing,
/// the rest twice their distance to the nearest target plus the worker's walk to them.
fn boxes_and_worker(targets: &[Pos], lookup: &DistanceLookup, state: &State) -> u32 {
    let dist = |a: Pos, b: Pos| lookup.distance_or_manhattan(a, b);
    state
        .boxes
        .iter()
        .filter(|&&box_pos| targets.binary_search(&box_pos).is_err())
        .map(|&box_pos| {
            nearest_target(targets, box_pos, dist)
                .saturating_mul(2)
                .saturating_add(dist(state.worker, box_pos))
        })
        .fold(0, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::SolverConfig;
    use crate::solver::search::Problem;
    use crate::warehouse::Warehouse;

    fn puzzle(level: &str) -> Puzzle {
        let warehouse: Warehouse = level.parse().unwrap();
        Puzzle::new(&warehouse, &SolverConfig::default())
    }

    const MUTUAL_DEADLOCK: &str = r"
#######
#. $$.#
#     #
#  @  #
#######";

    #[test]
    fn all_variants() {
        let puzzle = puzzle("######\n#@ $.#\n######");
        let state = puzzle.initial().clone();
        let mut ctx = SearchContext::new(1000);

        assert_eq!(
            HeuristicKind::Manhattan.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(1)
        );
        // 1^2 + 1^2 + 3 * 2
        assert_eq!(
            HeuristicKind::LookupWeighted.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(8)
        );
        // 2 * 1 + 2
        assert_eq!(
            HeuristicKind::DeadlockAware.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(4)
        );
        assert_eq!(ctx.prev_estimate(), Some(Estimate::Finite(4)));
        assert_eq!(ctx.deadlock_checks(), 0);
    }

    #[test]
    fn solved_state() {
        let puzzle = puzzle("######\n#@ *.#\n#  $ #\n######");
        let mut ctx = SearchContext::new(1);
        let state = State::new(Pos::new(1, 1), vec![Pos::new(1, 3), Pos::new(1, 4)]);
        assert!(puzzle.goal_test(&state));
        assert_eq!(
            HeuristicKind::Manhattan.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(0)
        );
        assert_eq!(
            HeuristicKind::DeadlockAware.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(0)
        );
    }

    #[test]
    fn mutual_deadlock_is_unreachable() {
        let puzzle = puzzle(MUTUAL_DEADLOCK);
        let state = puzzle.initial().clone();

        let mut ctx = SearchContext::new(1);
        assert_eq!(
            HeuristicKind::DeadlockAware.estimate(&puzzle, &mut ctx, &state),
            Estimate::Unreachable
        );
        assert_eq!(ctx.deadlock_checks(), 1);
        assert_eq!(ctx.mutual_deadlocks(), 1);
        assert_eq!(ctx.unreachable_boxes(), 0);

        // the others don't look for deadlocks
        assert_eq!(
            HeuristicKind::Manhattan.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(3)
        );
    }

    #[test]
    fn checks_are_throttled() {
        let puzzle = puzzle(MUTUAL_DEADLOCK);
        let state = puzzle.initial().clone();
        let mut ctx = SearchContext::new(3);

        let h = HeuristicKind::DeadlockAware;
        // (2 * 2 + 2) + (2 * 1 + 3)
        assert_eq!(h.estimate(&puzzle, &mut ctx, &state), Estimate::Finite(11));
        let snapshot = ctx;
        assert_eq!(h.estimate(&puzzle, &mut ctx, &state), Estimate::Finite(11));
        assert_ne!(snapshot, ctx);
        assert_eq!(snapshot.prev_estimate(), Some(Estimate::Finite(11)));
        assert_eq!(h.estimate(&puzzle, &mut ctx, &state), Estimate::Unreachable);
        assert_eq!(h.estimate(&puzzle, &mut ctx, &state), Estimate::Finite(11));
        assert_eq!(ctx.deadlock_checks(), 1);
    }

    #[test]
    fn walled_in_box_is_unreachable() {
        let puzzle = puzzle("#######\n#@ .#$#\n#######");
        let state = puzzle.initial().clone();
        let mut ctx = SearchContext::new(1);
        assert_eq!(
            HeuristicKind::DeadlockAware.estimate(&puzzle, &mut ctx, &state),
            Estimate::Unreachable
        );
        assert_eq!(ctx.unreachable_boxes(), 1);
    }

    #[test]
    fn huge_distances_saturate() {
        let puzzle = puzzle("######\n#@ $.#\n######");
        let far = 1_000_000_000;
        let state = State::new(Pos::new(1, 1), vec![Pos::new(far, 4), Pos::new(-far, 4)]);
        let mut ctx = SearchContext::new(1000);
        assert_eq!(
            HeuristicKind::DeadlockAware.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(u32::max_value())
        );
        assert_eq!(
            HeuristicKind::LookupWeighted.estimate(&puzzle, &mut ctx, &state),
            Estimate::Finite(u32::max_value())
        );
    }

    #[test]
    fn admissibility() {
        assert!(HeuristicKind::Manhattan.is_admissible());
        assert!(!HeuristicKind::LookupWeighted.is_admissible());
        assert!(!HeuristicKind::DeadlockAware.is_admissible());
    }
}
