use log::debug;

use crate::config::SolverConfig;
use crate::data::{Dir, MapCell, Pos, DIRECTIONS};
use crate::solver::lookup::DistanceLookup;
use crate::solver::search::Problem;
use crate::solver::taboo::{TabooAnalyzer, TabooMap};
use crate::state::State;
use crate::vec2d::Vec2d;
use crate::warehouse::{self, Warehouse};

/// Everything about a warehouse that doesn't change during a search
/// plus the initial state.
#[derive(Debug, Clone)]
pub struct Puzzle {
    grid: Vec2d<MapCell>,
    /// Sorted so it can be compared with `State::boxes` directly.
    targets: Vec<Pos>,
    analyzer: TabooAnalyzer,
    taboo: TabooMap,
    lookup: DistanceLookup,
    initial: State,
    allow_taboo_push: bool,
}

impl Puzzle {
    pub fn new(warehouse: &Warehouse, config: &SolverConfig) -> Self {
        let analyzer = TabooAnalyzer::new(warehouse);
        let taboo = analyzer.analyze();
        let lookup = DistanceLookup::new(&warehouse.grid, &analyzer, config.lookup_cell_limit);
        debug!("Puzzle ready");

        Puzzle {
            grid: warehouse.grid.clone(),
            targets: warehouse::sorted(warehouse.targets()),
            analyzer,
            taboo,
            lookup,
            initial: warehouse.state(),
            allow_taboo_push: config.allow_taboo_push,
        }
    }

    pub fn targets(&self) -> &[Pos] {
        &self.targets
    }

    pub fn taboo(&self) -> &TabooMap {
        &self.taboo
    }

    pub fn analyzer(&self) -> &TabooAnalyzer {
        &self.analyzer
    }

    pub fn lookup(&self) -> &DistanceLookup {
        &self.lookup
    }

    pub(crate) fn grid(&self) -> &Vec2d<MapCell> {
        &self.grid
    }

    fn is_wall(&self, pos: Pos) -> bool {
        warehouse::is_wall(&self.grid, pos)
    }

    /// Can the box at `box_pos` be pushed one cell in `dir`?
    fn can_push(&self, state: &State, box_pos: Pos, dir: Dir) -> bool {
        let dest = box_pos + dir;
        !self.is_wall(dest)
            && !state.has_box(dest)
            && (self.allow_taboo_push || !self.taboo.is_taboo(dest))
    }

    fn is_legal(&self, state: &State, dir: Dir) -> bool {
        let next = state.worker + dir;
        if self.is_wall(next) {
            false
        } else if state.has_box(next) {
            self.can_push(state, next, dir)
        } else {
            true
        }
    }
}

impl Problem for Puzzle {
    type State = State;
    type Action = Dir;

    fn initial(&self) -> &State {
        &self.initial
    }

    fn goal_test(&self, state: &State) -> bool {
        state.boxes == self.targets
    }

    /// Always in the order left, right, up, down.
    fn actions(&self, state: &State) -> Vec<Dir> {
        DIRECTIONS
            .iter()
            .cloned()
            .filter(|&dir| self.is_legal(state, dir))
            .collect()
    }

    /// Illegal moves leave the state as it is.
    fn result(&self, state: &State, dir: Dir) -> State {
        if !self.is_legal(state, dir) {
            return state.clone();
        }
        let next = state.worker + dir;
        if state.has_box(next) {
            state.with_box_moved(next, next, next + dir)
        } else {
            State {
                worker: next,
                boxes: state.boxes.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle(level: &str, config: &SolverConfig) -> Puzzle {
        let warehouse: Warehouse = level.parse().unwrap();
        Puzzle::new(&warehouse, config)
    }

    const CORNER: &str = r"
######
# $@ #
#   .#
######";

    #[test]
    fn no_pushing_into_corners() {
        let puzzle = puzzle(CORNER, &SolverConfig::default());
        assert!(puzzle.taboo().is_taboo(Pos::new(1, 1)));

        let initial = puzzle.initial().clone();
        assert_eq!(puzzle.actions(&initial), vec![Dir::Right, Dir::Down]);
        // refused pushes and walking into walls don't do anything
        assert_eq!(puzzle.result(&initial, Dir::Left), initial);
        assert_eq!(puzzle.result(&initial, Dir::Up), initial);
    }

    #[test]
    fn allowed_taboo_push() {
        let config = SolverConfig::new().allow_taboo_push(true);
        let puzzle = puzzle(CORNER, &config);

        let initial = puzzle.initial().clone();
        assert_eq!(
            puzzle.actions(&initial),
            vec![Dir::Left, Dir::Right, Dir::Down]
        );
        let pushed = puzzle.result(&initial, Dir::Left);
        assert_eq!(pushed.worker(), Pos::new(1, 2));
        assert_eq!(pushed.boxes(), &[Pos::new(1, 1)]);
    }

    #[test]
    fn no_double_push() {
        let puzzle = puzzle(
            r"
#######
#@$$..#
#######",
            &SolverConfig::default(),
        );
        let initial = puzzle.initial().clone();
        assert!(puzzle.actions(&initial).is_empty());
        assert_eq!(puzzle.result(&initial, Dir::Right), initial);
    }

    #[test]
    fn walking_and_pushing() {
        let puzzle = puzzle(
            r"
######
#@ $.#
######",
            &SolverConfig::default(),
        );
        let initial = puzzle.initial().clone();
        assert!(!puzzle.goal_test(&initial));
        assert_eq!(puzzle.actions(&initial), vec![Dir::Right]);

        let walked = puzzle.result(&initial, Dir::Right);
        assert_eq!(walked.worker(), Pos::new(1, 2));
        assert_eq!(walked.boxes(), initial.boxes());
        assert_eq!(puzzle.actions(&walked), vec![Dir::Left, Dir::Right]);

        let pushed = puzzle.result(&walked, Dir::Right);
        assert_eq!(pushed.worker(), Pos::new(1, 3));
        assert_eq!(pushed.boxes(), &[Pos::new(1, 4)]);
        assert!(puzzle.goal_test(&pushed));
        assert_eq!(puzzle.path_cost(1, &walked, Dir::Right, &pushed), 2);
    }

    #[test]
    fn goal_test_matches_box_set() {
        let puzzle = puzzle(
            r"
#######
#.   .#
# $@$ #
#     #
#######",
            &SolverConfig::default(),
        );
        let mut targets = puzzle.targets().to_vec();
        let mut to_visit = vec![puzzle.initial().clone()];
        let mut seen = Vec::new();
        while let Some(state) = to_visit.pop() {
            if seen.contains(&state) || seen.len() > 200 {
                continue;
            }
            for dir in puzzle.actions(&state) {
                let next = puzzle.result(&state, dir);
                let mut boxes = next.boxes().to_vec();
                boxes.sort();
                targets.sort();
                assert_eq!(puzzle.goal_test(&next), boxes == targets);
                to_visit.push(next);
            }
            seen.push(state);
        }
    }
}
