use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;

use fnv::FnvHashSet;
use log::debug;
use prettytable::{format, Cell, Row, Table};
use separator::Separatable;
use typed_arena::Arena;

/// Heuristic value of a node.
///
/// `Unreachable` compares greater than every finite value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Estimate {
    Finite(u32),
    Unreachable,
}

impl Estimate {
    pub fn is_unreachable(self) -> bool {
        self == Estimate::Unreachable
    }

    pub fn plus(self, cost: u32) -> Estimate {
        match self {
            Estimate::Finite(h) => Estimate::Finite(h.saturating_add(cost)),
            Estimate::Unreachable => Estimate::Unreachable,
        }
    }
}

impl Display for Estimate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Estimate::Finite(h) => write!(f, "{}", h),
            Estimate::Unreachable => write!(f, "inf"),
        }
    }
}

/// What a state space has to provide to be searched.
pub trait Problem {
    type State: Clone + Eq + Hash;
    type Action: Copy;

    fn initial(&self) -> &Self::State;

    fn goal_test(&self, state: &Self::State) -> bool;

    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn result(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Cost of a path reaching `s2` from `s1` via `action`, `c` being the cost up to `s1`.
    fn path_cost(&self, c: u32, _s1: &Self::State, _action: Self::Action, _s2: &Self::State) -> u32 {
        c + 1
    }
}

pub struct Node<'a, P: Problem> {
    pub state: P::State,
    pub parent: Option<&'a Node<'a, P>>,
    pub action: Option<P::Action>,
    pub path_cost: u32,
    pub depth: usize,
}

impl<'a, P: Problem> Node<'a, P> {
    fn path(&self) -> Path<P::State, P::Action> {
        let mut states = vec![self.state.clone()];
        let mut actions = Vec::new();
        let mut cur = self;
        while let Some(parent) = cur.parent {
            if let Some(action) = cur.action {
                actions.push(action);
            }
            states.push(parent.state.clone());
            cur = parent;
        }
        states.reverse();
        actions.reverse();
        Path { states, actions }
    }
}

/// `states[i + 1]` is the result of `actions[i]` applied to `states[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<S, A> {
    pub states: Vec<S>,
    pub actions: Vec<A>,
}

pub struct SearchResult<S, A> {
    pub path: Option<Path<S, A>>,
    pub stats: Stats,
}

struct Queued<'a, P: Problem> {
    priority: Estimate,
    // FIFO among equal priorities so results don't depend on heap internals
    seq: u64,
    node: &'a Node<'a, P>,
}

impl<P: Problem> PartialEq for Queued<'_, P> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<P: Problem> Eq for Queued<'_, P> {}

impl<P: Problem> PartialOrd for Queued<'_, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: Problem> Ord for Queued<'_, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.seq).cmp(&(other.priority, other.seq))
    }
}

/// Greedy when `f` is just a heuristic, A* when it adds path cost.
///
/// Nodes for which `f` returns `Unreachable` are never expanded.
pub fn best_first_graph_search<P, F>(
    problem: &P,
    mut f: F,
    print_status: bool,
) -> SearchResult<P::State, P::Action>
where
    P: Problem,
    F: FnMut(&Node<'_, P>) -> Estimate,
{
    debug!("Search called");

    let mut stats = Stats::default();
    let arena = Arena::new();
    let mut closed = FnvHashSet::default();
    let mut to_visit = BinaryHeap::new();
    let mut seq = 0;

    let start: &Node<'_, P> = arena.alloc(Node {
        state: problem.initial().clone(),
        parent: None,
        action: None,
        path_cost: 0,
        depth: 0,
    });
    stats.add_created(start.depth);
    let priority = f(start);
    if priority.is_unreachable() {
        stats.add_pruned(start.depth);
    } else {
        to_visit.push(Reverse(Queued {
            priority,
            seq,
            node: start,
        }));
    }

    while let Some(Reverse(Queued { node: cur, .. })) = to_visit.pop() {
        if closed.contains(&cur.state) {
            stats.add_reached_duplicate(cur.depth);
            continue;
        }
        if stats.add_unique_visited(cur.depth) && print_status {
            println!("Visited new depth: {}", cur.depth);
            println!("{:?}", stats);
        }

        if problem.goal_test(&cur.state) {
            debug!("Solved, backtracking path");
            return SearchResult {
                path: Some(cur.path()),
                stats,
            };
        }

        // insert here and not as soon as we discover it
        // otherwise we'd close states reached by a worse path first
        closed.insert(cur.state.clone());

        for action in problem.actions(&cur.state) {
            let state = problem.result(&cur.state, action);
            if closed.contains(&state) {
                continue;
            }
            let path_cost = problem.path_cost(cur.path_cost, &cur.state, action, &state);
            let next: &Node<'_, P> = arena.alloc(Node {
                state,
                parent: Some(cur),
                action: Some(action),
                path_cost,
                depth: cur.depth + 1,
            });
            stats.add_created(next.depth);

            let priority = f(next);
            if priority.is_unreachable() {
                stats.add_pruned(next.depth);
                continue;
            }
            seq += 1;
            to_visit.push(Reverse(Queued {
                priority,
                seq,
                node: next,
            }));
        }
    }

    debug!("Search space exhausted");
    SearchResult { path: None, stats }
}

/// Orders nodes by `path_cost + h`.
pub fn astar_graph_search<P, H>(
    problem: &P,
    mut h: H,
    print_status: bool,
) -> SearchResult<P::State, P::Action>
where
    P: Problem,
    H: FnMut(&Node<'_, P>) -> Estimate,
{
    best_first_graph_search(problem, |node: &Node<'_, P>| h(node).plus(node.path_cost), print_status)
}

#[derive(Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<usize>,
    visited_states: Vec<usize>,
    duplicate_states: Vec<usize>,
    pruned_states: Vec<usize>,
}

impl Stats {
    pub fn total_created(&self) -> usize {
        self.created_states.iter().sum()
    }

    pub fn total_unique_visited(&self) -> usize {
        self.visited_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> usize {
        self.duplicate_states.iter().sum()
    }

    pub fn total_pruned(&self) -> usize {
        self.pruned_states.iter().sum()
    }

    fn add_created(&mut self, depth: usize) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    fn add_unique_visited(&mut self, depth: usize) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    fn add_reached_duplicate(&mut self, depth: usize) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    fn add_pruned(&mut self, depth: usize) -> bool {
        Self::add(&mut self.pruned_states, depth)
    }

    /// Returns true if this is the first time we reached this depth.
    fn add(counts: &mut Vec<usize>, depth: usize) -> bool {
        let mut ret = false;

        // while because some depths might be skipped - duplicates
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }
}

fn separated(n: usize) -> String {
    (n as u64).separated_string()
}

fn at(counts: &[usize], depth: usize) -> usize {
    counts.get(depth).cloned().unwrap_or(0)
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<16}{}",
            separated(self.total_created()),
            separated(self.total_unique_visited()),
            separated(self.total_reached_duplicates())
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", separated(self.total_created()))?;
        writeln!(f, "Unique visited total: {}", separated(self.total_unique_visited()))?;
        writeln!(f, "Reached duplicates total: {}", separated(self.total_reached_duplicates()))?;
        writeln!(f, "Pruned as unsolvable total: {}", separated(self.total_pruned()))?;
        writeln!(f)?;

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(
            ["Depth", "Created", "Unique", "Duplicates", "Pruned"]
                .iter()
                .map(|title| Cell::new(title))
                .collect(),
        ));
        // created_states is the longest vec
        for depth in 0..self.created_states.len() {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&separated(at(&self.created_states, depth))),
                Cell::new(&separated(at(&self.visited_states, depth))),
                Cell::new(&separated(at(&self.duplicate_states, depth))),
                Cell::new(&separated(at(&self.pruned_states, depth))),
            ]));
        }
        write!(f, "{}", table)
    }
}
