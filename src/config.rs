use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Which search algorithm drives the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    /// f = g + h, optimal with an admissible heuristic
    AStar,
    /// f = h only, usually much faster, no optimality
    BestFirst,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Algorithm::AStar => write!(f, "a-star"),
            Algorithm::BestFirst => write!(f, "best-first"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a-star" | "astar" => Ok(Algorithm::AStar),
            "best-first" => Ok(Algorithm::BestFirst),
            _ => Err(format!("Unknown algorithm: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    /// Admissible baseline
    Manhattan,
    /// Inadmissible, uses the distance lookup table
    LookupWeighted,
    /// Lookup table distances plus periodic deadlock checks
    DeadlockAware,
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::Manhattan => write!(f, "manhattan"),
            HeuristicKind::LookupWeighted => write!(f, "lookup"),
            HeuristicKind::DeadlockAware => write!(f, "deadlock"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "lookup" => Ok(HeuristicKind::LookupWeighted),
            "deadlock" => Ok(HeuristicKind::DeadlockAware),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

pub const DEFAULT_DEADLOCK_CHECK_INTERVAL: u32 = 10_000;

/// Above this many interior cells the distance table is not built at all
/// and heuristics fall back to manhattan distance.
pub const DEFAULT_LOOKUP_CELL_LIMIT: usize = 400;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub algorithm: Algorithm,
    pub heuristic: HeuristicKind,
    pub allow_taboo_push: bool,
    pub deadlock_check_interval: u32,
    pub lookup_cell_limit: usize,
    pub print_status: bool,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn allow_taboo_push(mut self, allow: bool) -> Self {
        self.allow_taboo_push = allow;
        self
    }

    /// Zero is treated as one - check on every evaluation.
    pub fn deadlock_check_interval(mut self, interval: u32) -> Self {
        self.deadlock_check_interval = interval.max(1);
        self
    }

    pub fn lookup_cell_limit(mut self, limit: usize) -> Self {
        self.lookup_cell_limit = limit;
        self
    }

    pub fn print_status(mut self, print_status: bool) -> Self {
        self.print_status = print_status;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            algorithm: Algorithm::AStar,
            heuristic: HeuristicKind::Manhattan,
            allow_taboo_push: false,
            deadlock_check_interval: DEFAULT_DEADLOCK_CHECK_INTERVAL,
            lookup_cell_limit: DEFAULT_LOOKUP_CELL_LIMIT,
            print_status: false,
        }
    }
}
