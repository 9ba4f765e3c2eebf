use std::collections::VecDeque;

use fnv::{FnvHashMap, FnvHashSet};
use log::{debug, warn};

use crate::data::{MapCell, Pos};
use crate::solver::taboo::TabooAnalyzer;
use crate::vec2d::Vec2d;

/// Worker-only (boxes ignored) shortest path lengths between pairs of inside cells.
///
/// Built once per puzzle and read-only afterwards.
/// Unreachable pairs are absent, not zero.
#[derive(Debug, Clone, Default)]
pub struct DistanceLookup {
    cells: FnvHashSet<Pos>,
    dists: FnvHashMap<(Pos, Pos), u32>,
}

impl DistanceLookup {
    /// Leaves the table empty when there are more than `cell_limit` inside cells,
    /// callers then fall back to manhattan distance for everything.
    pub(crate) fn new(grid: &Vec2d<MapCell>, analyzer: &TabooAnalyzer, cell_limit: usize) -> Self {
        let cells = analyzer.inside_cells();
        if cells.len() > cell_limit {
            warn!(
                "{} inside cells is over the limit of {}, not building distance lookup",
                cells.len(),
                cell_limit
            );
            return Self::default();
        }

        let mut dists = FnvHashMap::default();
        for &src in &cells {
            for (dest, dist) in bfs(grid, src) {
                // every pair is found twice, only keep it once
                if src < dest {
                    dists.insert((src, dest), dist);
                }
            }
        }
        debug!(
            "Distance lookup: {} cells, {} pairs",
            cells.len(),
            dists.len()
        );

        Self {
            cells: cells.into_iter().collect(),
            dists,
        }
    }

    /// Symmetric, `Some(0)` for `a == b` only if `a` is a known cell.
    pub fn distance(&self, a: Pos, b: Pos) -> Option<u32> {
        if a == b {
            return if self.cells.contains(&a) { Some(0) } else { None };
        }
        let key = if a < b { (a, b) } else { (b, a) };
        self.dists.get(&key).cloned()
    }

    /// Lookup with manhattan distance as the fallback.
    pub fn distance_or_manhattan(&self, a: Pos, b: Pos) -> u32 {
        self.distance(a, b).unwrap_or_else(|| a.dist(b))
    }

    pub fn len(&self) -> usize {
        self.dists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dists.is_empty()
    }
}

/// Distances from `src` to every cell reachable without crossing walls.
fn bfs(grid: &Vec2d<MapCell>, src: Pos) -> Vec<(Pos, u32)> {
    let mut ret = Vec::new();
    let mut visited: Vec2d<bool> = grid.scratchpad();
    visited[src] = true;

    let mut to_visit = VecDeque::new();
    to_visit.push_back((src, 0));
    while let Some((cur, dist)) = to_visit.pop_front() {
        ret.push((cur, dist));
        for &next in &cur.neighbors() {
            match grid.get(next) {
                Some(&cell) if cell != MapCell::Wall && !visited[next] => {
                    visited[next] = true;
                    to_visit.push_back((next, dist + 1));
                }
                _ => {}
            }
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::warehouse::Warehouse;

    fn lookup(level: &str) -> (Warehouse, DistanceLookup) {
        let warehouse: Warehouse = level.parse().unwrap();
        let analyzer = TabooAnalyzer::new(&warehouse);
        let lookup = DistanceLookup::new(&warehouse.grid, &analyzer, 1000);
        (warehouse, lookup)
    }

    #[test]
    fn walking_around_walls() {
        let (_, lookup) = lookup(
            r"
#######
#@ #  #
#  #  #
#   $.#
#######",
        );
        let a = Pos::new(1, 1);
        let b = Pos::new(1, 4);
        // down 2, right 3, up 2
        assert_eq!(lookup.distance(a, b), Some(7));
        assert_eq!(lookup.distance(b, a), Some(7));
        assert_eq!(lookup.distance(a, a), Some(0));
        assert_eq!(a.dist(b), 3);
        assert_eq!(lookup.distance_or_manhattan(a, b), 7);
    }

    #[test]
    fn symmetric_and_absent() {
        let (warehouse, lookup) = lookup(
            r"
#########
#@ .#  $#
#########",
        );
        let inside = TabooAnalyzer::new(&warehouse).inside_cells();
        assert_eq!(inside.len(), 3);
        // 3 cells - 3 pairs
        assert_eq!(lookup.len(), 3);
        for &a in &inside {
            for &b in &inside {
                assert_eq!(lookup.distance(a, b), lookup.distance(b, a));
            }
        }

        // the closed off room is not part of the table
        let closed_off = Pos::new(1, 5);
        assert_eq!(lookup.distance(Pos::new(1, 1), closed_off), None);
        assert_eq!(lookup.distance(closed_off, closed_off), None);
        assert_eq!(lookup.distance_or_manhattan(Pos::new(1, 1), closed_off), 4);
    }

    #[test]
    fn cell_limit() {
        let warehouse: Warehouse = r"
######
#@ $.#
######"
            .parse()
            .unwrap();
        let analyzer = TabooAnalyzer::new(&warehouse);
        let lookup = DistanceLookup::new(&warehouse.grid, &analyzer, 2);
        assert!(lookup.is_empty());
        assert_eq!(lookup.distance(Pos::new(1, 1), Pos::new(1, 4)), None);
        assert_eq!(lookup.distance_or_manhattan(Pos::new(1, 1), Pos::new(1, 4)), 3);
    }
}
