use std::collections::VecDeque;

use log::{debug, trace};

use crate::data::{MapCell, Pos};
use crate::solver::taboo::TabooAnalyzer;
use crate::vec2d::Vec2d;
use crate::warehouse::{self, Warehouse};

/// Looks for two boxes that trap each other.
///
/// For each pair one box is turned into a wall and the other is checked
/// for being taboo, then the roles are swapped. Only a pair that is stuck
/// both ways counts.
pub fn find_mutual_deadlock(analyzer: &TabooAnalyzer, boxes: &[Pos]) -> Option<(Pos, Pos)> {
    for (i, &first) in boxes.iter().enumerate() {
        for &second in &boxes[i + 1..] {
            if analyzer.is_stuck(second, &[first]) && analyzer.is_stuck(first, &[second]) {
                debug!("Mutual deadlock: {} and {}", first, second);
                return Some((first, second));
            }
        }
    }
    None
}

pub fn is_deadlocked(analyzer: &TabooAnalyzer, boxes: &[Pos]) -> bool {
    find_mutual_deadlock(analyzer, boxes).is_some()
}

/// Can every box not already on a target reach at least one target?
///
/// The box moves like a free walker, only walls and the other boxes block it.
/// Doesn't care whether the worker could actually push it there.
pub(crate) fn box_can_reach_target(grid: &Vec2d<MapCell>, targets: &[Pos], boxes: &[Pos]) -> bool {
    for &box_pos in boxes {
        if targets.contains(&box_pos) {
            continue;
        }
        let found = reachable(grid, box_pos, |pos| pos != box_pos && boxes.contains(&pos))
            .into_iter()
            .any(|pos| targets.contains(&pos));
        if !found {
            trace!("Box at {} can't reach any target", box_pos);
            return false;
        }
    }
    true
}

/// Can the worker walk to `dst` (row, column) without pushing any box?
pub fn can_go_there(warehouse: &Warehouse, dst: Pos) -> bool {
    if warehouse.is_wall(dst) || warehouse.boxes().contains(&dst) {
        return false;
    }
    reachable(&warehouse.grid, warehouse.worker(), |pos| {
        warehouse.boxes().contains(&pos)
    })
    .contains(&dst)
}

/// Every cell reachable from `start` through non-wall cells not `blocked`.
fn reachable<F>(grid: &Vec2d<MapCell>, start: Pos, blocked: F) -> Vec<Pos>
where
    F: Fn(Pos) -> bool,
{
    let mut ret = Vec::new();
    let mut visited: Vec2d<bool> = grid.scratchpad();
    if !grid.contains(start) {
        return ret;
    }
    visited[start] = true;

    let mut to_visit = VecDeque::new();
    to_visit.push_back(start);
    while let Some(cur) = to_visit.pop_front() {
        ret.push(cur);
        for &next in &cur.neighbors() {
            if warehouse::is_wall(grid, next) || visited[next] || blocked(next) {
                continue;
            }
            visited[next] = true;
            to_visit.push_back(next);
        }
    }
    ret
}
