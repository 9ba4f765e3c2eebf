use std::error::Error;
use std::fmt::{self, Display, Formatter};

use log::debug;

use crate::data::Dir;
use crate::warehouse::Warehouse;

/// Why a replayed action sequence was rejected.
/// The number is the index of the offending action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IllegalMove {
    Wall(usize, Dir),
    /// The pushed box would hit a wall or another box.
    Blocked(usize, Dir),
    UnknownAction(usize, String),
}

impl Display for IllegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            IllegalMove::Wall(i, dir) => write!(f, "Action {} ({}): walking into a wall", i, dir),
            IllegalMove::Blocked(i, dir) => write!(f, "Action {} ({}): box can't move", i, dir),
            IllegalMove::UnknownAction(i, token) => write!(f, "Action {}: unknown action {}", i, token),
        }
    }
}

impl Error for IllegalMove {}

/// Moves the worker one cell, pushing a box if there is one.
///
/// Returns whether a box was pushed. Taboo cells don't matter here.
pub(crate) fn apply(warehouse: &mut Warehouse, dir: Dir, index: usize) -> Result<bool, IllegalMove> {
    let next = warehouse.worker + dir;
    if warehouse.is_wall(next) {
        return Err(IllegalMove::Wall(index, dir));
    }

    let pushed = match warehouse.boxes.iter().position(|&b| b == next) {
        Some(box_index) => {
            let dest = next + dir;
            if warehouse.is_wall(dest) || warehouse.boxes.contains(&dest) {
                return Err(IllegalMove::Blocked(index, dir));
            }
            warehouse.boxes[box_index] = dest;
            true
        }
        None => false,
    };
    warehouse.worker = next;
    Ok(pushed)
}

/// Applies all of `dirs` to a copy of `warehouse`.
pub fn replay(warehouse: &Warehouse, dirs: &[Dir]) -> Result<Warehouse, IllegalMove> {
    let mut cur = warehouse.clone();
    for (i, &dir) in dirs.iter().enumerate() {
        apply(&mut cur, dir, i)?;
    }
    Ok(cur)
}

/// Replays `Left`/`Right`/`Up`/`Down` tokens.
///
/// Returns the resulting warehouse rendered as text
/// or `"Failure"` if any action is illegal.
pub fn check_action_seq<S: AsRef<str>>(warehouse: &Warehouse, action_seq: &[S]) -> String {
    let replayed = parse_actions(action_seq).and_then(|dirs| replay(warehouse, &dirs));
    match replayed {
        Ok(warehouse) => warehouse.to_string(),
        Err(err) => {
            debug!("Replay failed: {}", err);
            "Failure".to_owned()
        }
    }
}

fn parse_actions<S: AsRef<str>>(action_seq: &[S]) -> Result<Vec<Dir>, IllegalMove> {
    action_seq
        .iter()
        .enumerate()
        .map(|(i, token)| {
            token
                .as_ref()
                .parse::<Dir>()
                .map_err(|_| IllegalMove::UnknownAction(i, token.as_ref().to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(level: &str) -> Warehouse {
        level.parse().unwrap()
    }

    #[test]
    fn empty_sequence() {
        let warehouse = warehouse(
            r"
  ####
###  #
#  *@#
# .$ #
######",
        );
        let empty: [&str; 0] = [];
        assert_eq!(check_action_seq(&warehouse, &empty), warehouse.to_string());
        assert_eq!(replay(&warehouse, &[]), Ok(warehouse.clone()));
    }

    #[test]
    fn walking_and_pushing() {
        let warehouse = warehouse(
            r"
#######
#@ $ .#
#######",
        );
        let expected = r"
#######
#   @*#
#######
"
        .trim_start_matches('\n');
        let result = check_action_seq(&warehouse, &["Right", "Right", "Right"]);
        assert_eq!(result, expected);

        let replayed = replay(&warehouse, &[Dir::Right, Dir::Right, Dir::Right]).unwrap();
        assert!(replayed.is_solved());
    }

    #[test]
    fn double_push_fails() {
        let warehouse = warehouse("#######\n#@$$..#\n#######");
        assert_eq!(check_action_seq(&warehouse, &["Right"]), "Failure");
        assert_eq!(
            replay(&warehouse, &[Dir::Right]),
            Err(IllegalMove::Blocked(0, Dir::Right))
        );
    }

    #[test]
    fn illegal_moves() {
        let warehouse = warehouse("#######\n#@ $.##\n#######");
        // box into wall
        assert_eq!(
            replay(&warehouse, &[Dir::Right, Dir::Right, Dir::Right]),
            Err(IllegalMove::Blocked(2, Dir::Right))
        );
        assert_eq!(
            replay(&warehouse, &[Dir::Right, Dir::Up]),
            Err(IllegalMove::Wall(1, Dir::Up))
        );
        assert_eq!(check_action_seq(&warehouse, &["Left"]), "Failure");
        assert_eq!(check_action_seq(&warehouse, &["Right", "Jump"]), "Failure");
    }

    #[test]
    fn taboo_push_is_legal() {
        let warehouse = warehouse(
            r"
######
# $@ #
#   .#
######",
        );
        let expected = r"
######
#$@  #
#   .#
######
"
        .trim_start_matches('\n');
        assert_eq!(check_action_seq(&warehouse, &["Left"]), expected);
    }
}
