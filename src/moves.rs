use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{Dir, Pos};

// Terminology:
// move = changing worker position by one cell
// push = a move that changes a box position
// step = a move that doesn't change a box position

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub dir: Dir,
    pub is_push: bool,
}

impl Move {
    pub fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir.lurd(self.is_push))
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Elementary solution - every single worker move.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn add(&mut self, mov: Move) {
        self.0.push(mov);
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    pub fn dirs(&self) -> Vec<Dir> {
        self.0.iter().map(|m| m.dir).collect()
    }

    /// `Left`, `Right`, `Up`, `Down` tokens.
    pub fn tokens(&self) -> Vec<String> {
        self.0.iter().map(|m| m.dir.to_string()).collect()
    }
}

impl IntoIterator for Moves {
    type Item = Move;
    type IntoIter = ::std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// LURD notation
impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// One complete push: the box at `box_pos` (row, column) goes one cell in `dir`.
/// How the worker gets next to it is left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacroAction {
    pub box_pos: Pos,
    pub dir: Dir,
}

impl MacroAction {
    pub fn new(box_pos: Pos, dir: Dir) -> Self {
        MacroAction { box_pos, dir }
    }
}

impl Display for MacroAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.box_pos, self.dir)
    }
}

/// Outcome of a solve: either the actions to reach the goal or proof there are none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan<T> {
    Solved(T),
    Impossible,
}

impl<T> Plan<T> {
    pub fn is_impossible(&self) -> bool {
        match self {
            Plan::Impossible => true,
            Plan::Solved(_) => false,
        }
    }

    pub fn solution(&self) -> Option<&T> {
        match self {
            Plan::Solved(actions) => Some(actions),
            Plan::Impossible => None,
        }
    }
}

impl<T> From<Option<T>> for Plan<T> {
    fn from(actions: Option<T>) -> Self {
        match actions {
            Some(actions) => Plan::Solved(actions),
            None => Plan::Impossible,
        }
    }
}

impl Plan<Moves> {
    /// Direction tokens, `["Impossible"]` when there is no solution.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Plan::Solved(moves) => moves.tokens(),
            Plan::Impossible => vec!["Impossible".to_owned()],
        }
    }
}

impl Plan<Vec<MacroAction>> {
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Plan::Solved(actions) => actions.iter().map(|a| a.to_string()).collect(),
            Plan::Impossible => vec!["Impossible".to_owned()],
        }
    }
}
