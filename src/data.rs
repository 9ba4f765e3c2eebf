use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Static contents of a cell - what stays the same for the whole search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapCell {
    Empty,
    Wall,
    Target,
}

impl Display for MapCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MapCell::Empty => write!(f, " "),
            MapCell::Wall => write!(f, "#"),
            MapCell::Target => write!(f, "."),
        }
    }
}

/// Dynamic contents of a cell - changes with every move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Worker,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

/// Grid coordinate, origin top-left.
///
/// Signed so that stepping off the edge of a ragged or open level
/// produces a position `Vec2d::get` rejects instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u32 {
        ((self.r - other.r).abs() + (self.c - other.c).abs()) as u32
    }

    pub fn neighbors(self) -> [Pos; 4] {
        [self + Dir::Up, self + Dir::Right, self + Dir::Down, self + Dir::Left]
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

/// Order in which actions are generated.
pub const DIRECTIONS: [Dir; 4] = [Dir::Left, Dir::Right, Dir::Up, Dir::Down];

impl Dir {
    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Right => (0, 1),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
        }
    }

    /// Single letter used in LURD notation, uppercase for pushes.
    pub fn lurd(self, is_push: bool) -> char {
        let c = match self {
            Dir::Up => 'u',
            Dir::Right => 'r',
            Dir::Down => 'd',
            Dir::Left => 'l',
        };
        if is_push {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "Up"),
            Dir::Right => write!(f, "Right"),
            Dir::Down => write!(f, "Down"),
            Dir::Left => write!(f, "Left"),
        }
    }
}

impl FromStr for Dir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Up" | "u" | "U" => Ok(Dir::Up),
            "Right" | "r" | "R" => Ok(Dir::Right),
            "Down" | "d" | "D" => Ok(Dir::Down),
            "Left" | "l" | "L" => Ok(Dir::Left),
            _ => Err(format!("Unknown direction: {}", s)),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.delta();
        Pos::new(self.r + dr, self.c + dc)
    }
}

impl Sub<Dir> for Pos {
    type Output = Pos;

    fn sub(self, dir: Dir) -> Pos {
        self + dir.inverse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_around() {
        let pos = Pos::new(3, 4);
        assert_eq!(pos + Dir::Up, Pos::new(2, 4));
        assert_eq!(pos + Dir::Right, Pos::new(3, 5));
        assert_eq!(pos + Dir::Down, Pos::new(4, 4));
        assert_eq!(pos + Dir::Left, Pos::new(3, 3));
        assert_eq!(pos - Dir::Left, Pos::new(3, 5));
        assert_eq!(pos.dist(Pos::new(1, 7)), 5);
    }

    #[test]
    fn parsing_dirs() {
        for &dir in &DIRECTIONS {
            assert_eq!(dir.to_string().parse::<Dir>(), Ok(dir));
        }
        assert!("Sideways".parse::<Dir>().is_err());
    }
}
