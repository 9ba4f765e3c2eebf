use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::vec2d::Vec2d;
use crate::warehouse::Warehouse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    Pos(usize, usize),
    Empty,
    MultipleWorkers,
    NoWorker,
    BoxesTargets(usize, usize),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::Empty => write!(f, "Empty level"),
            ParserErr::MultipleWorkers => write!(f, "More than one worker"),
            ParserErr::NoWorker => write!(f, "No worker"),
            ParserErr::BoxesTargets(boxes, targets) => write!(
                f,
                "Different number of boxes ({}) and targets ({})",
                boxes, targets
            ),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Warehouse {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses (a subset of) the format described [here](http://www.sokobano.de/wiki/index.php?title=Level_format)
///
/// `!` and `+` are both accepted for a worker standing on a target.
pub(crate) fn parse(level: &str) -> Result<Warehouse, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();
    if level.is_empty() {
        return Err(ParserErr::Empty);
    }

    let mut grid = Vec::new();
    let mut targets = Vec::new();
    let mut boxes = Vec::new();
    let mut worker = None;

    for (r, line) in level.lines().enumerate() {
        let mut line_cells = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            let pos = Pos::new(r as i32, c as i32);

            let cell = match cur_char {
                '#' => MapCell::Wall,
                ' ' | '-' | '_' => MapCell::Empty,
                '.' => MapCell::Target,
                'p' | '@' => {
                    if worker.is_some() {
                        return Err(ParserErr::MultipleWorkers);
                    }
                    worker = Some(pos);
                    MapCell::Empty
                }
                'P' | '+' | '!' => {
                    if worker.is_some() {
                        return Err(ParserErr::MultipleWorkers);
                    }
                    worker = Some(pos);
                    MapCell::Target
                }
                'b' | '$' => {
                    boxes.push(pos);
                    MapCell::Empty
                }
                'B' | '*' => {
                    boxes.push(pos);
                    MapCell::Target
                }
                _ => return Err(ParserErr::Pos(r, c)),
            };
            if cell == MapCell::Target {
                targets.push(pos);
            }
            line_cells.push(cell);
        }
        grid.push(line_cells);
    }

    let worker = worker.ok_or(ParserErr::NoWorker)?;
    if boxes.len() != targets.len() {
        return Err(ParserErr::BoxesTargets(boxes.len(), targets.len()));
    }

    Ok(Warehouse::new(
        Vec2d::new(&grid, MapCell::Empty),
        targets,
        boxes,
        worker,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_cells() {
        let level = r"
#######
#@$ *.#
#######
";
        let warehouse = parse(level).unwrap();
        assert_eq!(warehouse.worker(), Pos::new(1, 1));
        assert_eq!(warehouse.boxes(), &[Pos::new(1, 2), Pos::new(1, 4)]);
        assert_eq!(warehouse.targets(), &[Pos::new(1, 4), Pos::new(1, 5)]);
        assert_eq!(warehouse.rows(), 3);
        assert_eq!(warehouse.cols(), 7);
    }

    #[test]
    fn parsing_errors() {
        assert_eq!(parse(""), Err(ParserErr::Empty));
        assert_eq!(parse("#####\n# $.#\n#####"), Err(ParserErr::NoWorker));
        assert_eq!(
            parse("#####\n#@$@#\n#.###"),
            Err(ParserErr::MultipleWorkers)
        );
        assert_eq!(
            parse("######\n#@$$.#\n######"),
            Err(ParserErr::BoxesTargets(2, 1))
        );
        assert_eq!(parse("####\n#@x#\n####"), Err(ParserErr::Pos(1, 2)));

        let err = parse("").unwrap_err();
        let reported = err;
        assert_eq!(err.to_string(), "Empty level");
        assert_eq!(reported, ParserErr::Empty);
    }
}
