use std::fmt::{self, Debug, Display, Formatter};

use crate::moves::Moves;
use crate::solver::replay;
use crate::warehouse::Warehouse;

/// Renders the warehouse after every push (or every move if `include_steps`).
pub struct SolutionFormatter<'a> {
    warehouse: &'a Warehouse,
    moves: &'a Moves,
    include_steps: bool,
}

impl<'a> SolutionFormatter<'a> {
    pub(crate) fn new(warehouse: &'a Warehouse, moves: &'a Moves, include_steps: bool) -> Self {
        Self {
            warehouse,
            moves,
            include_steps,
        }
    }
}

impl Display for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.warehouse)?;
        let mut cur = self.warehouse.clone();
        for (i, mov) in self.moves.iter().enumerate() {
            // moves could come from a different level
            match replay::apply(&mut cur, mov.dir, i) {
                Ok(is_push) => {
                    if is_push || self.include_steps {
                        writeln!(f, "{}", cur)?;
                    }
                }
                Err(err) => return writeln!(f, "{}", err),
            }
        }
        Ok(())
    }
}

impl Debug for SolutionFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
