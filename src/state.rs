use crate::data::Pos;

/// Worker position plus box positions.
///
/// Boxes are kept sorted so that two states reached by moving boxes
/// in a different order compare (and hash) equal.
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct State {
    pub(crate) worker: Pos,
    pub(crate) boxes: Vec<Pos>,
}

impl State {
    pub fn new(worker: Pos, mut boxes: Vec<Pos>) -> State {
        boxes.sort();
        State { worker, boxes }
    }

    pub fn worker(&self) -> Pos {
        self.worker
    }

    pub fn boxes(&self) -> &[Pos] {
        &self.boxes
    }

    pub fn has_box(&self, pos: Pos) -> bool {
        self.boxes.binary_search(&pos).is_ok()
    }

    /// Moves the box at `from` to `to` keeping boxes sorted.
    pub(crate) fn with_box_moved(&self, worker: Pos, from: Pos, to: Pos) -> State {
        let boxes = self
            .boxes
            .iter()
            .map(|&b| if b == from { to } else { b })
            .collect();
        State::new(worker, boxes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_order_is_canonical() {
        let a = State::new(Pos::new(1, 1), vec![Pos::new(2, 3), Pos::new(1, 5)]);
        let b = State::new(Pos::new(1, 1), vec![Pos::new(1, 5), Pos::new(2, 3)]);
        assert_eq!(a, b);
        assert!(a.has_box(Pos::new(2, 3)));
        assert!(!a.has_box(Pos::new(3, 2)));

        let moved = a.with_box_moved(Pos::new(2, 3), Pos::new(2, 3), Pos::new(0, 3));
        assert_eq!(moved.boxes(), &[Pos::new(0, 3), Pos::new(1, 5)]);
    }
}
