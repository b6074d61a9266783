//! Lane actions produced from raw key events.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneAction {
    Press(usize),
    Release(usize),
}

impl LaneAction {
    pub fn lane(self) -> usize {
        match self {
            LaneAction::Press(lane) | LaneAction::Release(lane) => lane,
        }
    }
}
