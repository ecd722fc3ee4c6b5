/// Which way the cursor moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    /// Signed step: -1 for `Back`, +1 for `Forward`.
    #[must_use]
    pub const fn delta(self) -> i8 {
        match self {
            Direction::Back => -1,
            Direction::Forward => 1,
        }
    }
}

/// Next cursor value for a move in `direction` over a deck of `deck_len` cards.
///
/// Stays at 0 when moving back from the first card and at `deck_len` when
/// moving forward from the finished position. The result never exceeds
/// `deck_len`.
#[must_use]
pub fn advance(cursor: usize, direction: Direction, deck_len: usize) -> usize {
    match direction {
        Direction::Back => cursor.saturating_sub(1),
        Direction::Forward => cursor.saturating_add(1).min(deck_len),
    }
}
