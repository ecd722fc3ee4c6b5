use crate::model::Flashcard;

use super::deck::Deck;

/// Deck, cursor and tough-card list of one study session.
///
/// Invariant: `cursor <= deck.len()`. `cursor == deck.len()` means the pass is
/// finished and there is no current card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    deck: Deck,
    cursor: usize,
    tough: Vec<Flashcard>,
}

impl SessionState {
    #[must_use]
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            cursor: 0,
            tough: Vec::new(),
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn tough_cards(&self) -> &[Flashcard] {
        &self.tough
    }

    /// The card under the cursor, or `None` once the pass is finished.
    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.deck.get(self.cursor)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.deck.len()
    }

    /// Starts over on `deck` with an empty tough list.
    pub fn reset(&mut self, deck: Deck) {
        self.deck = deck;
        self.cursor = 0;
        self.tough.clear();
    }

    /// Appends the current card to the tough list.
    ///
    /// Does nothing when there is no current card. Cards are not deduplicated.
    pub fn mark_tough(&mut self) {
        if let Some(card) = self.deck.get(self.cursor) {
            self.tough.push(card.clone());
        }
    }

    /// Swaps in a new deck at cursor 0 without touching the tough list.
    pub(crate) fn replace_deck(&mut self, deck: Deck) {
        self.deck = deck;
        self.cursor = 0;
    }

    pub(crate) fn clear_tough(&mut self) {
        self.tough.clear();
    }

    pub(crate) fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.deck.len());
    }
}
