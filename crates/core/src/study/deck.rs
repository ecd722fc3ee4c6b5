use crate::model::Flashcard;

/// Ordered cards of one study pass. Order is study order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck(Vec<Flashcard>);

impl Deck {
    #[must_use]
    pub fn new(cards: Vec<Flashcard>) -> Self {
        Self(cards)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Flashcard> {
        self.0.get(index)
    }

    #[must_use]
    pub fn cards(&self) -> &[Flashcard] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flashcard> {
        self.0.iter()
    }
}

impl From<Vec<Flashcard>> for Deck {
    fn from(cards: Vec<Flashcard>) -> Self {
        Self(cards)
    }
}

impl FromIterator<Flashcard> for Deck {
    fn from_iter<I: IntoIterator<Item = Flashcard>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Flashcard;
    type IntoIter = std::slice::Iter<'a, Flashcard>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
