/// Final counts shown when a pass is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    /// Cards marked tough (duplicates counted).
    pub tough: usize,
    /// Cards in the original deck.
    pub total: usize,
}

/// A follow-up the learner can pick on the completion screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    /// Study only the cards marked tough.
    ReviewTough { count: usize },
    /// Study the original deck again from the first card.
    Restart { total: usize },
    /// Hand control back to the host (e.g. return to the study set page).
    Leave,
}

/// Result of applying a follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpOutcome {
    /// The controller started a new pass.
    Resumed,
    /// The host should navigate away; the controller did nothing.
    Leave,
}

/// Everything the completion view needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub tally: Tally,
    pub primary: FollowUp,
    pub secondary: FollowUp,
}

impl Completion {
    /// Offers a tough-card review when there is something to review,
    /// otherwise the way out; restarting is always the second choice.
    #[must_use]
    pub fn from_tally(tally: Tally) -> Self {
        let primary = if tally.tough > 0 {
            FollowUp::ReviewTough { count: tally.tough }
        } else {
            FollowUp::Leave
        };
        Self {
            tally,
            primary,
            secondary: FollowUp::Restart { total: tally.total },
        }
    }
}

/// Cursor position within the active deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub position: usize,
    pub total: usize,
}

impl Progress {
    /// Whole-number percentage in `0..=100`; an empty deck reports 0.
    #[must_use]
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.position.min(self.total) * 100 / self.total;
        u8::try_from(pct).unwrap_or(100)
    }
}
