use thiserror::Error;

use crate::model::Flashcard;

use super::completion::{Completion, FollowUp, FollowUpOutcome, Progress, Tally};
use super::deck::Deck;
use super::navigation::advance;
use super::sorting::{AnimationIntent, SideEffect, Swipe, resolve};
use super::state::SessionState;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudyError {
    #[error("study session already completed")]
    Completed,
}

//
// ─── POLICY & STATUS ───────────────────────────────────────────────────────────
//

/// What happens to the tough list when a tough-card review pass starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToughReviewPolicy {
    /// Keep the list; cards marked during the review are appended to it.
    #[default]
    Accumulate,
    /// Empty the list so the review pass collects a fresh one.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Completed,
}

/// The most recent animation, numbered so identical intents can be replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Animation {
    pub intent: AnimationIntent,
    pub seq: u64,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Drives one flashcards session.
///
/// The controller is the only writer of its `SessionState`. Each directional
/// input resolves to an action through the sorting policy, applies the
/// action's side effect, emits an `AnimationIntent` and then moves the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionController {
    original: Deck,
    state: SessionState,
    sorting_enabled: bool,
    tough_policy: ToughReviewPolicy,
    last_animation: Option<Animation>,
    next_seq: u64,
}

impl SessionController {
    #[must_use]
    pub fn new(deck: impl Into<Deck>) -> Self {
        let original = deck.into();
        Self {
            state: SessionState::new(original.clone()),
            original,
            sorting_enabled: false,
            tough_policy: ToughReviewPolicy::default(),
            last_animation: None,
            next_seq: 0,
        }
    }

    #[must_use]
    pub fn with_tough_review_policy(mut self, policy: ToughReviewPolicy) -> Self {
        self.tough_policy = policy;
        self
    }

    #[must_use]
    pub fn with_sorting(mut self, enabled: bool) -> Self {
        self.sorting_enabled = enabled;
        self
    }

    // Accessors
    #[must_use]
    pub fn original_deck(&self) -> &Deck {
        &self.original
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        self.state.deck()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.state.current_card()
    }

    #[must_use]
    pub fn tough_cards(&self) -> &[Flashcard] {
        self.state.tough_cards()
    }

    #[must_use]
    pub fn sorting_enabled(&self) -> bool {
        self.sorting_enabled
    }

    #[must_use]
    pub fn tough_review_policy(&self) -> ToughReviewPolicy {
        self.tough_policy
    }

    #[must_use]
    pub fn last_animation(&self) -> Option<Animation> {
        self.last_animation
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.state.is_finished() {
            SessionStatus::Completed
        } else {
            SessionStatus::Active
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status() == SessionStatus::Completed
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            position: self.state.cursor(),
            total: self.state.deck().len(),
        }
    }

    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally {
            tough: self.state.tough_cards().len(),
            total: self.original.len(),
        }
    }

    /// Completion screen data, available only once the pass is finished.
    #[must_use]
    pub fn completion(&self) -> Option<Completion> {
        self.is_completed()
            .then(|| Completion::from_tally(self.tally()))
    }

    /// Applies one directional input.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Completed` when the pass is already finished; the
    /// session is left untouched and no animation is emitted.
    pub fn handle_input(&mut self, swipe: Swipe) -> Result<AnimationIntent, StudyError> {
        if self.is_completed() {
            return Err(StudyError::Completed);
        }

        let action = resolve(self.sorting_enabled, swipe);
        if let Some(SideEffect::MarkTough) = action.side_effect {
            self.state.mark_tough();
        }
        self.emit(action.animation);

        let next = advance(self.state.cursor(), action.navigation, self.state.deck().len());
        self.state.set_cursor(next);

        Ok(action.animation)
    }

    /// Starts the original deck over and forgets tough cards. Emits no animation.
    pub fn reset_session(&mut self) {
        self.state.reset(self.original.clone());
        self.last_animation = None;
    }

    /// Studies a snapshot of the tough cards, from the first one.
    ///
    /// What happens to the tough list itself follows `ToughReviewPolicy`.
    pub fn review_tough(&mut self) {
        let snapshot: Deck = self.state.tough_cards().iter().cloned().collect();
        if self.tough_policy == ToughReviewPolicy::Replace {
            self.state.clear_tough();
        }
        self.state.replace_deck(snapshot);
        self.last_animation = None;
    }

    /// Takes effect on the next input only.
    pub fn set_sorting_enabled(&mut self, enabled: bool) {
        self.sorting_enabled = enabled;
    }

    /// Runs a completion-screen choice. `Leave` is returned to the host untouched.
    pub fn apply_follow_up(&mut self, follow_up: FollowUp) -> FollowUpOutcome {
        match follow_up {
            FollowUp::ReviewTough { .. } => {
                self.review_tough();
                FollowUpOutcome::Resumed
            }
            FollowUp::Restart { .. } => {
                self.reset_session();
                FollowUpOutcome::Resumed
            }
            FollowUp::Leave => FollowUpOutcome::Leave,
        }
    }

    fn emit(&mut self, intent: AnimationIntent) {
        self.last_animation = Some(Animation {
            intent,
            seq: self.next_seq,
        });
        self.next_seq = self.next_seq.wrapping_add(1);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
