use services::FlashcardsGame;
use study_core::model::StudySetId;
use study_core::study::{
    AnimationIntent, FollowUp, FollowUpOutcome, SessionController, Swipe, Tally,
};

/// CSS class that plays the transition for an intent.
#[must_use]
pub fn animation_class(intent: AnimationIntent) -> &'static str {
    match intent {
        AnimationIntent::SlideLeft => "card--slide-left",
        AnimationIntent::SlideRight => "card--slide-right",
        AnimationIntent::MarkTough => "card--mark-tough",
        AnimationIntent::MarkKnown => "card--mark-known",
    }
}

/// User-level actions on the flashcards page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashcardsIntent {
    Swipe(Swipe),
    Flip,
    SetSorting(bool),
    Restart,
    FollowUp(FollowUp),
}

/// What the page should do after an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashcardsOutcome {
    Stay,
    /// Input arrived after the pass was over; nothing changed.
    Ignored,
    Leave,
}

/// Which side of the current card is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSide {
    Term,
    Definition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFaceVm {
    pub text: String,
    pub side: CardSide,
    /// Class list for the card element, including the animation class.
    pub class: String,
    /// Changes on every emitted animation so the element is re-created and
    /// the CSS animation restarts even when the class repeats.
    pub key: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowUpVm {
    pub follow_up: FollowUp,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub headline: String,
    pub tally: Tally,
    pub primary: FollowUpVm,
    pub secondary: FollowUpVm,
}

/// Presentation state for one flashcards game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardsVm {
    study_set_id: StudySetId,
    title: String,
    editable: bool,
    controller: SessionController,
    side: CardSide,
}

impl FlashcardsVm {
    #[must_use]
    pub fn new(game: FlashcardsGame) -> Self {
        Self {
            study_set_id: game.study_set_id,
            title: game.title,
            editable: game.editable,
            controller: game.controller,
            side: CardSide::Term,
        }
    }

    #[must_use]
    pub fn study_set_id(&self) -> StudySetId {
        self.study_set_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn editable(&self) -> bool {
        self.editable
    }

    #[must_use]
    pub fn sorting_enabled(&self) -> bool {
        self.controller.sorting_enabled()
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.controller.is_completed()
    }

    #[must_use]
    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// `"2 / 10"`, one-based. Empty once the pass is over.
    #[must_use]
    pub fn progress_label(&self) -> String {
        let progress = self.controller.progress();
        if progress.position >= progress.total {
            return String::new();
        }
        format!("{} / {}", progress.position + 1, progress.total)
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.controller.progress().percent()
    }

    /// Labels for the two directional buttons under the current mode.
    #[must_use]
    pub fn button_labels(&self) -> (&'static str, &'static str) {
        if self.sorting_enabled() {
            ("Still learning", "Know")
        } else {
            ("Previous", "Next")
        }
    }

    #[must_use]
    pub fn card_face(&self) -> Option<CardFaceVm> {
        let card = self.controller.current_card()?;
        let (text, side_class) = match self.side {
            CardSide::Term => (card.term(), "card card--front"),
            CardSide::Definition => (card.definition(), "card card--back"),
        };
        let animation = self.controller.last_animation();
        let class = match animation {
            Some(animation) => format!("{side_class} {}", animation_class(animation.intent)),
            None => side_class.to_string(),
        };
        let key = match animation {
            Some(animation) => format!("{}-{}", card.id(), animation.seq),
            None => card.id().to_string(),
        };
        Some(CardFaceVm {
            text: text.to_string(),
            side: self.side,
            class,
            key,
        })
    }

    #[must_use]
    pub fn completion(&self) -> Option<CompletionVm> {
        let completion = self.controller.completion()?;
        Some(CompletionVm {
            headline: completion_headline(completion.tally),
            tally: completion.tally,
            primary: follow_up_vm(completion.primary),
            secondary: follow_up_vm(completion.secondary),
        })
    }

    /// Apply one intent. A new card always starts term side up.
    pub fn apply(&mut self, intent: FlashcardsIntent) -> FlashcardsOutcome {
        match intent {
            FlashcardsIntent::Swipe(swipe) => match self.controller.handle_input(swipe) {
                Ok(_) => {
                    self.side = CardSide::Term;
                    FlashcardsOutcome::Stay
                }
                Err(_) => FlashcardsOutcome::Ignored,
            },
            FlashcardsIntent::Flip => {
                if self.controller.current_card().is_none() {
                    return FlashcardsOutcome::Ignored;
                }
                self.side = match self.side {
                    CardSide::Term => CardSide::Definition,
                    CardSide::Definition => CardSide::Term,
                };
                FlashcardsOutcome::Stay
            }
            FlashcardsIntent::SetSorting(enabled) => {
                self.controller.set_sorting_enabled(enabled);
                FlashcardsOutcome::Stay
            }
            FlashcardsIntent::Restart => {
                self.controller.reset_session();
                self.side = CardSide::Term;
                FlashcardsOutcome::Stay
            }
            FlashcardsIntent::FollowUp(follow_up) => {
                match self.controller.apply_follow_up(follow_up) {
                    FollowUpOutcome::Resumed => {
                        self.side = CardSide::Term;
                        FlashcardsOutcome::Stay
                    }
                    FollowUpOutcome::Leave => FlashcardsOutcome::Leave,
                }
            }
        }
    }
}

fn completion_headline(tally: Tally) -> String {
    if tally.total == 0 {
        "This set has no cards yet.".to_string()
    } else if tally.tough == 0 {
        format!("You know all {} terms.", tally.total)
    } else if tally.tough > tally.total {
        format!("You marked {} cards as tough across your passes.", tally.tough)
    } else {
        format!("You're still learning {} of {} terms.", tally.tough, tally.total)
    }
}

fn follow_up_vm(follow_up: FollowUp) -> FollowUpVm {
    let (title, description) = match follow_up {
        FollowUp::ReviewTough { count } => (
            "Review the tough terms".to_string(),
            format!("Review flashcards again with the {count} terms you're still learning."),
        ),
        FollowUp::Restart { total } => (
            "Reset flashcards".to_string(),
            format!("Study all {total} terms from the beginning."),
        ),
        FollowUp::Leave => (
            "Back to set".to_string(),
            "Get back to the study set.".to_string(),
        ),
    };
    FollowUpVm {
        follow_up,
        title,
        description,
    }
}
