//! Flashcards study session.
//!
//! A session walks a deck card by card. Left/right input either browses the
//! deck or, in sorting mode, files each card as tough or known. Only
//! `SessionController` mutates the session; everything here is synchronous and
//! free of I/O.

mod completion;
mod controller;
mod deck;
mod navigation;
mod sorting;
mod state;

pub use completion::{Completion, FollowUp, FollowUpOutcome, Progress, Tally};
pub use controller::{Animation, SessionController, SessionStatus, StudyError, ToughReviewPolicy};
pub use deck::Deck;
pub use navigation::{Direction, advance};
pub use sorting::{Action, AnimationIntent, SideEffect, Swipe, resolve};
pub use state::SessionState;
