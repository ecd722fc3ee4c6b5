mod flashcards_vm;
mod study_set_vm;

pub use flashcards_vm::{
    CardFaceVm, CardSide, CompletionVm, FlashcardsIntent, FlashcardsOutcome, FlashcardsVm,
    FollowUpVm, animation_class,
};
pub use study_set_vm::{
    StudySetDetailVm, StudySetListItemVm, TermRowVm, map_study_set_detail, map_study_set_list,
};
