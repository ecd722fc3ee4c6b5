use study_core::model::{Flashcard, StudySet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudySetListItemVm {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
}

#[must_use]
pub fn map_study_set_list(sets: &[StudySet]) -> Vec<StudySetListItemVm> {
    sets.iter()
        .map(|set| StudySetListItemVm {
            id: set.id().to_string(),
            title: set.title().to_string(),
            description: set.description().map(str::to_owned),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermRowVm {
    pub id: String,
    pub term: String,
    pub definition: String,
}

/// The study set page: header, capability and the term list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudySetDetailVm {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub editable: bool,
    pub term_count_label: String,
    pub terms: Vec<TermRowVm>,
}

#[must_use]
pub fn map_study_set_detail(set: &StudySet, cards: &[Flashcard], editable: bool) -> StudySetDetailVm {
    let term_count_label = match cards.len() {
        1 => "1 term".to_string(),
        n => format!("{n} terms"),
    };
    StudySetDetailVm {
        id: set.id().to_string(),
        title: set.title().to_string(),
        description: set.description().map(str::to_owned),
        editable,
        term_count_label,
        terms: cards
            .iter()
            .map(|card| TermRowVm {
                id: card.id().to_string(),
                term: card.term().to_string(),
                definition: card.definition().to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use study_core::model::{FlashcardId, StudySetId, UserId};
    use study_core::time::fixed_now;

    #[test]
    fn detail_labels_term_count() {
        let set = StudySet::new(StudySetId::generate(), UserId::generate(), "Set", None, fixed_now())
            .unwrap();
        let one = vec![Flashcard::new(FlashcardId::new(1), set.id(), "a", "b", 0)];

        let vm = map_study_set_detail(&set, &one, true);
        assert_eq!(vm.term_count_label, "1 term");
        assert!(vm.editable);
        assert_eq!(vm.terms[0].id, "1");

        let vm = map_study_set_detail(&set, &[], false);
        assert_eq!(vm.term_count_label, "0 terms");
        assert!(vm.terms.is_empty());
    }
}
