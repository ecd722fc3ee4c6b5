use super::navigation::Direction;

/// Raw directional input: a swipe, an arrow key, or one of the two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swipe {
    Left,
    Right,
}

/// Visual transition the presentation layer should play for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationIntent {
    SlideLeft,
    SlideRight,
    MarkTough,
    MarkKnown,
}

impl AnimationIntent {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            AnimationIntent::SlideLeft => "slide-left",
            AnimationIntent::SlideRight => "slide-right",
            AnimationIntent::MarkTough => "mark-tough",
            AnimationIntent::MarkKnown => "mark-known",
        }
    }
}

/// State change to apply before moving the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    MarkTough,
}

/// What one input means under the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Action {
    pub animation: AnimationIntent,
    pub navigation: Direction,
    pub side_effect: Option<SideEffect>,
}

/// Maps a swipe to an action.
///
/// Without sorting the two inputs browse back and forth. With sorting both
/// inputs consume the current card and move forward: left files it as tough,
/// right as known.
#[must_use]
pub fn resolve(sorting_enabled: bool, swipe: Swipe) -> Action {
    match (sorting_enabled, swipe) {
        (false, Swipe::Left) => Action {
            animation: AnimationIntent::SlideLeft,
            navigation: Direction::Back,
            side_effect: None,
        },
        (false, Swipe::Right) => Action {
            animation: AnimationIntent::SlideRight,
            navigation: Direction::Forward,
            side_effect: None,
        },
        (true, Swipe::Left) => Action {
            animation: AnimationIntent::MarkTough,
            navigation: Direction::Forward,
            side_effect: Some(SideEffect::MarkTough),
        },
        (true, Swipe::Right) => Action {
            animation: AnimationIntent::MarkKnown,
            navigation: Direction::Forward,
            side_effect: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browsing_maps_to_slides() {
        let left = resolve(false, Swipe::Left);
        assert_eq!(left.animation, AnimationIntent::SlideLeft);
        assert_eq!(left.navigation, Direction::Back);
        assert_eq!(left.side_effect, None);

        let right = resolve(false, Swipe::Right);
        assert_eq!(right.animation, AnimationIntent::SlideRight);
        assert_eq!(right.navigation, Direction::Forward);
        assert_eq!(right.side_effect, None);
    }

    #[test]
    fn sorting_always_moves_forward() {
        let left = resolve(true, Swipe::Left);
        assert_eq!(left.animation, AnimationIntent::MarkTough);
        assert_eq!(left.navigation, Direction::Forward);
        assert_eq!(left.side_effect, Some(SideEffect::MarkTough));

        let right = resolve(true, Swipe::Right);
        assert_eq!(right.animation, AnimationIntent::MarkKnown);
        assert_eq!(right.navigation, Direction::Forward);
        assert_eq!(right.side_effect, None);
    }

    #[test]
    fn intent_names_are_kebab_case() {
        assert_eq!(AnimationIntent::MarkTough.name(), "mark-tough");
        assert_eq!(AnimationIntent::SlideRight.name(), "slide-right");
    }
}
