//! Screen switching for the lost-and-found service.
//!
//! The service has a handful of flat screens. Every (screen, event) pair has
//! a defined outcome; anything not listed in [`transition`] lands back on
//! [`Screen::Landing`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Screens of the lost-and-found service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Landing,
    Form,
    Search,
    SearchResults,
    Success,
    NoResults,
}

impl Screen {
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Landing,
            Screen::Form,
            Screen::Search,
            Screen::SearchResults,
            Screen::Success,
            Screen::NoResults,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Form => "form",
            Self::Search => "search",
            Self::SearchResults => "search-results",
            Self::Success => "success",
            Self::NoResults => "no-results",
        }
    }

    /// Resolves a screen name. Unknown names resolve to the landing screen.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "form" => Self::Form,
            "search" => Self::Search,
            "search-results" => Self::SearchResults,
            "success" => Self::Success,
            "no-results" => Self::NoResults,
            _ => Self::Landing,
        }
    }

    pub fn apply(self, event: Event) -> Self {
        transition(self, event)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation events. `SubmitCompleted` and `SearchCompleted` are raised by
/// the simulated backend when its delay elapses; the rest are button clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Event {
    /// "Подать заявку" on the landing screen.
    ApplyNow,
    /// "Найти вещь" on the landing screen.
    OpenSearch,
    /// Any "back to main page" control.
    Back,
    SubmitCompleted,
    SearchCompleted,
}

impl Event {
    pub fn all() -> &'static [Event] {
        &[
            Event::ApplyNow,
            Event::OpenSearch,
            Event::Back,
            Event::SubmitCompleted,
            Event::SearchCompleted,
        ]
    }
}

/// The full transition table.
pub fn transition(from: Screen, event: Event) -> Screen {
    use Event::*;
    use Screen::*;

    match (from, event) {
        (_, SubmitCompleted) => Success,
        (_, SearchCompleted) => SearchResults,

        (Landing, ApplyNow) => Form,
        (Landing, OpenSearch) => Search,

        (Form | Search | SearchResults | Success | NoResults, Back) => Landing,

        (Landing, Back)
        | (Form | Search | SearchResults | Success | NoResults, ApplyNow | OpenSearch) => Landing,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn landing_buttons_open_form_and_search() {
        assert_eq!(transition(Screen::Landing, Event::ApplyNow), Screen::Form);
        assert_eq!(transition(Screen::Landing, Event::OpenSearch), Screen::Search);
    }

    #[test]
    fn back_from_every_screen_returns_to_landing() {
        for screen in Screen::all() {
            assert_eq!(transition(*screen, Event::Back), Screen::Landing, "from {screen}");
        }
    }

    #[test]
    fn completions_apply_regardless_of_current_screen() {
        for screen in Screen::all() {
            assert_eq!(transition(*screen, Event::SubmitCompleted), Screen::Success);
            assert_eq!(transition(*screen, Event::SearchCompleted), Screen::SearchResults);
        }
    }

    #[test]
    fn table_is_total_and_undefined_pairs_fall_back_to_landing() {
        let defined = [
            (Screen::Landing, Event::ApplyNow),
            (Screen::Landing, Event::OpenSearch),
        ];

        for screen in Screen::all() {
            for event in Event::all() {
                let next = transition(*screen, *event);
                let expected = match event {
                    Event::SubmitCompleted => Screen::Success,
                    Event::SearchCompleted => Screen::SearchResults,
                    _ if defined.contains(&(*screen, *event)) => next,
                    _ => Screen::Landing,
                };
                assert_eq!(next, expected, "{screen} + {event:?}");
            }
        }
    }

    #[test]
    fn screen_names_round_trip_and_unknown_names_fall_back() {
        for screen in Screen::all() {
            assert_eq!(Screen::parse(screen.as_str()), *screen);
        }
        assert_eq!(Screen::parse("settings"), Screen::Landing);
        assert_eq!(Screen::parse(""), Screen::Landing);
    }

    #[test]
    fn no_results_is_only_reachable_by_name() {
        for screen in Screen::all() {
            for event in Event::all() {
                assert_ne!(transition(*screen, *event), Screen::NoResults);
            }
        }
        assert_eq!(Screen::parse("no-results"), Screen::NoResults);
    }
}
