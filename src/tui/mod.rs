//! Interactive book-discovery TUI.
//!
//! Layout: header with a decorative sparkle row, a search form (free-text
//! input, genre selector, favorite-title input), the results pane, and a
//! status bar with the loading spinner and key hints.
//!
//! Startup wiring mirrors the dispatcher's operations one to one: Enter on
//! the search input searches, Enter on the title input asks for
//! recommendations, changing the genre selector searches immediately, and
//! shortcut keys cover the fixed listings.

pub mod pane;
pub mod widgets;

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use miette::IntoDiagnostic;
use tracing::warn;

use crate::book::SearchCriteria;
use crate::client::Catalog;
use crate::dispatch::{Dispatcher, GenreShortcut};
use pane::ResultsPane;
use widgets::{FormView, Sparkle, seed_sparkles};

/// Number of decorative particles seeded at startup.
pub const SPARKLE_COUNT: usize = 20;

/// Sentinel entry for "no genre filter" at the top of the selector.
const ALL_GENRES: &str = "All Genres";

/// Which form control receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Genre,
    Title,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::Genre,
            Focus::Genre => Focus::Title,
            Focus::Title => Focus::Search,
        }
    }
}

/// TUI application state.
pub struct BookTui<C> {
    dispatcher: Dispatcher<C>,
    pane: ResultsPane,
    search_input: String,
    title_input: String,
    genres: Vec<String>,
    genre_selected: usize,
    focus: Focus,
    sparkles: Vec<Sparkle>,
    started: Instant,
    should_quit: bool,
}

impl<C: Catalog> BookTui<C> {
    pub fn new(dispatcher: Dispatcher<C>) -> Self {
        Self {
            dispatcher,
            pane: ResultsPane::new(),
            search_input: String::new(),
            title_input: String::new(),
            genres: vec![ALL_GENRES.to_string()],
            genre_selected: 0,
            focus: Focus::Search,
            sparkles: seed_sparkles(),
            started: Instant::now(),
            should_quit: false,
        }
    }

    /// Run the TUI event loop.
    pub fn run(&mut self) -> miette::Result<()> {
        let mut terminal = ratatui::init();

        self.load_genres();

        loop {
            let elapsed = self.started.elapsed().as_secs_f64();
            let form = FormView {
                search_input: &self.search_input,
                title_input: &self.title_input,
                genres: &self.genres,
                genre_selected: self.genre_selected,
                focus: self.focus,
            };
            let loading = self.dispatcher.loading().is_loading();
            terminal
                .draw(|frame| {
                    widgets::render(frame, &form, &self.pane, loading, &self.sparkles, elapsed);
                })
                .into_diagnostic()?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100)).into_diagnostic()? {
                if let Event::Key(key) = event::read().into_diagnostic()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    self.handle_key(key.code, key.modifiers);
                }
            }
        }

        ratatui::restore();
        Ok(())
    }

    /// Populate the genre selector from the backend. Failure is logged and
    /// leaves the selector with only the "all genres" entry — not fatal.
    fn load_genres(&mut self) {
        match self.dispatcher.catalog().genres() {
            Ok(envelope) if envelope.success => self.genres.extend(envelope.genres),
            Ok(envelope) => {
                warn!(error = ?envelope.error, "genre list reported failure");
            }
            Err(e) => {
                warn!(error = %e, "failed to load genre list");
            }
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('t') => self.apply(self.dispatcher.top_rated()),
                KeyCode::Char('e') => {
                    self.apply(self.dispatcher.genre_shortcut(GenreShortcut::Romance));
                }
                KeyCode::Char('f') => {
                    self.apply(self.dispatcher.genre_shortcut(GenreShortcut::Fantasy));
                }
                KeyCode::Char('r') => self.apply(self.dispatcher.random()),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::Enter => match self.focus {
                Focus::Search | Focus::Genre => self.run_search(),
                Focus::Title => self.run_recommend(),
            },
            KeyCode::Left if self.focus == Focus::Genre => {
                self.genre_selected = self.genre_selected.saturating_sub(1);
                self.run_search();
            }
            KeyCode::Right if self.focus == Focus::Genre => {
                if self.genre_selected + 1 < self.genres.len() {
                    self.genre_selected += 1;
                }
                self.run_search();
            }
            KeyCode::Up => self.pane.scroll_by(-1),
            KeyCode::Down => self.pane.scroll_by(1),
            KeyCode::Backspace => {
                match self.focus {
                    Focus::Search => self.search_input.pop(),
                    Focus::Title => self.title_input.pop(),
                    Focus::Genre => None,
                };
            }
            KeyCode::Char(c) => match self.focus {
                Focus::Search => self.search_input.push(c),
                Focus::Title => self.title_input.push(c),
                Focus::Genre => {}
            },
            _ => {}
        }
    }

    fn selected_genre(&self) -> Option<String> {
        // Index 0 is the "all genres" sentinel, not a filter.
        (self.genre_selected > 0)
            .then(|| self.genres.get(self.genre_selected).cloned())
            .flatten()
    }

    fn run_search(&mut self) {
        let criteria = SearchCriteria {
            query: Some(self.search_input.clone()),
            genre: self.selected_genre(),
        };
        self.apply(self.dispatcher.search(&criteria));
    }

    fn run_recommend(&mut self) {
        let dispatch = self.dispatcher.recommend_by_title(&self.title_input);
        self.apply(dispatch);
    }

    fn apply(&mut self, dispatch: crate::dispatch::Dispatch) {
        self.pane.apply(dispatch);
    }
}
