//! Results pane state: the single region search and recommendation outcomes
//! render into.
//!
//! Applying an outcome replaces prior content wholesale — cards are never
//! merged across calls. Stale dispatches (older token than the newest
//! applied) are dropped instead of rendered.

use crate::book::BookRecord;
use crate::dispatch::{Dispatch, Outcome, Severity};

/// A styled notice block. Severity selects the border color only.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

/// State behind the results region.
#[derive(Debug, Default)]
pub struct ResultsPane {
    caption: String,
    books: Vec<BookRecord>,
    notice: Option<Notice>,
    visible: bool,
    scroll: usize,
    newest_token: u64,
}

impl ResultsPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a dispatched outcome. Returns false when the dispatch is stale,
    /// i.e. an outcome with a newer token has already been applied.
    pub fn apply(&mut self, dispatch: Dispatch) -> bool {
        if dispatch.token < self.newest_token {
            return false;
        }
        self.newest_token = dispatch.token;

        match dispatch.outcome {
            Outcome::Books { caption, books } => {
                if books.is_empty() {
                    self.set_notice(Severity::Info, "No books found".to_string());
                    self.visible = false;
                } else {
                    self.caption = caption;
                    self.books = books;
                    self.notice = None;
                    self.visible = true;
                    self.scroll = 0; // bring the fresh results into view
                }
            }
            Outcome::Notice { severity, text } => {
                self.set_notice(severity, text);
            }
        }
        true
    }

    fn set_notice(&mut self, severity: Severity, text: String) {
        self.caption.clear();
        self.books.clear();
        self.notice = Some(Notice { severity, text });
        self.visible = true;
        self.scroll = 0;
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether the card region is shown. Notices render independently.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll the card list, clamped to the number of cards.
    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.books.len().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(delta).min(max);
    }
}
