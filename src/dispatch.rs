//! Request dispatch: one operation per user action.
//!
//! Every operation follows the same shape: validate local input, raise the
//! loading flag, issue exactly one request, fold the envelope into an
//! [`Outcome`], and lower the flag on every path — the guard lowers it on
//! drop, so even a panic between raise and render leaves it cleared.
//!
//! Each dispatch is stamped with a monotonically increasing token. The
//! presentation applies an outcome only when nothing newer has been applied,
//! so a slow response can never clobber the results of a later action.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::{debug, error};

use crate::book::{BookRecord, DEFAULT_COUNT, RecommendRequest, SearchCriteria};
use crate::client::Catalog;

// ---------------------------------------------------------------------------
// Loading indicator
// ---------------------------------------------------------------------------

/// Shared, non-stacking loading indicator. Raising while already raised is
/// idempotent; there is no counter.
#[derive(Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn raise(&self) -> LoadingGuard {
        self.0.store(true, Ordering::SeqCst);
        LoadingGuard(self.clone())
    }
}

/// Lowers the flag when dropped.
struct LoadingGuard(LoadingFlag);

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.0.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Visual severity of a notice. Selects the border treatment only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// What a dispatched operation produced for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A result set with its caption, rendered as cards in input order.
    Books {
        caption: String,
        books: Vec<BookRecord>,
    },
    /// A single informational or error notice replacing prior content.
    Notice { severity: Severity, text: String },
}

impl Outcome {
    fn notice(severity: Severity, text: impl Into<String>) -> Self {
        Outcome::Notice {
            severity,
            text: text.into(),
        }
    }
}

/// A dispatched outcome stamped with its request token.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub token: u64,
    pub outcome: Outcome,
}

/// Genre shortcuts with fixed captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreShortcut {
    Romance,
    Fantasy,
}

impl GenreShortcut {
    pub fn genre(self) -> &'static str {
        match self {
            GenreShortcut::Romance => "Romance",
            GenreShortcut::Fantasy => "Fantasy",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            GenreShortcut::Romance => "Romantic Reads",
            GenreShortcut::Fantasy => "Fantasy Adventures",
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Orchestrates catalog operations against any [`Catalog`] backend.
pub struct Dispatcher<C> {
    catalog: C,
    loading: LoadingFlag,
    sequence: AtomicU64,
}

impl<C: Catalog> Dispatcher<C> {
    pub fn new(catalog: C, loading: LoadingFlag) -> Self {
        Self {
            catalog,
            loading,
            sequence: AtomicU64::new(0),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    fn next_token(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Free-text and/or genre search. Both blank is a validation failure:
    /// an informational notice, no request.
    pub fn search(&self, criteria: &SearchCriteria) -> Dispatch {
        let token = self.next_token();
        if criteria.is_blank() {
            return Dispatch {
                token,
                outcome: Outcome::notice(
                    Severity::Info,
                    "Please enter a search term or select a genre",
                ),
            };
        }

        let _guard = self.loading.raise();
        debug!(query = ?criteria.query(), genre = ?criteria.genre(), "searching catalog");
        let outcome = match self.catalog.search(criteria) {
            Ok(envelope) if envelope.success => Outcome::Books {
                caption: format!("Search Results ({} found)", envelope.count),
                books: envelope.results,
            },
            Ok(envelope) => {
                debug!(error = ?envelope.error, "search reported failure");
                Outcome::notice(Severity::Error, "No books found")
            }
            Err(e) => {
                error!(error = %e, "search request failed");
                Outcome::notice(Severity::Error, "Error searching books. Please try again.")
            }
        };
        Dispatch { token, outcome }
    }

    /// Similarity recommendations for a favorite title. A blank title is a
    /// validation failure: an informational notice, no request.
    pub fn recommend_by_title(&self, title: &str) -> Dispatch {
        let token = self.next_token();
        let title = title.trim();
        if title.is_empty() {
            return Dispatch {
                token,
                outcome: Outcome::notice(Severity::Info, "Enter a book title"),
            };
        }

        let _guard = self.loading.raise();
        debug!(title, "requesting recommendations");
        let request = RecommendRequest::by_title(title);
        let outcome = match self.catalog.recommend(&request) {
            Ok(envelope) if envelope.success => {
                let based_on = envelope.based_on.unwrap_or_else(|| title.to_string());
                Outcome::Books {
                    caption: format!("Recommendations based on \"{based_on}\""),
                    books: envelope.recommendations,
                }
            }
            Ok(envelope) => {
                debug!(error = ?envelope.error, "recommendation reported failure");
                Outcome::notice(
                    Severity::Error,
                    "Could not find recommendations. Please try another book.",
                )
            }
            Err(e) => {
                error!(error = %e, "recommendation request failed");
                Outcome::notice(
                    Severity::Error,
                    "Error getting recommendations. Please try again.",
                )
            }
        };
        Dispatch { token, outcome }
    }

    /// Top-rated listing: a recommendation request with no title.
    pub fn top_rated(&self) -> Dispatch {
        self.recommend_listing(RecommendRequest::top(), "Top Rated Books")
    }

    /// Fixed-genre listing shortcut.
    pub fn genre_shortcut(&self, shortcut: GenreShortcut) -> Dispatch {
        self.recommend_listing(
            RecommendRequest::by_genre(shortcut.genre()),
            shortcut.caption(),
        )
    }

    fn recommend_listing(&self, request: RecommendRequest, caption: &str) -> Dispatch {
        let token = self.next_token();
        let _guard = self.loading.raise();
        debug!(genre = ?request.genre, caption, "requesting listing");
        let outcome = match self.catalog.recommend(&request) {
            Ok(envelope) if envelope.success => Outcome::Books {
                caption: caption.to_string(),
                books: envelope.recommendations,
            },
            Ok(envelope) => {
                debug!(error = ?envelope.error, "listing reported failure");
                Outcome::notice(Severity::Error, "Error loading books. Please try again.")
            }
            Err(e) => {
                error!(error = %e, "listing request failed");
                Outcome::notice(Severity::Error, "Error loading books. Please try again.")
            }
        };
        Dispatch { token, outcome }
    }

    /// Random sampling from the catalog.
    pub fn random(&self) -> Dispatch {
        let token = self.next_token();
        let _guard = self.loading.raise();
        debug!("requesting random books");
        let outcome = match self.catalog.random(DEFAULT_COUNT) {
            Ok(envelope) if envelope.success => Outcome::Books {
                caption: "Random Books Just For You".to_string(),
                books: envelope.books,
            },
            Ok(envelope) => {
                debug!(error = ?envelope.error, "random sample reported failure");
                Outcome::notice(Severity::Error, "Error loading books. Please try again.")
            }
            Err(e) => {
                error!(error = %e, "random request failed");
                Outcome::notice(Severity::Error, "Error loading books. Please try again.")
            }
        };
        Dispatch { token, outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::{GenresEnvelope, RandomEnvelope, RecommendEnvelope, SearchEnvelope};
    use crate::error::{ClientError, ClientResult};
    use std::cell::Cell;

    /// Stub backend with canned responses and a request counter.
    struct StubCatalog {
        calls: Cell<usize>,
        fail_transport: bool,
        success: bool,
        books: Vec<BookRecord>,
        based_on: Option<String>,
    }

    impl StubCatalog {
        fn returning(books: Vec<BookRecord>) -> Self {
            Self {
                calls: Cell::new(0),
                fail_transport: false,
                success: true,
                books,
                based_on: None,
            }
        }

        fn failing_transport() -> Self {
            Self {
                fail_transport: true,
                ..Self::returning(Vec::new())
            }
        }

        fn unsuccessful() -> Self {
            Self {
                success: false,
                ..Self::returning(Vec::new())
            }
        }

        fn check(&self) -> ClientResult<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_transport {
                Err(ClientError::Request {
                    message: "connection refused".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl Catalog for StubCatalog {
        fn genres(&self) -> ClientResult<GenresEnvelope> {
            self.check()?;
            Ok(GenresEnvelope {
                success: self.success,
                genres: vec!["Fantasy".into(), "Romance".into()],
                error: None,
            })
        }

        fn search(&self, _criteria: &SearchCriteria) -> ClientResult<SearchEnvelope> {
            self.check()?;
            Ok(SearchEnvelope {
                success: self.success,
                count: self.books.len(),
                results: self.books.clone(),
                error: None,
            })
        }

        fn recommend(&self, _request: &RecommendRequest) -> ClientResult<RecommendEnvelope> {
            self.check()?;
            Ok(RecommendEnvelope {
                success: self.success,
                recommendations: self.books.clone(),
                based_on: self.based_on.clone(),
                error: None,
            })
        }

        fn random(&self, _count: usize) -> ClientResult<RandomEnvelope> {
            self.check()?;
            Ok(RandomEnvelope {
                success: self.success,
                books: self.books.clone(),
                error: None,
            })
        }
    }

    fn book(title: &str) -> BookRecord {
        serde_json::from_str(&format!(r#"{{"title": "{title}", "rating": "4.5"}}"#)).unwrap()
    }

    fn dispatcher(stub: StubCatalog) -> Dispatcher<StubCatalog> {
        Dispatcher::new(stub, LoadingFlag::new())
    }

    #[test]
    fn blank_search_short_circuits_without_request() {
        let d = dispatcher(StubCatalog::returning(vec![book("Dune")]));
        let dispatch = d.search(&SearchCriteria::default());

        assert_eq!(d.catalog().calls.get(), 0);
        assert_eq!(
            dispatch.outcome,
            Outcome::Notice {
                severity: Severity::Info,
                text: "Please enter a search term or select a genre".into(),
            }
        );
        assert!(!d.loading().is_loading());
    }

    #[test]
    fn blank_title_short_circuits_without_request() {
        let d = dispatcher(StubCatalog::returning(vec![book("Dune")]));
        let dispatch = d.recommend_by_title("   ");

        assert_eq!(d.catalog().calls.get(), 0);
        assert_eq!(
            dispatch.outcome,
            Outcome::Notice {
                severity: Severity::Info,
                text: "Enter a book title".into(),
            }
        );
    }

    #[test]
    fn search_caption_reports_server_count() {
        let d = dispatcher(StubCatalog::returning(vec![book("Dune"), book("Hyperion")]));
        let criteria = SearchCriteria {
            query: Some("space".into()),
            genre: None,
        };
        let dispatch = d.search(&criteria);

        match dispatch.outcome {
            Outcome::Books { caption, books } => {
                assert_eq!(caption, "Search Results (2 found)");
                assert_eq!(books.len(), 2);
                assert_eq!(books[0].title, "Dune");
                assert_eq!(books[1].title, "Hyperion");
            }
            other => panic!("expected books, got {other:?}"),
        }
    }

    #[test]
    fn recommend_caption_uses_server_echoed_title() {
        let mut stub = StubCatalog::returning(vec![book("Foundation")]);
        stub.based_on = Some("Dune".into());
        let d = dispatcher(stub);
        let dispatch = d.recommend_by_title("dune");

        match dispatch.outcome {
            Outcome::Books { caption, books } => {
                assert_eq!(caption, "Recommendations based on \"Dune\"");
                assert_eq!(books.len(), 1);
            }
            other => panic!("expected books, got {other:?}"),
        }
    }

    #[test]
    fn fixed_captions_for_shortcuts() {
        let d = dispatcher(StubCatalog::returning(vec![book("Dune")]));
        for (dispatch, expected) in [
            (d.top_rated(), "Top Rated Books"),
            (d.genre_shortcut(GenreShortcut::Romance), "Romantic Reads"),
            (d.genre_shortcut(GenreShortcut::Fantasy), "Fantasy Adventures"),
            (d.random(), "Random Books Just For You"),
        ] {
            match dispatch.outcome {
                Outcome::Books { caption, .. } => assert_eq!(caption, expected),
                other => panic!("expected books, got {other:?}"),
            }
        }
    }

    #[test]
    fn transport_failure_surfaces_error_notice() {
        let d = dispatcher(StubCatalog::failing_transport());
        let criteria = SearchCriteria {
            query: Some("dune".into()),
            genre: None,
        };
        let dispatch = d.search(&criteria);

        assert_eq!(
            dispatch.outcome,
            Outcome::Notice {
                severity: Severity::Error,
                text: "Error searching books. Please try again.".into(),
            }
        );
        assert!(!d.loading().is_loading());
    }

    #[test]
    fn unsuccessful_envelope_surfaces_specific_message() {
        let d = dispatcher(StubCatalog::unsuccessful());
        let dispatch = d.recommend_by_title("Dune");

        assert_eq!(
            dispatch.outcome,
            Outcome::Notice {
                severity: Severity::Error,
                text: "Could not find recommendations. Please try another book.".into(),
            }
        );
        assert!(!d.loading().is_loading());
    }

    #[test]
    fn loading_flag_lowered_after_every_path() {
        for stub in [
            StubCatalog::returning(vec![book("Dune")]),
            StubCatalog::failing_transport(),
            StubCatalog::unsuccessful(),
        ] {
            let d = dispatcher(stub);
            d.random();
            assert!(!d.loading().is_loading());
        }
    }

    #[test]
    fn tokens_increase_monotonically() {
        let d = dispatcher(StubCatalog::returning(Vec::new()));
        let first = d.random().token;
        let second = d.top_rated().token;
        let third = d.search(&SearchCriteria::default()).token;
        assert!(first < second && second < third);
    }
}
