//! # kitabu
//!
//! Terminal client for a remote book catalog: free-text and genre search,
//! title-based recommendations, fixed listings, and random sampling, all
//! rendered as cards.
//!
//! ## Architecture
//!
//! - **Config** (`config`): base-URL resolution, done once at startup
//! - **Wire types** (`book`): book records and per-endpoint envelopes
//! - **Client** (`client`): sync HTTP via `ureq`, behind the `Catalog` trait
//! - **Dispatch** (`dispatch`): one operation per user action, token-stamped
//! - **TUI** (`tui`): ratatui front end with the results pane
//!
//! ## Library usage
//!
//! ```no_run
//! use kitabu::book::SearchCriteria;
//! use kitabu::client::CatalogClient;
//! use kitabu::config::ApiConfig;
//! use kitabu::dispatch::{Dispatcher, LoadingFlag};
//!
//! let config = ApiConfig::resolve(None, "localhost");
//! let dispatcher = Dispatcher::new(CatalogClient::new(&config), LoadingFlag::new());
//! let dispatch = dispatcher.search(&SearchCriteria {
//!     query: Some("dune".into()),
//!     genre: None,
//! });
//! ```

pub mod book;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod tui;
