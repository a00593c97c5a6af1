//! Catalog wire types: book records, request shapes, response envelopes.
//!
//! Each endpoint carries its results under a different field name, so each
//! gets its own envelope struct, decoded at the boundary. Result fields are
//! only meaningful when `success` is true; on failure the backend omits them
//! and reports an `error` string instead, so everything defaults.

use serde::{Deserialize, Deserializer, Serialize};

/// Number of books requested by recommendations and shortcuts.
pub const DEFAULT_COUNT: usize = 6;

// ---------------------------------------------------------------------------
// Book record
// ---------------------------------------------------------------------------

/// A catalog item, passed through from the backend unmodified except for
/// rating decoding. Missing fields render as empty text / zero rating.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: f32,
    #[serde(default)]
    pub summary: String,
}

impl BookRecord {
    /// Star-glyph count for display: the rating rounded to whole stars.
    pub fn stars(&self) -> usize {
        self.rating.round().max(0.0) as usize
    }

    /// Fixed two-decimal rating display out of 5, e.g. `4.50/5`.
    pub fn rating_display(&self) -> String {
        format!("{:.2}/5", self.rating)
    }
}

/// Ratings arrive as JSON numbers or strings depending on the backend's data
/// source. Anything unparseable, null, or absent decodes as 0.
fn lenient_rating<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0) as f32,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// Inputs for a catalog search. At least one of the two must be non-blank
/// for a search to proceed; the dispatcher validates before any request.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub query: Option<String>,
    pub genre: Option<String>,
}

impl SearchCriteria {
    /// Trimmed free-text query, `None` when blank.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Genre filter, `None` when blank.
    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.is_empty())
    }

    /// True when neither field carries anything to search for.
    pub fn is_blank(&self) -> bool {
        self.query().is_none() && self.genre().is_none()
    }
}

/// Body for `POST /api/recommend`. A present `title` asks for
/// similarity-based recommendations; absent, the request degrades to a top
/// listing of the genre (or overall when `genre` is also absent).
#[derive(Debug, Clone, Serialize)]
pub struct RecommendRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub count: usize,
}

impl RecommendRequest {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            genre: None,
            count: DEFAULT_COUNT,
        }
    }

    pub fn by_genre(genre: impl Into<String>) -> Self {
        Self {
            title: None,
            genre: Some(genre.into()),
            count: DEFAULT_COUNT,
        }
    }

    pub fn top() -> Self {
        Self {
            title: None,
            genre: None,
            count: DEFAULT_COUNT,
        }
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// `GET /api/genres` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GenresEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Vec<BookRecord>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /api/recommend` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<BookRecord>,
    #[serde(default)]
    pub based_on: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/random` response.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub error: Option<String>,
}
