use serde::{Deserialize, Serialize};

/// Genre metadata arrives either as an array of strings or a single string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Genres {
    Many(Vec<String>),
    One(String),
}

impl Genres {
    /// Joined display form, e.g. "Drama, Sci-Fi".
    pub fn joined(&self) -> String {
        match self {
            Genres::Many(list) => list.join(", "),
            Genres::One(single) => single.clone(),
        }
    }
}

/// A catalog entry as returned by the server
///
/// Immutable on the client: fields are only ever copied, never rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Server-assigned unique identifier
    pub id: i64,
    /// Title of the movie
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// ISO date or other year-bearing string, e.g. "2010-07-16"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Average rating on a 0-10 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Genres>,
}
