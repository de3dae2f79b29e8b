//! Client core for the CineMatch movie recommendation service
//!
//! Implements the incremental search-and-selection logic behind the search
//! pages: debounced keystroke handling, stale-response reconciliation via
//! session tokens, the seed-movie selection set, and a pure projection of
//! session state onto visible page regions. The recommendation algorithm,
//! persistence and markup all live on the other side of the HTTP contract
//! in [`catalog`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod view;

pub use catalog::{CatalogClient, HttpCatalogClient};
pub use error::{ClientError, ClientResult};
pub use models::{Movie, RecommendationResult};
pub use session::{Mode, SessionController};
