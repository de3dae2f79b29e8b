use crate::models::Movie;

/// Result of attempting to add a movie to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    Added,
    AlreadyPresent,
}

/// Result of attempting to remove a movie from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveResult {
    Removed,
    NotFound,
}

/// Ordered, id-unique set of seed movies for group recommendations
///
/// Insertion order is preserved; it affects display and the order of titles
/// in the batched group request, not semantics.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    movies: Vec<Movie>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.movies.iter().any(|m| m.id == movie_id)
    }

    /// Append `movie` unless an entry with the same id already exists.
    pub fn add(&mut self, movie: Movie) -> AddResult {
        if self.contains(movie.id) {
            return AddResult::AlreadyPresent;
        }
        self.movies.push(movie);
        AddResult::Added
    }

    /// Remove the entry with `movie_id`, preserving the order of the rest.
    pub fn remove(&mut self, movie_id: i64) -> RemoveResult {
        match self.movies.iter().position(|m| m.id == movie_id) {
            Some(index) => {
                self.movies.remove(index);
                RemoveResult::Removed
            }
            None => RemoveResult::NotFound,
        }
    }

    /// Candidates whose id is not already selected, in their original order.
    /// Capping to a display limit is the caller's concern.
    pub fn filter_candidates(&self, candidates: &[Movie]) -> Vec<Movie> {
        candidates
            .iter()
            .filter(|candidate| !self.contains(candidate.id))
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Read-only copy of the selection in insertion order. Mutating the
    /// returned vector does not affect the set.
    pub fn snapshot(&self) -> Vec<Movie> {
        self.movies.clone()
    }

    /// Seed titles in insertion order, as sent to the group endpoint.
    pub fn titles(&self) -> Vec<String> {
        self.movies.iter().map(|m| m.title.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_url: None,
            release_date: None,
            overview: None,
            vote_average: None,
            genres: None,
        }
    }

    #[test]
    fn test_add_is_idempotent_per_id() {
        let mut selection = SelectionSet::new();

        assert_eq!(selection.add(movie(1, "Dune")), AddResult::Added);
        assert_eq!(selection.add(movie(1, "Dune")), AddResult::AlreadyPresent);
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_remove_missing_id_reports_not_found() {
        let mut selection = SelectionSet::new();
        selection.add(movie(1, "Dune"));

        assert_eq!(selection.remove(99), RemoveResult::NotFound);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.remove(1), RemoveResult::Removed);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut selection = SelectionSet::new();
        selection.add(movie(1, "A"));
        selection.add(movie(2, "B"));
        selection.add(movie(3, "C"));

        selection.remove(2);
        assert_eq!(selection.titles(), vec!["A".to_string(), "C".to_string()]);
    }

    #[test]
    fn test_filter_candidates_preserves_order() {
        let mut selection = SelectionSet::new();
        selection.add(movie(2, "B"));

        let candidates = vec![movie(1, "A"), movie(2, "B"), movie(3, "C")];
        let filtered = selection.filter_candidates(&candidates);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 1);
        assert_eq!(filtered[1].id, 3);
    }

    #[test]
    fn test_snapshot_has_copy_semantics() {
        let mut selection = SelectionSet::new();
        selection.add(movie(1, "A"));

        let mut snapshot = selection.snapshot();
        snapshot.clear();

        assert_eq!(selection.len(), 1);
    }
}
