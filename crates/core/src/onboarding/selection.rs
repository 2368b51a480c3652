//! Capped multi-select
//!
//! Used for interests (at most seven) and career paths (at most four).
//! Selecting past the cap is a no-op rather than an error, matching a
//! disabled button in the UI.

use pathwise_domain::constants::MAX_CAREER_PATHS;
use pathwise_domain::{PathwiseError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedSelection<T> {
    items: Vec<T>,
    cap: usize,
}

impl<T: PartialEq + Clone> BoundedSelection<T> {
    pub fn new(cap: usize) -> Self {
        Self { items: Vec::with_capacity(cap), cap }
    }

    /// Select or deselect `item`.
    ///
    /// Returns `true` when the selection changed. Selecting a new item while
    /// full leaves the selection untouched and returns `false`.
    pub fn toggle(&mut self, item: T) -> bool {
        if let Some(pos) = self.items.iter().position(|existing| *existing == item) {
            self.items.remove(pos);
            return true;
        }
        if self.is_full() {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn is_selected(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Whether an unselected item would be rejected right now.
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.cap
    }

    /// Continue is enabled once at least one item is chosen.
    pub fn can_continue(&self) -> bool {
        !self.items.is_empty()
    }

    /// Selected items in the order they were picked.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Reject a career-path selection outside `1..=4` before any request.
pub fn validate_career_selection(ids: &[i64]) -> Result<()> {
    if ids.is_empty() || ids.len() > MAX_CAREER_PATHS {
        return Err(PathwiseError::InvalidInput(format!(
            "Please select between 1 and {MAX_CAREER_PATHS} career paths."
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pathwise_domain::constants::MAX_INTERESTS;

    use super::*;

    #[test]
    fn eighth_interest_is_a_no_op() {
        let mut selection = BoundedSelection::new(MAX_INTERESTS);
        for id in 1..=7 {
            assert!(selection.toggle(id));
        }

        assert!(!selection.toggle(8));
        assert_eq!(selection.len(), 7);
        assert!(!selection.is_selected(&8));
    }

    #[test]
    fn deselecting_frees_a_slot() {
        let mut selection = BoundedSelection::new(MAX_INTERESTS);
        for id in 1..=7 {
            selection.toggle(id);
        }

        assert!(selection.toggle(7));
        assert!(!selection.is_full());
        assert!(selection.toggle(7));
        assert_eq!(selection.items(), &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn continue_requires_one_item() {
        let mut selection = BoundedSelection::new(MAX_CAREER_PATHS);
        assert!(!selection.can_continue());
        selection.toggle(3);
        assert!(selection.can_continue());
    }

    #[test]
    fn fifth_track_is_a_no_op() {
        let mut selection = BoundedSelection::new(MAX_CAREER_PATHS);
        for id in [10, 20, 30, 40] {
            selection.toggle(id);
        }
        assert!(!selection.toggle(50));
        assert_eq!(selection.items(), &[10, 20, 30, 40]);
    }

    #[test]
    fn career_selection_bounds() {
        assert!(matches!(validate_career_selection(&[]), Err(PathwiseError::InvalidInput(_))));
        assert!(validate_career_selection(&[1, 2, 3, 4, 5]).is_err());
        assert!(validate_career_selection(&[1]).is_ok());
        assert!(validate_career_selection(&[1, 2, 3, 4]).is_ok());
    }
}
