use tracing::{debug, info};

use super::{CatalogView, MediaRef, ALL_CATEGORY};

/// Tracks which category the grid is showing
#[derive(Debug, Clone)]
pub struct FilterController {
    active: String,
}

impl Default for FilterController {
    fn default() -> Self {
        Self {
            active: ALL_CATEGORY.to_string(),
        }
    }
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `category`, falling back to `"all"` for unknown names.
    ///
    /// Returns the category that actually became active. Callers reset the
    /// feed after every call, even when the selection did not change.
    pub fn select(&mut self, view: &CatalogView, category: &str) -> &str {
        if view.contains(category) {
            self.active = category.to_string();
        } else {
            debug!("Category '{}' not in view, falling back to all", category);
            self.active = ALL_CATEGORY.to_string();
        }
        info!("Filter set to '{}'", self.active);
        &self.active
    }

    /// Currently selected category name
    pub fn active(&self) -> &str {
        &self.active
    }

    /// Drop a selection that no longer exists after re-categorization.
    /// Returns true when the filter had to fall back.
    pub fn revalidate(&mut self, view: &CatalogView) -> bool {
        if view.contains(&self.active) {
            return false;
        }
        debug!("Category '{}' vanished after refetch, back to all", self.active);
        self.active = ALL_CATEGORY.to_string();
        true
    }

    /// The backing list for the current selection
    pub fn active_subset<'v>(&self, view: &'v CatalogView) -> &'v [MediaRef] {
        view.get(&self.active).unwrap_or_else(|| view.all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{categorize, MediaDescriptor};
    use std::sync::Arc;

    fn view_of(paths: &[&str]) -> CatalogView {
        let catalog: Vec<MediaRef> = paths
            .iter()
            .map(|p| Arc::new(MediaDescriptor::new(*p, Some("thumb.webp"))))
            .collect();
        categorize(&catalog)
    }

    #[test]
    fn test_defaults_to_all() {
        let view = view_of(&["A/1.mp4", "B/2.mp4"]);
        let filter = FilterController::new();
        assert_eq!(filter.active(), "all");
        assert_eq!(filter.active_subset(&view).len(), 2);
    }

    #[test]
    fn test_select_valid_category() {
        let view = view_of(&["A/1.mp4", "B/2.mp4", "A/3.mp4"]);
        let mut filter = FilterController::new();
        assert_eq!(filter.select(&view, "A"), "A");
        let subset = filter.active_subset(&view);
        assert_eq!(subset.len(), 2);
        assert!(subset.iter().all(|m| m.category() == "A"));
    }

    #[test]
    fn test_select_invalid_category_falls_back() {
        let view = view_of(&["A/1.mp4", "B/2.mp4"]);
        let mut filter = FilterController::new();
        filter.select(&view, "A");
        assert_eq!(filter.select(&view, "Nope"), "all");
        assert_eq!(filter.active_subset(&view).len(), 2);
    }

    #[test]
    fn test_stale_selection_reads_as_all() {
        let before = view_of(&["A/1.mp4", "B/2.mp4"]);
        let after = view_of(&["B/2.mp4", "C/3.mp4"]);
        let mut filter = FilterController::new();
        filter.select(&before, "A");

        // Even before revalidation the subset must not be empty or panic
        assert_eq!(filter.active_subset(&after).len(), 2);
        assert!(filter.revalidate(&after));
        assert_eq!(filter.active(), "all");
        assert!(!filter.revalidate(&after));
    }
}
