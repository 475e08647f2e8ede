use std::collections::BTreeMap;
use tracing::debug;

use super::{MediaRef, ALL_CATEGORY, UNKNOWN_CATEGORY};

/// Category for a server-relative path: the immediate parent folder.
///
/// `"Cartoons/ep1.mp4"` -> `"Cartoons"`, `"ep1.mp4"` -> `"Unknown"`,
/// `"/ep1.mp4"` -> `"Unknown"` (empty segment).
pub fn category_of(video_path: &str) -> &str {
    video_path
        .rsplit('/')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// Folder-keyed view over the displayable part of the catalog.
///
/// The `"all"` group lives beside the folder groups rather than inside the
/// map, so a folder literally named `all` folds into it instead of shadowing it.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    all: Vec<MediaRef>,
    groups: BTreeMap<String, Vec<MediaRef>>,
}

/// One entry of the category navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub name: String,
    pub count: usize,
}

impl CategoryEntry {
    /// Button label, e.g. `All (12)` or `Cartoons (4)`
    pub fn label(&self) -> String {
        if self.name == ALL_CATEGORY {
            format!("All ({})", self.count)
        } else {
            format!("{} ({})", self.name, self.count)
        }
    }
}

impl CatalogView {
    /// Every displayable descriptor, in catalog order
    pub fn all(&self) -> &[MediaRef] {
        &self.all
    }

    /// Group for `key`; `"all"` resolves to the synthetic group
    pub fn get(&self, key: &str) -> Option<&[MediaRef]> {
        if key == ALL_CATEGORY {
            Some(&self.all)
        } else {
            self.groups.get(key).map(Vec::as_slice)
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        key == ALL_CATEGORY || self.groups.contains_key(key)
    }

    /// Number of keys including `"all"`
    pub fn key_count(&self) -> usize {
        self.groups.len() + 1
    }

    /// Folder categories in name order (never includes `"all"`)
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Navigation only makes sense with at least two real folders
    pub fn shows_navigation(&self) -> bool {
        self.key_count() > 2
    }

    /// `All` first, then folders sorted by name; `None` when navigation is suppressed
    pub fn navigation(&self) -> Option<Vec<CategoryEntry>> {
        if !self.shows_navigation() {
            return None;
        }

        let mut entries = Vec::with_capacity(self.key_count());
        entries.push(CategoryEntry {
            name: ALL_CATEGORY.to_string(),
            count: self.all.len(),
        });
        entries.extend(self.groups.iter().map(|(name, items)| CategoryEntry {
            name: name.clone(),
            count: items.len(),
        }));
        Some(entries)
    }
}

/// Build the folder view from a catalog.
///
/// Only displayable descriptors take part; group order follows catalog order.
pub fn categorize(catalog: &[MediaRef]) -> CatalogView {
    let mut view = CatalogView::default();

    for media in catalog.iter().filter(|m| m.is_displayable()) {
        view.all.push(MediaRef::clone(media));

        let category = media.category();
        if category == ALL_CATEGORY {
            continue;
        }
        view.groups
            .entry(category.to_string())
            .or_default()
            .push(MediaRef::clone(media));
    }

    debug!(
        "Categorized {} of {} descriptors into {} folders",
        view.all.len(),
        catalog.len(),
        view.groups.len()
    );
    view
}

/// Descriptors that cannot go in the grid, grouped by folder for the diagnostics view
#[derive(Debug, Clone, Default)]
pub struct UnthumbnailedSet {
    items: Vec<MediaRef>,
    by_folder: BTreeMap<String, Vec<MediaRef>>,
}

impl UnthumbnailedSet {
    pub fn from_catalog(catalog: &[MediaRef]) -> Self {
        let mut set = Self::default();
        for media in catalog.iter().filter(|m| !m.is_displayable()) {
            set.items.push(MediaRef::clone(media));
            set.by_folder
                .entry(media.category().to_string())
                .or_default()
                .push(MediaRef::clone(media));
        }
        set
    }

    pub fn items(&self) -> &[MediaRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Folder -> items, folders in name order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[MediaRef])> {
        self.by_folder
            .iter()
            .map(|(folder, items)| (folder.as_str(), items.as_slice()))
    }

    pub fn folder(&self, name: &str) -> Option<&[MediaRef]> {
        self.by_folder.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaDescriptor;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn thumbed(path: &str) -> MediaRef {
        let thumb = path.replace(".mp4", ".webp");
        Arc::new(MediaDescriptor::new(path, Some(thumb.as_str())))
    }

    fn bare(path: &str) -> MediaRef {
        Arc::new(MediaDescriptor::new(path, None))
    }

    fn paths(items: &[MediaRef]) -> Vec<&str> {
        items.iter().map(|m| m.video_path.as_str()).collect()
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("media/Cartoons/ep1.mp4"), "Cartoons");
        assert_eq!(category_of("Songs/abc.webm"), "Songs");
        assert_eq!(category_of("abc.webm"), "Unknown");
        assert_eq!(category_of("/abc.webm"), "Unknown");
        assert_eq!(category_of(""), "Unknown");
    }

    #[test]
    fn test_three_item_scenario() {
        let catalog = vec![thumbed("A/one.mp4"), bare("A/two.mp4"), thumbed("B/three.mp4")];
        let view = categorize(&catalog);
        let unthumbed = UnthumbnailedSet::from_catalog(&catalog);

        assert_eq!(view.all().len(), 2);
        assert_eq!(view.get("A").map(<[_]>::len), Some(1));
        assert_eq!(view.get("B").map(<[_]>::len), Some(1));
        assert_eq!(unthumbed.len(), 1);
        assert_eq!(unthumbed.folder("A").map(<[_]>::len), Some(1));
        assert_eq!(view.key_count(), 3);
        assert!(view.shows_navigation());
    }

    #[test]
    fn test_all_and_unthumbnailed_partition_catalog() {
        let mut odd_flag = MediaDescriptor::new("C/flag.mp4", Some("C/flag.webp"));
        odd_flag.has_thumb = false;
        let catalog = vec![
            thumbed("A/1.mp4"),
            bare("A/2.mp4"),
            Arc::new(odd_flag),
            Arc::new(MediaDescriptor::new("C/empty.mp4", Some(""))),
            thumbed("loose.mp4"),
        ];

        let view = categorize(&catalog);
        let unthumbed = UnthumbnailedSet::from_catalog(&catalog);

        let shown: BTreeSet<&str> = paths(view.all()).into_iter().collect();
        let hidden: BTreeSet<&str> = paths(unthumbed.items()).into_iter().collect();
        assert!(shown.is_disjoint(&hidden));
        assert_eq!(shown.len() + hidden.len(), catalog.len());
        assert_eq!(shown, BTreeSet::from(["A/1.mp4", "loose.mp4"]));
        assert_eq!(view.get("Unknown").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_group_order_follows_catalog() {
        let catalog = vec![thumbed("A/z.mp4"), thumbed("B/x.mp4"), thumbed("A/a.mp4")];
        let view = categorize(&catalog);
        assert_eq!(paths(view.get("A").unwrap_or_default()), vec!["A/z.mp4", "A/a.mp4"]);
        assert_eq!(paths(view.all()), vec!["A/z.mp4", "B/x.mp4", "A/a.mp4"]);
    }

    #[test]
    fn test_membership_ignores_input_order() {
        let forward = vec![thumbed("A/1.mp4"), thumbed("B/2.mp4"), thumbed("A/3.mp4"), bare("B/4.mp4")];
        let mut backward = forward.clone();
        backward.reverse();

        let a = categorize(&forward);
        let b = categorize(&backward);
        let keys_a: Vec<&str> = a.categories().collect();
        let keys_b: Vec<&str> = b.categories().collect();
        assert_eq!(keys_a, keys_b);

        for key in keys_a {
            let mut left = paths(a.get(key).unwrap_or_default());
            let mut right = paths(b.get(key).unwrap_or_default());
            left.sort_unstable();
            right.sort_unstable();
            assert_eq!(left, right, "category {}", key);
        }
    }

    #[test]
    fn test_navigation_suppressed_for_single_folder() {
        let view = categorize(&[thumbed("A/1.mp4"), thumbed("A/2.mp4")]);
        assert_eq!(view.key_count(), 2);
        assert!(view.navigation().is_none());
    }

    #[test]
    fn test_navigation_lists_all_first_then_sorted() {
        let view = categorize(&[thumbed("Zoo/1.mp4"), thumbed("Art/2.mp4"), thumbed("Zoo/3.mp4")]);
        let labels: Vec<String> = view
            .navigation()
            .unwrap_or_default()
            .iter()
            .map(CategoryEntry::label)
            .collect();
        assert_eq!(labels, vec!["All (3)", "Art (1)", "Zoo (2)"]);
    }

    #[test]
    fn test_folder_named_all_folds_into_synthetic_group() {
        let view = categorize(&[thumbed("all/1.mp4"), thumbed("B/2.mp4")]);
        assert_eq!(view.all().len(), 2);
        assert_eq!(view.key_count(), 2);
        assert!(!view.shows_navigation());
    }

    #[test]
    fn test_empty_catalog() {
        let view = categorize(&[]);
        assert!(view.all().is_empty());
        assert!(view.contains("all"));
        assert!(!view.contains("A"));
        assert!(UnthumbnailedSet::from_catalog(&[]).is_empty());
    }
}
