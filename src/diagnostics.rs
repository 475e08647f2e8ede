// Bad-videos browser - items without thumbnails, narrowed by folder and playable
// Titles are drawn once when the browser opens, the same way feed cards get theirs

use tracing::debug;

use crate::catalog::{MediaRef, UnthumbnailedSet};
use crate::feed::generate_title;
use crate::random::RandomSource;

/// Label of the tab that lists every folder at once
pub const ALL_FOLDERS_LABEL: &str = "All Videos";

/// One unthumbnailed item as the browser shows it
#[derive(Debug, Clone)]
pub struct BadVideo {
    pub media: MediaRef,
    pub folder: String,
    pub title: String,
}

/// Folder tabs plus a selectable list over the unthumbnailed set.
///
/// Tab 0 is "All Videos"; tab `i + 1` narrows to the i-th folder in name order.
#[derive(Debug, Clone, Default)]
pub struct BadVideosBrowser {
    items: Vec<BadVideo>,
    folders: Vec<(String, usize)>,
    active_folder: Option<usize>,
    selected: usize,
}

impl BadVideosBrowser {
    pub fn open<R: RandomSource + ?Sized>(set: &UnthumbnailedSet, rng: &mut R) -> Self {
        let mut browser = Self::default();

        for (folder, items) in set.groups() {
            browser.folders.push((folder.to_string(), items.len()));
            browser.items.extend(items.iter().map(|media| BadVideo {
                media: MediaRef::clone(media),
                folder: folder.to_string(),
                title: generate_title(rng),
            }));
        }

        debug!(
            "Bad videos browser opened: {} items in {} folders",
            browser.items.len(),
            browser.folders.len()
        );
        browser
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `All Videos (n)` first, then `folder (n)` for each folder
    pub fn tabs(&self) -> Vec<String> {
        std::iter::once(format!("{} ({})", ALL_FOLDERS_LABEL, self.items.len()))
            .chain(self.folders.iter().map(|(name, count)| format!("{} ({})", name, count)))
            .collect()
    }

    pub fn active_tab(&self) -> usize {
        self.active_folder.map_or(0, |index| index + 1)
    }

    /// `None` while every folder is shown
    pub fn active_folder(&self) -> Option<&str> {
        self.active_folder.map(|index| self.folders[index].0.as_str())
    }

    pub fn show_all(&mut self) {
        self.active_folder = None;
        self.selected = 0;
    }

    /// Narrow to `name`. Unknown folders leave the view untouched.
    pub fn show_folder(&mut self, name: &str) -> bool {
        match self.folders.iter().position(|(folder, _)| folder == name) {
            Some(index) => {
                self.active_folder = Some(index);
                self.selected = 0;
                true
            }
            None => false,
        }
    }

    /// Step through the tabs, wrapping at both ends
    pub fn cycle_folder(&mut self, step: isize) {
        let tabs = self.folders.len() as isize + 1;
        let next = (self.active_tab() as isize + step).rem_euclid(tabs) as usize;
        self.active_folder = next.checked_sub(1);
        self.selected = 0;
    }

    /// Items under the active tab, folders in name order
    pub fn visible(&self) -> Vec<&BadVideo> {
        match self.active_folder() {
            Some(folder) => self.items.iter().filter(|item| item.folder == folder).collect(),
            None => self.items.iter().collect(),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.visible().len() {
            self.selected += 1;
        }
    }

    pub fn selected_item(&self) -> Option<&BadVideo> {
        self.visible().get(self.selected).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MediaDescriptor;
    use crate::random::ScriptedRandom;
    use std::sync::Arc;

    fn bare(path: &str) -> MediaRef {
        Arc::new(MediaDescriptor::new(path, None))
    }

    fn browser() -> BadVideosBrowser {
        let catalog = vec![
            bare("Songs/b.mp4"),
            bare("Cartoons/x.mp4"),
            bare("Songs/a.mp4"),
            Arc::new(MediaDescriptor::new("Songs/ok.mp4", Some("ok.webp"))),
        ];
        let set = UnthumbnailedSet::from_catalog(&catalog);
        BadVideosBrowser::open(&set, &mut ScriptedRandom::new(vec![0.1, 0.5, 0.9]))
    }

    fn paths(browser: &BadVideosBrowser) -> Vec<&str> {
        browser.visible().iter().map(|item| item.media.video_path.as_str()).collect()
    }

    #[test]
    fn test_opens_on_all_videos() {
        let browser = browser();
        assert_eq!(browser.len(), 3);
        assert_eq!(browser.active_tab(), 0);
        assert_eq!(browser.active_folder(), None);
        assert_eq!(browser.tabs(), vec!["All Videos (3)", "Cartoons (1)", "Songs (2)"]);
        assert_eq!(paths(&browser), vec!["Cartoons/x.mp4", "Songs/b.mp4", "Songs/a.mp4"]);
        assert!(browser.visible().iter().all(|item| !item.title.is_empty()));
    }

    #[test]
    fn test_folder_narrows_list() {
        let mut browser = browser();
        assert!(browser.show_folder("Songs"));
        assert_eq!(browser.active_tab(), 2);
        assert_eq!(paths(&browser), vec!["Songs/b.mp4", "Songs/a.mp4"]);

        assert!(!browser.show_folder("Missing"));
        assert_eq!(browser.active_folder(), Some("Songs"));

        browser.show_all();
        assert_eq!(browser.visible().len(), 3);
    }

    #[test]
    fn test_cycle_wraps_through_all_tab() {
        let mut browser = browser();
        browser.cycle_folder(1);
        assert_eq!(browser.active_folder(), Some("Cartoons"));
        browser.cycle_folder(1);
        assert_eq!(browser.active_folder(), Some("Songs"));
        browser.cycle_folder(1);
        assert_eq!(browser.active_folder(), None);
        browser.cycle_folder(-1);
        assert_eq!(browser.active_folder(), Some("Songs"));
    }

    #[test]
    fn test_selection_follows_narrowed_list() {
        let mut browser = browser();
        browser.move_down();
        browser.move_down();
        browser.move_down();
        assert_eq!(browser.selected(), 2);

        browser.show_folder("Cartoons");
        assert_eq!(browser.selected(), 0);
        browser.move_down();
        let picked = browser.selected_item().map(|item| item.media.video_path.as_str());
        assert_eq!(picked, Some("Cartoons/x.mp4"));
    }

    #[test]
    fn test_empty_set() {
        let mut browser = BadVideosBrowser::open(&UnthumbnailedSet::default(), &mut ScriptedRandom::constant(0.0));
        assert!(browser.is_empty());
        assert_eq!(browser.tabs(), vec!["All Videos (0)"]);
        browser.cycle_folder(1);
        assert_eq!(browser.active_tab(), 0);
        assert!(browser.selected_item().is_none());
    }
}
