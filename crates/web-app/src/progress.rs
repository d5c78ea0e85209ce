use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use vigor_domain as domain;

#[allow(async_fn_in_trait)]
pub trait SessionProgressService {
    async fn get_session_progress(&self, id: domain::SessionID)
    -> Result<SessionProgress, String>;
    async fn set_session_progress(
        &self,
        id: domain::SessionID,
        progress: &SessionProgress,
    ) -> Result<(), String>;
    async fn get_set_progress(&self, id: domain::SessionID) -> Result<SetProgress, String>;
    async fn set_set_progress(
        &self,
        id: domain::SessionID,
        progress: &SetProgress,
    ) -> Result<(), String>;
    async fn delete_progress(&self, id: domain::SessionID) -> Result<(), String>;
}

#[allow(async_fn_in_trait)]
pub trait SessionProgressRepository {
    async fn read_session_progress(
        &self,
        id: domain::SessionID,
    ) -> Result<SessionProgress, String>;
    async fn write_session_progress(
        &self,
        id: domain::SessionID,
        progress: &SessionProgress,
    ) -> Result<(), String>;
    async fn read_set_progress(&self, id: domain::SessionID) -> Result<SetProgress, String>;
    async fn write_set_progress(
        &self,
        id: domain::SessionID,
        progress: &SetProgress,
    ) -> Result<(), String>;
    async fn delete_progress(&self, id: domain::SessionID) -> Result<(), String>;
}

/// Per-item completion state of a running session.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    completed: BTreeMap<usize, bool>,
    pub updated_at: DateTime<Utc>,
}

impl Default for SessionProgress {
    fn default() -> Self {
        Self {
            completed: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }
}

impl SessionProgress {
    pub fn toggle(&mut self, index: usize) {
        let entry = self.completed.entry(index).or_insert(false);
        *entry = !*entry;
        self.updated_at = Utc::now();
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.completed.insert(index, value);
        self.updated_at = Utc::now();
    }

    pub fn set_all(&mut self, value: bool, item_count: usize) {
        for index in 0..item_count {
            self.completed.insert(index, value);
        }
        self.updated_at = Utc::now();
    }

    pub fn reset(&mut self) {
        self.completed.clear();
        self.updated_at = Utc::now();
    }

    #[must_use]
    pub fn is_item_completed(&self, index: usize) -> bool {
        self.completed.get(&index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed.values().filter(|v| **v).count()
    }

    #[must_use]
    pub fn is_completed(&self, item_count: usize) -> bool {
        item_count > 0 && (0..item_count).all(|index| self.is_item_completed(index))
    }
}

/// Per-set completion flags, one list per session item.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SetProgress {
    items: Vec<Vec<bool>>,
}

impl SetProgress {
    #[must_use]
    pub fn new(expected_set_counts: &[usize]) -> Self {
        Self {
            items: expected_set_counts
                .iter()
                .map(|count| vec![false; *count])
                .collect(),
        }
    }

    #[must_use]
    pub fn sets(&self, item_index: usize) -> &[bool] {
        self.items.get(item_index).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn completed_sets(&self, item_index: usize) -> usize {
        self.sets(item_index).iter().filter(|v| **v).count()
    }

    /// True when the item has at least one configured set and all its flags
    /// are set. Items without sets are tracked at the item level instead.
    #[must_use]
    pub fn is_item_complete(&self, item_index: usize) -> bool {
        let sets = self.sets(item_index);
        !sets.is_empty() && sets.iter().all(|v| *v)
    }

    /// Flip one set flag. Returns the item's new all-sets-complete status if
    /// the toggle changed it, so the caller can synchronize the item-level
    /// progress. Out-of-bounds indices are ignored.
    pub fn toggle_set(&mut self, item_index: usize, set_index: usize) -> Option<bool> {
        let was_complete = self.is_item_complete(item_index);

        let flag = self.items.get_mut(item_index)?.get_mut(set_index)?;
        *flag = !*flag;

        let is_complete = self.is_item_complete(item_index);

        if was_complete == is_complete {
            None
        } else {
            Some(is_complete)
        }
    }

    /// Flag every set of every item at once, matching a "complete all" or
    /// "clear all" action at the item level.
    pub fn set_all(&mut self, value: bool) {
        for sets in &mut self.items {
            for flag in sets {
                *flag = value;
            }
        }
    }

    /// Rebuild the flag lists to match the expected set counts after the
    /// session definition changed. Existing flags are copied index for
    /// index up to the shorter length, new slots start unset.
    pub fn recalibrate(&mut self, expected_set_counts: &[usize]) {
        self.items = expected_set_counts
            .iter()
            .enumerate()
            .map(|(item_index, count)| {
                let mut sets = vec![false; *count];
                if let Some(previous) = self.items.get(item_index) {
                    for (flag, value) in sets.iter_mut().zip(previous) {
                        *flag = *value;
                    }
                }
                sets
            })
            .collect();
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_session_progress_toggle() {
        let mut progress = SessionProgress::default();

        progress.toggle(1);
        assert!(progress.is_item_completed(1));
        assert!(!progress.is_item_completed(0));
        assert_eq!(progress.completed_count(), 1);

        progress.toggle(1);
        assert!(!progress.is_item_completed(1));
        assert_eq!(progress.completed_count(), 0);
    }

    #[test]
    fn test_session_progress_set_all() {
        let mut progress = SessionProgress::default();

        progress.set_all(true, 3);
        assert_eq!(progress.completed_count(), 3);
        assert!(progress.is_completed(3));

        progress.set_all(false, 3);
        assert_eq!(progress.completed_count(), 0);
        assert!(!progress.is_completed(3));
    }

    #[test]
    fn test_session_progress_reset() {
        let mut progress = SessionProgress::default();
        progress.set_all(true, 4);

        progress.reset();

        assert_eq!(progress.completed_count(), 0);
        assert!(!progress.is_completed(4));
    }

    #[rstest]
    #[case::empty_session(vec![], 0, false)]
    #[case::none_completed(vec![], 2, false)]
    #[case::partially_completed(vec![0], 2, false)]
    #[case::all_completed(vec![0, 1], 2, true)]
    fn test_session_progress_is_completed(
        #[case] completed: Vec<usize>,
        #[case] item_count: usize,
        #[case] expected: bool,
    ) {
        let mut progress = SessionProgress::default();
        for index in completed {
            progress.set(index, true);
        }
        assert_eq!(progress.is_completed(item_count), expected);
    }

    #[test]
    fn test_set_progress_new() {
        let progress = SetProgress::new(&[3, 0, 2]);

        assert_eq!(progress.item_count(), 3);
        assert_eq!(progress.sets(0), &[false, false, false]);
        assert_eq!(progress.sets(1), &[] as &[bool]);
        assert_eq!(progress.sets(2), &[false, false]);
    }

    #[test]
    fn test_set_progress_last_set_completes_item() {
        let mut progress = SetProgress::new(&[2]);

        assert_eq!(progress.toggle_set(0, 0), None);
        assert!(!progress.is_item_complete(0));

        assert_eq!(progress.toggle_set(0, 1), Some(true));
        assert!(progress.is_item_complete(0));

        assert_eq!(progress.toggle_set(0, 1), Some(false));
        assert!(!progress.is_item_complete(0));
    }

    #[test]
    fn test_set_progress_toggle_out_of_bounds() {
        let mut progress = SetProgress::new(&[1]);

        assert_eq!(progress.toggle_set(1, 0), None);
        assert_eq!(progress.toggle_set(0, 1), None);
        assert_eq!(progress, SetProgress::new(&[1]));
    }

    #[test]
    fn test_set_progress_zero_sets_never_complete() {
        let progress = SetProgress::new(&[0]);
        assert!(!progress.is_item_complete(0));
    }

    #[test]
    fn test_set_progress_set_all() {
        let mut progress = SetProgress::new(&[2, 0, 3]);

        progress.set_all(true);
        assert!(progress.is_item_complete(0));
        assert!(progress.is_item_complete(2));
        assert_eq!(progress.sets(1), &[] as &[bool]);

        progress.set_all(false);
        assert_eq!(progress.completed_sets(0), 0);
        assert_eq!(progress.completed_sets(2), 0);
    }

    #[test]
    fn test_set_progress_recalibrate() {
        let mut progress = SetProgress::new(&[3]);
        progress.toggle_set(0, 0);
        progress.toggle_set(0, 2);

        progress.recalibrate(&[4, 2]);

        assert_eq!(progress.item_count(), 2);
        assert_eq!(progress.sets(0), &[true, false, true, false]);
        assert_eq!(progress.sets(1), &[false, false]);
    }

    #[test]
    fn test_set_progress_recalibrate_shrinks() {
        let mut progress = SetProgress::new(&[4]);
        progress.toggle_set(0, 3);

        progress.recalibrate(&[2]);

        assert_eq!(progress.sets(0), &[false, false]);
    }

    #[test]
    fn test_set_progress_recalibrate_to_zero_sets() {
        let mut progress = SetProgress::new(&[2, 3]);
        progress.toggle_set(1, 0);

        progress.recalibrate(&[0, 3]);

        assert_eq!(progress.sets(0), &[] as &[bool]);
        assert_eq!(progress.sets(1), &[true, false, false]);
    }
}
