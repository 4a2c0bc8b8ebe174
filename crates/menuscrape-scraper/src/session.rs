//! State owned by the control loop for the duration of one run.
//!
//! The session is the only holder of the record, the set of item texts
//! already clicked, and the log of fragments discovered so far. It is passed
//! by `&mut` into every interactive operation; nothing else can reach it.
//! Parallelizing discovery would require moving it behind a mutex or handing
//! it between tasks over a channel.

use std::collections::HashSet;

use menuscrape_core::{ItemDetailFragment, RestaurantDocument};

use crate::merge::{merge_item_details, MergeOutcome};

/// Totals from the end-of-run re-merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemergeSummary {
    /// Fragments discovered this run.
    pub fragments: usize,
    /// Fragments whose name matched a menu item.
    pub merged: usize,
    /// Fragments that matched no item.
    pub unmatched: usize,
}

#[derive(Debug, Default)]
pub struct DiscoverySession {
    document: RestaurantDocument,
    /// Visible texts of items whose click succeeded. Two items rendering the
    /// same text collide here; the second is treated as already clicked.
    clicked: HashSet<String>,
    /// Every fragment produced this run, in discovery order.
    discovered: Vec<ItemDetailFragment>,
    merged_since_checkpoint: usize,
}

impl DiscoverySession {
    #[must_use]
    pub fn new(document: RestaurantDocument) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn document(&self) -> &RestaurantDocument {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> RestaurantDocument {
        self.document
    }

    #[must_use]
    pub fn is_clicked(&self, item_text: &str) -> bool {
        self.clicked.contains(item_text)
    }

    /// Marks an item's visible text as clicked.
    pub fn mark_clicked(&mut self, item_text: &str) {
        self.clicked.insert(item_text.to_string());
    }

    #[must_use]
    pub fn clicked_count(&self) -> usize {
        self.clicked.len()
    }

    #[must_use]
    pub fn discovered(&self) -> &[ItemDetailFragment] {
        &self.discovered
    }

    /// Records `fragment` and folds it into the record.
    ///
    /// With no record (the initial extraction failed) the fragment is kept
    /// in the discovery log only and reported as unmatched.
    pub fn absorb(&mut self, fragment: ItemDetailFragment) -> MergeOutcome {
        self.discovered.push(fragment.clone());

        let Some(record) = self.document.data.as_mut() else {
            return MergeOutcome::Unmatched;
        };

        let outcome = merge_item_details(record, fragment);
        if outcome == MergeOutcome::Applied {
            self.merged_since_checkpoint += 1;
        }
        outcome
    }

    /// Re-applies every discovered fragment. Merging is idempotent, so this
    /// only fills items that are still empty.
    pub fn remerge_all(&mut self) -> RemergeSummary {
        let fragments = self.discovered.len();
        let unmatched = match self.document.data.as_mut() {
            None => fragments,
            Some(record) => self
                .discovered
                .iter()
                .cloned()
                .map(|fragment| merge_item_details(record, fragment))
                .filter(|outcome| *outcome == MergeOutcome::Unmatched)
                .count(),
        };

        RemergeSummary {
            fragments,
            merged: fragments - unmatched,
            unmatched,
        }
    }

    /// `true` once `every` fragments have been applied since the last
    /// checkpoint; resets the counter when it fires. `every == 0` never fires.
    pub fn checkpoint_due(&mut self, every: usize) -> bool {
        if every == 0 || self.merged_since_checkpoint < every {
            return false;
        }
        self.merged_since_checkpoint = 0;
        true
    }
}
