//! Merge Engine: folds discovered item details into the record.
//!
//! Items are matched by exact name, first match only (categories then items,
//! in order). A populated item is never overwritten, so merging the same
//! fragment any number of times yields the same record. Two distinct items
//! sharing a name cannot be told apart here; only the first receives details.

use menuscrape_core::{ItemDetailFragment, RestaurantRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The item's detail groups were empty and have been set.
    Applied,
    /// The item already had detail groups; nothing changed.
    AlreadyPopulated,
    /// The item matched but the fragment carried no groups. The item stays
    /// empty and open to a later fragment.
    NoDetails,
    /// No item carries the fragment's name; the fragment was dropped.
    Unmatched,
}

/// Applies `fragment` to the first item named `fragment.item_name`.
pub fn merge_item_details(
    record: &mut RestaurantRecord,
    fragment: ItemDetailFragment,
) -> MergeOutcome {
    if fragment.item_name.is_empty() {
        return MergeOutcome::Unmatched;
    }

    let Some(item) = record.find_item_mut(&fragment.item_name) else {
        tracing::debug!(item = %fragment.item_name, "no menu item matches fragment");
        return MergeOutcome::Unmatched;
    };

    if !item.ingredients_groups.is_empty() {
        return MergeOutcome::AlreadyPopulated;
    }
    if fragment.item_details.is_empty() {
        return MergeOutcome::NoDetails;
    }

    item.ingredients_groups = fragment.item_details;
    MergeOutcome::Applied
}

#[cfg(test)]
mod tests {
    use menuscrape_core::{Category, DetailOption, ItemDetailGroup, MenuItem};

    use super::*;

    fn record_with(names: &[&str]) -> RestaurantRecord {
        RestaurantRecord {
            categories: vec![Category {
                title: Some("Mains".to_owned()),
                menu: names
                    .iter()
                    .map(|name| MenuItem {
                        name: (*name).to_owned(),
                        price: 12.0,
                        ..MenuItem::default()
                    })
                    .collect(),
            }],
            ..RestaurantRecord::default()
        }
    }

    fn fragment(name: &str, group: &str) -> ItemDetailFragment {
        ItemDetailFragment {
            item_name: name.to_owned(),
            item_details: vec![ItemDetailGroup {
                name: group.to_owned(),
                max_selections: 2,
                options: vec![DetailOption {
                    name: "Extra cheese".to_owned(),
                    possible_to_add: 1,
                    price: 3.0,
                    left_half_price: 1.5,
                    right_half_price: 1.5,
                }],
                ..ItemDetailGroup::default()
            }],
        }
    }

    #[test]
    fn applies_to_matching_item() {
        let mut record = record_with(&["Calzone", "Lasagna"]);
        let outcome = merge_item_details(&mut record, fragment("Lasagna", "Sides"));
        assert_eq!(outcome, MergeOutcome::Applied);
        assert!(record.categories[0].menu[0].ingredients_groups.is_empty());
        assert_eq!(
            record.categories[0].menu[1].ingredients_groups[0].name,
            "Sides"
        );
    }

    #[test]
    fn merging_twice_is_idempotent() {
        let mut once = record_with(&["Calzone"]);
        merge_item_details(&mut once, fragment("Calzone", "Fillings"));
        let mut twice = once.clone();
        let outcome = merge_item_details(&mut twice, fragment("Calzone", "Fillings"));
        assert_eq!(outcome, MergeOutcome::AlreadyPopulated);
        assert_eq!(once, twice);
    }

    #[test]
    fn first_write_wins() {
        let mut record = record_with(&["Calzone"]);
        merge_item_details(&mut record, fragment("Calzone", "Fillings"));
        merge_item_details(&mut record, fragment("Calzone", "Dips"));
        let groups = &record.categories[0].menu[0].ingredients_groups;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Fillings");
    }

    #[test]
    fn unmatched_name_leaves_record_unchanged() {
        let mut record = record_with(&["Calzone"]);
        let before = record.clone();
        let outcome = merge_item_details(&mut record, fragment("Tiramisu", "Sauces"));
        assert_eq!(outcome, MergeOutcome::Unmatched);
        assert_eq!(record, before);
    }

    #[test]
    fn empty_name_is_dropped() {
        let mut record = record_with(&[""]);
        let before = record.clone();
        let outcome = merge_item_details(&mut record, fragment("", "Sauces"));
        assert_eq!(outcome, MergeOutcome::Unmatched);
        assert_eq!(record, before);
    }

    #[test]
    fn duplicate_names_only_enrich_first() {
        let mut record = record_with(&["Soda", "Soda"]);
        merge_item_details(&mut record, fragment("Soda", "Size"));
        assert!(!record.categories[0].menu[0].ingredients_groups.is_empty());
        assert!(record.categories[0].menu[1].ingredients_groups.is_empty());
    }

    #[test]
    fn empty_fragment_details_keep_item_open_for_later() {
        let mut record = record_with(&["Calzone"]);
        let empty = ItemDetailFragment {
            item_name: "Calzone".to_owned(),
            item_details: vec![],
        };
        assert_eq!(
            merge_item_details(&mut record, empty),
            MergeOutcome::NoDetails
        );
        assert_eq!(record.enriched_item_count(), 0);
        assert_eq!(
            merge_item_details(&mut record, fragment("Calzone", "Fillings")),
            MergeOutcome::Applied
        );
    }
}
