use chrono::NaiveDate;
use proptest::prelude::*;
use roster_core::model::{Asset, AssetStatus, AssetType};
use roster_core::{Filter, Selection};

use generators::*;

fn arb_filter() -> impl Strategy<Value = Filter<AssetStatus>> {
    (
        prop::option::of("[a-zA-Z ]{0,3}"),
        prop::option::of(arb_status()),
        prop::option::of(arb_kind()),
        prop::option::of(arb_date()),
        prop::option::of(arb_date()),
    )
        .prop_map(|(text, status, kind, date_from, date_to)| Filter {
            text,
            status,
            category: kind.map(|k: AssetType| k.as_str().to_string()),
            date_from,
            date_to,
        })
}

/// Independent restatement of the listing predicates.
fn expected(filter: &Filter<AssetStatus>, asset: &Asset) -> bool {
    let text_ok = match filter.text.as_deref() {
        None | Some("") => true,
        Some(text) => {
            let needle = text.to_lowercase();
            [Some(&asset.name), Some(&asset.serial_number), asset.assigned_to.as_ref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&needle))
        }
    };
    let status_ok = filter.status.is_none_or(|s| s == asset.status);
    let category_ok = filter
        .category
        .as_deref()
        .is_none_or(|c| c == asset.kind.as_str());
    let date_ok = match (filter.date_from, filter.date_to) {
        (Some(from), Some(to)) => in_range(asset.purchase_date, from, to),
        _ => true,
    };
    text_ok && status_ok && category_ok && date_ok
}

fn in_range(date: NaiveDate, from: NaiveDate, to: NaiveDate) -> bool {
    from <= date && date <= to
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn filter_is_an_ordered_subsequence(assets in arb_assets(24), filter in arb_filter()) {
        let hits = filter.apply(assets.iter());
        let mut cursor = assets.iter();
        for hit in &hits {
            prop_assert!(cursor.any(|a| a.id == hit.id), "{} out of order or foreign", hit.id);
        }
    }

    #[test]
    fn filter_keeps_exactly_the_matching_records(assets in arb_assets(24), filter in arb_filter()) {
        let hits: Vec<&str> = filter.apply(assets.iter()).iter().map(|a| a.id.as_str()).collect();
        let want: Vec<&str> = assets
            .iter()
            .filter(|a| expected(&filter, a))
            .map(|a| a.id.as_str())
            .collect();
        prop_assert_eq!(hits, want);
    }

    #[test]
    fn unconstrained_filter_returns_everything(assets in arb_assets(24)) {
        let hits = Filter::<AssetStatus>::new().apply(assets.iter());
        prop_assert_eq!(hits.len(), assets.len());
    }

    #[test]
    fn select_all_then_clear_is_empty(ids in prop::collection::vec("[A-Z]{3}-[0-9]{2}", 0..32)) {
        let mut selection = Selection::new();
        selection.select_all(ids.iter().cloned());
        for id in &ids {
            prop_assert!(selection.contains(id));
        }
        selection.clear();
        prop_assert!(selection.is_empty());
        prop_assert_eq!(selection.len(), 0);
    }

    #[test]
    fn effective_selection_is_visible_and_selected(
        assets in arb_assets(24),
        filter in arb_filter(),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let mut selection = Selection::new();
        if !assets.is_empty() {
            for pick in &picks {
                selection.select(&assets[pick.index(assets.len())].id);
            }
        }
        let visible: Vec<String> = filter.apply(assets.iter()).iter().map(|a| a.id.clone()).collect();
        let effective = selection.effective(visible.iter().map(String::as_str));
        for id in &effective {
            prop_assert!(selection.contains(id));
            prop_assert!(visible.contains(id));
        }
    }
}
