use proptest::prelude::*;
use ratatui_table_core::column::Column;
use ratatui_table_core::pipeline::SortDirection;
use ratatui_table_core::pipeline::SortState;
use ratatui_table_core::pipeline::ViewState;
use ratatui_table_core::pipeline::derive_rows;
use ratatui_table_core::pipeline::sort_indices;
use ratatui_table_core::record::Record;
use ratatui_table_core::value::Value as FieldValue;
use ratatui_table_core::view::TableView;
use std::collections::BTreeSet;

fn columns() -> Vec<Column> {
    vec![Column::new("name", "Name"), Column::new("age", "Age")]
}

fn arb_value() -> impl Strategy<Value = Option<FieldValue>> {
    prop_oneof![
        Just(None),
        Just(Some(FieldValue::Null)),
        "[a-cA-C]{0,4}".prop_map(|s| Some(FieldValue::Text(s))),
        (0i64..50).prop_map(|i| Some(FieldValue::Integer(i))),
        (-50.0f64..50.0).prop_map(|x| Some(FieldValue::Float(x))),
        Just(Some(FieldValue::Float(f64::NAN))),
        any::<bool>().prop_map(|b| Some(FieldValue::Bool(b))),
    ]
}

fn arb_direction() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)]
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    proptest::collection::vec((arb_value(), arb_value()), 0..300).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (name, age))| {
                let mut r = Record::new(i as i64);
                if let Some(v) = name {
                    r.set("name", v);
                }
                if let Some(v) = age {
                    r.set("age", v);
                }
                r
            })
            .collect()
    })
}

fn matches(record: &Record, term: &str) -> bool {
    let term = term.to_lowercase();
    columns().iter().any(|c| {
        record
            .get(&c.key)
            .and_then(|v| v.to_search_text())
            .is_some_and(|t| t.to_lowercase().contains(&term))
    })
}

proptest! {
    #[test]
    fn rendered_rows_never_exceed_input(records in arb_records(), term in "[a-cA-C0-9]{0,2}") {
        let state = ViewState { search_term: term, sort: None };
        prop_assert!(derive_rows(&records, &columns(), &state).len() <= records.len());
    }

    #[test]
    fn every_row_matches_term(
        records in arb_records(),
        term in "[a-cA-C0-9]{0,2}",
        sort_name in any::<bool>(),
    ) {
        let mut state = ViewState { search_term: term.clone(), sort: None };
        if sort_name {
            state.toggle_sort("name");
        }
        let rows = derive_rows(&records, &columns(), &state);
        if term.is_empty() {
            prop_assert_eq!(rows.len(), records.len());
        }
        for &i in &rows {
            prop_assert!(term.is_empty() || matches(&records[i], &term));
        }
    }

    #[test]
    fn sorting_is_a_permutation_of_the_filtered_set(
        records in arb_records(),
        term in "[a-c0-9]{0,1}",
        clicks in 1usize..4,
    ) {
        let unsorted = ViewState { search_term: term.clone(), sort: None };
        let mut sorted = unsorted.clone();
        for _ in 0..clicks {
            sorted.toggle_sort("age");
        }
        let a: BTreeSet<usize> = derive_rows(&records, &columns(), &unsorted).into_iter().collect();
        let b: Vec<usize> = derive_rows(&records, &columns(), &sorted);
        prop_assert_eq!(b.len(), a.len());
        prop_assert_eq!(b.into_iter().collect::<BTreeSet<_>>(), a);
    }

    #[test]
    fn sorting_mixed_columns_never_panics(
        records in arb_records(),
        direction in arb_direction(),
        key in prop_oneof![Just("name"), Just("age")],
    ) {
        let sort = SortState { key: key.to_string(), direction };
        let rows = sort_indices(&records, Some(&sort));
        let mut seen = rows.clone();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..records.len()).collect::<Vec<_>>());
    }

    #[test]
    fn second_click_reverses_distinct_keys(ages in proptest::collection::btree_set(0i64..1000, 0..300)) {
        let records: Vec<Record> = ages
            .iter()
            .rev()
            .enumerate()
            .map(|(i, &age)| Record::new(i as i64).with("age", age))
            .collect();
        let mut t = TableView::new();
        t.set_data(records, columns());
        t.toggle_sort("age");
        let asc = t.visible_ids();
        t.toggle_sort("age");
        let mut desc = t.visible_ids();
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }
}
