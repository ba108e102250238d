use crate::{
    record::Row,
    search::{
        BinarySearch, CacheLookup, PositionCache, SearchEngine, SearchOutcome, SearchRequest,
        binary_search,
    },
    test_fixtures::{id_field, id_rows},
    value::{Comparator, Value},
};
use proptest::prelude::*;

fn search(rows: &[Row], value: i64) -> SearchOutcome {
    let field = id_field();
    let value = Value::Int(value);
    let request = SearchRequest::full(rows, &field, &Comparator::Numeric, &value);

    binary_search(&request, &mut PositionCache::new())
}

const fn gap(prev: Option<usize>, next: Option<usize>) -> SearchOutcome {
    SearchOutcome::Gap { prev, next }
}

#[test]
fn exact_match_reports_index() {
    let rows = id_rows(&[1, 3, 5, 7, 9]);

    for (index, id) in [1, 3, 5, 7, 9].into_iter().enumerate() {
        assert_eq!(search(&rows, id), SearchOutcome::Exact(index));
    }
}

#[test]
fn missing_values_resolve_to_adjacent_gap() {
    let rows = id_rows(&[1, 3, 5, 7, 9]);

    assert_eq!(search(&rows, 2), gap(Some(0), Some(1)));
    assert_eq!(search(&rows, 4), gap(Some(1), Some(2)));
    assert_eq!(search(&rows, 6), gap(Some(2), Some(3)));
    assert_eq!(search(&rows, 8), gap(Some(3), Some(4)));
}

#[test]
fn values_beyond_either_end_leave_that_side_open() {
    let rows = id_rows(&[1, 3, 5]);

    assert_eq!(search(&rows, 0), gap(None, Some(0)));
    assert_eq!(search(&rows, 10), gap(Some(2), None));
}

#[test]
fn single_record_window_uses_last_comparison_sign() {
    let rows = id_rows(&[5]);

    assert_eq!(search(&rows, 5), SearchOutcome::Exact(0));
    assert_eq!(search(&rows, 4), gap(None, Some(0)));
    assert_eq!(search(&rows, 6), gap(Some(0), None));
}

#[test]
fn two_record_window_resolves_middle_gap() {
    let rows = id_rows(&[10, 20]);

    assert_eq!(search(&rows, 15), gap(Some(0), Some(1)));
    assert_eq!(search(&rows, 25), gap(Some(1), None));
}

#[test]
fn empty_slice_resolves_to_open_gap() {
    assert_eq!(search(&[], 1), gap(None, None));
}

#[test]
fn search_writes_outcome_through_cache() {
    let rows = id_rows(&[1, 3, 5]);
    let field = id_field();
    let value = Value::Int(4);
    let request = SearchRequest::full(&rows, &field, &Comparator::Numeric, &value);
    let mut cache = PositionCache::new();

    let outcome = BinarySearch.search(&request, &mut cache);

    assert_eq!(cache.lookup(&value), CacheLookup::Hit(outcome));
    assert_eq!(cache.len(), 1);
}

#[test]
fn sub_window_search_stays_inside_window() {
    let rows = id_rows(&[1, 3, 5, 7, 9]);
    let field = id_field();
    let value = Value::Int(7);
    let request = SearchRequest {
        lower: 1,
        upper: 2,
        ..SearchRequest::full(&rows, &field, &Comparator::Numeric, &value)
    };

    // 7 lives at index 3, outside the window: the gap hugs the window's top.
    let outcome = binary_search(&request, &mut PositionCache::new());
    assert_eq!(outcome, gap(Some(2), Some(3)));
}

#[test]
fn closures_are_search_engines() {
    let rows = id_rows(&[1]);
    let field = id_field();
    let value = Value::Int(1);
    let request = SearchRequest::full(&rows, &field, &Comparator::Numeric, &value);
    let engine = |request: &SearchRequest<'_, Row>, cache: &mut PositionCache| {
        cache.insert(request.value.clone(), SearchOutcome::Exact(0));
        SearchOutcome::Exact(0)
    };

    let mut cache = PositionCache::new();
    assert_eq!(engine.search(&request, &mut cache), SearchOutcome::Exact(0));
    assert_eq!(cache.get(&value), Some(SearchOutcome::Exact(0)));
}

#[test]
fn advancing_generation_turns_entries_stale() {
    let mut cache = PositionCache::new();
    let value = Value::Int(3);
    cache.insert(value.clone(), SearchOutcome::Exact(1));

    cache.advance();

    assert_eq!(cache.lookup(&value), CacheLookup::Stale);
    assert_eq!(cache.get(&value), None);
    assert_eq!(cache.prune_stale(), 1);
    assert_eq!(cache.lookup(&value), CacheLookup::Miss);
}

#[test]
fn disabled_cache_retains_nothing() {
    let mut cache = PositionCache::disabled();
    cache.insert(Value::Int(1), SearchOutcome::Exact(0));

    assert!(cache.is_empty());
    assert_eq!(cache.lookup(&Value::Int(1)), CacheLookup::Miss);
}

// ---- properties --------------------------------------------------------

fn sorted_unique_ids() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::btree_set(-1_000i64..1_000, 1..64)
        .prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn present_values_match_exactly(ids in sorted_unique_ids(), pick in any::<prop::sample::Index>()) {
        let rows = id_rows(&ids);
        let value = ids[pick.index(ids.len())];

        let outcome = search(&rows, value);
        let index = outcome.exact().expect("present value must match");
        prop_assert_eq!(ids[index], value);
    }

    #[test]
    fn absent_values_land_between_neighbours(ids in sorted_unique_ids(), value in -1_100i64..1_100) {
        prop_assume!(!ids.contains(&value));
        let rows = id_rows(&ids);

        match search(&rows, value) {
            SearchOutcome::Exact(_) => prop_assert!(false, "absent value matched"),
            SearchOutcome::Gap { prev, next } => {
                if let (Some(prev), Some(next)) = (prev, next) {
                    prop_assert_eq!(next, prev + 1);
                }
                if let Some(prev) = prev {
                    prop_assert!(ids[prev] < value);
                } else {
                    prop_assert!(ids[0] > value);
                }
                if let Some(next) = next {
                    prop_assert!(ids[next] > value);
                } else {
                    prop_assert!(ids[ids.len() - 1] < value);
                }
            }
        }
    }
}
