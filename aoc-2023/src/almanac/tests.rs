//! Tests for the almanac pipeline, checked against the pointwise oracle.

use super::oracle;
use super::*;
use proptest::prelude::*;

/// Stages of the published day 5 example, in declaration order
const EXAMPLE_STAGES: &[&[(Value, Value, Value)]] = &[
    &[(50, 98, 2), (52, 50, 48)],
    &[(0, 15, 37), (37, 52, 2), (39, 0, 15)],
    &[(49, 53, 8), (0, 11, 42), (42, 0, 7), (57, 7, 4)],
    &[(88, 18, 7), (18, 25, 70)],
    &[(45, 77, 23), (81, 45, 19), (68, 64, 13)],
    &[(0, 69, 1), (1, 0, 69)],
    &[(60, 56, 37), (56, 93, 4)],
];

fn stage(triples: &[(Value, Value, Value)]) -> Stage {
    Stage::from_mappings(triples.iter().copied().map(Mapping::from)).unwrap()
}

fn example_pipeline() -> Pipeline {
    EXAMPLE_STAGES.iter().map(|triples| stage(triples)).collect()
}

fn singleton(value: Value) -> RangeSet {
    RangeSet::from(vec![Range::singleton(value)])
}

fn sorted_bounds(set: &RangeSet) -> Vec<(Value, Value)> {
    let mut bounds: Vec<_> = set.iter().map(|r| (r.start(), r.end())).collect();
    bounds.sort_unstable();
    bounds
}

#[test]
fn test_example_seed_ranges_reach_46() {
    let seeds = RangeSet::from_seed_pairs(&[79, 14, 55, 13]).unwrap();
    assert_eq!(example_pipeline().lowest(seeds), Some(46));
}

#[test]
fn test_example_single_seeds_reach_35() {
    let seeds = RangeSet::from_seed_values(&[79, 14, 55, 13]).unwrap();
    assert_eq!(example_pipeline().lowest(seeds), Some(35));
}

#[test]
fn test_example_seed_locations_match_oracle() {
    let pipeline = example_pipeline();
    // Locations listed in the puzzle text for seeds 79, 14, 55 and 13
    for (seed, location) in [(79, 82), (14, 43), (55, 86), (13, 35)] {
        assert_eq!(oracle::run_value(&pipeline, seed), location);
        assert_eq!(pipeline.run(singleton(seed)).minimum(), Some(location));
    }
}

#[test]
fn test_gap_filling_around_single_mapping() {
    let stage = stage(&[(50, 98, 2)]);
    let bounds: Vec<_> = stage
        .ranges()
        .iter()
        .map(|r| (r.start(), r.end(), r.offset()))
        .collect();
    assert_eq!(bounds, vec![(0, 97, 0), (98, 99, -48), (100, SENTINEL, 0)]);

    for (value, expected) in [(10, 10), (98, 50), (99, 51), (100, 100)] {
        assert_eq!(stage.apply(&singleton(value)).minimum(), Some(expected));
        assert_eq!(oracle::map_value(&stage, value), expected);
    }
}

#[test]
fn test_mapping_at_zero_needs_no_leading_gap() {
    let stage = stage(&[(10, 0, 5), (20, 5, 5)]);
    assert_eq!(stage.ranges().len(), 3);
    assert_eq!(stage.ranges()[0].start(), 0);
    assert_eq!(stage.ranges()[0].offset(), 10);
}

#[test]
fn test_mapping_up_to_sentinel_needs_no_trailing_gap() {
    let stage = stage(&[(0, SENTINEL - 1, 2)]);
    assert_eq!(stage.ranges().last().map(Range::end), Some(SENTINEL));
    assert_eq!(stage.ranges().len(), 2);
}

#[test]
fn test_empty_mapping_list_is_identity() {
    let empty: [Mapping; 0] = [];
    assert_eq!(Stage::from_mappings(empty).unwrap(), Stage::identity());
    assert_eq!(Stage::default().ranges(), &[Range::DOMAIN]);
}

#[test]
fn test_overlapping_mappings_rejected() {
    let result = Stage::from_mappings([Mapping::new(0, 10, 5), Mapping::new(100, 14, 3)]);
    match result {
        Err(StageError::Overlap { first, second }) => {
            assert_eq!((first.start(), first.end()), (10, 14));
            assert_eq!((second.start(), second.end()), (14, 16));
        }
        other => panic!("expected overlap error, got {other:?}"),
    }

    // Declaration order doesn't matter
    let result = Stage::from_mappings([Mapping::new(100, 14, 3), Mapping::new(0, 10, 5)]);
    assert!(matches!(result, Err(StageError::Overlap { .. })));

    // Identical sources are contradictory too
    let result = Stage::from_mappings([Mapping::new(0, 10, 1), Mapping::new(5, 10, 1)]);
    assert!(matches!(result, Err(StageError::Overlap { .. })));
}

#[test]
fn test_adjacent_mappings_accepted() {
    let stage = Stage::from_mappings([Mapping::new(0, 10, 5), Mapping::new(100, 15, 3)]).unwrap();
    assert_eq!(stage.ranges().len(), 4);
}

#[test]
fn test_non_positive_length_rejected() {
    assert_eq!(
        Stage::from_mappings([Mapping::new(1, 2, 0)]),
        Err(StageError::NonPositiveLength {
            destination_start: 1,
            source_start: 2,
            length: 0,
        })
    );
    assert!(matches!(
        Stage::from_mappings([Mapping::new(1, 2, -4)]),
        Err(StageError::NonPositiveLength { .. })
    ));
}

#[test]
fn test_out_of_domain_rejected() {
    for mapping in [
        Mapping::new(0, -1, 3),
        Mapping::new(-5, 0, 3),
        Mapping::new(0, SENTINEL, 2),
        Mapping::new(SENTINEL, 0, 2),
        Mapping::new(0, i64::MAX, i64::MAX),
    ] {
        assert!(
            matches!(Stage::from_mappings([mapping]), Err(StageError::OutOfDomain { .. })),
            "{mapping:?} should be rejected"
        );
    }
}

#[test]
fn test_empty_pipeline_returns_seeds_unchanged() {
    let seeds = RangeSet::from_seed_pairs(&[79, 14, 55, 13]).unwrap();
    let pipeline = Pipeline::default();
    assert!(pipeline.is_empty());
    assert_eq!(pipeline.run(seeds.clone()), seeds);
}

#[test]
fn test_range_outside_coverage_passes_through() {
    let stage = stage(&[(0, 10, 5)]);
    let stray = RangeSet::from(vec![Range::new(-20, -10).unwrap()]);
    assert_eq!(stage.apply(&stray), stray);
}

#[test]
fn test_range_below_zero_keeps_uncovered_part() {
    let below = RangeSet::from(vec![Range::new(-5, 3).unwrap()]);
    let out = Stage::identity().apply(&below);
    assert_eq!(sorted_bounds(&out), vec![(-5, -1), (0, 3)]);
    assert_eq!(out.total_width(), 9);

    let out = stage(&[(100, 0, 2)]).apply(&below);
    assert_eq!(sorted_bounds(&out), vec![(-5, -1), (2, 3), (100, 101)]);
}

#[test]
fn test_range_above_sentinel_keeps_uncovered_part() {
    let above = RangeSet::from(vec![Range::new(SENTINEL - 1, SENTINEL + 10).unwrap()]);
    let out = stage(&[(0, 5, 5)]).apply(&above);
    assert_eq!(
        sorted_bounds(&out),
        vec![(SENTINEL - 1, SENTINEL), (SENTINEL + 1, SENTINEL + 10)]
    );
    assert_eq!(out.total_width(), 12);
}

#[test]
fn test_full_integer_range_is_conserved() {
    let everything = RangeSet::from(vec![Range::new(Value::MIN, Value::MAX).unwrap()]);
    let out = stage(&[(10, 0, 5)]).apply(&everything);
    assert_eq!(out.total_width(), 1u128 << 64);
    assert_eq!(out.minimum(), Some(Value::MIN));
}

#[test]
fn test_wide_range_costs_only_boundary_crossings() {
    let stage = stage(&[(0, 1_000_000_000, 10), (5, 3_000_000_000, 10)]);
    let seeds = RangeSet::from_seed_pairs(&[0, 4_000_000_000]).unwrap();
    let out = stage.apply(&seeds);
    assert_eq!(out.len(), 5);
    assert_eq!(out.total_width(), 4_000_000_000);
    assert_eq!(out.minimum(), Some(0));
}

#[test]
fn test_stage_application_builds_a_new_set() {
    let seeds = RangeSet::from_seed_pairs(&[95, 10]).unwrap();
    let stage = stage(&[(50, 98, 2)]);
    let out = stage.apply(&seeds);
    assert_eq!(sorted_bounds(&out), vec![(50, 51), (95, 97), (100, 104)]);
    assert_eq!(sorted_bounds(&seeds), vec![(95, 104)]);
}

// ----------------------------------------------------------------------------
// Properties
// ----------------------------------------------------------------------------

/// Random stage with disjoint sources inside `0..1000`, declared out of order
fn arb_stage() -> impl Strategy<Value = Stage> {
    prop::collection::vec((0 as Value..30, 1 as Value..60, 0 as Value..1000), 0..8).prop_map(
        |specs| {
            let mut source = 0;
            let mut mappings: Vec<Mapping> = specs
                .into_iter()
                .map(|(gap, length, destination)| {
                    source += gap;
                    let mapping = Mapping::new(destination, source, length);
                    source += length;
                    mapping
                })
                .collect();
            mappings.reverse();
            Stage::from_mappings(mappings).unwrap()
        },
    )
}

fn arb_range() -> impl Strategy<Value = Range> {
    (0 as Value..1000, 0 as Value..200).prop_map(|(start, extra)| {
        Range::new(start, start + extra).unwrap()
    })
}

fn arb_range_set() -> impl Strategy<Value = RangeSet> {
    prop::collection::vec(arb_range(), 1..6).prop_map(RangeSet::from)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_stage_tiles_whole_domain(stage in arb_stage()) {
        let ranges = stage.ranges();
        prop_assert_eq!(ranges.first().map(Range::start), Some(0));
        prop_assert_eq!(ranges.last().map(Range::end), Some(SENTINEL));
        for pair in ranges.windows(2) {
            prop_assert_eq!(pair[1].start(), pair[0].end() + 1);
        }
    }

    #[test]
    fn prop_identity_stage_preserves_population(set in arb_range_set()) {
        let out = Stage::identity().apply(&set);
        prop_assert_eq!(sorted_bounds(&out), sorted_bounds(&set));
    }

    #[test]
    fn prop_splitting_conserves_width(stage in arb_stage(), range in arb_range()) {
        let out = stage.apply(&RangeSet::from(vec![range]));
        prop_assert_eq!(out.total_width(), range.width());
    }

    #[test]
    fn prop_ranges_straddling_domain_edges_conserve_width(
        stage in arb_stage(),
        below in 1 as Value..100,
        above in 1 as Value..100
    ) {
        let low = Range::new(-below, 50).unwrap();
        let high = Range::new(SENTINEL - 50, SENTINEL + above).unwrap();
        let out = stage.apply(&RangeSet::from(vec![low, high]));
        prop_assert_eq!(out.total_width(), low.width() + high.width());
        prop_assert_eq!(out.minimum(), Some(-below));
    }

    #[test]
    fn prop_interval_matches_pointwise(stage in arb_stage()) {
        for value in 0..1000 {
            let out = stage.apply(&singleton(value));
            let expected = oracle::map_value(&stage, value);
            prop_assert_eq!(sorted_bounds(&out), vec![(expected, expected)]);
        }
    }

    #[test]
    fn prop_three_stages_compose_pointwise(
        first in arb_stage(),
        second in arb_stage(),
        third in arb_stage()
    ) {
        let pipeline = Pipeline::new(vec![first, second, third]);
        for value in 0..1000 {
            let stepwise = pipeline
                .stages()
                .iter()
                .fold(value, |v, stage| oracle::map_value(stage, v));
            prop_assert_eq!(pipeline.run(singleton(value)).minimum(), Some(stepwise));
            prop_assert_eq!(oracle::run_value(&pipeline, value), stepwise);
        }
    }

    #[test]
    fn prop_lowest_matches_pointwise(
        stages in prop::collection::vec(arb_stage(), 0..5),
        seeds in arb_range_set()
    ) {
        let pipeline = Pipeline::new(stages);
        let mut expected: Vec<Value> = oracle::expand(&seeds)
            .map(|v| oracle::run_value(&pipeline, v))
            .collect();
        expected.sort_unstable();

        let out = pipeline.run(seeds.clone());
        let mut actual: Vec<Value> = oracle::expand(&out).collect();
        actual.sort_unstable();

        prop_assert_eq!(&actual, &expected);
        prop_assert_eq!(pipeline.lowest(seeds.clone()), oracle::lowest(&pipeline, &seeds));
    }
}
