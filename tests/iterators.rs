use hdrhist::{Bracket, Histogram, RecordError};

#[test]
fn iter_all_empty_histogram_yields_nothing() {
    let h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
    assert_eq!(0, h.iter_all().count());
}

#[test]
fn iter_all_visits_empty_slots_up_to_last_sample() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();

    h.record(0).unwrap();
    h.record_n(5, 2).unwrap();

    let expected = vec![
        (0, 1, 1),
        (1, 0, 1),
        (2, 0, 1),
        (3, 0, 1),
        (4, 0, 1),
        (5, 2, 3),
    ];
    assert_eq!(
        expected,
        h.iter_all()
            .map(|iv| (iv.value(), iv.count_at_value(), iv.count_to_value()))
            .collect::<Vec<(u64, u64, u64)>>()
    );
}

#[test]
fn iter_all_rolls_into_top_half_of_next_bucket() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
    h.record(2048).unwrap();

    let values: Vec<_> = h.iter_all().collect();
    // all of bucket 0, then the first slot of bucket 1's top half
    assert_eq!(2049, values.len());
    assert_eq!(2047, values[2047].value());
    assert_eq!(2047, values[2047].value_iterated_to());

    let last = values[2048];
    assert_eq!(2048, last.value());
    assert_eq!(2049, last.value_iterated_to());
    assert_eq!(1, last.count_at_value());
    assert_eq!(100.0, last.percentile());
}

#[test]
fn iter_all_percentile_is_share_of_samples_so_far() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();
    h.record(1).unwrap();
    h.record_n(3, 3).unwrap();

    let percentiles: Vec<f64> = h.iter_all().map(|iv| iv.percentile()).collect();
    assert_eq!(vec![0.0, 25.0, 25.0, 100.0], percentiles);
}

#[test]
fn iter_recorded_non_saturated_total_count() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();

    h.record(1).unwrap();
    h.record(1_000).unwrap();
    h.record(1_000_000).unwrap();

    let expected = vec![1, 1_000, h.highest_equivalent(1_000_000)];
    assert_eq!(
        expected,
        h.iter_recorded()
            .map(|iv| iv.value_iterated_to())
            .collect::<Vec<u64>>()
    );
}

#[test]
fn iter_recorded_stops_once_total_is_reached() {
    let mut h = Histogram::<u64>::new_with_bounds(1, u64::max_value(), 3).unwrap();

    h.record_n(1, u64::max_value()).unwrap();
    assert_eq!(
        Err(RecordError::CountOverflow),
        h.record_n(1_000, u64::max_value())
    );

    // the first slot already holds every sample the total can count
    assert_eq!(u64::max_value(), h.count());
    assert_eq!(
        vec![1],
        h.iter_recorded()
            .map(|iv| iv.value_iterated_to())
            .collect::<Vec<u64>>()
    );
}

#[test]
fn iter_recorded_skips_empty_slots() {
    let mut h = Histogram::<u32>::new_with_bounds(1, 100_000, 3).unwrap();

    h.record_n(10, 4).unwrap();
    h.record_n(4000, 6).unwrap();
    h.record_n(90_000, 10).unwrap();

    let expected = vec![
        (10, 4, 4, 20.0),
        (4000, 6, 10, 50.0),
        (h.lowest_equivalent(90_000), 10, 20, 100.0),
    ];
    assert_eq!(
        expected,
        h.iter_recorded()
            .map(|iv| (
                iv.value(),
                iv.count_at_value(),
                iv.count_to_value(),
                iv.percentile()
            ))
            .collect::<Vec<(u64, u32, u64, f64)>>()
    );
}

#[test]
fn iter_recorded_below_lowest_trackable_value() {
    let mut h = Histogram::<u64>::new_with_bounds(1024, 1_000_000, 3).unwrap();
    h.record(3).unwrap();
    h.record(1000).unwrap();

    // both fall in the first slot, which spans one unit of 1024
    let recorded: Vec<_> = h.iter_recorded().collect();
    assert_eq!(1, recorded.len());
    assert_eq!(0, recorded[0].value());
    assert_eq!(1023, recorded[0].value_iterated_to());
    assert_eq!(2, recorded[0].count_at_value());
}

#[test]
fn iter_percentiles_empty_histogram() {
    let h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();

    let steps: Vec<_> = h.iter_percentiles(5).collect();
    assert_eq!(1, steps.len());
    assert_eq!(100.0, steps[0].percentile());
    assert_eq!(0, steps[0].count_to_value());
    assert_eq!(0, steps[0].count_at_value());
}

#[test]
fn iter_percentiles_one_tick_per_half_distance() {
    let mut h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    for v in 1..=4 {
        h.record(v).unwrap();
    }

    let expected = vec![
        (0.0, 1, 1),
        (50.0, 2, 2),
        (75.0, 3, 3),
        (87.5, 4, 4),
        // one more step to 100% from the last slot
        (100.0, 4, 4),
    ];
    assert_eq!(
        expected,
        h.iter_percentiles(1)
            .map(|iv| (iv.percentile(), iv.value(), iv.count_to_value()))
            .collect::<Vec<(f64, u64, u64)>>()
    );
}

#[test]
fn iter_percentiles_repeats_a_slot_for_each_checkpoint_it_covers() {
    let mut h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    h.record_n(7, 100).unwrap();
    h.record(1000).unwrap();

    // slot 7 holds 100 / 101 of the samples, so it covers every checkpoint up to 99.0099%
    let expected = vec![
        (0.0, 7),
        (50.0, 7),
        (75.0, 7),
        (87.5, 7),
        (93.75, 7),
        (96.875, 7),
        (98.4375, 7),
        (99.21875, 1000),
        (100.0, 1000),
    ];
    assert_eq!(
        expected,
        h.iter_percentiles(1)
            .map(|iv| (iv.percentile(), iv.value()))
            .collect::<Vec<(f64, u64)>>()
    );
}

#[test]
fn iter_percentiles_last_slot_goes_straight_to_100() {
    let mut h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    h.record_n(7, 100).unwrap();

    let steps: Vec<_> = h.iter_percentiles(1).collect();
    assert_eq!(2, steps.len());
    assert_eq!(0.0, steps[0].percentile());
    assert_eq!(100.0, steps[1].percentile());
    assert!(steps.iter().all(|iv| iv.value() == 7 && iv.count_to_value() == 100));
}

#[test]
fn iter_percentiles_finer_ticks_give_more_steps() {
    let mut h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    for v in 1..=10_000 {
        h.record(v).unwrap();
    }

    let coarse = h.iter_percentiles(1).count();
    let fine = h.iter_percentiles(5).count();
    assert!(fine > coarse, "{} <= {}", fine, coarse);

    let steps: Vec<_> = h.iter_percentiles(5).collect();
    // each tick covers a tenth of the remaining distance to 100%
    assert_eq!(0.0, steps[0].percentile());
    assert_eq!(10.0, steps[1].percentile());
    assert!((steps[2].percentile() - 19.0).abs() < 1e-9);

    for pair in steps.windows(2) {
        assert!(pair[0].percentile() <= pair[1].percentile());
        assert!(pair[0].count_to_value() <= pair[1].count_to_value());
        assert!(pair[0].value() <= pair[1].value());
    }

    let last = steps[steps.len() - 1];
    assert_eq!(100.0, last.percentile());
    assert_eq!(10_000, last.count_to_value());
    assert_eq!(10_000, last.value());
}

#[test]
#[should_panic]
fn iter_percentiles_zero_ticks_panics() {
    let h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    let _ = h.iter_percentiles(0);
}

#[test]
fn cumulative_distribution_matches_percentile_steps() {
    let mut h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    for v in 1..=4 {
        h.record(v).unwrap();
    }

    let brackets = h.cumulative_distribution();
    assert_eq!(
        vec![
            Bracket {
                quantile: 0.0,
                count: 1
            },
            Bracket {
                quantile: 50.0,
                count: 2
            },
            Bracket {
                quantile: 75.0,
                count: 3
            },
            Bracket {
                quantile: 87.5,
                count: 4
            },
            Bracket {
                quantile: 100.0,
                count: 4
            },
        ],
        brackets
    );

    // a fresh walk every call
    assert_eq!(brackets, h.cumulative_distribution());
}

#[test]
fn cumulative_distribution_serializes_as_json() {
    let mut h = Histogram::<u64>::new_with_max(1_000_000, 3).unwrap();
    h.record(42).unwrap();

    let brackets = h.cumulative_distribution();
    let json = serde_json::to_string(&brackets).unwrap();
    assert!(json.starts_with("[{\"quantile\":0.0,\"count\":1}"), "{}", json);

    let back: Vec<Bracket> = serde_json::from_str(&json).unwrap();
    assert_eq!(brackets, back);
}
