//! Behavior-driven tests for synthetic series generation
//!
//! These tests verify what a dashboard sees when it asks for a series:
//! length, ordering, reproducibility, and fallbacks for unknown input.

use tradevision_tests::*;

// =============================================================================
// Generation: Shape and Ordering
// =============================================================================

#[test]
fn when_dashboard_requests_n_points_it_receives_exactly_n_ordered_bars() {
    // Given: A request for 150 five-minute bars
    let series = SeriesRequest::new(symbol("AAPL"), 150)
        .expect("valid request")
        .with_seed(9)
        .with_interval(Interval::FiveMinutes)
        .with_end(reference_end())
        .generate()
        .expect("series generates");

    // Then: Exactly 150 bars come back, strictly increasing and evenly spaced
    assert_eq!(series.len(), 150);
    for pair in series.bars().windows(2) {
        assert_eq!(pair[1].ts.unix_timestamp() - pair[0].ts.unix_timestamp(), 300);
    }

    // And: The last bar sits on the requested end instant
    assert_eq!(series.last().ts, reference_end());
}

#[test]
fn when_series_is_generated_every_bar_respects_ohlc_invariant() {
    // Given: A volatile symbol and a long run
    let series = seeded_series("BTCUSD", 500, 1234);

    // Then: Every bar has a valid high/low envelope and positive prices
    for bar in series.bars() {
        assert_ohlc_invariant(bar);
    }
}

#[test]
fn when_single_point_is_requested_bar_opens_at_catalog_base_price() {
    // Given / When: A one-bar GOOGL series
    let series = seeded_series("GOOGL", 1, 3);

    // Then: It opens at the catalog base price
    assert_eq!(series.len(), 1);
    assert_eq!(series.first().open, 2800.0);
}

// =============================================================================
// Generation: Determinism
// =============================================================================

#[test]
fn when_same_symbol_count_and_seed_are_used_closes_are_bit_identical() {
    // Given: Two identical requests
    let symbol = symbol("AAPL");
    let first = generate_series(&symbol, 5, Some(42)).expect("series");
    let second = generate_series(&symbol, 5, Some(42)).expect("series");

    // Then: Closing prices match bit for bit
    let first_bits: Vec<u64> = first.closes().iter().map(|c| c.to_bits()).collect();
    let second_bits: Vec<u64> = second.closes().iter().map(|c| c.to_bits()).collect();
    assert_eq!(first_bits, second_bits);
}

#[test]
fn when_seed_is_omitted_symbol_derived_seed_keeps_output_stable() {
    // Given: Two requests without an explicit seed
    let a = SeriesRequest::new(symbol("TSLA"), 40)
        .expect("valid request")
        .with_end(reference_end())
        .generate()
        .expect("series");
    let b = SeriesRequest::new(symbol("tsla"), 40)
        .expect("valid request")
        .with_end(reference_end())
        .generate()
        .expect("series");

    // Then: Output is the same, and differs from another symbol
    assert_eq!(a, b);
    let other = seeded_series("MSFT", 40, symbol("MSFT").seed());
    assert_ne!(a.closes(), other.closes());
}

// =============================================================================
// Generation: Fallbacks and Errors
// =============================================================================

#[test]
fn when_symbol_is_unknown_generation_falls_back_instead_of_failing() {
    // Given: A symbol absent from the watchlist
    let series = seeded_series("ZZTOP", 1, 1);

    // Then: The default base price is used
    assert_eq!(series.first().open, 100.0);
}

#[test]
fn when_symbol_is_a_pair_or_index_ticker_generation_uses_default_profile() {
    // Given: Tickers with separators and prefixes common on dashboards
    for raw in ["EUR/USD", "^GSPC", "X:BTCUSD"] {
        // When: A series is generated for each
        let series = seeded_series(raw, 3, 5);

        // Then: The symbol is kept as typed and the default base price applies
        assert_eq!(series.symbol().as_str(), raw);
        assert_eq!(series.first().open, 100.0);
    }
}

#[test]
fn when_point_count_is_zero_caller_gets_invalid_argument() {
    // Given / When: A zero-length request
    let err = generate_series(&symbol("AAPL"), 0, None).expect_err("must fail");

    // Then: The error is InvalidArgument naming the parameter
    assert!(matches!(
        err,
        CoreError::InvalidArgument {
            name: "point_count",
            ..
        }
    ));
}

#[test]
fn when_series_is_serialized_and_read_back_it_is_unchanged() {
    // Given: A generated series
    let series = seeded_series("NVDA", 12, 77);

    // When: It crosses a JSON boundary
    let json = serde_json::to_string(&series).expect("serializes");
    let restored: Series = serde_json::from_str(&json).expect("deserializes");

    // Then: Nothing is lost
    assert_eq!(restored.symbol(), series.symbol());
    assert_eq!(restored.len(), series.len());
    assert_eq!(restored.last().ts, series.last().ts);
}
