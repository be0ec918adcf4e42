use super::*;
use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[rstest]
#[case("24K", Purity::K24)]
#[case("22K", Purity::K22)]
#[case("18K", Purity::K18)]
fn purity_parses_wire_labels(#[case] label: &str, #[case] expected: Purity) {
    assert_eq!(label.parse::<Purity>().unwrap(), expected);
    assert_eq!(expected.label(), label);
    assert_eq!(expected.to_string(), label);
}

#[rstest]
#[case("24k")]
#[case("24")]
#[case("gold")]
#[case("")]
fn purity_rejects_unknown_labels(#[case] label: &str) {
    assert!(label.parse::<Purity>().is_err());
}

#[test]
fn purity_all_is_in_display_order() {
    let labels: Vec<_> = Purity::ALL.iter().map(Purity::label).collect();
    assert_eq!(labels, ["24K", "22K", "18K"]);
}

#[test]
fn purity_slugs_match_current_payload_keys() {
    let slugs: Vec<_> = Purity::ALL.iter().map(Purity::slug).collect();
    assert_eq!(slugs, ["24k_gold", "22k_gold", "18k_gold"]);
}

#[test]
fn sheet_triple_selects_by_purity() {
    let triple = |n: u32| RateTriple {
        selling: Decimal::from(n),
        exchange: Decimal::from(n + 1),
        making: Decimal::from(n + 2),
    };
    let sheet = RateSheet {
        k24: triple(100),
        k22: triple(200),
        k18: triple(300),
    };

    assert_eq!(sheet.triple(Purity::K24).selling, Decimal::from(100));
    assert_eq!(sheet.triple(Purity::K22).exchange, Decimal::from(201));
    assert_eq!(sheet.triple(Purity::K18).making, Decimal::from(302));
}

#[rstest]
#[case("2025-08-01 10:30:00")]
#[case("2025-08-01T10:30:00")]
#[case("2025-08-01 10:30")]
#[case("2025-08-01T10:30")]
#[case("  2025-08-01 10:30:00  ")]
fn parse_accepts_form_and_wire_shapes(#[case] raw: &str) {
    let parsed = parse_release_datetime(raw).unwrap();
    assert_eq!(parsed, at(2025, 8, 1, 10, 30, 0));
}

#[rstest]
#[case("")]
#[case("2025-08-01")]
#[case("10:30:00")]
#[case("2025-13-01 10:30:00")]
#[case("01-08-2025 10:30")]
#[case("next tuesday")]
fn parse_rejects_malformed_input(#[case] raw: &str) {
    assert!(parse_release_datetime(raw).is_err());
}

#[test]
fn format_produces_the_wire_shape() {
    assert_eq!(
        format_release_datetime(at(2025, 8, 1, 9, 5, 3)),
        "2025-08-01 09:05:03"
    );
}

#[test]
fn history_window_starts_at_midnight_days_back() {
    let now = at(2025, 8, 10, 14, 25, 0);

    let (start, end) = history_window(now, 7);
    assert_eq!(start, at(2025, 8, 4, 0, 0, 0));
    assert_eq!(end, now);
}

#[test]
fn history_window_of_one_day_covers_today_only() {
    let now = at(2025, 8, 10, 14, 25, 0);

    let (start, end) = history_window(now, 1);
    assert_eq!(start, at(2025, 8, 10, 0, 0, 0));
    assert_eq!(end, now);
}

#[test]
fn history_window_crosses_month_boundaries() {
    let now = at(2025, 8, 2, 8, 0, 0);

    let (start, _) = history_window(now, 7);
    assert_eq!(start, at(2025, 7, 27, 0, 0, 0));
}

#[test]
fn latest_release_ignores_future_snapshots() {
    let now = at(2025, 8, 10, 12, 0, 0);
    let releases = [
        at(2025, 8, 9, 10, 0, 0),
        at(2025, 8, 10, 11, 0, 0),
        at(2025, 8, 11, 9, 0, 0),
    ];

    assert_eq!(
        latest_release_at_or_before(&releases, now),
        Some(at(2025, 8, 10, 11, 0, 0))
    );
}

#[test]
fn latest_release_includes_a_snapshot_dated_exactly_now() {
    let now = at(2025, 8, 10, 12, 0, 0);
    let releases = [at(2025, 8, 10, 12, 0, 0)];

    assert_eq!(latest_release_at_or_before(&releases, now), Some(now));
}

#[test]
fn latest_release_is_none_when_everything_is_future() {
    let now = at(2025, 8, 10, 12, 0, 0);
    let releases = [at(2025, 8, 10, 12, 0, 1), at(2025, 9, 1, 0, 0, 0)];

    assert_eq!(latest_release_at_or_before(&releases, now), None);
    assert_eq!(latest_release_at_or_before(&[], now), None);
}

fn naive_datetime_strategy() -> impl Strategy<Value = NaiveDateTime> {
    // Seconds relative to an arbitrary epoch day, spanning a few years.
    (-100_000_000i64..100_000_000i64).prop_map(|secs| {
        at(2025, 1, 1, 0, 0, 0) + Duration::seconds(secs)
    })
}

proptest! {
    #[test]
    fn prop_latest_release_is_never_future(
        releases in prop::collection::vec(naive_datetime_strategy(), 0..32),
        now in naive_datetime_strategy(),
    ) {
        if let Some(latest) = latest_release_at_or_before(&releases, now) {
            prop_assert!(latest <= now);
            prop_assert!(releases.contains(&latest));
        } else {
            prop_assert!(releases.iter().all(|release| *release > now));
        }
    }

    #[test]
    fn prop_latest_release_dominates_all_visible_snapshots(
        releases in prop::collection::vec(naive_datetime_strategy(), 1..32),
        now in naive_datetime_strategy(),
    ) {
        if let Some(latest) = latest_release_at_or_before(&releases, now) {
            for release in releases.iter().filter(|release| **release <= now) {
                prop_assert!(*release <= latest);
            }
        }
    }

    #[test]
    fn prop_history_window_is_ordered_and_starts_at_midnight(
        now in naive_datetime_strategy(),
        days in 1u32..=365,
    ) {
        let (start, end) = history_window(now, days);
        prop_assert!(start <= end);
        prop_assert_eq!(start.time(), NaiveTime::MIN);
        prop_assert_eq!(end, now);
    }
}
