mod common_test_utils;
use common_test_utils::*;

use outcome_analysis::analyzer::base::ClassifiedSequence;
use outcome_analysis::analyzer::streak_analyzer::{ExtremeReport, StreakAnalysis};

#[test]
fn test_streak_counts_and_intervals() {
    let outcomes = create_sequence(&[1.2, 3.0, 12.0, 1.2, 1.2, 15.0, 3.0, 3.0]);
    let seq = ClassifiedSequence::new(&outcomes);
    let streaks = StreakAnalysis::analyze(&seq);

    assert_eq!(streaks.total_plays, 8);
    assert_eq!(streaks.low_count, 3);
    assert_eq!(streaks.mid_count, 3);
    assert_eq!(streaks.high_count, 2);
    assert_eq!(streaks.high_intervals, vec![3]);
    assert_close(streaks.average_high_interval, 3.0);
    assert_eq!(streaks.plays_since_last_high, 2);
    assert_eq!(streaks.current_low_streak, 0);
    assert_eq!(streaks.current_non_low_streak, 3);
    assert_eq!(streaks.longest_low_streak, 2);
    assert_eq!(streaks.longest_high_gap, 3);
}

#[test]
fn test_no_high_ever() {
    let outcomes = create_sequence(&create_low_values(12));
    let seq = ClassifiedSequence::new(&outcomes);
    let streaks = StreakAnalysis::analyze(&seq);

    assert_eq!(streaks.plays_since_last_high, 12);
    assert_eq!(streaks.average_high_interval, 0.0);
    assert!(streaks.high_intervals.is_empty());
    assert_eq!(streaks.current_low_streak, 12);
    assert_eq!(streaks.longest_high_gap, 0);
}

#[test]
fn test_single_high_has_zero_average() {
    let outcomes = create_sequence(&[1.2, 20.0, 1.2]);
    let seq = ClassifiedSequence::new(&outcomes);
    let streaks = StreakAnalysis::analyze(&seq);

    assert_eq!(streaks.high_count, 1);
    assert_eq!(streaks.average_high_interval, 0.0);
    assert_eq!(streaks.plays_since_last_high, 1);
}

#[test]
fn test_extreme_reports() {
    let outcomes = create_sequence(&[60.0, 12.0, 15.0, 120.0, 11.0, 55.0, 1.2]);
    let seq = ClassifiedSequence::new(&outcomes);

    let over_50 = ExtremeReport::analyze(&seq, 50.0, 10);
    assert_eq!(over_50.history, vec![2, 1]);
    assert_eq!(over_50.highs_since_last, 0);
    assert_close(over_50.average_highs_between, 1.5);
    assert!(!over_50.large_high_since_last);

    let over_100 = ExtremeReport::analyze(&seq, 100.0, 10);
    assert!(over_100.history.is_empty());
    assert_eq!(over_100.highs_since_last, 2);
    assert_eq!(over_100.average_highs_between, 0.0);
    assert!(over_100.large_high_since_last);
    assert!(!over_100.near_miss_since_last);

    let over_1000 = ExtremeReport::analyze(&seq, 1000.0, 10);
    assert_eq!(over_1000.highs_since_last, 6);
    assert!(!over_1000.large_high_since_last);
}

#[test]
fn test_extreme_history_is_bounded() {
    // 50x 사이에 High 1개씩, 극단값 6회
    let mut values = Vec::new();
    for _ in 0..6 {
        values.push(70.0);
        values.push(12.0);
    }
    let outcomes = create_sequence(&values);
    let seq = ClassifiedSequence::new(&outcomes);

    let report = ExtremeReport::analyze(&seq, 50.0, 3);
    assert_eq!(report.history, vec![1, 1, 1]);
    assert_eq!(report.highs_since_last, 1);

    let all = ExtremeReport::analyze_all(&seq, 10);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].history.len(), 5);
}
