mod common_test_utils;
use common_test_utils::*;

use outcome_analysis::analyzer::base::ClassifiedSequence;
use outcome_analysis::analyzer::hot_spot_analyzer::{HotSpotAnalyzer, MinuteBucket};

#[test]
fn test_house_and_column_rankings() {
    // High 인덱스 0, 2, 4, 7 -> 간격 2, 2, 3 / 컬럼 1, 3, 5, 1
    let values = [15.0, 1.2, 15.0, 1.2, 15.0, 1.2, 1.2, 15.0, 1.2];
    let outcomes = create_same_minute_sequence(&values, 7);
    let seq = ClassifiedSequence::new(&outcomes);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);

    assert_eq!(spots.houses.len(), 2);
    assert_eq!((spots.houses[0].house, spots.houses[0].count), (2, 2));
    assert_eq!((spots.houses[1].house, spots.houses[1].count), (3, 1));

    assert_eq!(spots.columns.len(), 1);
    assert_eq!((spots.columns[0].column, spots.columns[0].count), (1, 2));
}

#[test]
fn test_hot_minutes_per_bucket() {
    let values = [15.0, 1.2, 15.0, 1.2, 15.0, 1.2, 1.2, 15.0, 1.2];
    let outcomes = create_same_minute_sequence(&values, 7);
    let seq = ClassifiedSequence::new(&outcomes);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);

    assert_eq!(spots.minutes.len(), MinuteBucket::ALL.len());
    assert!(spots.is_hot_minute(MinuteBucket::High, 7));
    assert!(!spots.is_hot_minute(MinuteBucket::High, 8));
    assert_eq!(spots.minutes_for(MinuteBucket::High)[0].count, 4);
    assert_eq!(spots.minutes_for(MinuteBucket::Low)[0].count, 5);
    assert!(spots.minutes_for(MinuteBucket::Mid).is_empty());
    assert!(spots.minutes_for(MinuteBucket::Over50).is_empty());
}

#[test]
fn test_sub_tier_buckets_are_nested() {
    let values = [1200.0, 1.2, 150.0, 1.2, 60.0, 1200.0];
    let outcomes = create_same_minute_sequence(&values, 42);
    let seq = ClassifiedSequence::new(&outcomes);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);

    assert_eq!(spots.minutes_for(MinuteBucket::Over50)[0].count, 4);
    assert_eq!(spots.minutes_for(MinuteBucket::Over100)[0].count, 3);
    assert_eq!(spots.minutes_for(MinuteBucket::Over1000)[0].count, 2);
}

#[test]
fn test_single_occurrence_minutes_are_ignored() {
    // 30초 간격이므로 High는 서로 다른 분에 한 번씩만 나옴
    let outcomes = create_sequence(&create_periodic_high_values(40, 5, 12.0));
    let seq = ClassifiedSequence::new(&outcomes);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);

    assert!(spots.minutes_for(MinuteBucket::High).is_empty());
    assert_eq!(spots.houses.len(), 1);
    assert_eq!((spots.houses[0].house, spots.houses[0].count), (5, 7));
}

#[test]
fn test_top_minutes_sorted_and_truncated() {
    // 분 0..=6 에 각각 count가 다른 Low 결과
    let mut outcomes = Vec::new();
    for minute in 0..7u32 {
        for repeat in 0..(minute + 2) {
            outcomes.push(outcome_at(1.2, test_date(), repeat, minute, 0));
        }
    }
    outcomes.sort_by_key(|outcome| outcome.datetime());
    let seq = ClassifiedSequence::new(&outcomes);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);

    let low = spots.minutes_for(MinuteBucket::Low);
    assert_eq!(low.len(), 5);
    let minutes: Vec<u32> = low.iter().map(|hot| hot.minute).collect();
    assert_eq!(minutes, vec![6, 5, 4, 3, 2]);
}
