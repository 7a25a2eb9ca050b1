#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use outcome_analysis::model::Outcome;

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default()
}

pub fn test_datetime(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    test_date().and_time(NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default())
}

/// 특정 날짜/시각의 결과 생성 (인덱스는 엔진이 다시 매김)
pub fn outcome_at(value: f64, date: NaiveDate, hour: u32, minute: u32, second: u32) -> Outcome {
    let time = NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default();
    Outcome::new(value, date, time, 0)
}

/// 30초 간격으로 배치한 결과 시퀀스 생성 (12:00:00부터)
pub fn create_sequence(values: &[f64]) -> Vec<Outcome> {
    create_sequence_from(test_datetime(12, 0, 0), values)
}

/// 시작 시각부터 30초 간격으로 배치한 결과 시퀀스 생성
pub fn create_sequence_from(start: NaiveDateTime, values: &[f64]) -> Vec<Outcome> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let at = start + Duration::seconds(30 * index as i64);
            Outcome::new(*value, at.date(), at.time(), index)
        })
        .collect()
}

/// 같은 분(`minute`)에 여러 결과가 몰린 시퀀스 생성
///
/// 각 결과는 `hour`시 `minute`분에 서로 다른 시(hour + i)로 배치됩니다.
pub fn create_same_minute_sequence(values: &[f64], minute: u32) -> Vec<Outcome> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let time = NaiveTime::from_hms_opt((index % 24) as u32, minute, 0).unwrap_or_default();
            let date = test_date() + Duration::days((index / 24) as i64);
            Outcome::new(*value, date, time, index)
        })
        .collect()
}

/// 주기적으로 High가 나오는 시퀀스 (`period`마다 High 1회)
pub fn create_periodic_high_values(count: usize, period: usize, high: f64) -> Vec<f64> {
    (0..count)
        .map(|i| if (i + 1) % period == 0 { high } else { 1.3 })
        .collect()
}

/// 모두 Low인 값 배열
pub fn create_low_values(count: usize) -> Vec<f64> {
    vec![1.2; count]
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
