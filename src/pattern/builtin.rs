use crate::analyzer::base::ClassifiedSequence;
use crate::model::{Outcome, Tier};
use crate::pattern::{MatchResult, PatternOccurrence, average_hit_value};
use serde::Serialize;
use std::fmt::Display;

/// 내장 탐지기 패턴 길이 (High 두 개)
const DETECTOR_PATTERN_LEN: usize = 2;

/// 내장 단거리 패턴 탐지기
///
/// 가장 최근 두 High 사이의 거리로 활성 여부를 판단합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuiltInDetector {
    /// 연속 High (거리 1), 경보 구간 [2, 8]
    ImmediateRepeat,
    /// 근접 High (거리 2..=7), 경보 구간 [1, 7]
    NearRepeat,
}

impl Display for BuiltInDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuiltInDetector::ImmediateRepeat => write!(f, "immediate_repeat"),
            BuiltInDetector::NearRepeat => write!(f, "near_repeat"),
        }
    }
}

/// 경보 구간 (절대 인덱스, 양 끝 포함)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertWindow {
    pub start: usize,
    pub end: usize,
}

/// 내장 탐지기의 현재 상태와 전체 발생 이력
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltInPatternState {
    pub detector: BuiltInDetector,
    pub is_active: bool,
    pub is_alerting: bool,
    /// 최근 두 High (활성일 때만)
    pub trigger_outcomes: Vec<Outcome>,
    pub alert_window: Option<AlertWindow>,
    /// 경보 구간 끝까지 남은 플레이 수 (경보 중이 아니면 0)
    pub countdown: usize,
    pub history: Vec<PatternOccurrence>,
}

impl BuiltInDetector {
    pub const ALL: [BuiltInDetector; 2] =
        [BuiltInDetector::ImmediateRepeat, BuiltInDetector::NearRepeat];

    /// 두 High 사이 거리가 이 탐지기의 조건인지 확인
    pub fn matches_distance(&self, distance: usize) -> bool {
        match self {
            BuiltInDetector::ImmediateRepeat => distance == 1,
            BuiltInDetector::NearRepeat => distance > 1 && distance <= 7,
        }
    }

    /// 마지막 High 이후 경과 플레이 기준 경보 범위 (양 끝 포함)
    pub fn alert_range(&self) -> (usize, usize) {
        match self {
            BuiltInDetector::ImmediateRepeat => (2, 8),
            BuiltInDetector::NearRepeat => (1, 7),
        }
    }

    /// 현재 상태 계산
    ///
    /// # Arguments
    /// * `seq` - 분류된 시퀀스
    /// * `lookahead` - 이력에 저장할 후속 결과 수
    pub fn detect(&self, seq: &ClassifiedSequence, lookahead: usize) -> BuiltInPatternState {
        let mut state = BuiltInPatternState {
            detector: *self,
            is_active: false,
            is_alerting: false,
            trigger_outcomes: Vec::new(),
            alert_window: None,
            countdown: 0,
            history: self.history(seq, lookahead),
        };

        let [.., prev, last] = seq.high_indices() else {
            return state;
        };
        let (prev, last) = (*prev, *last);
        if !self.matches_distance(last - prev) {
            return state;
        }

        let (from, to) = self.alert_range();
        let plays = seq.plays_since_last_high();
        state.is_active = true;
        state.trigger_outcomes = vec![seq.outcomes()[prev].clone(), seq.outcomes()[last].clone()];
        state.alert_window = Some(AlertWindow {
            start: last + from,
            end: last + to,
        });
        if (from..=to).contains(&plays) {
            state.is_alerting = true;
            state.countdown = to - plays;
        }
        state
    }

    /// 조건을 만족한 모든 과거 High 쌍의 발생 이력
    pub fn history(&self, seq: &ClassifiedSequence, lookahead: usize) -> Vec<PatternOccurrence> {
        seq.high_indices()
            .windows(2)
            .filter(|pair| self.matches_distance(pair[1] - pair[0]))
            .map(|pair| {
                let outcomes = seq.outcomes();
                PatternOccurrence::new(
                    vec![outcomes[pair[0]].clone(), outcomes[pair[1]].clone()],
                    seq.window_after(pair[1], lookahead),
                    DETECTOR_PATTERN_LEN,
                    Some(pair[1] - pair[0]),
                )
            })
            .collect()
    }

    /// 과거 발생에 대한 적중 집계
    ///
    /// 두 번째 트리거 High 이후 경보 범위 안에 High가 나오면 적중이며, 첫 High의 배수를 평균에 넣습니다.
    /// 모든 발생이 집계되며, 경보 범위가 아직 끝나지 않은 발생은 High가 나오기 전까지 미적중입니다.
    pub fn backtest(&self, seq: &ClassifiedSequence, lookahead: usize) -> MatchResult {
        let (from, to) = self.alert_range();
        let tiers = seq.tiers();
        let mut result = MatchResult::default();
        let mut total_hit_value = 0.0;

        for occurrence in self.history(seq, lookahead) {
            let Some(last) = occurrence.trigger_outcomes.last().map(|o| o.index) else {
                continue;
            };
            let window_end = (last + to).min(seq.len().saturating_sub(1));
            let first_hit = (last + from..=window_end).find(|i| tiers[*i] == Tier::High);

            if let Some(index) = first_hit {
                result.hits += 1;
                total_hit_value += seq.outcomes()[index].value;
            }
            result.occurrences += 1;
            result.history.push(occurrence);
        }

        result.avg_multiplier = average_hit_value(total_hit_value, result.hits);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn sequence(values: &[f64]) -> ClassifiedSequence {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let outcomes: Vec<Outcome> = values
            .iter()
            .map(|value| Outcome::new(*value, date, time, 0))
            .collect();
        ClassifiedSequence::new(&outcomes)
    }

    #[test]
    fn test_immediate_repeat_alerting() {
        // High 인덱스 3, 4 -> 거리 1, 이후 3플레이
        let seq = sequence(&[1.0, 1.0, 1.0, 15.0, 12.0, 1.0, 1.0, 1.0]);
        let state = BuiltInDetector::ImmediateRepeat.detect(&seq, 10);
        assert!(state.is_active);
        assert!(state.is_alerting);
        assert_eq!(state.countdown, 5);
        assert_eq!(state.alert_window, Some(AlertWindow { start: 6, end: 12 }));
        assert_eq!(state.trigger_outcomes.len(), 2);

        let near = BuiltInDetector::NearRepeat.detect(&seq, 10);
        assert!(!near.is_active);
    }

    #[test]
    fn test_immediate_repeat_not_alerting_right_after() {
        let seq = sequence(&[1.0, 15.0, 12.0, 1.0]);
        let state = BuiltInDetector::ImmediateRepeat.detect(&seq, 10);
        assert!(state.is_active);
        assert!(!state.is_alerting);
        assert_eq!(state.countdown, 0);
    }

    #[test]
    fn test_near_repeat_distance_bounds() {
        let seq = sequence(&[15.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 12.0, 1.0]);
        let state = BuiltInDetector::NearRepeat.detect(&seq, 10);
        assert!(state.is_active);
        assert!(state.is_alerting);
        assert_eq!(state.countdown, 6);

        let far = sequence(&[15.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 12.0]);
        assert!(!BuiltInDetector::NearRepeat.detect(&far, 10).is_active);
    }

    #[test]
    fn test_history_tracks_every_occurrence() {
        let seq = sequence(&[15.0, 12.0, 1.0, 11.0, 13.0, 1.0]);
        let history = BuiltInDetector::ImmediateRepeat.history(&seq, 10);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].distance, Some(1));
        assert_eq!(history[1].start_index, 3);
    }

    #[test]
    fn test_backtest_counts_open_windows_as_misses() {
        // 0,1 쌍: 인덱스 3에서 High -> 적중, 3,4 쌍: 경보 범위 미완료 -> 미적중으로 집계
        let mut values = vec![15.0, 12.0, 1.0, 11.0, 13.0];
        values.extend(std::iter::repeat_n(1.0, 3));
        let seq = sequence(&values);
        let result = BuiltInDetector::ImmediateRepeat.backtest(&seq, 10);
        assert_eq!(result.occurrences, 2);
        assert_eq!(result.hits, 1);
        assert_eq!(result.history.len(), 2);
        assert!((result.avg_multiplier - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_backtest_trailing_pair_is_an_occurrence() {
        let mut values = vec![1.2; 17];
        values.extend([15.0, 12.0, 1.2]);
        let seq = sequence(&values);
        let result = BuiltInDetector::ImmediateRepeat.backtest(&seq, 10);
        assert_eq!(result.occurrences, 1);
        assert_eq!(result.hits, 0);
        assert_eq!(result.history[0].id, "17-2");
    }
}
