use crate::analyzer::base::ClassifiedSequence;
use crate::model::Tier;
use serde::Serialize;

/// 극단값 보고서 기준 배수
pub const EXTREME_THRESHOLDS: [f64; 3] = [50.0, 100.0, 1000.0];

/// 큰 High 플래그 기준 (기준 배수 대비)
const LARGE_HIGH_RATIO: f64 = 0.5;
/// 근접 High 플래그 기준 (기준 배수 대비)
const NEAR_MISS_RATIO: f64 = 0.8;

/// 간격/연속 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakAnalysis {
    pub total_plays: usize,
    pub low_count: usize,
    pub mid_count: usize,
    pub high_count: usize,
    /// 연속 High 사이 간격 목록
    pub high_intervals: Vec<usize>,
    /// 간격 평균 (High가 2개 미만이면 0)
    pub average_high_interval: f64,
    pub plays_since_last_high: usize,
    /// 마지막 결과까지의 연속 Low
    pub current_low_streak: usize,
    /// 마지막 결과까지의 연속 Mid/High
    pub current_non_low_streak: usize,
    pub longest_low_streak: usize,
    /// 가장 긴 High 간 간격
    pub longest_high_gap: usize,
}

impl StreakAnalysis {
    /// 시퀀스를 한 번 순회하며 카운트, 간격, 연속 기록을 계산합니다.
    pub fn analyze(seq: &ClassifiedSequence) -> StreakAnalysis {
        let mut low_count = 0;
        let mut mid_count = 0;
        let mut high_count = 0;
        let mut low_streak = 0;
        let mut non_low_streak = 0;
        let mut longest_low_streak = 0;

        for tier in seq.tiers() {
            match tier {
                Tier::Low => low_count += 1,
                Tier::Mid => mid_count += 1,
                Tier::High => high_count += 1,
            }
            if tier.is_non_low() {
                low_streak = 0;
                non_low_streak += 1;
            } else {
                low_streak += 1;
                non_low_streak = 0;
            }
            longest_low_streak = longest_low_streak.max(low_streak);
        }

        let high_intervals: Vec<usize> = seq
            .high_indices()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect();
        let average_high_interval = if high_intervals.is_empty() {
            0.0
        } else {
            high_intervals.iter().sum::<usize>() as f64 / high_intervals.len() as f64
        };
        let longest_high_gap = high_intervals.iter().copied().max().unwrap_or(0);

        StreakAnalysis {
            total_plays: seq.len(),
            low_count,
            mid_count,
            high_count,
            high_intervals,
            average_high_interval,
            plays_since_last_high: seq.plays_since_last_high(),
            current_low_streak: low_streak,
            current_non_low_streak: non_low_streak,
            longest_low_streak,
            longest_high_gap,
        }
    }
}

/// 특정 배수(50x, 100x, 1000x) 극단값까지의 High 개수 보고서
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeReport {
    pub threshold: f64,
    /// 연속된 극단값 사이의 High 개수 (최근 항목만 유지)
    pub history: Vec<usize>,
    /// 마지막 극단값 이후 High 개수 (극단값이 없으면 전체)
    pub highs_since_last: usize,
    /// 이력 평균 (이력이 없으면 0)
    pub average_highs_between: f64,
    /// 마지막 극단값 이후 기준의 절반 이상 High 발생 여부
    pub large_high_since_last: bool,
    /// 마지막 극단값 이후 기준의 80% 이상 High 발생 여부
    pub near_miss_since_last: bool,
}

impl ExtremeReport {
    /// 극단값 보고서 계산
    ///
    /// # Arguments
    /// * `seq` - 분류된 시퀀스
    /// * `threshold` - 극단값 기준 배수
    /// * `history_len` - 유지할 이력 길이
    pub fn analyze(seq: &ClassifiedSequence, threshold: f64, history_len: usize) -> ExtremeReport {
        let mut history = Vec::new();
        let mut highs_since_last = 0;
        let mut large_high_since_last = false;
        let mut near_miss_since_last = false;
        let mut seen_extreme = false;

        for &index in seq.high_indices() {
            let value = seq.outcomes()[index].value;
            if value >= threshold {
                if seen_extreme {
                    history.push(highs_since_last);
                }
                seen_extreme = true;
                highs_since_last = 0;
                large_high_since_last = false;
                near_miss_since_last = false;
            } else {
                highs_since_last += 1;
                large_high_since_last |= value >= threshold * LARGE_HIGH_RATIO;
                near_miss_since_last |= value >= threshold * NEAR_MISS_RATIO;
            }
        }

        if history.len() > history_len {
            history.drain(0..history.len() - history_len);
        }
        let average_highs_between = if history.is_empty() {
            0.0
        } else {
            history.iter().sum::<usize>() as f64 / history.len() as f64
        };

        ExtremeReport {
            threshold,
            history,
            highs_since_last,
            average_highs_between,
            large_high_since_last,
            near_miss_since_last,
        }
    }

    /// 세 기준(50/100/1000)에 대한 보고서를 모두 계산합니다.
    pub fn analyze_all(seq: &ClassifiedSequence, history_len: usize) -> Vec<ExtremeReport> {
        EXTREME_THRESHOLDS
            .iter()
            .map(|threshold| ExtremeReport::analyze(seq, *threshold, history_len))
            .collect()
    }
}
