use crate::analyzer::base::ClassifiedSequence;
use crate::model::{Outcome, Tier};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt::Display;

/// 휴지기 직전 High가 이 배수를 넘으면 "대형 High 이후"로 본다
const GIANT_TRIGGER_VALUE: f64 = 50.0;
/// 휴지기 직전 구간 길이
const CLUSTER_LOOKBACK: usize = 15;
/// 직전 구간에 이만큼 High가 있으면 "High 군집 이후"로 본다
const CLUSTER_MIN_HIGHS: usize = 3;

/// 휴지기 리스크: 대형 결과를 찾는 최근 구간
const POST_GIANT_LOOKBACK: usize = 5;
const POST_GIANT_VALUE: f64 = 100.0;
const POST_GIANT_SCORE: f64 = 95.0;
/// 평균 휴지기 길이 대비 목표 비율
const AVERAGE_PAUSE_RATIO: f64 = 0.75;
const APPROACH_MAX_SCORE: f64 = 50.0;

/// 휴지기의 추정 원인
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbableTrigger {
    /// 50x 초과 High 직후
    AfterGiantHigh,
    /// 최근 15회 중 High 3회 이상 군집 직후
    AfterHighCluster,
    /// 특정 원인 없음
    Unknown,
}

impl Display for ProbableTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbableTrigger::AfterGiantHigh => write!(f, "50x 이상 High 이후"),
            ProbableTrigger::AfterHighCluster => write!(f, "High 3회 이상 군집 이후"),
            ProbableTrigger::Unknown => write!(f, "시장의 일반적인 조정"),
        }
    }
}

/// High 없이 길게 이어진 구간
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PauseEpisode {
    /// 휴지기 첫 결과 인덱스
    pub start_index: usize,
    /// 휴지기 마지막 결과 인덱스
    pub end_index: usize,
    pub length: usize,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub outcomes: Vec<Outcome>,
    pub probable_trigger: ProbableTrigger,
}

/// 현재 휴지기 상세
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PauseDetails {
    pub plays_without_high: usize,
    /// 적용된 휴지기 판정 기준 (`max(25, 평균 간격 * 1.1)`)
    pub threshold: f64,
}

/// 휴지기 분석기
#[derive(Debug, Clone)]
pub struct PauseAnalyzer {
    threshold: usize,
    factor: f64,
}

impl PauseAnalyzer {
    /// 새 휴지기 분석기 생성
    ///
    /// # Arguments
    /// * `threshold` - 기록할 최소 휴지기 길이
    /// * `factor` - 평균 High 간격에 곱할 판정 배수
    pub fn new(threshold: usize, factor: f64) -> Self {
        PauseAnalyzer { threshold, factor }
    }

    /// 연속된 High 사이의 휴지기 중 기준 이상인 구간을 모두 찾습니다.
    ///
    /// 마지막 High 이후 진행 중인 구간은 포함하지 않습니다 (`current_pause` 참고).
    pub fn detect_pauses(&self, seq: &ClassifiedSequence) -> Vec<PauseEpisode> {
        let outcomes = seq.outcomes();
        seq.high_indices()
            .windows(2)
            .filter_map(|pair| {
                let (prev, next) = (pair[0], pair[1]);
                let length = next - prev - 1;
                if length < self.threshold {
                    return None;
                }

                let members = &outcomes[prev + 1..next];
                let (first, last) = (members.first()?, members.last()?);
                Some(PauseEpisode {
                    start_index: prev + 1,
                    end_index: next - 1,
                    length,
                    start_time: first.datetime(),
                    end_time: last.datetime(),
                    outcomes: members.to_vec(),
                    probable_trigger: probable_trigger(seq, prev),
                })
            })
            .collect()
    }

    /// 현재 휴지기 판정 기준
    pub fn pause_threshold(&self, average_high_interval: f64) -> f64 {
        (self.threshold as f64).max(average_high_interval * self.factor)
    }

    /// 현재 휴지기 여부
    pub fn is_paused(&self, plays_since_last_high: usize, average_high_interval: f64) -> bool {
        plays_since_last_high as f64 > self.pause_threshold(average_high_interval)
    }

    /// 현재 휴지기 상세 (휴지기가 아니면 None)
    pub fn current_pause(
        &self,
        plays_since_last_high: usize,
        average_high_interval: f64,
    ) -> Option<PauseDetails> {
        self.is_paused(plays_since_last_high, average_high_interval)
            .then(|| PauseDetails {
                plays_without_high: plays_since_last_high,
                threshold: self.pause_threshold(average_high_interval),
            })
    }
}

/// 휴지기 직전 High(`trigger_index`)를 보고 원인을 추정합니다.
fn probable_trigger(seq: &ClassifiedSequence, trigger_index: usize) -> ProbableTrigger {
    if seq.outcomes()[trigger_index].value > GIANT_TRIGGER_VALUE {
        return ProbableTrigger::AfterGiantHigh;
    }

    let start = (trigger_index + 1).saturating_sub(CLUSTER_LOOKBACK);
    let recent_highs = seq.tiers()[start..=trigger_index]
        .iter()
        .filter(|tier| **tier == Tier::High)
        .count();
    if recent_highs >= CLUSTER_MIN_HIGHS {
        ProbableTrigger::AfterHighCluster
    } else {
        ProbableTrigger::Unknown
    }
}

/// 휴지기 리스크 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PauseRiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl PauseRiskLevel {
    pub fn from_score(score: f64) -> PauseRiskLevel {
        if score >= 90.0 {
            PauseRiskLevel::Critical
        } else if score >= 70.0 {
            PauseRiskLevel::High
        } else if score >= 40.0 {
            PauseRiskLevel::Medium
        } else {
            PauseRiskLevel::Low
        }
    }
}

/// 휴지기 리스크 점수의 근거
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PauseRiskReason {
    /// 최근 5회 안에 100x 초과 결과
    PostGiantEffect,
    /// 평균 휴지기 길이의 75%에 근접
    ApproachingAveragePause,
    /// 휴지기 이력 없음
    NoHistory,
}

/// 휴지기 리스크 점수 (0–100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PauseRisk {
    pub score: f64,
    pub level: PauseRiskLevel,
    pub reason: PauseRiskReason,
}

impl PauseRisk {
    /// 휴지기 리스크를 평가합니다.
    ///
    /// # Arguments
    /// * `seq` - 분류된 시퀀스
    /// * `pauses` - 과거 휴지기 목록
    /// * `plays_since_last_high` - 마지막 High 이후 플레이 수
    pub fn evaluate(
        seq: &ClassifiedSequence,
        pauses: &[PauseEpisode],
        plays_since_last_high: usize,
    ) -> PauseRisk {
        let post_giant = seq
            .last_outcomes(POST_GIANT_LOOKBACK)
            .iter()
            .any(|outcome| outcome.value > POST_GIANT_VALUE);

        let (score, reason) = if post_giant {
            (POST_GIANT_SCORE, PauseRiskReason::PostGiantEffect)
        } else if pauses.is_empty() {
            (0.0, PauseRiskReason::NoHistory)
        } else {
            let average_length =
                pauses.iter().map(|pause| pause.length).sum::<usize>() as f64 / pauses.len() as f64;
            let target = average_length * AVERAGE_PAUSE_RATIO;
            let closeness = if target > 0.0 {
                (plays_since_last_high as f64 / target).min(1.0)
            } else {
                0.0
            };
            (
                closeness * APPROACH_MAX_SCORE,
                PauseRiskReason::ApproachingAveragePause,
            )
        };

        let score = score.clamp(0.0, 100.0);
        PauseRisk {
            score,
            level: PauseRiskLevel::from_score(score),
            reason,
        }
    }
}
