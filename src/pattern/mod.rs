// 패턴 탐지 모듈
// 내장 단거리 탐지기, 범용 패턴 매처, 일일 랭킹을 제공합니다.

pub mod builtin;
pub mod matcher;
pub mod ranking;

use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use crate::model::{Outcome, Tier};
use serde::{Deserialize, Serialize};

pub use builtin::{AlertWindow, BuiltInDetector, BuiltInPatternState};
pub use matcher::PatternMatcher;
pub use ranking::{DailyRanking, RankedPattern};

/// 외부에서 관리되는 카탈로그 패턴
///
/// `sequence`의 마지막 티어가 기대 결과이고, 그 앞부분이 트리거입니다.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogedPattern {
    #[serde(default)]
    pub name: String,
    pub sequence: Vec<Tier>,
}

impl CatalogedPattern {
    pub fn new(name: impl Into<String>, sequence: Vec<Tier>) -> Self {
        CatalogedPattern {
            name: name.into(),
            sequence,
        }
    }

    /// 트리거 티어 (마지막 티어를 제외한 부분, 길이 1 이하면 빈 슬라이스)
    pub fn trigger(&self) -> &[Tier] {
        match self.sequence.split_last() {
            Some((_, trigger)) => trigger,
            None => &[],
        }
    }

    /// 기대 결과 티어
    pub fn expected(&self) -> Option<Tier> {
        self.sequence.last().copied()
    }
}

/// 승리/패배 패턴 카탈로그
///
/// 엔진은 호출마다 이 카탈로그를 읽기 전용 스냅샷으로만 사용합니다.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternCatalog {
    #[serde(default)]
    pub winning: Vec<CatalogedPattern>,
    #[serde(default)]
    pub losing: Vec<CatalogedPattern>,
}

impl PatternCatalog {
    pub fn new(winning: Vec<CatalogedPattern>, losing: Vec<CatalogedPattern>) -> Self {
        PatternCatalog { winning, losing }
    }

    pub fn is_empty(&self) -> bool {
        self.winning.is_empty() && self.losing.is_empty()
    }
}

impl ConfigValidation for PatternCatalog {
    fn validate(&self) -> ConfigResult<()> {
        for pattern in self.winning.iter().chain(self.losing.iter()) {
            if pattern.sequence.len() < 2 {
                return Err(ConfigError::ValidationError(format!(
                    "패턴 '{}'은 트리거와 기대 결과를 포함해 2개 이상의 티어가 필요합니다",
                    pattern.name
                )));
            }
        }
        Ok(())
    }
}

/// 한 번의 패턴 발생과 이후 결과
///
/// `id`는 `(시작 인덱스, 패턴 길이)`에서 결정적으로 만들어집니다.
/// 패턴 길이는 기대 결과까지 포함한 길이입니다.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PatternOccurrence {
    pub id: String,
    pub start_index: usize,
    pub trigger_outcomes: Vec<Outcome>,
    /// 트리거 직후 최대 `lookahead`개의 결과
    pub outcome_window: Vec<Outcome>,
    /// 내장 탐지기의 두 High 사이 거리
    pub distance: Option<usize>,
}

impl PatternOccurrence {
    /// # Arguments
    /// * `trigger_outcomes` - 트리거에 해당하는 결과
    /// * `outcome_window` - 트리거 직후 결과
    /// * `pattern_len` - 기대 결과를 포함한 패턴 길이
    /// * `distance` - 내장 탐지기의 High 간 거리
    pub fn new(
        trigger_outcomes: Vec<Outcome>,
        outcome_window: Vec<Outcome>,
        pattern_len: usize,
        distance: Option<usize>,
    ) -> Self {
        let start_index = trigger_outcomes.first().map_or(0, |o| o.index);
        PatternOccurrence {
            id: format!("{}-{}", start_index, pattern_len),
            start_index,
            trigger_outcomes,
            outcome_window,
            distance,
        }
    }
}

/// 패턴 백테스트 집계
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct MatchResult {
    pub occurrences: usize,
    pub hits: usize,
    /// 적중 시 평균 배수 (적중이 없으면 0)
    pub avg_multiplier: f64,
    pub history: Vec<PatternOccurrence>,
}

impl MatchResult {
    /// 적중률 (발생이 없으면 0)
    pub fn hit_rate(&self) -> f64 {
        if self.occurrences == 0 {
            return 0.0;
        }
        self.hits as f64 / self.occurrences as f64
    }
}

/// 적중 합계를 평균으로 변환합니다.
pub(crate) fn average_hit_value(total: f64, hits: usize) -> f64 {
    if hits == 0 { 0.0 } else { total / hits as f64 }
}
