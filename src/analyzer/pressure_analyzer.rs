use crate::analyzer::base::ClassifiedSequence;
use crate::analyzer::hot_spot_analyzer::{HotSpots, MinuteBucket};
use crate::analyzer::market_state_analyzer::MarketState;
use crate::model::Tier;
use crate::pattern::{CatalogedPattern, PatternCatalog};
use serde::Serialize;
use std::fmt::Display;

/// 카탈로그 트리거와 비교할 최근 결과 수
const RECENT_TRIGGER_WINDOW: usize = 10;
/// 휴지기 중 High 압력 고정 점수
const PAUSED_HIGH_SCORE: f64 = 5.0;

/// Mid 압력: 최근 Mid 개수를 세는 구간
const MID_LOOKBACK: usize = 15;
/// Mid 압력: 직전 결과가 이 값 미만이면 가산
const CRASH_VALUE: f64 = 1.1;

/// 압력 점수에 기여한 요인
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PressureFactor {
    /// 평균 간격 대비 경과 플레이
    IntervalProgress { points: f64 },
    /// 마켓 상태
    MarketHeat { state: MarketState, points: f64 },
    /// 현재 분이 High 핫 미닛
    HotMinute { minute: u32, points: f64 },
    /// 다음 분이 High 핫 미닛
    NextHotMinute { minute: u32, points: f64 },
    /// 최근 결과가 승리 패턴 트리거와 일치
    WinningPattern { points: f64 },
    /// 최근 결과가 패배 패턴 트리거와 일치
    LosingPattern { points: f64 },
    /// 연속 Low
    LowStreak { streak: usize, points: f64 },
    /// 직전 결과가 1.1x 미만
    InstantCrash { points: f64 },
    /// 최근 15회 Mid 군집
    MidCluster { count: usize, points: f64 },
    /// 휴지기 진행 중
    PauseActive,
}

impl PressureFactor {
    /// 요인의 점수 기여분
    pub fn points(&self) -> f64 {
        match self {
            PressureFactor::IntervalProgress { points }
            | PressureFactor::MarketHeat { points, .. }
            | PressureFactor::HotMinute { points, .. }
            | PressureFactor::NextHotMinute { points, .. }
            | PressureFactor::WinningPattern { points }
            | PressureFactor::LosingPattern { points }
            | PressureFactor::LowStreak { points, .. }
            | PressureFactor::InstantCrash { points }
            | PressureFactor::MidCluster { points, .. } => *points,
            PressureFactor::PauseActive => 0.0,
        }
    }
}

impl Display for PressureFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PressureFactor::IntervalProgress { points } => {
                write!(f, "평균 간격 진행 ({:+.1})", points)
            }
            PressureFactor::MarketHeat { state, points } => {
                write!(f, "마켓 상태 {} ({:+.1})", state, points)
            }
            PressureFactor::HotMinute { minute, points } => {
                write!(f, "핫 미닛 {:02}분 ({:+.1})", minute, points)
            }
            PressureFactor::NextHotMinute { minute, points } => {
                write!(f, "다음 핫 미닛 {:02}분 ({:+.1})", minute, points)
            }
            PressureFactor::WinningPattern { points } => {
                write!(f, "승리 패턴 트리거 일치 ({:+.1})", points)
            }
            PressureFactor::LosingPattern { points } => {
                write!(f, "패배 패턴 트리거 일치 ({:+.1})", points)
            }
            PressureFactor::LowStreak { streak, points } => {
                write!(f, "연속 Low {}회 ({:+.1})", streak, points)
            }
            PressureFactor::InstantCrash { points } => {
                write!(f, "직전 결과 1.1x 미만 ({:+.1})", points)
            }
            PressureFactor::MidCluster { count, points } => {
                write!(f, "최근 Mid {}회 ({:+.1})", count, points)
            }
            PressureFactor::PauseActive => write!(f, "휴지기 진행 중"),
        }
    }
}

/// High 압력 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum HighPressureLevel {
    Low,
    Building,
    Imminent,
    Critical,
}

impl HighPressureLevel {
    pub fn from_score(score: f64) -> HighPressureLevel {
        if score >= 95.0 {
            HighPressureLevel::Critical
        } else if score >= 75.0 {
            HighPressureLevel::Imminent
        } else if score >= 40.0 {
            HighPressureLevel::Building
        } else {
            HighPressureLevel::Low
        }
    }
}

/// Mid 압력 레벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MidPressureLevel {
    Low,
    Building,
    High,
    Critical,
}

impl MidPressureLevel {
    pub fn from_score(score: f64) -> MidPressureLevel {
        if score >= 90.0 {
            MidPressureLevel::Critical
        } else if score >= 70.0 {
            MidPressureLevel::High
        } else if score >= 40.0 {
            MidPressureLevel::Building
        } else {
            MidPressureLevel::Low
        }
    }
}

/// 최근 티어가 패턴 트리거로 끝나는지 확인합니다.
///
/// 트리거가 비었거나 최근 10회보다 길면 일치하지 않는 것으로 봅니다.
fn ends_with_trigger(recent: &[Tier], pattern: &CatalogedPattern) -> bool {
    let trigger = pattern.trigger();
    !trigger.is_empty() && recent.ends_with(trigger)
}

/// High 티어 임박도 (0–100)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighPressure {
    pub score: f64,
    pub level: HighPressureLevel,
    pub factors: Vec<PressureFactor>,
}

impl HighPressure {
    /// High 압력을 평가합니다.
    ///
    /// # Arguments
    /// * `seq` - 분류된 시퀀스
    /// * `plays_since_last_high` - 마지막 High 이후 플레이 수
    /// * `average_high_interval` - 평균 High 간격
    /// * `is_paused` - 현재 휴지기 여부
    /// * `market` - 마켓 상태
    /// * `hot_spots` - 핫스팟 (High 핫 미닛 사용)
    /// * `current_minute` - 기준 시각의 분
    /// * `catalog` - 승리/패배 패턴 카탈로그
    #[allow(clippy::too_many_arguments)]
    pub fn evaluate(
        seq: &ClassifiedSequence,
        plays_since_last_high: usize,
        average_high_interval: f64,
        is_paused: bool,
        market: MarketState,
        hot_spots: &HotSpots,
        current_minute: u32,
        catalog: &PatternCatalog,
    ) -> HighPressure {
        if is_paused {
            return HighPressure {
                score: PAUSED_HIGH_SCORE,
                level: HighPressureLevel::from_score(PAUSED_HIGH_SCORE),
                factors: vec![PressureFactor::PauseActive],
            };
        }

        let mut factors = Vec::new();

        if average_high_interval > 0.0 {
            let points = (plays_since_last_high as f64 / average_high_interval * 50.0).min(60.0);
            factors.push(PressureFactor::IntervalProgress { points });
        }

        let heat = match market {
            MarketState::VeryHot => 30.0,
            MarketState::Hot => 15.0,
            _ => 0.0,
        };
        if heat > 0.0 {
            factors.push(PressureFactor::MarketHeat {
                state: market,
                points: heat,
            });
        }

        let next_minute = (current_minute + 1) % 60;
        if hot_spots.is_hot_minute(MinuteBucket::High, current_minute) {
            factors.push(PressureFactor::HotMinute {
                minute: current_minute,
                points: 30.0,
            });
        } else if hot_spots.is_hot_minute(MinuteBucket::High, next_minute) {
            factors.push(PressureFactor::NextHotMinute {
                minute: next_minute,
                points: 15.0,
            });
        }

        let recent = seq.last_tiers(RECENT_TRIGGER_WINDOW);
        if catalog
            .winning
            .iter()
            .any(|pattern| ends_with_trigger(recent, pattern))
        {
            factors.push(PressureFactor::WinningPattern { points: 25.0 });
        }

        let mut score: f64 = factors.iter().map(PressureFactor::points).sum();

        if catalog
            .losing
            .iter()
            .any(|pattern| ends_with_trigger(recent, pattern))
        {
            factors.push(PressureFactor::LosingPattern { points: -50.0 });
            score = (score - 50.0).max(0.0);
        }

        let score = score.clamp(0.0, 100.0);
        HighPressure {
            score,
            level: HighPressureLevel::from_score(score),
            factors,
        }
    }
}

/// Mid 티어 임박도 (0–100)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MidPressure {
    pub score: f64,
    pub level: MidPressureLevel,
    pub factors: Vec<PressureFactor>,
}

impl MidPressure {
    /// Mid 압력을 평가합니다. High 압력과는 독립적으로 계산됩니다.
    pub fn evaluate(seq: &ClassifiedSequence, market: MarketState) -> MidPressure {
        let mut factors = Vec::new();
        let low_streak = seq.current_low_streak();

        if low_streak > 2 {
            factors.push(PressureFactor::LowStreak {
                streak: low_streak,
                points: ((low_streak - 2) as f64 * 15.0).min(60.0),
            });
        }

        if market.is_hot() {
            factors.push(PressureFactor::MarketHeat {
                state: market,
                points: 25.0,
            });
        } else if market == MarketState::Cold && low_streak > 4 {
            factors.push(PressureFactor::MarketHeat {
                state: market,
                points: -15.0,
            });
        }

        if seq.last().is_some_and(|outcome| outcome.value < CRASH_VALUE) {
            factors.push(PressureFactor::InstantCrash { points: 20.0 });
        }

        let mids = seq.count_in_last(MID_LOOKBACK, Tier::Mid);
        if mids > 4 {
            factors.push(PressureFactor::MidCluster {
                count: mids,
                points: (mids - 4) as f64 * 8.0,
            });
        }

        let score = factors
            .iter()
            .map(PressureFactor::points)
            .sum::<f64>()
            .clamp(0.0, 100.0);
        MidPressure {
            score,
            level: MidPressureLevel::from_score(score),
            factors,
        }
    }
}
