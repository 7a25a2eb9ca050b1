use crate::analyzer::base::ClassifiedSequence;
use crate::model::Tier;
use serde::Serialize;
use std::fmt::Display;

/// High 결과의 최대 가중치 (최신 결과 기준)
const HIGH_WEIGHT: f64 = 2.0;
/// Mid 결과의 고정 가중치
const MID_WEIGHT: f64 = 0.4;
/// VeryHot 기준 점수 (High가 하나 이상 있어야 함)
const VERY_HOT_SCORE: f64 = 5.0;
const HOT_SCORE: f64 = 3.0;
const WARM_SCORE: f64 = 1.5;

/// 최근 시장의 열기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum MarketState {
    Cold,
    Warm,
    Hot,
    VeryHot,
}

impl MarketState {
    /// 상태에 대응하는 백분율
    pub fn percentage(&self) -> u8 {
        match self {
            MarketState::Cold => 15,
            MarketState::Warm => 45,
            MarketState::Hot => 75,
            MarketState::VeryHot => 95,
        }
    }

    /// 점수와 High 존재 여부로 상태를 분류합니다.
    ///
    /// # Arguments
    /// * `score` - 윈도우 점수
    /// * `has_high` - 윈도우 안에 High가 있는지 여부
    pub fn classify(score: f64, has_high: bool) -> MarketState {
        if score > VERY_HOT_SCORE && has_high {
            MarketState::VeryHot
        } else if score > HOT_SCORE {
            MarketState::Hot
        } else if score > WARM_SCORE {
            MarketState::Warm
        } else {
            MarketState::Cold
        }
    }

    pub fn is_hot(&self) -> bool {
        matches!(self, MarketState::Hot | MarketState::VeryHot)
    }
}

impl Display for MarketState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketState::Cold => write!(f, "cold"),
            MarketState::Warm => write!(f, "warm"),
            MarketState::Hot => write!(f, "hot"),
            MarketState::VeryHot => write!(f, "very_hot"),
        }
    }
}

/// 마켓 상태 분석 결과
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketStateAnalysis {
    pub state: MarketState,
    pub percentage: u8,
    pub score: f64,
}

/// 윈도우 티어 목록의 가중 점수를 계산합니다.
///
/// 윈도우 내 위치 `p`(가장 오래된 것이 0)의 최신성 가중치는 `(p + 1) / window`이며,
/// 윈도우가 짧아도 분모는 `window` 그대로입니다.
///
/// # Arguments
/// * `tiers` - 최근 결과의 티어 (오래된 순)
/// * `window` - 윈도우 크기
pub fn score_window(tiers: &[Tier], window: usize) -> f64 {
    tiers
        .iter()
        .enumerate()
        .map(|(position, tier)| match tier {
            Tier::High => HIGH_WEIGHT * (position + 1) as f64 / window as f64,
            Tier::Mid => MID_WEIGHT,
            Tier::Low => 0.0,
        })
        .sum()
}

impl MarketStateAnalysis {
    /// 최근 `window`개 결과로 마켓 상태를 분석합니다.
    pub fn analyze(seq: &ClassifiedSequence, window: usize) -> MarketStateAnalysis {
        let tiers = seq.last_tiers(window);
        let score = score_window(tiers, window);
        let has_high = tiers.contains(&Tier::High);
        let state = MarketState::classify(score, has_high);

        log::trace!("마켓 상태: {} (점수 {:.3})", state, score);

        MarketStateAnalysis {
            state,
            percentage: state.percentage(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_breakpoints() {
        assert_eq!(MarketState::classify(5.01, true), MarketState::VeryHot);
        assert_eq!(MarketState::classify(5.01, false), MarketState::Hot);
        assert_eq!(MarketState::classify(5.0, true), MarketState::Hot);
        assert_eq!(MarketState::classify(4.99, true), MarketState::Hot);
        assert_eq!(MarketState::classify(3.0, true), MarketState::Warm);
        assert_eq!(MarketState::classify(1.5, false), MarketState::Cold);
        assert_eq!(MarketState::classify(0.0, false), MarketState::Cold);
    }

    #[test]
    fn test_score_window_weights() {
        // 최신 High는 2.0, Mid는 위치와 무관하게 0.4
        let tiers = [Tier::Mid, Tier::Low, Tier::High];
        let score = score_window(&tiers, 24);
        let expected = 0.4 + 2.0 * 3.0 / 24.0;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_percentages() {
        assert_eq!(MarketState::VeryHot.percentage(), 95);
        assert_eq!(MarketState::Hot.percentage(), 75);
        assert_eq!(MarketState::Warm.percentage(), 45);
        assert_eq!(MarketState::Cold.percentage(), 15);
    }
}
