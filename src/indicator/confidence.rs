use crate::indicator::rsi::{RSI_OVERBOUGHT, RSI_OVERSOLD};
use crate::model::Tier;

const BASE_CONFIDENCE: f64 = 50.0;
/// 윈도우 시장 점수의 중립값
const NEUTRAL_MARKET_SCORE: f64 = 6.0;
const MARKET_SCORE_WEIGHT: f64 = 2.5;
const HIGH_MARKET_POINTS: f64 = 2.5;
const MID_MARKET_POINTS: f64 = 0.5;

/// 이 플레이 수를 넘는 High 공백부터 감점
const PAUSE_GRACE: usize = 25;
const PAUSE_PENALTY_PER_PLAY: f64 = 2.0;
const PAUSE_PENALTY_MAX: f64 = 30.0;

/// 이 길이를 넘는 연속 Low부터 가산
const STREAK_GRACE: usize = 3;
const STREAK_BONUS_PER_PLAY: f64 = 5.0;
const STREAK_BONUS_MAX: f64 = 25.0;

const RSI_POINT_WEIGHT: f64 = 0.5;

/// 복합 신뢰도 시리즈 (0–100)
///
/// 각 인덱스 `i >= warmup`에서 50을 기준으로
/// - 최근 `window`개 결과의 시장 점수(`2.5 * High + 0.5 * Mid`)가 6보다 크면 가산, 작으면 감산
/// - High 공백이 25를 넘으면 최대 30 감점
/// - 연속 Low가 3을 넘으면 최대 25 가산
/// - RSI가 30 미만이면 가산, 70 초과면 감산 (포인트당 0.5)
///
/// 을 적용한 뒤 0–100으로 자릅니다.
///
/// # Arguments
/// * `tiers` - 분류된 티어 배열
/// * `rsi` - 같은 길이의 RSI 시리즈
/// * `warmup` - 첫 계산 인덱스
/// * `window` - 시장 점수 윈도우
pub fn confidence_series(
    tiers: &[Tier],
    rsi: &[Option<f64>],
    warmup: usize,
    window: usize,
) -> Vec<Option<f64>> {
    let mut series = Vec::with_capacity(tiers.len());
    let mut last_high: Option<usize> = None;
    let mut low_streak = 0usize;

    for (i, tier) in tiers.iter().enumerate() {
        match tier {
            Tier::High => {
                last_high = Some(i);
                low_streak = 0;
            }
            Tier::Mid => low_streak = 0,
            Tier::Low => low_streak += 1,
        }

        if i < warmup {
            series.push(None);
            continue;
        }

        let start = (i + 1).saturating_sub(window);
        let (highs, mids) = tiers[start..=i]
            .iter()
            .fold((0usize, 0usize), |(h, m), tier| match tier {
                Tier::High => (h + 1, m),
                Tier::Mid => (h, m + 1),
                Tier::Low => (h, m),
            });
        let market_score = HIGH_MARKET_POINTS * highs as f64 + MID_MARKET_POINTS * mids as f64;

        let mut confidence =
            BASE_CONFIDENCE + (market_score - NEUTRAL_MARKET_SCORE) * MARKET_SCORE_WEIGHT;

        let plays_since_high = match last_high {
            Some(index) => i - index,
            None => i + 1,
        };
        if plays_since_high > PAUSE_GRACE {
            confidence -= ((plays_since_high - PAUSE_GRACE) as f64 * PAUSE_PENALTY_PER_PLAY)
                .min(PAUSE_PENALTY_MAX);
        }

        if low_streak > STREAK_GRACE {
            confidence +=
                ((low_streak - STREAK_GRACE) as f64 * STREAK_BONUS_PER_PLAY).min(STREAK_BONUS_MAX);
        }

        if let Some(Some(value)) = rsi.get(i) {
            if *value < RSI_OVERSOLD {
                confidence += (RSI_OVERSOLD - value) * RSI_POINT_WEIGHT;
            } else if *value > RSI_OVERBOUGHT {
                confidence -= (value - RSI_OVERBOUGHT) * RSI_POINT_WEIGHT;
            }
        }

        series.push(Some(confidence.clamp(0.0, 100.0)));
    }

    series
}
