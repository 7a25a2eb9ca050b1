use crate::analyzer::base::ClassifiedSequence;
use crate::analyzer::hot_spot_analyzer::{HotSpotAnalyzer, HotSpots};
use crate::analyzer::market_state_analyzer::{MarketState, MarketStateAnalysis};
use crate::analyzer::pause_analyzer::{PauseAnalyzer, PauseDetails, PauseEpisode, PauseRisk};
use crate::analyzer::pressure_analyzer::{HighPressure, MidPressure};
use crate::analyzer::streak_analyzer::{ExtremeReport, StreakAnalysis};
use crate::config::{AnalysisConfig, DEFAULT_CONFIG};
use crate::indicator::TechnicalIndicatorSeries;
use crate::indicator::utils::calculate_standard_deviation;
use crate::model::Outcome;
use crate::pattern::builtin::{BuiltInDetector, BuiltInPatternState};
use crate::pattern::ranking::{DailyRanking, RankedPattern};
use crate::pattern::PatternCatalog;
use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// 전체 통계 요약
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_plays: usize,
    pub low_count: usize,
    pub mid_count: usize,
    pub high_count: usize,
    pub plays_since_last_high: usize,
    pub average_high_interval: f64,
    pub current_low_streak: usize,
    pub current_non_low_streak: usize,
    pub longest_low_streak: usize,
    pub longest_high_gap: usize,
    pub market_state: MarketState,
    pub market_percentage: u8,
    pub market_score: f64,
    pub is_paused: bool,
    pub pause_details: Option<PauseDetails>,
    /// 최근 결과의 모표준편차
    pub short_term_volatility: f64,
    /// 50x / 100x / 1000x 보고서
    pub extremes: Vec<ExtremeReport>,
}

/// 분석 엔진의 전체 스냅샷
///
/// 모든 필드는 입력 목록과 카탈로그만으로 결정되며, 같은 입력은 같은 JSON을 만듭니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: AnalysisSummary,
    pub hot_spots: HotSpots,
    pub indicators: TechnicalIndicatorSeries,
    pub immediate_repeat: BuiltInPatternState,
    pub near_repeat: BuiltInPatternState,
    pub pause_history: Vec<PauseEpisode>,
    pub high_pressure: HighPressure,
    pub mid_pressure: MidPressure,
    pub pause_risk: PauseRisk,
    /// 일일 랭킹 (`analyze_with_ranking`에서만 계산)
    pub daily_ranking: Option<Vec<RankedPattern>>,
}

/// 순수 함수형 분석 엔진
///
/// 상태를 갖지 않으며 설정만 보관합니다. 여러 스레드에서 동시에 호출해도 안전합니다.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        AnalysisEngine::new(DEFAULT_CONFIG.clone())
    }
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        AnalysisEngine { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 마지막 결과의 시각을 기준 시각으로 분석합니다.
    ///
    /// 결과가 없으면 기준 시각은 쓰이지 않으므로 기본값을 사용합니다.
    pub fn analyze(&self, outcomes: &[Outcome], catalog: &PatternCatalog) -> AnalysisResult {
        self.analyze_at(outcomes, catalog, reference_time(outcomes))
    }

    /// 주어진 기준 시각으로 분석합니다.
    ///
    /// # Arguments
    /// * `outcomes` - 시간순 결과 목록
    /// * `catalog` - 승리/패배 패턴 카탈로그
    /// * `now` - 현재 분(핫 미닛 판정)에 쓰이는 기준 시각
    ///
    /// # Returns
    /// * `AnalysisResult` - 일일 랭킹을 제외한 전체 분석 결과
    pub fn analyze_at(
        &self,
        outcomes: &[Outcome],
        catalog: &PatternCatalog,
        now: NaiveDateTime,
    ) -> AnalysisResult {
        let config = &self.config;
        let seq = ClassifiedSequence::new(outcomes);

        let streaks = StreakAnalysis::analyze(&seq);
        let extremes = ExtremeReport::analyze_all(&seq, config.extreme_history_len);
        let market = MarketStateAnalysis::analyze(&seq, config.market_window);
        let hot_spots = HotSpotAnalyzer::new(config.house_max, config.hot_minute_top).analyze(&seq);

        let pause_analyzer = PauseAnalyzer::new(config.pause_threshold, config.pause_factor);
        let pause_history = pause_analyzer.detect_pauses(&seq);
        let pause_details = pause_analyzer.current_pause(
            streaks.plays_since_last_high,
            streaks.average_high_interval,
        );
        let is_paused = pause_details.is_some();

        let high_pressure = HighPressure::evaluate(
            &seq,
            streaks.plays_since_last_high,
            streaks.average_high_interval,
            is_paused,
            market.state,
            &hot_spots,
            now.minute(),
            catalog,
        );
        let mid_pressure = MidPressure::evaluate(&seq, market.state);
        let pause_risk = PauseRisk::evaluate(&seq, &pause_history, streaks.plays_since_last_high);

        let recent_values: Vec<f64> = seq
            .last_outcomes(config.volatility_window)
            .iter()
            .map(|outcome| outcome.value)
            .collect();
        let short_term_volatility = calculate_standard_deviation(&recent_values);

        let summary = AnalysisSummary {
            total_plays: streaks.total_plays,
            low_count: streaks.low_count,
            mid_count: streaks.mid_count,
            high_count: streaks.high_count,
            plays_since_last_high: streaks.plays_since_last_high,
            average_high_interval: streaks.average_high_interval,
            current_low_streak: streaks.current_low_streak,
            current_non_low_streak: streaks.current_non_low_streak,
            longest_low_streak: streaks.longest_low_streak,
            longest_high_gap: streaks.longest_high_gap,
            market_state: market.state,
            market_percentage: market.percentage,
            market_score: market.score,
            is_paused,
            pause_details,
            short_term_volatility,
            extremes,
        };

        log::debug!(
            "분석 완료: {}회, High {}회, 마켓 {} ({}%), 휴지기 {}, High 압력 {:.1}, Mid 압력 {:.1}",
            summary.total_plays,
            summary.high_count,
            summary.market_state,
            summary.market_percentage,
            summary.is_paused,
            high_pressure.score,
            mid_pressure.score
        );

        AnalysisResult {
            summary,
            hot_spots,
            indicators: TechnicalIndicatorSeries::calculate(&seq, config),
            immediate_repeat: BuiltInDetector::ImmediateRepeat.detect(&seq, config.lookahead),
            near_repeat: BuiltInDetector::NearRepeat.detect(&seq, config.lookahead),
            pause_history,
            high_pressure,
            mid_pressure,
            pause_risk,
            daily_ranking: None,
        }
    }

    /// 기준 시각의 날짜로 일일 랭킹을 계산합니다.
    pub fn rank_daily(
        &self,
        outcomes: &[Outcome],
        catalog: &PatternCatalog,
        now: NaiveDateTime,
    ) -> Option<Vec<RankedPattern>> {
        DailyRanking::new(
            self.config.daily_min_outcomes,
            self.config.daily_max_ranked,
            self.config.daily_catalog_top,
            self.config.lookahead,
        )
        .rank(outcomes, catalog, now.date())
    }

    /// 일일 랭킹까지 포함한 전체 분석
    pub fn analyze_with_ranking(
        &self,
        outcomes: &[Outcome],
        catalog: &PatternCatalog,
        now: NaiveDateTime,
    ) -> AnalysisResult {
        let mut result = self.analyze_at(outcomes, catalog, now);
        result.daily_ranking = self.rank_daily(outcomes, catalog, now);
        result
    }
}

/// 마지막 결과의 시각 (결과가 없으면 기본값)
pub fn reference_time(outcomes: &[Outcome]) -> NaiveDateTime {
    outcomes
        .last()
        .map(Outcome::datetime)
        .unwrap_or_default()
}

/// 기본 설정과 빈 카탈로그로 분석합니다.
pub fn analyze(outcomes: &[Outcome]) -> AnalysisResult {
    AnalysisEngine::default().analyze(outcomes, &PatternCatalog::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_empty_input_is_neutral() {
        let result = analyze(&[]);
        assert_eq!(result.summary.total_plays, 0);
        assert_eq!(result.summary.market_state, MarketState::Cold);
        assert_eq!(result.summary.market_percentage, 15);
        assert!(!result.summary.is_paused);
        assert!(result.pause_history.is_empty());
        assert!(result.hot_spots.houses.is_empty());
        assert!(result.indicators.is_empty());
        assert!(!result.immediate_repeat.is_active);
        assert!(result.daily_ranking.is_none());
        assert_eq!(result.summary.short_term_volatility, 0.0);
    }

    #[test]
    fn test_reference_time_uses_last_outcome() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let outcomes = vec![
            Outcome::new(1.0, date, NaiveTime::from_hms_opt(10, 0, 0).unwrap(), 0),
            Outcome::new(2.0, date, NaiveTime::from_hms_opt(10, 7, 30).unwrap(), 1),
        ];
        assert_eq!(reference_time(&outcomes).minute(), 7);
        assert_eq!(reference_time(&[]), NaiveDateTime::default());
    }
}
