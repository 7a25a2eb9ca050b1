mod common_test_utils;
use common_test_utils::*;

use outcome_analysis::analyzer::base::ClassifiedSequence;
use outcome_analysis::analyzer::hot_spot_analyzer::HotSpotAnalyzer;
use outcome_analysis::analyzer::market_state_analyzer::{MarketState, MarketStateAnalysis};
use outcome_analysis::analyzer::pause_analyzer::{
    PauseAnalyzer, PauseRisk, PauseRiskLevel, PauseRiskReason, ProbableTrigger,
};
use outcome_analysis::analyzer::pressure_analyzer::{
    HighPressure, HighPressureLevel, MidPressure, MidPressureLevel, PressureFactor,
};
use outcome_analysis::engine::analyze;
use outcome_analysis::model::Tier;
use outcome_analysis::pattern::{CatalogedPattern, PatternCatalog};

/// 60x High, Low 30개, 12x High, Low 40개
fn paused_values() -> Vec<f64> {
    let mut values = vec![60.0];
    values.extend(create_low_values(30));
    values.push(12.0);
    values.extend(create_low_values(40));
    values
}

#[test]
fn test_detect_pause_episode() {
    let outcomes = create_sequence(&paused_values());
    let seq = ClassifiedSequence::new(&outcomes);
    let pauses = PauseAnalyzer::new(25, 1.1).detect_pauses(&seq);

    assert_eq!(pauses.len(), 1);
    let pause = &pauses[0];
    assert_eq!(pause.start_index, 1);
    assert_eq!(pause.end_index, 30);
    assert_eq!(pause.length, 30);
    assert_eq!(pause.outcomes.len(), 30);
    assert_eq!(pause.start_time, outcomes[1].datetime());
    assert_eq!(pause.end_time, outcomes[30].datetime());
    assert_eq!(pause.probable_trigger, ProbableTrigger::AfterGiantHigh);
}

#[test]
fn test_short_gaps_are_not_pauses() {
    let outcomes = create_sequence(&create_periodic_high_values(100, 20, 15.0));
    let seq = ClassifiedSequence::new(&outcomes);
    assert!(PauseAnalyzer::new(25, 1.1).detect_pauses(&seq).is_empty());
}

#[test]
fn test_probable_trigger_high_cluster() {
    let mut values = vec![12.0, 1.2, 13.0, 1.2, 14.0];
    values.extend(create_low_values(26));
    values.push(11.0);
    let outcomes = create_sequence(&values);
    let seq = ClassifiedSequence::new(&outcomes);
    let pauses = PauseAnalyzer::new(25, 1.1).detect_pauses(&seq);

    assert_eq!(pauses.len(), 1);
    assert_eq!(pauses[0].length, 26);
    assert_eq!(pauses[0].probable_trigger, ProbableTrigger::AfterHighCluster);
}

#[test]
fn test_is_paused_threshold() {
    let analyzer = PauseAnalyzer::new(25, 1.1);
    assert!(!analyzer.is_paused(25, 10.0));
    assert!(analyzer.is_paused(26, 10.0));
    // 평균 40 -> 기준 44
    assert!(!analyzer.is_paused(44, 40.0));
    assert!(analyzer.is_paused(45, 40.0));
    assert!(analyzer.current_pause(20, 10.0).is_none());
    let details = analyzer.current_pause(45, 40.0).unwrap();
    assert_eq!(details.plays_without_high, 45);
    assert_close(details.threshold, 44.0);
}

#[test]
fn test_paused_engine_forces_high_pressure() {
    let result = analyze(&create_sequence(&paused_values()));

    assert!(result.summary.is_paused);
    assert_eq!(result.summary.pause_details.unwrap().plays_without_high, 40);
    assert_eq!(result.high_pressure.score, 5.0);
    assert_eq!(result.high_pressure.level, HighPressureLevel::Low);
    assert_eq!(result.high_pressure.factors, vec![PressureFactor::PauseActive]);
    assert_eq!(result.pause_history.len(), 1);
}

#[test]
fn test_pause_risk_approaching_average() {
    let outcomes = create_sequence(&paused_values());
    let seq = ClassifiedSequence::new(&outcomes);
    let pauses = PauseAnalyzer::new(25, 1.1).detect_pauses(&seq);

    // 평균 휴지기 30 -> 목표 22.5, 현재 40 플레이 -> 최대 50점
    let risk = PauseRisk::evaluate(&seq, &pauses, 40);
    assert_close(risk.score, 50.0);
    assert_eq!(risk.level, PauseRiskLevel::Medium);
    assert_eq!(risk.reason, PauseRiskReason::ApproachingAveragePause);

    let partial = PauseRisk::evaluate(&seq, &pauses, 9);
    assert_close(partial.score, 20.0);
    assert_eq!(partial.level, PauseRiskLevel::Low);
}

#[test]
fn test_pause_risk_post_giant_and_no_history() {
    let outcomes = create_sequence(&[1.2, 1.2, 150.0, 1.2, 1.2]);
    let seq = ClassifiedSequence::new(&outcomes);
    let risk = PauseRisk::evaluate(&seq, &[], 2);
    assert_eq!(risk.score, 95.0);
    assert_eq!(risk.level, PauseRiskLevel::Critical);
    assert_eq!(risk.reason, PauseRiskReason::PostGiantEffect);

    let calm = create_sequence(&[1.2, 1.2, 15.0, 1.2]);
    let seq = ClassifiedSequence::new(&calm);
    let risk = PauseRisk::evaluate(&seq, &[], 1);
    assert_eq!(risk.score, 0.0);
    assert_eq!(risk.reason, PauseRiskReason::NoHistory);
}

#[test]
fn test_high_pressure_catalog_bonus_and_penalty() {
    // High 인덱스 4, 9, 14, 19 -> 평균 5, 마지막이 High
    let outcomes = create_sequence(&create_periodic_high_values(20, 5, 15.0));
    let seq = ClassifiedSequence::new(&outcomes);
    let market = MarketStateAnalysis::analyze(&seq, 24);
    assert_eq!(market.state, MarketState::Hot);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);

    let winning = PatternCatalog::new(
        vec![CatalogedPattern::new(
            "low-high",
            vec![Tier::Low, Tier::High, Tier::Mid],
        )],
        Vec::new(),
    );
    let pressure = HighPressure::evaluate(&seq, 0, 5.0, false, market.state, &spots, 59, &winning);
    assert_close(pressure.score, 40.0);
    assert_eq!(pressure.level, HighPressureLevel::Building);
    assert!(pressure
        .factors
        .contains(&PressureFactor::WinningPattern { points: 25.0 }));

    let both = PatternCatalog::new(
        winning.winning.clone(),
        vec![CatalogedPattern::new("high-low", vec![Tier::High, Tier::Low])],
    );
    let pressure = HighPressure::evaluate(&seq, 0, 5.0, false, market.state, &spots, 59, &both);
    assert_eq!(pressure.score, 0.0);
    assert!(pressure
        .factors
        .contains(&PressureFactor::LosingPattern { points: -50.0 }));
}

#[test]
fn test_high_pressure_interval_base_is_capped() {
    let outcomes = create_sequence(&[15.0, 1.2, 1.2, 15.0, 1.2, 1.2, 1.2, 1.2, 1.2, 1.2]);
    let seq = ClassifiedSequence::new(&outcomes);
    let spots = HotSpotAnalyzer::new(25, 5).analyze(&seq);
    let pressure = HighPressure::evaluate(
        &seq,
        6,
        3.0,
        false,
        MarketState::Cold,
        &spots,
        30,
        &PatternCatalog::default(),
    );
    assert_close(pressure.score, 60.0);
    assert_eq!(pressure.factors, vec![PressureFactor::IntervalProgress { points: 60.0 }]);
}

#[test]
fn test_mid_pressure_low_streak_and_crash() {
    let mut values = create_low_values(9);
    values.push(1.05);
    let outcomes = create_sequence(&values);
    let seq = ClassifiedSequence::new(&outcomes);

    // 60 (연속 Low 상한) - 15 (Cold) + 20 (직전 1.1x 미만)
    let pressure = MidPressure::evaluate(&seq, MarketState::Cold);
    assert_close(pressure.score, 65.0);
    assert_eq!(pressure.level, MidPressureLevel::Building);
    assert_eq!(pressure.factors.len(), 3);
}

#[test]
fn test_mid_pressure_mid_cluster_and_heat() {
    // 최근 15회 중 Mid 7개, 직전 결과 Mid
    let mut values = create_low_values(8);
    values.extend(vec![3.0; 7]);
    let outcomes = create_sequence(&values);
    let seq = ClassifiedSequence::new(&outcomes);

    // 25 (Hot) + 24 (기준 4개 초과 3개 × 8)
    let pressure = MidPressure::evaluate(&seq, MarketState::Hot);
    assert_close(pressure.score, 49.0);
    assert!(pressure.factors.contains(&PressureFactor::MidCluster {
        count: 7,
        points: 24.0
    }));
}
