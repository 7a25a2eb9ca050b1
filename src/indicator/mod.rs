// 결과 시퀀스에 맞춘 기술적 지표 모듈
// 모든 시리즈는 결과 인덱스에 정렬되며 워밍업 구간은 None입니다.

pub mod bband;
pub mod confidence;
pub mod rsi;
pub mod sma;
pub mod utils;

use crate::analyzer::base::ClassifiedSequence;
use crate::config::AnalysisConfig;
use serde::Serialize;

/// 인덱스 정렬된 기술적 지표 시리즈
///
/// 모든 벡터의 길이는 결과 수와 같습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalIndicatorSeries {
    pub sma: Vec<Option<f64>>,
    pub bollinger_upper: Vec<Option<f64>>,
    pub bollinger_lower: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub confidence: Vec<Option<f64>>,
}

impl TechnicalIndicatorSeries {
    /// 전체 지표 시리즈 계산
    ///
    /// # Arguments
    /// * `seq` - 분류된 시퀀스
    /// * `config` - 기간/승수 설정
    ///
    /// # Returns
    /// * `TechnicalIndicatorSeries` - 계산된 시리즈
    pub fn calculate(seq: &ClassifiedSequence, config: &AnalysisConfig) -> Self {
        let values = seq.values();

        let sma = sma::sma_series(&values, config.sma_period);
        let bands = bband::bollinger_series(&values, config.sma_period, config.bband_multiplier);
        let rsi = rsi::rsi_series(&values, config.rsi_period);
        let confidence = confidence::confidence_series(
            seq.tiers(),
            &rsi,
            config.confidence_warmup,
            config.confidence_window,
        );

        log::trace!(
            "지표 계산 완료: {}개 (마지막 RSI {:?})",
            values.len(),
            rsi.last().copied().flatten()
        );

        TechnicalIndicatorSeries {
            sma,
            bollinger_upper: bands.iter().map(|band| band.map(|b| b.upper)).collect(),
            bollinger_lower: bands.iter().map(|band| band.map(|b| b.lower)).collect(),
            rsi,
            confidence,
        }
    }

    /// 시리즈 길이
    pub fn len(&self) -> usize {
        self.sma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma.is_empty()
    }

    /// 마지막 신뢰도 값
    pub fn latest_confidence(&self) -> Option<f64> {
        self.confidence.last().copied().flatten()
    }

    /// 마지막 RSI 값
    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi.last().copied().flatten()
    }
}
