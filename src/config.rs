use crate::config_loader::{ConfigError, ConfigResult, ConfigValidation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// 기본 분석 설정
///
/// 모든 값이 출력 호환성을 위한 고정 상수와 일치합니다.
pub static DEFAULT_CONFIG: Lazy<AnalysisConfig> = Lazy::new(AnalysisConfig::default);

/// 분석 엔진 설정
///
/// 기본값을 바꾸면 다른 배포본과 결과가 달라지므로 실험 용도로만 변경해야 합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// SMA / 볼린저 밴드 기간
    pub sma_period: usize,
    /// 볼린저 밴드 표준편차 승수
    pub bband_multiplier: f64,
    /// RSI 기간
    pub rsi_period: usize,
    /// 신뢰도 점수 워밍업 인덱스
    pub confidence_warmup: usize,
    /// 신뢰도 점수의 시장 점수 윈도우
    pub confidence_window: usize,
    /// 마켓 상태 윈도우
    pub market_window: usize,
    /// 최소 휴지기 길이
    pub pause_threshold: usize,
    /// 평균 High 간격 대비 휴지기 판정 배수
    pub pause_factor: f64,
    /// 발생 이력에 저장할 후속 결과 수
    pub lookahead: usize,
    /// 일일 랭킹 최소 표본 수
    pub daily_min_outcomes: usize,
    /// 일일 랭킹 최대 항목 수
    pub daily_max_ranked: usize,
    /// 일일 랭킹에 포함할 승리 카탈로그 패턴 수
    pub daily_catalog_top: usize,
    /// 극단값 보고서의 간격 이력 길이
    pub extreme_history_len: usize,
    /// 티어별 핫 미닛 목록 길이
    pub hot_minute_top: usize,
    /// 단기 변동성 윈도우
    pub volatility_window: usize,
    /// 하우스 랭킹 최대 간격
    pub house_max: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            sma_period: 20,
            bband_multiplier: 2.0,
            rsi_period: 14,
            confidence_warmup: 20,
            confidence_window: 50,
            market_window: 24,
            pause_threshold: 25,
            pause_factor: 1.1,
            lookahead: 10,
            daily_min_outcomes: 20,
            daily_max_ranked: 5,
            daily_catalog_top: 5,
            extreme_history_len: 10,
            hot_minute_top: 5,
            volatility_window: 10,
            house_max: 25,
        }
    }
}

impl ConfigValidation for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        let periods = [
            ("sma_period", self.sma_period),
            ("rsi_period", self.rsi_period),
            ("confidence_window", self.confidence_window),
            ("market_window", self.market_window),
            ("daily_max_ranked", self.daily_max_ranked),
            ("volatility_window", self.volatility_window),
            ("house_max", self.house_max),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ValidationError(format!(
                "{}는 0보다 커야 합니다",
                name
            )));
        }

        if self.bband_multiplier <= 0.0 {
            return Err(ConfigError::ValidationError(
                "볼린저 밴드 승수는 0보다 커야 합니다".to_string(),
            ));
        }

        if self.pause_factor < 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "휴지기 배수({})는 1.0 이상이어야 합니다",
                self.pause_factor
            )));
        }

        if self.confidence_warmup < self.rsi_period {
            return Err(ConfigError::ValidationError(format!(
                "신뢰도 워밍업({})은 RSI 기간({}) 이상이어야 합니다",
                self.confidence_warmup, self.rsi_period
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_loader::{ConfigFormat, ConfigLoader};

    #[test]
    fn test_default_config_is_valid() {
        assert!(DEFAULT_CONFIG.validate().is_ok());
        assert_eq!(DEFAULT_CONFIG.market_window, 24);
        assert_eq!(DEFAULT_CONFIG.rsi_period, 14);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
            lookahead = 12
            hot_minute_top = 3
        "#;
        let config =
            ConfigLoader::load_from_string::<AnalysisConfig>(toml_str, ConfigFormat::Toml).unwrap();
        assert_eq!(config.lookahead, 12);
        assert_eq!(config.hot_minute_top, 3);
        assert_eq!(config.sma_period, 20);
    }

    #[test]
    fn test_invalid_pause_factor() {
        let json = r#"{"pause_factor": 0.5}"#;
        let result = ConfigLoader::load_from_string::<AnalysisConfig>(json, ConfigFormat::Json);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_period_rejected() {
        let json = r#"{"rsi_period": 0}"#;
        let result = ConfigLoader::load_from_string::<AnalysisConfig>(json, ConfigFormat::Json);
        assert!(result.is_err());
    }
}
