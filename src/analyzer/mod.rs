// 분류된 결과 시퀀스에 대한 분석기 모듈
// 간격/연속, 핫스팟, 마켓 상태, 휴지기, 압력 점수를 계산합니다.

pub mod base;
pub mod hot_spot_analyzer;
pub mod market_state_analyzer;
pub mod pause_analyzer;
pub mod pressure_analyzer;
pub mod streak_analyzer;

pub use base::ClassifiedSequence;
pub use hot_spot_analyzer::{HotSpotAnalyzer, HotSpots, MinuteBucket};
pub use market_state_analyzer::{MarketState, MarketStateAnalysis};
pub use pause_analyzer::{PauseAnalyzer, PauseDetails, PauseEpisode, PauseRisk, PauseRiskLevel};
pub use pressure_analyzer::{
    HighPressure, HighPressureLevel, MidPressure, MidPressureLevel, PressureFactor,
};
pub use streak_analyzer::{ExtremeReport, StreakAnalysis};
