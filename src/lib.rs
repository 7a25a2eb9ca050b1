pub mod analyzer;
pub mod config;
pub mod engine;
pub mod indicator;
pub mod model;
pub mod outcome_store;
pub mod pattern;

/// 설정 로더
pub mod config_loader;

pub use config::{AnalysisConfig, DEFAULT_CONFIG};
pub use config_loader::{ConfigError, ConfigFormat, ConfigLoader, ConfigResult};
pub use engine::{AnalysisEngine, AnalysisResult, AnalysisSummary, analyze};
pub use model::{Outcome, Tier};
pub use outcome_store::{OutcomeError, OutcomeResult, OutcomeStore};
pub use pattern::{CatalogedPattern, PatternCatalog};
