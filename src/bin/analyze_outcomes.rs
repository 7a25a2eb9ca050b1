use log::{debug, error, info, warn};
use outcome_analysis::config_loader::{ConfigFormat, ConfigLoader};
use outcome_analysis::engine::{AnalysisEngine, reference_time};
use outcome_analysis::model::Outcome;
use outcome_analysis::outcome_store::OutcomeStore;
use outcome_analysis::{AnalysisConfig, PatternCatalog};
use std::env;
use std::fs;
use std::path::PathBuf;

/// 입력 파일에서 허용하는 최대 결과 수
const MAX_OUTCOMES: usize = 100_000;

fn main() {
    // 로그 초기화
    env_logger::init();

    info!("결과 분석기 시작");

    // 커맨드 라인 인수 파싱
    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    if args.len() < 2 {
        error!("인수가 충분하지 않습니다. 결과 파일 경로가 필요합니다.");
        println!(
            "사용법: {} <결과_파일.json> [카탈로그_파일] [설정_파일]",
            args[0]
        );
        println!("카탈로그/설정 파일은 JSON 또는 TOML 형식을 지원합니다.");
        return;
    }

    // 결과 파일 읽기
    let outcomes_path = PathBuf::from(&args[1]);
    let content = match fs::read_to_string(&outcomes_path) {
        Ok(content) => content,
        Err(err) => {
            error!("결과 파일 읽기 실패: {} ({})", outcomes_path.display(), err);
            println!("결과 파일을 읽을 수 없습니다: {}", err);
            return;
        }
    };
    let outcomes: Vec<Outcome> = match serde_json::from_str(&content) {
        Ok(outcomes) => outcomes,
        Err(err) => {
            error!("결과 파일 파싱 실패: {}", err);
            println!("결과 파일 파싱 실패: {}", err);
            println!("해결 방법: [{{\"value\": 1.5, \"date\": \"2024-01-01\", \"time\": \"12:00:00\"}}] 형식인지 확인하세요.");
            return;
        }
    };
    info!("결과 {}개 로드", outcomes.len());

    // 수집 경계에서 유효성 검사와 정렬
    let store = match OutcomeStore::new(outcomes, MAX_OUTCOMES, true) {
        Ok(store) => store,
        Err(err) => {
            error!("결과 검증 실패: {}", err);
            println!("결과 검증 실패: {}", err);
            return;
        }
    };

    // 카탈로그 (지정되지 않은 경우 빈 카탈로그)
    let catalog = match args.get(2) {
        Some(path) => {
            debug!("카탈로그 파일 사용: {}", path);
            match ConfigLoader::load_from_file::<PatternCatalog>(
                &PathBuf::from(path),
                ConfigFormat::Auto,
            ) {
                Ok(catalog) => catalog,
                Err(err) => {
                    error!("카탈로그 로드 실패: {}", err);
                    println!("카탈로그 로드 실패: {}", err);
                    return;
                }
            }
        }
        None => {
            debug!("빈 카탈로그 사용");
            PatternCatalog::default()
        }
    };

    // 설정 (지정되지 않은 경우 기본 설정)
    let config = match args.get(3) {
        Some(path) => {
            match ConfigLoader::load_from_file::<AnalysisConfig>(
                &PathBuf::from(path),
                ConfigFormat::Auto,
            ) {
                Ok(config) => config,
                Err(err) => {
                    warn!("설정 로드 실패, 기본 설정 사용: {}", err);
                    println!("경고: 설정 로드 실패, 기본 설정을 사용합니다: {}", err);
                    AnalysisConfig::default()
                }
            }
        }
        None => AnalysisConfig::default(),
    };

    let engine = AnalysisEngine::new(config);
    let now = reference_time(store.items());
    let result = engine.analyze_with_ranking(store.items(), &catalog, now);

    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(err) => {
            error!("결과 직렬화 실패: {}", err);
            println!("결과 직렬화 실패: {}", err);
        }
    }

    info!("결과 분석기 종료");
}
