use crate::analyzer::base::ClassifiedSequence;
use crate::model::{Outcome, Tier};
use crate::pattern::builtin::BuiltInDetector;
use crate::pattern::matcher::PatternMatcher;
use crate::pattern::{MatchResult, PatternCatalog, PatternOccurrence};
use chrono::NaiveDate;
use serde::Serialize;

/// 일일 랭킹 항목
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPattern {
    /// 1부터 시작하는 순위
    pub rank: usize,
    pub name: String,
    /// 카탈로그 패턴의 티어 시퀀스 (내장 탐지기는 None)
    pub pattern: Option<Vec<Tier>>,
    pub occurrences: usize,
    pub hits: usize,
    pub hit_rate: f64,
    pub avg_multiplier: f64,
    pub history: Option<Vec<PatternOccurrence>>,
}

impl RankedPattern {
    fn candidate(name: String, pattern: Option<Vec<Tier>>, result: MatchResult) -> Self {
        RankedPattern {
            rank: 0,
            name,
            pattern,
            occurrences: result.occurrences,
            hits: result.hits,
            hit_rate: result.hit_rate(),
            avg_multiplier: result.avg_multiplier,
            history: (!result.history.is_empty()).then_some(result.history),
        }
    }
}

/// 오늘 결과만으로 패턴 성과를 순위화하는 집계기
#[derive(Debug, Clone)]
pub struct DailyRanking {
    min_outcomes: usize,
    max_ranked: usize,
    catalog_top: usize,
    lookahead: usize,
}

impl DailyRanking {
    /// 새 일일 랭킹 집계기 생성
    ///
    /// # Arguments
    /// * `min_outcomes` - 오늘 결과의 최소 표본 수
    /// * `max_ranked` - 최대 순위 항목 수
    /// * `catalog_top` - 포함할 승리 카탈로그 패턴 수 (카탈로그 순서 기준)
    /// * `lookahead` - 발생 이력의 후속 결과 수
    pub fn new(min_outcomes: usize, max_ranked: usize, catalog_top: usize, lookahead: usize) -> Self {
        DailyRanking {
            min_outcomes,
            max_ranked,
            catalog_top,
            lookahead,
        }
    }

    /// 오늘 날짜의 패턴 순위를 계산합니다.
    ///
    /// 오늘 결과가 최소 표본 수보다 적거나, 발생이 있는 후보가 하나도 없으면 None입니다.
    /// 후보는 적중률 내림차순, 적중 수 내림차순으로 정렬됩니다.
    ///
    /// # Arguments
    /// * `outcomes` - 전체 결과 목록
    /// * `catalog` - 패턴 카탈로그
    /// * `today` - 기준 날짜
    pub fn rank(
        &self,
        outcomes: &[Outcome],
        catalog: &PatternCatalog,
        today: NaiveDate,
    ) -> Option<Vec<RankedPattern>> {
        let todays: Vec<Outcome> = outcomes
            .iter()
            .filter(|outcome| outcome.date == today)
            .cloned()
            .collect();
        if todays.len() < self.min_outcomes {
            log::debug!(
                "일일 랭킹 생략: 오늘 결과 {}개 (최소 {}개)",
                todays.len(),
                self.min_outcomes
            );
            return None;
        }

        let seq = ClassifiedSequence::new(&todays);
        let matcher = PatternMatcher::new(self.lookahead);

        let builtins = BuiltInDetector::ALL.iter().map(|detector| {
            RankedPattern::candidate(
                detector.to_string(),
                None,
                detector.backtest(&seq, self.lookahead),
            )
        });
        let cataloged = catalog.winning.iter().take(self.catalog_top).map(|pattern| {
            RankedPattern::candidate(
                pattern.name.clone(),
                Some(pattern.sequence.clone()),
                matcher.run(&seq, pattern),
            )
        });

        let mut candidates: Vec<RankedPattern> = builtins
            .chain(cataloged)
            .filter(|candidate| candidate.occurrences > 0)
            .collect();
        if candidates.is_empty() {
            return None;
        }

        // 안정 정렬: 동률이면 내장 탐지기, 카탈로그 순서 유지
        candidates.sort_by(|a, b| {
            b.hit_rate
                .total_cmp(&a.hit_rate)
                .then(b.hits.cmp(&a.hits))
        });
        candidates.truncate(self.max_ranked);
        for (position, candidate) in candidates.iter_mut().enumerate() {
            candidate.rank = position + 1;
        }

        Some(candidates)
    }
}
