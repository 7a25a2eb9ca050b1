use crate::analyzer::base::ClassifiedSequence;
use crate::model::Tier;
use crate::pattern::{CatalogedPattern, MatchResult, PatternOccurrence, average_hit_value};

/// 범용 패턴 매처
///
/// 전체 이력에서 트리거 티어 시퀀스의 모든 발생을 찾아 다음 결과를 집계합니다.
/// 비용은 O(n · 패턴 길이)이며, 카탈로그 크기와 패턴 길이는 호출자가 제한해야 합니다.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    lookahead: usize,
}

impl PatternMatcher {
    /// 새 매처 생성
    ///
    /// # Arguments
    /// * `lookahead` - 발생마다 저장할 후속 결과 수
    pub fn new(lookahead: usize) -> Self {
        PatternMatcher { lookahead }
    }

    /// 패턴 하나를 시퀀스 전체에 대해 실행합니다.
    ///
    /// 인덱스 `i`에서 `tiers[i..i + k]`가 트리거와 같고 `i + k`에 다음 결과가 있으면 발생으로 기록합니다.
    /// 다음 결과의 티어가 기대 티어와 같고 그 티어가 Mid 또는 High일 때만 적중입니다.
    /// 트리거가 비어 있으면 스캔 없이 빈 결과를 반환합니다.
    ///
    /// # Arguments
    /// * `seq` - 분류된 시퀀스
    /// * `pattern` - 카탈로그 패턴
    ///
    /// # Returns
    /// * `MatchResult` - 발생/적중 집계와 이력
    pub fn run(&self, seq: &ClassifiedSequence, pattern: &CatalogedPattern) -> MatchResult {
        let Some(expected) = pattern.expected() else {
            return MatchResult::default();
        };
        let trigger = pattern.trigger();
        let k = trigger.len();
        if k == 0 || seq.len() <= k {
            return MatchResult::default();
        }

        let tiers = seq.tiers();
        let outcomes = seq.outcomes();
        let countable = matches!(expected, Tier::Mid | Tier::High);

        let mut result = MatchResult::default();
        let mut total_hit_value = 0.0;

        for i in 0..seq.len() - k {
            if &tiers[i..i + k] != trigger {
                continue;
            }

            result.occurrences += 1;
            if countable && tiers[i + k] == expected {
                result.hits += 1;
                total_hit_value += outcomes[i + k].value;
            }
            result.history.push(PatternOccurrence::new(
                outcomes[i..i + k].to_vec(),
                seq.window_after(i + k - 1, self.lookahead),
                pattern.sequence.len(),
                None,
            ));
        }

        result.avg_multiplier = average_hit_value(total_hit_value, result.hits);
        log::trace!(
            "패턴 '{}': 발생 {}회, 적중 {}회",
            pattern.name,
            result.occurrences,
            result.hits
        );
        result
    }

    /// 여러 패턴을 순서대로 실행합니다.
    pub fn run_all(
        &self,
        seq: &ClassifiedSequence,
        patterns: &[CatalogedPattern],
    ) -> Vec<MatchResult> {
        patterns.iter().map(|pattern| self.run(seq, pattern)).collect()
    }
}
