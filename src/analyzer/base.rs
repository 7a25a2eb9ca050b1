use crate::model::{Outcome, Tier};

/// 티어가 한 번만 계산된 결과 시퀀스
///
/// 모든 분석기는 같은 `tiers` 배열을 공유하므로 컴포넌트마다 재분류하지 않습니다.
/// 생성 시 결과의 `index`를 목록 위치로 다시 매깁니다.
#[derive(Debug, Clone)]
pub struct ClassifiedSequence {
    outcomes: Vec<Outcome>,
    tiers: Vec<Tier>,
    high_indices: Vec<usize>,
}

impl ClassifiedSequence {
    /// 결과 목록에서 분류된 시퀀스 생성
    ///
    /// # Arguments
    /// * `outcomes` - 시간순으로 정렬된 결과 목록
    pub fn new(outcomes: &[Outcome]) -> ClassifiedSequence {
        let outcomes: Vec<Outcome> = outcomes
            .iter()
            .enumerate()
            .map(|(index, outcome)| outcome.with_index(index))
            .collect();
        let tiers: Vec<Tier> = outcomes.iter().map(Outcome::tier).collect();
        let high_indices = tiers
            .iter()
            .enumerate()
            .filter(|(_, tier)| **tier == Tier::High)
            .map(|(index, _)| index)
            .collect();

        ClassifiedSequence {
            outcomes,
            tiers,
            high_indices,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// High 결과의 인덱스 목록 (오름차순)
    pub fn high_indices(&self) -> &[usize] {
        &self.high_indices
    }

    pub fn last(&self) -> Option<&Outcome> {
        self.outcomes.last()
    }

    /// 배수 값 배열
    pub fn values(&self) -> Vec<f64> {
        self.outcomes.iter().map(|outcome| outcome.value).collect()
    }

    /// 최근 `n`개(또는 그 이하)의 티어 슬라이스
    pub fn last_tiers(&self, n: usize) -> &[Tier] {
        let start = self.tiers.len().saturating_sub(n);
        &self.tiers[start..]
    }

    /// 최근 `n`개(또는 그 이하)의 결과 슬라이스
    pub fn last_outcomes(&self, n: usize) -> &[Outcome] {
        let start = self.outcomes.len().saturating_sub(n);
        &self.outcomes[start..]
    }

    /// 최근 `n`개 중 특정 티어의 개수
    pub fn count_in_last(&self, n: usize, tier: Tier) -> usize {
        self.last_tiers(n).iter().filter(|t| **t == tier).count()
    }

    /// `index` 다음부터 최대 `len`개의 결과 (끝에서는 더 짧을 수 있음)
    pub fn window_after(&self, index: usize, len: usize) -> Vec<Outcome> {
        let start = (index + 1).min(self.outcomes.len());
        let end = (start + len).min(self.outcomes.len());
        self.outcomes[start..end].to_vec()
    }

    /// 마지막 High 이후 플레이 수
    ///
    /// High가 한 번도 없으면 전체 길이를 반환합니다.
    pub fn plays_since_last_high(&self) -> usize {
        match self.high_indices.last() {
            Some(last) => self.len() - 1 - last,
            None => self.len(),
        }
    }

    /// 마지막 결과까지 이어지는 연속 Low 개수
    pub fn current_low_streak(&self) -> usize {
        self.tiers
            .iter()
            .rev()
            .take_while(|tier| **tier == Tier::Low)
            .count()
    }
}
