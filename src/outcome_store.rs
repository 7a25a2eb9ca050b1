use crate::model::Outcome;
use chrono::NaiveDate;

/// 결과 수집 오류
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeError {
    /// NaN, 무한대 또는 음수 배수
    InvalidValue { value: f64 },
    /// 정렬 순서를 벗어난 결과
    OutOfOrder { index: usize },
}

impl std::fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeError::InvalidValue { value } => write!(f, "유효하지 않은 배수: {}", value),
            OutcomeError::OutOfOrder { index } => {
                write!(f, "시간 순서를 벗어난 결과: 인덱스 {}", index)
            }
        }
    }
}

impl std::error::Error for OutcomeError {}

/// 결과 수집 결과
pub type OutcomeResult<T> = Result<T, OutcomeError>;

/// 배수 값이 분석 엔진에 넘겨도 되는 값인지 확인합니다.
fn validate_value(value: f64) -> OutcomeResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(OutcomeError::InvalidValue { value });
    }
    Ok(())
}

/// 시간순 결과 저장소
///
/// 분석 엔진 앞단의 수집 경계입니다. 유효하지 않은 값을 거부하고,
/// (날짜, 시각) 오름차순을 유지하며, 각 결과의 `index`를 목록 위치로 다시 매깁니다.
/// `max_size`를 초과하면 가장 오래된 결과부터 제거됩니다.
#[derive(Debug, Clone)]
pub struct OutcomeStore {
    items: Vec<Outcome>,
    pub max_size: usize,
    pub use_duplicated_filter: bool,
}

/// 마지막 아이템과 동일한 결과인지 확인합니다.
fn is_same_item(items: &[Outcome], data: &Outcome) -> bool {
    items
        .last()
        .is_some_and(|last| last.value == data.value && last.datetime() == data.datetime())
}

impl OutcomeStore {
    /// 새로운 OutcomeStore 인스턴스를 생성합니다.
    ///
    /// # Arguments
    /// * `items` - 초기 결과 목록 (순서 무관, 같은 시각은 입력 순서 유지)
    /// * `max_size` - 저장소의 최대 크기
    /// * `use_duplicated_filter` - 연속 중복 결과 필터링 사용 여부
    ///
    /// # Returns
    /// * `OutcomeResult<OutcomeStore>` - 생성된 저장소 또는 첫 번째 유효성 오류
    pub fn new(
        mut items: Vec<Outcome>,
        max_size: usize,
        use_duplicated_filter: bool,
    ) -> OutcomeResult<OutcomeStore> {
        for item in &items {
            validate_value(item.value)?;
        }

        // 안정 정렬이므로 같은 시각의 결과는 입력 순서를 유지
        items.sort_by_key(|item| item.datetime());

        if use_duplicated_filter {
            let mut deduped: Vec<Outcome> = Vec::with_capacity(items.len());
            for item in items {
                if !is_same_item(&deduped, &item) {
                    deduped.push(item);
                }
            }
            items = deduped;
        }

        let mut store = OutcomeStore {
            items,
            max_size,
            use_duplicated_filter,
        };
        store.enforce_max_size();
        store.reindex();
        Ok(store)
    }

    /// 시간순 끝에 결과를 추가합니다.
    ///
    /// 마지막 결과보다 이른 시각이면 `OutOfOrder` 오류를 반환합니다.
    /// 중복 필터링이 활성화되어 있고 마지막 결과와 같으면 무시합니다.
    ///
    /// # Arguments
    /// * `data` - 추가할 결과
    ///
    /// # Returns
    /// * `OutcomeResult<bool>` - 실제로 추가되었으면 true
    pub fn add(&mut self, data: Outcome) -> OutcomeResult<bool> {
        validate_value(data.value)?;

        if self.use_duplicated_filter && is_same_item(&self.items, &data) {
            log::trace!("중복 결과 무시: {}", data);
            return Ok(false);
        }

        if let Some(last) = self.items.last() {
            if data.datetime() < last.datetime() {
                return Err(OutcomeError::OutOfOrder {
                    index: self.items.len(),
                });
            }
        }

        self.items.push(data);
        if self.enforce_max_size() {
            self.reindex();
        } else {
            let last_index = self.items.len() - 1;
            if let Some(last) = self.items.last_mut() {
                last.index = last_index;
            }
        }
        Ok(true)
    }

    /// 여러 결과를 순서대로 추가합니다.
    ///
    /// # Returns
    /// * `OutcomeResult<usize>` - 추가된 결과 수
    pub fn extend(&mut self, data: impl IntoIterator<Item = Outcome>) -> OutcomeResult<usize> {
        let mut added = 0;
        for item in data {
            if self.add(item)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// 저장소에 있는 결과 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 가장 최근 결과
    pub fn last(&self) -> Option<&Outcome> {
        self.items.last()
    }

    /// 지정된 인덱스의 결과
    pub fn get(&self, index: usize) -> Option<&Outcome> {
        self.items.get(index)
    }

    /// 시간순 결과 슬라이스
    pub fn items(&self) -> &[Outcome] {
        &self.items
    }

    /// 특정 날짜의 결과만 반환합니다.
    ///
    /// 반환되는 결과의 `index`는 전체 목록 기준 그대로입니다.
    pub fn outcomes_on(&self, date: NaiveDate) -> Vec<&Outcome> {
        self.items.iter().filter(|item| item.date == date).collect()
    }

    fn enforce_max_size(&mut self) -> bool {
        if self.items.len() > self.max_size {
            let excess = self.items.len() - self.max_size;
            self.items.drain(0..excess);
            return true;
        }
        false
    }

    fn reindex(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.index = index;
        }
    }
}
