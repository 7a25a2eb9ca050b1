use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Mid 티어 하한 배수
pub const MID_THRESHOLD: f64 = 2.0;
/// High 티어 하한 배수
pub const HIGH_THRESHOLD: f64 = 10.0;
/// 컬럼 버킷 개수
pub const COLUMN_COUNT: usize = 7;

/// 배당 배수의 서수 등급
///
/// `Low < Mid < High` 순서를 가지며, 화면상의 Blue/Purple/Pink 색상에 대응합니다.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// 2.0 미만
    Low,
    /// 2.0 이상 10.0 미만
    Mid,
    /// 10.0 이상
    High,
}

impl Tier {
    /// 배수 값을 티어로 분류합니다.
    ///
    /// 경계값은 하한 포함(2.0 → Mid, 10.0 → High)입니다.
    /// 0이나 음수처럼 수집 단계에서 걸러졌어야 할 값도 패닉 없이 Low로 분류됩니다.
    ///
    /// # Arguments
    /// * `value` - 배당 배수
    ///
    /// # Returns
    /// * `Tier` - 분류된 티어
    pub fn classify(value: f64) -> Tier {
        if value >= HIGH_THRESHOLD {
            Tier::High
        } else if value >= MID_THRESHOLD {
            Tier::Mid
        } else {
            Tier::Low
        }
    }

    /// Low가 아닌 티어인지 확인
    pub fn is_non_low(&self) -> bool {
        *self != Tier::Low
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Low => write!(f, "low"),
            Tier::Mid => write!(f, "mid"),
            Tier::High => write!(f, "high"),
        }
    }
}

/// 한 라운드의 결과
///
/// `index`는 시간순으로 정렬된 목록에서의 위치이며 간격/연속 계산의 유일한 기준입니다.
/// 날짜와 시각은 분 단위 버킷팅과 "오늘" 필터링에만 사용됩니다.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Outcome {
    pub value: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub index: usize,
}

impl Outcome {
    /// 새 결과 인스턴스 생성
    ///
    /// # Arguments
    /// * `value` - 배당 배수
    /// * `date` - 날짜
    /// * `time` - 시각
    /// * `index` - 정렬된 목록에서의 위치
    pub fn new(value: f64, date: NaiveDate, time: NaiveTime, index: usize) -> Self {
        Outcome {
            value,
            date,
            time,
            index,
        }
    }

    /// 값의 티어
    pub fn tier(&self) -> Tier {
        Tier::classify(self.value)
    }

    /// 컬럼 번호 (1..=7)
    pub fn column(&self) -> usize {
        column_of(self.index)
    }

    /// 날짜와 시각을 합친 타임스탬프
    pub fn datetime(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// 시각의 분 (0..=59)
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// 같은 인덱스 위치로 복제
    pub fn with_index(&self, index: usize) -> Outcome {
        Outcome {
            index,
            ..self.clone()
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Outcome(#{}, {:.2}x, {} {})",
            self.index, self.value, self.date, self.time
        )
    }
}

/// 인덱스의 컬럼 번호를 계산합니다. (`index mod 7 + 1`)
pub fn column_of(index: usize) -> usize {
    (index % COLUMN_COUNT) + 1
}
