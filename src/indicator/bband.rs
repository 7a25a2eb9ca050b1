use crate::indicator::utils::calculate_standard_deviation;
use crate::indicator::utils::moving_average::calculate_sma;
use serde::Serialize;
use std::fmt::Display;

/// 한 인덱스의 볼린저 밴드 값
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BollingerBands {
    pub middle: f64,
    pub upper: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// 밴드폭 (상단 - 하단) / 중간
    pub fn bandwidth(&self) -> f64 {
        if self.middle.abs() < f64::EPSILON {
            return 0.0;
        }
        (self.upper - self.lower) / self.middle
    }

    /// 값의 상대적 위치 (%B)
    ///
    /// 0은 하단 밴드, 0.5는 중간, 1은 상단 밴드입니다.
    pub fn percent_b(&self, value: f64) -> f64 {
        let range = self.upper - self.lower;
        if range.abs() < f64::EPSILON {
            return 0.5;
        }
        (value - self.lower) / range
    }
}

impl Display for BollingerBands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB({:.2}, {:.2}, {:.2})",
            self.middle, self.upper, self.lower
        )
    }
}

/// 인덱스 정렬된 볼린저 밴드 시리즈
///
/// 같은 `period` 윈도우의 SMA와 모표준편차로 `middle ± multiplier * σ`를 계산합니다.
///
/// # Arguments
/// * `values` - 값 배열
/// * `period` - 윈도우 크기 (일반적으로 20)
/// * `multiplier` - 표준편차 승수 (일반적으로 2.0)
pub fn bollinger_series(
    values: &[f64],
    period: usize,
    multiplier: f64,
) -> Vec<Option<BollingerBands>> {
    (0..values.len())
        .map(|i| {
            let middle = calculate_sma(&values[..=i], period)?;
            let window = &values[i + 1 - period..=i];
            let std_dev = calculate_standard_deviation(window);
            Some(BollingerBands {
                middle,
                upper: middle + std_dev * multiplier,
                lower: middle - std_dev * multiplier,
            })
        })
        .collect()
}
