use crate::indicator::utils::moving_average::calculate_sma;

/// 인덱스 정렬된 단순이동평균 시리즈
///
/// `sma[i]`는 `values[i + 1 - period..=i]`의 평균이며 `i + 1 < period`이면 None입니다.
pub fn sma_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| calculate_sma(&values[..=i], period))
        .collect()
}
