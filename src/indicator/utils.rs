/// 공통 이동평균 계산 함수들
pub mod moving_average {
    /// 단순이동평균(SMA) 계산 - 공통 유틸리티 함수
    ///
    /// 마지막 `period`개 값의 평균을 계산합니다.
    ///
    /// # Arguments
    /// * `values` - 값 배열
    /// * `period` - 계산 기간
    ///
    /// # Returns
    /// * `Option<f64>` - 데이터가 부족하거나 period가 0이면 None
    pub fn calculate_sma(values: &[f64], period: usize) -> Option<f64> {
        if period == 0 || values.len() < period {
            return None;
        }

        let slice = &values[values.len() - period..];
        Some(slice.iter().sum::<f64>() / period as f64)
    }
}

/// 모표준편차 계산 함수
///
/// # Arguments
/// * `values` - 값 배열 (전체를 모집단으로 사용)
///
/// # Returns
/// * `f64` - 표준편차 (값이 2개 미만이면 0.0)
pub fn calculate_standard_deviation(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;

    variance.sqrt()
}
