/// 과매도 기준
pub const RSI_OVERSOLD: f64 = 30.0;
/// 과매수 기준
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// 평균 이득/손실로 RSI 계산
fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Wilder 방식 RSI 시리즈
///
/// 첫 값은 `i = period`에서 직전 `period`개 변화량의 단순 평균으로 계산하고,
/// 이후에는 `avg = (avg * (period - 1) + new) / period`로 평활화합니다.
/// `i < period`이면 None입니다.
///
/// # Arguments
/// * `values` - 값 배열
/// * `period` - RSI 기간 (일반적으로 14)
pub fn rsi_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut series = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return series;
    }

    let changes: Vec<(f64, f64)> = values
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            (change.max(0.0), (-change).max(0.0))
        })
        .collect();

    let mut avg_gain = changes[..period].iter().map(|c| c.0).sum::<f64>() / period as f64;
    let mut avg_loss = changes[..period].iter().map(|c| c.1).sum::<f64>() / period as f64;
    series[period] = Some(rsi_value(avg_gain, avg_loss));

    let smoothing = (period - 1) as f64;
    for i in period + 1..values.len() {
        // changes[i - 1]은 values[i - 1] -> values[i] 변화량
        let (gain, loss) = changes[i - 1];
        avg_gain = (avg_gain * smoothing + gain) / period as f64;
        avg_loss = (avg_loss * smoothing + loss) / period as f64;
        series[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    series
}
