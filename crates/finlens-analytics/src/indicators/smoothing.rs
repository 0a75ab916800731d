//! 윈도우/지수 평활 기본 연산.
//!
//! 모든 함수는 NaN을 결측으로 취급하며, 결과의 결측은 `None`으로 표현됩니다.
//! 입력과 출력의 길이는 항상 같습니다.

/// 후행 윈도우 단순 평균.
///
/// 윈도우가 완전하지 않거나 윈도우 안에 결측이 있으면 `None`입니다.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        slice.iter().sum::<f64>() / slice.len() as f64
    })
}

/// 후행 윈도우 모표준편차 (ddof = 0).
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    rolling(values, window, |slice| {
        let n = slice.len() as f64;
        let mean = slice.iter().sum::<f64>() / n;
        let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    })
}

fn rolling<F>(values: &[f64], window: usize, reduce: F) -> Vec<Option<f64>>
where
    F: Fn(&[f64]) -> f64,
{
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            if slice.iter().any(|v| v.is_nan()) {
                None
            } else {
                Some(reduce(slice))
            }
        })
        .collect()
}

/// 비조정(adjust=False) 지수 가중 평균.
///
/// - 첫 관측값으로 시작합니다.
/// - 매 단계 이전 가중치가 `1 - alpha`만큼 감쇠하며, 결측은 재귀를 끊지 않고 감쇠만 적용됩니다.
/// - 관측값 수가 `min_periods` 이상이 된 시점부터 값을 내보냅니다.
pub fn ewm_mean(values: &[f64], alpha: f64, min_periods: usize) -> Vec<Option<f64>> {
    let min_periods = min_periods.max(1);
    let decay = 1.0 - alpha;

    let mut weighted: Option<f64> = None;
    let mut old_weight = 1.0;
    let mut observations = 0usize;

    values
        .iter()
        .map(|&x| {
            let observed = !x.is_nan();
            if observed {
                observations += 1;
            }

            match weighted {
                None => {
                    if observed {
                        weighted = Some(x);
                    }
                }
                Some(current) => {
                    old_weight *= decay;
                    if observed {
                        if current != x {
                            weighted =
                                Some((old_weight * current + alpha * x) / (old_weight + alpha));
                        }
                        old_weight = 1.0;
                    }
                }
            }

            if observations >= min_periods {
                weighted
            } else {
                None
            }
        })
        .collect()
}

/// 결측을 NaN으로 되돌립니다 (다음 단계 입력용).
pub fn to_nan(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn test_rolling_mean_warmup_and_gap() {
        let result = rolling_mean(&[1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0, 7.0], 3);

        assert!(result[..2].iter().all(Option::is_none));
        assert!(approx(result[2], 2.0));
        // NaN이 포함된 윈도우는 결측
        assert!(result[3..6].iter().all(Option::is_none));
        assert!(approx(result[6], 6.0));
    }

    #[test]
    fn test_rolling_mean_short_series() {
        assert!(rolling_mean(&[1.0, 2.0], 20).iter().all(Option::is_none));
    }

    #[test]
    fn test_rolling_std_population() {
        let result = rolling_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0], 8);
        assert!(approx(result[7], 2.0));
    }

    #[test]
    fn test_ewm_mean_recursion() {
        // alpha = 0.5: 1 → (0.5*1 + 0.5*3)/1 = 2 → (0.5*2 + 0.5*5) = 3.5
        let result = ewm_mean(&[1.0, 3.0, 5.0], 0.5, 1);
        assert!(approx(result[0], 1.0));
        assert!(approx(result[1], 2.0));
        assert!(approx(result[2], 3.5));
    }

    #[test]
    fn test_ewm_mean_min_periods() {
        let result = ewm_mean(&[1.0, 3.0, 5.0], 0.5, 3);
        assert!(result[..2].iter().all(Option::is_none));
        assert!(approx(result[2], 3.5));
    }

    #[test]
    fn test_ewm_mean_missing_decays_weight() {
        // 결측 후 관측: old_weight = 0.25, (0.25*1 + 0.5*4) / 0.75 = 3
        let result = ewm_mean(&[1.0, f64::NAN, 4.0], 0.5, 1);
        assert!(approx(result[1], 1.0));
        assert!(approx(result[2], 3.0));
    }

    #[test]
    fn test_ewm_mean_leading_missing() {
        let result = ewm_mean(&[f64::NAN, f64::NAN, 2.0, 4.0], 0.5, 2);
        assert!(result[..3].iter().all(Option::is_none));
        assert!(approx(result[3], 3.0));
    }
}
