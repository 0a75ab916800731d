//! 모멘텀 지표 (Momentum Indicators).
//!
//! - RSI (Relative Strength Index)

use serde::{Deserialize, Serialize};

use super::smoothing::ewm_mean;
use super::{IndicatorError, IndicatorResult};

/// RSI 파라미터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiParams {
    /// RSI 기간 (기본: 14).
    pub period: usize,
}

impl Default for RsiParams {
    fn default() -> Self {
        Self { period: 14 }
    }
}

/// 모멘텀 지표 계산기.
#[derive(Debug, Default, Clone, Copy)]
pub struct MomentumCalculator;

impl MomentumCalculator {
    /// 새로운 모멘텀 계산기 생성.
    pub fn new() -> Self {
        Self
    }

    /// RSI 계산.
    ///
    /// RSI = 100 - (100 / (1 + RS)), RS = 평균 상승폭 / 평균 하락폭
    ///
    /// 평균은 alpha = 1/period 인 지수 평활이며, period-1 인덱스부터 값이 있습니다.
    /// 가격 차분이 결측이면 상승/하락 모두 0으로 취급합니다.
    /// 평균 하락폭이 0이면 RSI는 100입니다.
    pub fn rsi(&self, prices: &[f64], params: RsiParams) -> IndicatorResult<Vec<Option<f64>>> {
        let period = params.period;
        if period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI 기간은 0보다 커야 합니다".to_string(),
            ));
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = (0..prices.len())
            .map(|i| {
                let diff = if i == 0 {
                    f64::NAN
                } else {
                    prices[i] - prices[i - 1]
                };
                if diff > 0.0 {
                    (diff, 0.0)
                } else if diff < 0.0 {
                    (0.0, -diff)
                } else {
                    (0.0, 0.0)
                }
            })
            .unzip();

        let alpha = 1.0 / period as f64;
        let avg_gain = ewm_mean(&gains, alpha, period);
        let avg_loss = ewm_mean(&losses, alpha, period);

        Ok(avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(gain, loss)| match (gain, loss) {
                (Some(_), Some(loss)) if *loss == 0.0 => Some(100.0),
                (Some(gain), Some(loss)) => Some(100.0 - 100.0 / (1.0 + gain / loss)),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_warmup() {
        let prices: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();
        let rsi = MomentumCalculator::new()
            .rsi(&prices, RsiParams::default())
            .unwrap();

        assert_eq!(rsi.len(), 30);
        assert!(rsi[..13].iter().all(Option::is_none));
        assert!(rsi[13..].iter().all(Option::is_some));
        assert!(rsi.iter().flatten().all(|v| (0.0..=100.0).contains(v)));
    }

    #[test]
    fn test_rsi_reference_values() {
        // 상승폭 0,1,0,2,0 / 하락폭 0,0,1,0,1, alpha = 1/3
        // 평균 상승폭: 0, 1/3, 2/9, 22/27, 44/81
        // 평균 하락폭: 0, 0, 1/3, 2/9, 13/27
        let rsi = MomentumCalculator::new()
            .rsi(&[1.0, 2.0, 1.0, 3.0, 2.0], RsiParams { period: 3 })
            .unwrap();

        assert!(rsi[..2].iter().all(Option::is_none));
        assert!((rsi[2].unwrap() - 40.0).abs() < 1e-9);
        assert!((rsi[3].unwrap() - 2200.0 / 28.0).abs() < 1e-9);
        assert!((rsi[4].unwrap() - 4400.0 / 83.0).abs() < 1e-9);
    }

    #[test]
    fn test_rsi_only_gains_is_100() {
        let prices: Vec<f64> = (1..=20).map(f64::from).collect();
        let rsi = MomentumCalculator::new()
            .rsi(&prices, RsiParams::default())
            .unwrap();
        assert_eq!(rsi[19], Some(100.0));
    }

    #[test]
    fn test_rsi_only_losses_is_0() {
        let prices: Vec<f64> = (1..=20).rev().map(f64::from).collect();
        let rsi = MomentumCalculator::new()
            .rsi(&prices, RsiParams::default())
            .unwrap();
        assert_eq!(rsi[19], Some(0.0));
    }

    #[test]
    fn test_rsi_flat_prices_is_100() {
        let rsi = MomentumCalculator::new()
            .rsi(&[10.0; 20], RsiParams::default())
            .unwrap();
        assert_eq!(rsi[19], Some(100.0));
    }

    #[test]
    fn test_rsi_missing_price_counts_as_no_change() {
        let mut prices: Vec<f64> = (1..=20).map(f64::from).collect();
        prices[10] = f64::NAN;
        let rsi = MomentumCalculator::new()
            .rsi(&prices, RsiParams { period: 5 })
            .unwrap();
        assert!(rsi.iter().skip(4).all(Option::is_some));
    }

    #[test]
    fn test_rsi_zero_period() {
        assert!(MomentumCalculator::new()
            .rsi(&[1.0, 2.0], RsiParams { period: 0 })
            .is_err());
    }
}
