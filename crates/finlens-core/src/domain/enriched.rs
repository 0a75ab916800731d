//! 기술적 지표가 추가된 시계열 타입.
//!
//! 지표 계산이 실패하면 원본 시계열이 그대로 반환되므로, 지표 필드의 존재 여부를
//! 구조적으로 구분할 수 있도록 `IndicatorValues`를 `Option`으로 감쌉니다.
//! JSON에서는 지표 키가 시세 키와 같은 객체에 평탄화되며, 지표가 없으면 키 자체가 없습니다.

use serde::{Deserialize, Serialize};

use super::price::PricePoint;

/// 한 시점의 지표 값들. 모든 값은 유한합니다.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorValues {
    /// 20기간 단순 이동평균
    pub ma20: f64,
    /// 50기간 단순 이동평균
    pub ma50: f64,
    /// RSI (0-100)
    pub rsi: f64,
    /// MACD 라인
    pub macd: f64,
    /// MACD 시그널 라인
    pub macd_signal: f64,
    /// 볼린저 밴드 상단
    pub bb_upper: f64,
    /// 볼린저 밴드 하단
    pub bb_lower: f64,
}

impl IndicatorValues {
    /// 모든 값이 유한한지 확인합니다.
    pub fn is_finite(&self) -> bool {
        [
            self.ma20,
            self.ma50,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.bb_upper,
            self.bb_lower,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// 지표가 추가된 시계열 행.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPoint {
    /// 시세 필드
    #[serde(flatten)]
    pub price: PricePoint,
    /// 지표 필드 (계산 실패 시 `None`)
    #[serde(flatten)]
    pub indicators: Option<IndicatorValues>,
}

impl EnrichedPoint {
    /// 지표 없이 원본 시세만 담은 행을 생성합니다.
    pub fn raw(price: PricePoint) -> Self {
        Self {
            price,
            indicators: None,
        }
    }

    /// 시세 및 지표의 모든 수치 필드가 유한한지 확인합니다.
    pub fn is_finite(&self) -> bool {
        let p = &self.price;
        let price_finite = [p.open, p.high, p.low, p.close, p.volume]
            .iter()
            .all(|v| v.is_finite());
        price_finite && self.indicators.is_none_or(|i| i.is_finite())
    }
}

/// 컬럼별 가용성 플래그.
///
/// `true`이면 채움 이전에 실제로 계산된 값이 하나 이상 있었음을 뜻합니다.
/// `false`인 컬럼은 데이터가 지표 기간보다 짧아 전부 0으로 채워진 것입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndicatorAvailability {
    pub ma20: bool,
    pub ma50: bool,
    pub rsi: bool,
    pub macd: bool,
    pub macd_signal: bool,
    pub bb_upper: bool,
    pub bb_lower: bool,
}

impl IndicatorAvailability {
    /// 모든 컬럼이 가용한지 확인합니다.
    pub fn all(&self) -> bool {
        self.ma20
            && self.ma50
            && self.rsi
            && self.macd
            && self.macd_signal
            && self.bb_upper
            && self.bb_lower
    }
}

/// 지표 계산 상태.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum IndicatorStatus {
    /// 지표가 계산됨
    Computed { availability: IndicatorAvailability },
    /// 계산 실패로 원본 시계열이 반환됨
    Unavailable { reason: String },
}

/// 지표 엔진의 출력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedSeries {
    /// 입력과 같은 길이, 같은 순서의 행들
    pub points: Vec<EnrichedPoint>,
    /// 계산 상태
    pub status: IndicatorStatus,
}

impl EnrichedSeries {
    /// 계산 실패 시의 결과 (원본 그대로, 지표 없음).
    pub fn unavailable(series: &[PricePoint], reason: impl Into<String>) -> Self {
        Self {
            points: series.iter().cloned().map(EnrichedPoint::raw).collect(),
            status: IndicatorStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// 지표가 계산되었는지 확인합니다.
    pub fn is_computed(&self) -> bool {
        matches!(self.status, IndicatorStatus::Computed { .. })
    }

    /// 행 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn point() -> PricePoint {
        PricePoint::from_close(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(), 100.0)
    }

    #[test]
    fn test_flattened_serialization_with_indicators() {
        let enriched = EnrichedPoint {
            price: point(),
            indicators: Some(IndicatorValues {
                rsi: 55.0,
                ..Default::default()
            }),
        };

        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["close"], 100.0);
        assert_eq!(json["rsi"], 55.0);
        assert_eq!(json["macd_signal"], 0.0);
        assert!(json.get("indicators").is_none());
    }

    #[test]
    fn test_indicator_keys_absent_when_unavailable() {
        let series = EnrichedSeries::unavailable(&[point()], "empty");
        let json = serde_json::to_value(&series.points[0]).unwrap();

        assert!(!series.is_computed());
        assert!(json.get("ma20").is_none());
        assert_eq!(json["close"], 100.0);
    }

    #[test]
    fn test_status_tagging() {
        let status = IndicatorStatus::Unavailable {
            reason: "bad period".to_string(),
        };
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "unavailable");
        assert_eq!(json["reason"], "bad period");
    }

    #[test]
    fn test_is_finite_checks_price_fields() {
        let mut p = point();
        p.volume = f64::NAN;
        assert!(!EnrichedPoint::raw(p).is_finite());
        assert!(EnrichedPoint::raw(point()).is_finite());
    }
}
