//! JSON 안전 수치 유틸리티.
//!
//! 분석 결과는 NaN/Infinity 리터럴 없이 JSON으로 직렬화되어야 합니다.
//! 결측 처리와 비유한값 제거는 모두 이 모듈의 함수 하나로 모입니다:
//!
//! 1. 전방 채움 (마지막 유효값 전파)
//! 2. 첫 유효값 이전 구간은 0으로 채움
//! 3. 남은 NaN/±Infinity는 0.0으로 치환
//!
//! 내부적으로 결측은 `None` 또는 `Some(NaN)`으로 표현됩니다.

use serde::{Deserialize, Deserializer};

/// 비유한값(NaN, ±Infinity)을 0.0으로 치환합니다.
#[inline]
pub fn json_safe(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 결측값인지 확인합니다 (`None` 또는 `Some(NaN)`).
///
/// Infinity는 결측이 아닙니다. 전방 채움 대상이 아니며 마지막 단계에서 0이 됩니다.
#[inline]
pub fn is_missing(value: Option<f64>) -> bool {
    value.is_none_or(f64::is_nan)
}

/// 마지막 유효값을 이후 결측 위치로 전파합니다.
///
/// 첫 유효값 이전의 결측은 그대로 `None`으로 남습니다.
pub fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last: Option<f64> = None;
    values
        .iter()
        .map(|&v| {
            if is_missing(v) {
                last
            } else {
                last = v;
                v
            }
        })
        .collect()
}

/// 지표 컬럼을 최종 형태로 확정합니다.
///
/// 전방 채움 → 남은 결측 0 → 비유한값 0 순서로 적용하며,
/// 결과의 모든 값은 유한한 `f64`입니다. 길이는 입력과 같습니다.
pub fn finalize_column(values: &[Option<f64>]) -> Vec<f64> {
    forward_fill(values)
        .into_iter()
        .map(|v| json_safe(v.unwrap_or(0.0)))
        .collect()
}

/// NaN을 결측으로 간주하는 원시 컬럼용 [`finalize_column`].
pub fn finalize_values(values: &[f64]) -> Vec<f64> {
    let wrapped: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
    finalize_column(&wrapped)
}

/// 문자열을 숫자로 강제 변환합니다.
///
/// 변환할 수 없는 값(빈 문자열 포함)은 NaN이 됩니다.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// 관대한 숫자 역직렬화 입력.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// 숫자, 숫자 문자열, 그 외 모든 값을 받아들이는 serde 역직렬화 함수.
///
/// 숫자로 해석할 수 없는 값은 NaN이 됩니다.
///
/// ```
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(deserialize_with = "finlens_core::lenient_f64")]
///     close: f64,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"close": "101.5"}"#).unwrap();
/// assert_eq!(row.close, 101.5);
/// let row: Row = serde_json::from_str(r#"{"close": "n/a"}"#).unwrap();
/// assert!(row.close.is_nan());
/// ```
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawNumber::deserialize(deserializer)? {
        RawNumber::Number(n) => n,
        RawNumber::Text(s) => coerce_number(&s),
        RawNumber::Other(_) => f64::NAN,
    })
}
