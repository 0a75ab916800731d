//! OHLCV 시계열 타입 및 CSV 로더.
//!
//! ## CSV 파일 형식
//!
//! ```csv
//! Date,Open,High,Low,Close,Adj Close,Volume
//! 2024-01-02,187.15,188.44,183.89,185.64,185.40,82488700
//! 2024-01-03 00:00:00-05:00,184.22,185.88,183.43,184.25,184.01,58414500
//! ```
//!
//! 헤더는 대소문자를 구분하지 않으며 `date`와 `close` 컬럼은 필수입니다.
//! 숫자로 변환할 수 없는 값은 NaN(결측)으로 강제 변환됩니다.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::numeric::{coerce_number, lenient_f64};

/// 시계열의 한 행 (OHLCV).
///
/// 타임스탬프는 UTC로 정규화됩니다. 수치 필드는 NaN(결측)을 가질 수 있습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// 기간 시작 시각 (UTC)
    pub date: DateTime<Utc>,
    /// 시가
    #[serde(deserialize_with = "lenient_f64")]
    pub open: f64,
    /// 고가
    #[serde(deserialize_with = "lenient_f64")]
    pub high: f64,
    /// 저가
    #[serde(deserialize_with = "lenient_f64")]
    pub low: f64,
    /// 종가
    #[serde(deserialize_with = "lenient_f64")]
    pub close: f64,
    /// 거래량
    #[serde(deserialize_with = "lenient_f64")]
    pub volume: f64,
}

impl PricePoint {
    /// 새 시세 행을 생성합니다.
    pub fn new(
        date: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// 종가만 있는 행을 생성합니다 (나머지 가격은 종가, 거래량은 0).
    pub fn from_close(date: DateTime<Utc>, close: f64) -> Self {
        Self::new(date, close, close, close, close, 0.0)
    }

    /// 종가가 결측인지 확인합니다.
    pub fn has_missing_close(&self) -> bool {
        self.close.is_nan()
    }
}

/// 헤더에서 찾은 컬럼 위치.
#[derive(Debug, Clone, Copy)]
struct ColumnLayout {
    date: usize,
    open: Option<usize>,
    high: Option<usize>,
    low: Option<usize>,
    close: usize,
    volume: Option<usize>,
}

impl ColumnLayout {
    fn from_header(header: &[&str]) -> CoreResult<Self> {
        let find = |names: &[&str]| {
            header.iter().position(|h| {
                let h = h.trim().to_lowercase();
                names.iter().any(|n| h == *n)
            })
        };

        let date = find(&["date", "datetime", "timestamp", "time"])
            .ok_or_else(|| CoreError::MissingColumn("date".to_string()))?;
        let close = find(&["close"]).ok_or_else(|| CoreError::MissingColumn("close".to_string()))?;

        Ok(Self {
            date,
            open: find(&["open"]),
            high: find(&["high"]),
            low: find(&["low"]),
            close,
            volume: find(&["volume"]),
        })
    }
}

/// CSV 문자열을 시세 시계열로 파싱합니다.
///
/// 첫 번째 비어있지 않은 줄은 헤더입니다. 결과는 타임스탬프 오름차순으로
/// 안정 정렬되며, 중복 타임스탬프는 제거하지 않습니다.
pub fn parse_price_csv(content: &str) -> CoreResult<Vec<PricePoint>> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(CoreError::EmptyInput)?;
    let header = split_csv_line(header_line.trim_start_matches('\u{feff}'));
    let layout = ColumnLayout::from_header(&header)?;

    let mut points = Vec::new();
    for (line_idx, line) in lines {
        let fields = split_csv_line(line);
        let field = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i))
                .map_or(f64::NAN, |raw| coerce_number(raw))
        };

        let raw_date = fields.get(layout.date).copied().unwrap_or_default();
        let date = parse_timestamp(raw_date).ok_or_else(|| CoreError::InvalidTimestamp {
            line: line_idx + 1,
            value: raw_date.to_string(),
        })?;

        points.push(PricePoint {
            date,
            open: field(layout.open),
            high: field(layout.high),
            low: field(layout.low),
            close: field(Some(layout.close)),
            volume: field(layout.volume),
        });
    }

    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// CSV 한 줄을 필드로 분리합니다 (큰따옴표 안의 콤마는 구분자가 아님).
fn split_csv_line(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(line[start..idx].trim().trim_matches('"'));
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(line[start..].trim().trim_matches('"'));

    fields
}

/// 타임스탬프 문자열을 UTC로 정규화합니다.
///
/// 지원 형식: RFC 3339, `YYYY-MM-DD HH:MM:SS±HH:MM`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD`.
/// 오프셋이 없는 값은 UTC로 간주합니다.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
