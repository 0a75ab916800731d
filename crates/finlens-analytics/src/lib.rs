//! # Finlens Analytics
//!
//! 시세 시계열 분석 파이프라인.
//!
//! ## 모듈 구성
//!
//! - [`indicators`]: 기술적 지표 (MA20/MA50, RSI, MACD, 볼린저 밴드)
//! - [`performance`]: 위험/수익 요약 지표 (수익률, 변동성, 최대 낙폭, 샤프 비율)
//! - [`report`]: 지표, 성과 지표, 기업 정보, 감성 분포를 하나의 리포트로 조립
//!
//! 두 계산 컴포넌트는 같은 원본 시계열에 대한 순수 함수이며, 어떤 입력에 대해서도
//! 에러를 외부로 전파하지 않습니다. 실패는 로그로 남기고 기본값으로 대체됩니다.

pub mod indicators;
pub mod performance;
pub mod report;

pub use indicators::{IndicatorEngine, IndicatorError, IndicatorParams, IndicatorResult};
pub use performance::{MetricsCalculator, MetricsError, MetricsParams};
pub use report::{ReportBuilder, StockReport};
