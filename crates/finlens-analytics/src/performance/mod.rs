//! 성과 분석 모듈
//!
//! 종가 시계열의 위험/수익 요약 지표를 계산합니다.
//!
//! # 모듈 구성
//!
//! - [`metrics`]: 수익률, 변동성, 최대 낙폭, 샤프 비율

pub mod metrics;

pub use metrics::*;
