//! # Finlens Core
//!
//! 시세 분석 파이프라인의 핵심 도메인 모델 및 공통 유틸리티를 제공합니다.
//!
//! 이 크레이트는 분석 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLCV 시계열 (`PricePoint`) 및 CSV 로더
//! - 지표가 추가된 시계열 (`EnrichedPoint`, `EnrichedSeries`)
//! - 위험/수익 지표 (`MetricsResult`)
//! - 감성 분석 협력자 trait 및 결과 타입
//! - 기업 정보 정규화
//! - JSON 안전 수치 유틸리티 (결측 채움, 비유한값 제거)
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;
pub mod numeric;

pub use domain::*;
pub use error::*;
pub use logging::*;
pub use numeric::*;
