//! 분석 시스템의 공통 에러 타입.
//!
//! 지표/성과 계산 자체는 에러를 외부로 전파하지 않습니다.
//! 이 모듈의 에러는 입력 로딩과 로깅 초기화 등 파이프라인 바깥 경계에서만 사용됩니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 입력 데이터에 필수 컬럼이 없음
    #[error("필수 컬럼이 없습니다: {0}")]
    MissingColumn(String),

    /// 타임스탬프 파싱 실패
    #[error("잘못된 타임스탬프 (line {line}): {value}")]
    InvalidTimestamp { line: usize, value: String },

    /// 비어 있는 입력
    #[error("입력이 비어 있습니다")]
    EmptyInput,

    /// 로깅 초기화 에러
    #[error("로깅 초기화 에러: {0}")]
    Logging(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type CoreResult<T> = Result<T, CoreError>;
