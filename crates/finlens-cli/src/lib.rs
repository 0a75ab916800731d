//! finlens CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - CSV 시세 파일 분석 (`analyze`, `metrics` 명령)
//! - 설정 로드 (파일 + 환경 변수)
//! - HTTP 감성 분석 협력자

pub mod commands;
pub mod config;
pub mod sentiment;

pub use config::AppConfig;
