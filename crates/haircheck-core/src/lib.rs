//! # haircheck-core
//!
//! HAIRCHECK 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] — 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`] — Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] — 핵심 에러 타입 (thiserror)
//! - [`config`] — 애플리케이션 설정 구조체
//! - [`config_manager`] — 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::verdict::{Verdict, VerdictLabel, Violation};

    #[test]
    fn verdict_full_serde_roundtrip() {
        let verdict = Verdict {
            verdict: VerdictLabel::NonCompliant,
            reasons: vec!["ด้านบนยาวเกิน 5 ซม.".to_string()],
            violations: vec![Violation {
                code: "TOP_TOO_LONG".to_string(),
                message: "ผมด้านบนยาวเกินกำหนด".to_string(),
            }],
            confidence: 0.87,
            meta: serde_json::Map::new(),
        };

        let json = serde_json::to_string(&verdict).unwrap();
        let deserialized: Verdict = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.verdict, VerdictLabel::NonCompliant);
        assert_eq!(deserialized.violations[0].code, "TOP_TOO_LONG");
        assert!(deserialized.confidence > 0.8);
    }

    #[test]
    fn verdict_label_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&VerdictLabel::NonCompliant).unwrap(),
            r#""non_compliant""#
        );
        assert_eq!(
            serde_json::to_string(&VerdictLabel::Unsure).unwrap(),
            r#""unsure""#
        );
    }
}
