//! HAIRCHECK 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 자체 에러를 `CoreError` variant로 매핑한다.
//! 분석 파이프라인에서 사용자에게 그대로 노출 가능한 에러는
//! `Config`(자격증명 미설정)와 `InvalidImage`(디코딩 불가) 둘뿐이다.
//! 나머지는 전부 폴백 Verdict로 흡수된다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 설정, 이미지 디코딩, 원격 호출, 응답 파싱 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류 (API 키 미설정 포함)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 캡처 이미지 디코딩 불가 — 원격 호출 없이 즉시 중단
    #[error("이미지 디코딩 실패: {0}")]
    InvalidImage(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 서비스 일시 과부하 (503) — 유일하게 재시도 대상인 에러
    #[error("서비스 일시 불가: {0}")]
    ServiceUnavailable(String),

    /// 모델 응답에서 JSON 객체를 찾지 못했거나 파싱 실패
    #[error("응답 파싱 실패: {message} (raw: {excerpt})")]
    MalformedResponse {
        /// 실패 사유
        message: String,
        /// 원본 응답 발췌 (최대 200자)
        excerpt: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 원본 응답 텍스트를 발췌해 `MalformedResponse`를 만든다.
    pub fn malformed_response(message: impl Into<String>, raw: &str) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            excerpt: raw.chars().take(200).collect(),
        }
    }

    /// 재시도 가능한 에러인지 여부 — 503 과부하만 해당된다
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}
