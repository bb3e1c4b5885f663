//! 이미지 페이로드 모델.
//!
//! 카메라 콜라보레이터가 준 원본을 전처리한 뒤 전송 직전 형태.
//! 분석 1회 동안만 존재하는 일시 객체.

use serde::{Deserialize, Serialize};

/// 전송 허용 콘텐츠 타입
///
/// 원 서비스는 `image/png`, `image/jpeg` 외 선언 타입을 전부 JPEG로 취급한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMime {
    /// PNG — 무손실 유지
    Png,
    /// JPEG — 기본값 (기타 타입 강제 변환 대상)
    Jpeg,
}

impl ImageMime {
    /// 선언된 MIME 문자열에서 변환 — 미지원 타입은 Jpeg로 강제
    pub fn from_declared(declared: &str) -> Self {
        match declared {
            "image/png" => Self::Png,
            _ => Self::Jpeg,
        }
    }

    /// MIME 문자열 반환
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// 전처리 완료된 이미지 페이로드
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// 인코딩된 이미지 바이트
    pub data: Vec<u8>,
    /// 콘텐츠 타입
    pub mime: ImageMime,
}

impl ImagePayload {
    /// 인코딩 후 바이트 크기
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }
}
