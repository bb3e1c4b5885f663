//! 애플리케이션 설정 구조체.
//!
//! 이미지 전처리 한계, Gemini 모델 선택, 세션 동작(자동 분석, 이력 크기) 등
//! 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 비전(이미지 전처리) 설정
    #[serde(default)]
    pub vision: VisionConfig,
    /// Gemini 모델 호출 설정
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// 세션 동작 설정
    #[serde(default)]
    pub session: SessionConfig,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            vision: VisionConfig::default(),
            gemini: GeminiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 비전 설정
// ============================================================

/// 이미지 전처리 설정
///
/// 원본 캡처를 모바일 네트워크로 보내기 전 축소/재인코딩하는 한계값.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// 긴 변 최대 픽셀 (UI 슬라이더 범위 640~2048)
    #[serde(default = "default_max_side")]
    pub max_side: u32,
    /// JPEG 인코딩 품질 % (UI 슬라이더 범위 50~95)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// 전송 상한 초과 시 재인코딩에 쓰는 축소 한계
    #[serde(default = "default_retry_max_side")]
    pub retry_max_side: u32,
    /// 인코딩 결과 전송 상한 (바이트) — 서비스 측 제한
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            max_side: default_max_side(),
            jpeg_quality: default_jpeg_quality(),
            retry_max_side: default_retry_max_side(),
            max_payload_bytes: default_max_payload_bytes(),
        }
    }
}

fn default_max_side() -> u32 {
    1024
}

fn default_jpeg_quality() -> u8 {
    85
}

fn default_retry_max_side() -> u32 {
    800
}

fn default_max_payload_bytes() -> usize {
    5 * 1024 * 1024
}

// ============================================================
// Gemini 설정
// ============================================================

/// Gemini `generateContent` 호출 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// 모델 이름 (예: "gemini-2.5-flash", "gemini-2.5-pro")
    #[serde(default = "default_model")]
    pub model: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
    /// 총 시도 횟수 (503 과부하에만 적용)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            timeout_secs: default_api_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

// ============================================================
// 세션 설정
// ============================================================

/// 세션 동작 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// 촬영 직후 자동 분석 여부
    #[serde(default = "default_true")]
    pub auto_analyze: bool,
    /// 메모리 이력 최대 개수
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_analyze: true,
            history_capacity: default_history_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_capacity() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_limits() {
        let config = AppConfig::default_config();
        assert_eq!(config.vision.max_side, 1024);
        assert_eq!(config.vision.jpeg_quality, 85);
        assert_eq!(config.vision.retry_max_side, 800);
        assert_eq!(config.vision.max_payload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.max_retries, 2);
        assert!(config.session.auto_analyze);
        assert_eq!(config.session.history_capacity, 100);
    }

    #[test]
    fn missing_fields_use_defaults() {
        // 부분 설정 파일도 로드 가능해야 한다
        let config: AppConfig =
            serde_json::from_str(r#"{"gemini": {"model": "gemini-2.5-pro"}}"#).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.gemini.timeout_secs, 30);
        assert_eq!(config.vision.max_side, 1024);
    }
}
