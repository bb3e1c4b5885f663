//! Gemini API 자격증명 해석.
//!
//! 해석 우선순위: OS 키체인 → 프로세스 환경변수.
//! 한 번 해석에 성공하면 프로세스 수명 동안 캐시한다.
//! 미설정은 panic이 아니라 `CoreError::Config`로 사용자에게 알린다.

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use haircheck_core::error::CoreError;

/// 키체인 서비스 이름
const KEYRING_SERVICE: &str = "haircheck";

/// 자격증명 키 이름 (키체인 항목명 = 환경변수명)
pub const API_KEY_NAME: &str = "GEMINI_API_KEY";

/// 프로세스 전역 캐시 — 최초 해석 성공 후 재사용
static API_KEY_CACHE: OnceCell<String> = OnceCell::new();

/// API 키 해석 (캐시 적용)
pub fn resolve_api_key() -> Result<String, CoreError> {
    if let Some(key) = API_KEY_CACHE.get() {
        return Ok(key.clone());
    }

    let key = resolve_uncached()?;
    Ok(API_KEY_CACHE.get_or_init(|| key).clone())
}

/// 캐시 없이 키체인 → 환경변수 순으로 해석
fn resolve_uncached() -> Result<String, CoreError> {
    // 1. OS 키체인
    match keyring::Entry::new(KEYRING_SERVICE, API_KEY_NAME).and_then(|e| e.get_password()) {
        Ok(key) if !key.trim().is_empty() => {
            debug!("API 키 해석: 키체인");
            return Ok(key);
        }
        Ok(_) | Err(keyring::Error::NoEntry) => {}
        Err(e) => warn!("키체인 조회 실패 (환경변수로 폴백): {e}"),
    }

    // 2. 환경변수
    match std::env::var(API_KEY_NAME) {
        Ok(key) if !key.trim().is_empty() => {
            debug!("API 키 해석: 환경변수");
            Ok(key)
        }
        _ => Err(CoreError::Config(format!(
            "{API_KEY_NAME} 미설정. 키체인 또는 환경변수에 등록하세요."
        ))),
    }
}
