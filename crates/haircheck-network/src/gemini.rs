//! Gemini 판정 클라이언트.
//!
//! 규정 텍스트 + 스키마 힌트 + 인라인 이미지로 `generateContent`를 호출하고
//! 자유 텍스트 응답에서 JSON 판정 객체를 추출한다.
//!
//! 재시도 상태 기계 (503 과부하만 재시도 대상):
//!
//! ```text
//! Attempting --(503, 시도 남음)--> Backoff --> Attempting
//! Attempting --(기타 에러 | 503 소진)--> ExhaustedFailure --> 폴백 Verdict
//! Attempting --(성공, 파싱 OK)--> Success --> Verdict
//! Attempting --(성공, 파싱 실패)--> RecoveredFailure --> 폴백 Verdict
//! ```
//!
//! `evaluate`는 어떤 경로에서도 Verdict를 반환한다 — 표시 레이어가
//! 예외를 처리할 일이 없다는 것이 이 시스템의 최상위 불변식이다.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as B64, Engine};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

use haircheck_core::config::GeminiConfig;
use haircheck_core::error::CoreError;
use haircheck_core::models::payload::ImageMime;
use haircheck_core::models::rule_set::RuleSet;
use haircheck_core::models::verdict::Verdict;
use haircheck_core::ports::verdict_provider::VerdictProvider;

use crate::credentials;

/// Gemini API 기본 엔드포인트
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// 스키마 힌트 — 모델에 요구하는 정확한 최상위 키 구조 (태국어, 원 서비스 프롬프트)
const SCHEMA_HINT: &str = r#"จงตอบเป็น JSON เท่านั้น ตามสคีมา:
{
  "verdict": "compliant | non_compliant | unsure",
  "reasons": ["string"],
  "violations": [{"code":"STRING","message":"STRING"}],
  "confidence": 0.0,
  "meta": {"rule_set_id":"default-v1","timestamp":"AUTO"}
}
"#;

// ============================================================
// GeminiVerdictProvider — Gemini generateContent 클라이언트
// ============================================================

/// Gemini 판정 클라이언트 — `VerdictProvider` 포트 구현
///
/// 연결 풀링 없음: 클라이언트 인스턴스 1개 = reqwest 클라이언트 1개.
/// 세션당 동시 분석 1건 모델이므로 그 이상이 필요하지 않다.
#[derive(Debug)]
pub struct GeminiVerdictProvider {
    /// HTTP 클라이언트
    http_client: reqwest::Client,
    /// API 베이스 URL (테스트에서 mock 서버로 교체)
    base_url: String,
    /// API 키 (메모리에만 유지)
    api_key: String,
    /// 모델 이름
    model: String,
    /// 총 시도 횟수 (503에만 적용)
    max_retries: u32,
    /// 선형 백오프 기본 간격 — attempt 1 후 1배, attempt 2 후 2배 …
    backoff_base: Duration,
}

impl GeminiVerdictProvider {
    /// 새 클라이언트 생성 — 자격증명은 키체인 → 환경변수 순으로 해석
    pub fn new(config: &GeminiConfig) -> Result<Self, CoreError> {
        let api_key = credentials::resolve_api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// API 키를 직접 지정해 생성 (설정 화면 직접 입력 경로 및 테스트용)
    pub fn with_api_key(
        config: &GeminiConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CoreError::Config("Gemini API 키가 비어 있습니다".into()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        debug!(
            model = %config.model,
            timeout = config.timeout_secs,
            max_retries = config.max_retries,
            "GeminiVerdictProvider 초기화"
        );

        Ok(Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model: config.model.clone(),
            max_retries: config.max_retries.max(1),
            backoff_base: Duration::from_secs(2),
        })
    }

    /// 베이스 URL 교체 (테스트용 mock 서버)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// 백오프 기본 간격 조정 (테스트에서 대기 단축용)
    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.backoff_base = backoff_base;
        self
    }

    /// 프롬프트 조립 — 규정 텍스트에 대해 결정적
    ///
    /// 시스템 역할(두발 검사원, JSON만 응답) + 규정 원문 + 스키마 힌트 +
    /// "불분명하면 unsure" 지시로 구성된다.
    fn build_prompt(rules: &RuleSet) -> String {
        format!(
            r#"SYSTEM:
คุณเป็นผู้ช่วยตรวจทรงผมนักเรียน ให้ตอบเป็น JSON เท่านั้น

USER (ไทย):
ตรวจรูปนี้ตามกฎ:
{rules}

{schema}
เงื่อนไข:
- ถ้ารูปไม่ชัด/ไม่เห็นทรงผมพอ ให้ verdict="unsure" และบอกเหตุผล
- เหตุผลควรกระชับ เข้าใจง่าย
- meta.rule_set_id = "{rule_set_id}"
"#,
            rules = rules.text,
            schema = SCHEMA_HINT,
            rule_set_id = rules.id,
        )
    }

    /// 단일 `generateContent` 호출 — 모델의 원시 텍스트 응답 반환
    async fn request_once(
        &self,
        prompt: &str,
        image: &[u8],
        mime: ImageMime,
    ) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request_body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": prompt },
                    { "inline_data": { "mime_type": mime.as_str(), "data": B64.encode(image) } }
                ]
            }]
        });

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("Gemini API 호출 실패: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Network(format!("Gemini API 응답 읽기 실패: {}", e)))?;

        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(CoreError::ServiceUnavailable(
                body.chars().take(200).collect(),
            ));
        }
        if !status.is_success() {
            warn!(status = %status, "Gemini API 오류 응답");
            return Err(CoreError::Network(format!(
                "Gemini API 오류 ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        Self::extract_text(&body)
    }

    /// 응답 본문에서 candidates[0].content.parts[*].text를 이어붙여 반환
    fn extract_text(body: &str) -> Result<String, CoreError> {
        let response: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| CoreError::malformed_response(format!("응답 JSON 파싱 실패: {e}"), body))?;

        let parts = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|cand| cand.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| {
                CoreError::malformed_response("응답에서 텍스트를 찾을 수 없음", body)
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            return Err(CoreError::malformed_response(
                "응답 텍스트가 비어 있음",
                body,
            ));
        }

        Ok(text)
    }

    /// 자유 텍스트에서 JSON 객체 1개 추출 — 첫 `{`부터 마지막 `}`까지
    ///
    /// 모델이 지시를 어기고 앞뒤에 산문을 붙여도 견딘다.
    /// 알려진 한계: 독립된 JSON 객체가 여러 개이거나, 문자열 값 안의 `}` 때문에
    /// 마지막 `}`가 실제 닫는 괄호보다 뒤에 오는 경우는 다루지 못한다.
    /// 원 서비스도 같은 휴리스틱을 쓰며 의도적으로 강화하지 않는다.
    fn extract_json_object(text: &str) -> Result<&str, CoreError> {
        let start = text
            .find('{')
            .ok_or_else(|| CoreError::malformed_response("JSON 객체 없음", text))?;
        let end = text
            .rfind('}')
            .ok_or_else(|| CoreError::malformed_response("JSON 객체 없음", text))?;
        if end < start {
            return Err(CoreError::malformed_response("JSON 객체 없음", text));
        }
        Ok(&text[start..=end])
    }

    /// 원시 텍스트 → Verdict 파싱 (누락 키 기본값, meta.rule_set_id 보강)
    fn parse_verdict(text: &str, rules: &RuleSet) -> Result<Verdict, CoreError> {
        let json_str = Self::extract_json_object(text)?;
        let mut verdict: Verdict = serde_json::from_str(json_str)
            .map_err(|e| CoreError::malformed_response(format!("Verdict 파싱 실패: {e}"), json_str))?;
        verdict.ensure_rule_set_id(&rules.id);
        Ok(verdict)
    }

    /// 재시도가 포함된 요청 실행
    ///
    /// 선형 백오프: `backoff_base * attempt_index` (503 과부하만 재시도).
    /// 다른 에러, 또는 시도 소진 시 마지막 에러를 그대로 반환한다.
    async fn execute_with_retry<F, Fut, T>(&self, operation: F) -> Result<T, CoreError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut attempt = 1u32;
        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    if !e.is_retryable() || attempt >= self.max_retries {
                        return Err(e);
                    }

                    let delay = self.backoff_base * attempt;
                    warn!(
                        "Gemini 과부하 (시도 {}/{}): {e}, {delay:?} 후 재시도",
                        attempt, self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

#[async_trait]
impl VerdictProvider for GeminiVerdictProvider {
    async fn evaluate(&self, image: &[u8], mime: ImageMime, rules: &RuleSet) -> Verdict {
        let prompt = Self::build_prompt(rules);

        debug!(
            model = %self.model,
            image_size = image.len(),
            mime = mime.as_str(),
            "Gemini 판정 호출"
        );

        let raw_text = self
            .execute_with_retry(|| async { self.request_once(&prompt, image, mime).await })
            .await;

        match raw_text {
            Ok(text) => match Self::parse_verdict(&text, rules) {
                Ok(verdict) => {
                    debug!(
                        verdict = verdict.verdict.as_str(),
                        confidence = verdict.confidence,
                        "판정 수신"
                    );
                    verdict
                }
                Err(e) => {
                    warn!("응답 파싱 실패 → 폴백 판정: {e}");
                    Verdict::fallback(format!("เกิดข้อผิดพลาดระหว่างเรียกโมเดล: {e}"))
                }
            },
            Err(e) => {
                warn!("전송 실패 → 폴백 판정: {e}");
                Verdict::fallback(format!("เกิดข้อผิดพลาดระหว่างเรียกโมเดล: {e}"))
            }
        }
    }

    fn provider_name(&self) -> &str {
        &self.model
    }
}

// ============================================================
// 테스트
// ============================================================
