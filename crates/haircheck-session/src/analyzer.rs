//! 분석 오케스트레이터.
//!
//! 캡처 1장에 대한 단일 흐름: 디코딩 → 전처리 → 원격 판정 → 세션 기록.
//! 사용자 액션당 분석 1건이며 같은 세션에서 동시 분석은 발생하지 않는다
//! (`&mut SessionState`가 이를 타입 수준에서 강제한다).
//!
//! 에러 전파 정책: `InvalidImage`와 `Config`만 밖으로 나가고,
//! 전송 승인 이후의 모든 실패는 제공자가 폴백 Verdict로 흡수한다.

use image::DynamicImage;
use std::sync::Arc;
use tracing::debug;

use haircheck_core::config::VisionConfig;
use haircheck_core::error::CoreError;
use haircheck_core::models::verdict::Verdict;
use haircheck_core::ports::verdict_provider::VerdictProvider;
use haircheck_vision::preprocess;

use crate::state::SessionState;

/// 분석 오케스트레이터 — 비전 전처리와 판정 제공자를 묶는다
pub struct Analyzer {
    provider: Arc<dyn VerdictProvider>,
    vision: VisionConfig,
}

impl Analyzer {
    /// 새 분석기 생성
    pub fn new(provider: Arc<dyn VerdictProvider>, vision: VisionConfig) -> Self {
        Self { provider, vision }
    }

    /// 원시 캡처 바이트 분석
    ///
    /// 디코딩 불가 입력은 `InvalidImage`로 즉시 중단하며 원격 호출이 없다.
    pub async fn analyze_capture(
        &self,
        state: &mut SessionState,
        raw: &[u8],
        declared_mime: &str,
    ) -> Result<Verdict, CoreError> {
        let image = preprocess::decode(raw)?;
        self.analyze_image(state, &image, declared_mime).await
    }

    /// 디코딩된 이미지 분석
    pub async fn analyze_image(
        &self,
        state: &mut SessionState,
        image: &DynamicImage,
        declared_mime: &str,
    ) -> Result<Verdict, CoreError> {
        let payload = preprocess::prepare_payload(image, declared_mime, &self.vision)?;

        debug!(
            provider = self.provider.provider_name(),
            payload_bytes = payload.byte_size(),
            mime = payload.mime.as_str(),
            "판정 요청"
        );

        let verdict = self
            .provider
            .evaluate(&payload.data, payload.mime, state.rules())
            .await;

        state.record(verdict.clone());
        Ok(verdict)
    }
}
