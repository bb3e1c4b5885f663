//! 판정 제공자 포트.
//!
//! 전처리된 이미지와 규정 텍스트를 받아 구조화된 판정을 돌려주는 인터페이스.
//! **반환 타입이 `Verdict`이지 `Result`가 아니라는 점이 계약의 핵심이다** —
//! 전송 실패, 응답 파싱 실패, 재시도 소진 등 어떤 경우에도 구현체가
//! 폴백 판정으로 흡수해야 하며, 표시 레이어는 예외를 다루지 않는다.

use async_trait::async_trait;

use crate::models::payload::ImageMime;
use crate::models::rule_set::RuleSet;
use crate::models::verdict::Verdict;

/// 판정 제공자 — 원격 멀티모달 모델 호출 어댑터가 구현
///
/// 구현체: `GeminiVerdictProvider` (haircheck-network)
#[async_trait]
pub trait VerdictProvider: Send + Sync {
    /// 이미지 1장 판정. 실패 시에도 폴백 Verdict를 반환한다 (절대 panic/Err 없음).
    async fn evaluate(&self, image: &[u8], mime: ImageMime, rules: &RuleSet) -> Verdict;

    /// 제공자 이름 (예: "gemini-2.5-flash")
    fn provider_name(&self) -> &str;
}
