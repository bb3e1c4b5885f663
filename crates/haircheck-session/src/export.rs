//! 판정/이력 JSON 내보내기.
//!
//! 다운로드용 들여쓰기 JSON 직렬화. 기존 구조의 순수 직렬화일 뿐
//! 추가 계약은 없다.

use haircheck_core::error::CoreError;
use haircheck_core::models::verdict::Verdict;

use crate::history::VerdictHistory;

/// 판정 1건을 들여쓰기 JSON으로 직렬화
pub fn verdict_json(verdict: &Verdict) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(verdict)?)
}

/// 이력 전체를 최신순 배열로 직렬화
pub fn history_json(history: &VerdictHistory) -> Result<String, CoreError> {
    let entries = history.recent(history.len());
    Ok(serde_json::to_string_pretty(&entries)?)
}
