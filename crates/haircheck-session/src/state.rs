//! 세션 상태.
//!
//! 현재 규정 텍스트, 마지막 판정, 이력을 담는 명시적 상태 객체.
//! 전역 가변 상태 대신 두 핵심 연산(전처리/판정)에 참조로 전달된다.
//! 단일 사용자 상호작용 스레드만 접근하므로 별도 락이 필요 없다.

use haircheck_core::config::SessionConfig;
use haircheck_core::models::rule_set::RuleSet;
use haircheck_core::models::verdict::Verdict;

use crate::history::VerdictHistory;

/// 세션 스코프 가변 상태
pub struct SessionState {
    /// 현재 규정 (설정 패널에서 수정 가능)
    rules: RuleSet,
    /// 마지막 판정 — 다음 분석에서 통째로 교체
    last_verdict: Option<Verdict>,
    /// 메모리 이력 (최대 개수 제한)
    history: VerdictHistory,
}

impl SessionState {
    /// 새 세션 상태 생성 (기본 규정, 빈 이력)
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            rules: RuleSet::default(),
            last_verdict: None,
            history: VerdictHistory::new(config.history_capacity),
        }
    }

    /// 현재 규정
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// 규정 텍스트 교체 — 빈 텍스트는 기본 규정 복원
    pub fn set_rules(&mut self, text: impl Into<String>) {
        self.rules = RuleSet::new(text);
    }

    /// 마지막 판정
    pub fn last_verdict(&self) -> Option<&Verdict> {
        self.last_verdict.as_ref()
    }

    /// 판정 기록 — 마지막 판정 교체 + 이력 추가
    pub fn record(&mut self, verdict: Verdict) {
        self.history.add(verdict.clone());
        self.last_verdict = Some(verdict);
    }

    /// 결과 초기화 ("다시 촬영" 동작) — 이력은 유지
    pub fn reset(&mut self) {
        self.last_verdict = None;
    }

    /// 이력 접근
    pub fn history(&self) -> &VerdictHistory {
        &self.history
    }

    /// 이력 비우기
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haircheck_core::models::rule_set::DEFAULT_RULES;
    use haircheck_core::models::verdict::VerdictLabel;

    #[test]
    fn new_state_has_default_rules_and_no_verdict() {
        let state = SessionState::default();
        assert_eq!(state.rules().text, DEFAULT_RULES);
        assert!(state.last_verdict().is_none());
        assert!(state.history().is_empty());
    }

    #[test]
    fn set_rules_empty_restores_default() {
        let mut state = SessionState::default();
        state.set_rules("1) 파마 금지");
        assert_eq!(state.rules().text, "1) 파마 금지");

        state.set_rules("");
        assert_eq!(state.rules().text, DEFAULT_RULES);
    }

    #[test]
    fn record_replaces_last_and_appends_history() {
        let mut state = SessionState::default();

        let mut first = Verdict::fallback("1차");
        first.verdict = VerdictLabel::Compliant;
        state.record(first);

        let second = Verdict::fallback("2차");
        state.record(second);

        // 마지막 판정은 통째로 교체, 이력은 누적
        assert_eq!(
            state.last_verdict().unwrap().reasons,
            vec!["2차".to_string()]
        );
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn reset_clears_last_verdict_keeps_history() {
        let mut state = SessionState::default();
        state.record(Verdict::fallback("결과"));
        assert!(state.last_verdict().is_some());

        state.reset();
        assert!(state.last_verdict().is_none());
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn history_respects_configured_capacity() {
        let config = SessionConfig {
            auto_analyze: true,
            history_capacity: 3,
        };
        let mut state = SessionState::new(&config);
        for i in 0..5 {
            state.record(Verdict::fallback(format!("결과 {i}")));
        }
        assert_eq!(state.history().len(), 3);
    }
}
