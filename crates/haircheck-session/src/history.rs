//! 판정 이력 캐시.
//!
//! 세션 메모리에만 존재하는 이력 (프로세스 재시작 시 소멸).
//! 최대 개수 제한, FIFO 축출, 최신순 조회.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

use haircheck_core::models::verdict::{Verdict, VerdictLabel};

/// 이력 항목
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// 분석 시각
    pub timestamp: DateTime<Utc>,
    /// 판정 결과
    pub verdict: Verdict,
}

/// 판정 이력 캐시 (FIFO, 최대 크기 제한)
pub struct VerdictHistory {
    entries: VecDeque<HistoryEntry>,
    max_size: usize,
}

impl VerdictHistory {
    /// 새 이력 캐시 생성
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_size,
        }
    }

    /// 판정 이력에 추가
    pub fn add(&mut self, verdict: Verdict) {
        if self.entries.len() >= self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            timestamp: Utc::now(),
            verdict,
        });
    }

    /// 최근 이력 조회 (최신순)
    pub fn recent(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// 전체 이력 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어있는지
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 이력 비우기
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 통계: 판정 라벨별 개수
    pub fn stats(&self) -> HistoryStats {
        let mut compliant = 0u32;
        let mut non_compliant = 0u32;
        let mut unsure = 0u32;

        for entry in &self.entries {
            match entry.verdict.verdict {
                VerdictLabel::Compliant => compliant += 1,
                VerdictLabel::NonCompliant => non_compliant += 1,
                VerdictLabel::Unsure => unsure += 1,
            }
        }

        HistoryStats {
            total: self.entries.len() as u32,
            compliant,
            non_compliant,
            unsure,
        }
    }
}

/// 이력 통계
#[derive(Debug, Clone)]
pub struct HistoryStats {
    pub total: u32,
    pub compliant: u32,
    pub non_compliant: u32,
    pub unsure: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_verdict(label: VerdictLabel) -> Verdict {
        let mut verdict = Verdict::fallback("테스트");
        verdict.verdict = label;
        verdict
    }

    #[test]
    fn add_and_recent_most_recent_first() {
        let mut history = VerdictHistory::new(100);
        history.add(make_verdict(VerdictLabel::Compliant));
        history.add(make_verdict(VerdictLabel::NonCompliant));
        history.add(make_verdict(VerdictLabel::Unsure));

        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].verdict.verdict, VerdictLabel::Unsure);
        assert_eq!(recent[1].verdict.verdict, VerdictLabel::NonCompliant);
    }

    #[test]
    fn max_size_eviction() {
        let mut history = VerdictHistory::new(2);
        history.add(make_verdict(VerdictLabel::Compliant));
        history.add(make_verdict(VerdictLabel::NonCompliant));
        history.add(make_verdict(VerdictLabel::Unsure));

        assert_eq!(history.len(), 2);
        let recent = history.recent(10);
        // 가장 오래된 Compliant가 축출됨
        assert_eq!(recent[0].verdict.verdict, VerdictLabel::Unsure);
        assert_eq!(recent[1].verdict.verdict, VerdictLabel::NonCompliant);
    }

    #[test]
    fn stats() {
        let mut history = VerdictHistory::new(100);
        history.add(make_verdict(VerdictLabel::Compliant));
        history.add(make_verdict(VerdictLabel::Compliant));
        history.add(make_verdict(VerdictLabel::Unsure));

        let stats = history.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.compliant, 2);
        assert_eq!(stats.non_compliant, 0);
        assert_eq!(stats.unsure, 1);
    }

    #[test]
    fn clear() {
        let mut history = VerdictHistory::new(100);
        history.add(make_verdict(VerdictLabel::Compliant));
        assert!(!history.is_empty());
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }
}
