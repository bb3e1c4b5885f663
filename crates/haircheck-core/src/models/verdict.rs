//! 판정 결과 모델.
//!
//! 모델 응답은 신뢰할 수 없는 자유 텍스트에서 추출한 JSON이므로
//! 모든 필드에 명시적 기본값 규칙을 둔다. 누락 키는 기본값으로 채워지고
//! 인식 불가 verdict 문자열은 역직렬화 단계에서 `Unsure`로 정규화된다.

use serde::{Deserialize, Serialize};

use crate::models::rule_set::DEFAULT_RULE_SET_ID;

/// 판정 라벨
///
/// `#[serde(other)]`로 스키마 밖 문자열("maybe" 등)을 전부 `Unsure`로 받는다.
/// 렌더러가 예외 처리할 필요 없이 3개 값만 다루면 되도록 하는 필수 검증 단계.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictLabel {
    /// 규정 통과
    Compliant,
    /// 규정 위반
    NonCompliant,
    /// 판단 불가 (기본값 — 인식 불가 문자열 포함)
    #[default]
    #[serde(other)]
    Unsure,
}

impl VerdictLabel {
    /// 직렬화 문자열 반환
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compliant => "compliant",
            Self::NonCompliant => "non_compliant",
            Self::Unsure => "unsure",
        }
    }

    /// 결과 카드 배지 라벨 (태국어 — 원 서비스 UI 언어)
    pub fn badge_label(&self) -> &'static str {
        match self {
            Self::Compliant => "ผ่านระเบียบ",
            Self::NonCompliant => "ไม่ผ่านระเบียบ",
            Self::Unsure => "ไม่แน่ใจ",
        }
    }
}

/// 규정 위반 항목
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Violation {
    /// 위반 코드 (예: "TOP_TOO_LONG")
    #[serde(default)]
    pub code: String,
    /// 사용자용 위반 설명
    #[serde(default)]
    pub message: String,
}

/// 한 장의 사진에 대한 구조화된 판정 결과
///
/// 분석 1회당 하나 생성되며 다음 분석에서 통째로 교체된다.
/// 프로세스 재시작 간 영속화하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// 판정 라벨
    #[serde(default)]
    pub verdict: VerdictLabel,
    /// 판정 근거 목록 (순서 유지, 비어 있을 수 있음)
    #[serde(default)]
    pub reasons: Vec<String>,
    /// 위반 항목 목록 (순서 유지, 비어 있을 수 있음)
    #[serde(default)]
    pub violations: Vec<Violation>,
    /// 모델 신뢰도 — 원 서비스와 동일하게 범위 검증 없이 그대로 통과시킨다
    #[serde(default)]
    pub confidence: f64,
    /// 자유 형식 메타데이터 (최소 `rule_set_id` 포함)
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

impl Verdict {
    /// 폴백 판정 — 파이프라인이 신뢰할 만한 결과를 못 만들 때의 표준 종착지
    ///
    /// `evaluate`는 어떤 실패에서도 이 값을 반환하며 절대 에러를 던지지 않는다.
    pub fn fallback(reason: impl Into<String>) -> Self {
        let mut meta = serde_json::Map::new();
        meta.insert(
            "rule_set_id".to_string(),
            serde_json::Value::String(DEFAULT_RULE_SET_ID.to_string()),
        );

        Self {
            verdict: VerdictLabel::Unsure,
            reasons: vec![reason.into()],
            violations: Vec::new(),
            confidence: 0.0,
            meta,
        }
    }

    /// `meta.rule_set_id`가 비어 있으면 채운다 (모델이 meta를 생략하는 경우 대비)
    pub fn ensure_rule_set_id(&mut self, rule_set_id: &str) {
        self.meta
            .entry("rule_set_id".to_string())
            .or_insert_with(|| serde_json::Value::String(rule_set_id.to_string()));
    }

    /// 표시용 신뢰도 % — 표시 경계에서만 [0, 100]으로 클램프
    pub fn confidence_percent(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::fallback("결과 없음")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serde_roundtrip() {
        let json = r#"{
            "verdict": "compliant",
            "reasons": ["ผมสั้นเรียบร้อย"],
            "violations": [],
            "confidence": 0.92,
            "meta": {"rule_set_id": "default-v1"}
        }"#;
        let verdict: Verdict = serde_json::from_str(json).unwrap();
        assert_eq!(verdict.verdict, VerdictLabel::Compliant);
        assert_eq!(verdict.reasons.len(), 1);
        assert!(verdict.violations.is_empty());
        assert!((verdict.confidence - 0.92).abs() < f64::EPSILON);
        assert_eq!(
            verdict.meta.get("rule_set_id").unwrap().as_str().unwrap(),
            "default-v1"
        );
    }

    #[test]
    fn unknown_verdict_string_normalizes_to_unsure() {
        let verdict: Verdict = serde_json::from_str(r#"{"verdict": "maybe"}"#).unwrap();
        assert_eq!(verdict.verdict, VerdictLabel::Unsure);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let verdict: Verdict = serde_json::from_str("{}").unwrap();
        assert_eq!(verdict.verdict, VerdictLabel::Unsure);
        assert!(verdict.reasons.is_empty());
        assert!(verdict.violations.is_empty());
        assert_eq!(verdict.confidence, 0.0);
        assert!(verdict.meta.is_empty());
    }

    #[test]
    fn partial_violation_objects_accepted() {
        let verdict: Verdict =
            serde_json::from_str(r#"{"violations": [{"code": "TOP_TOO_LONG"}]}"#).unwrap();
        assert_eq!(verdict.violations.len(), 1);
        assert_eq!(verdict.violations[0].code, "TOP_TOO_LONG");
        assert!(verdict.violations[0].message.is_empty());
    }

    #[test]
    fn fallback_shape() {
        let verdict = Verdict::fallback("모델 호출 중 오류");
        assert_eq!(verdict.verdict, VerdictLabel::Unsure);
        assert_eq!(verdict.reasons, vec!["모델 호출 중 오류".to_string()]);
        assert!(verdict.violations.is_empty());
        assert_eq!(verdict.confidence, 0.0);
        assert_eq!(
            verdict.meta.get("rule_set_id").unwrap().as_str().unwrap(),
            "default-v1"
        );
    }

    #[test]
    fn ensure_rule_set_id_fills_missing_only() {
        let mut verdict: Verdict = serde_json::from_str(r#"{"verdict": "compliant"}"#).unwrap();
        verdict.ensure_rule_set_id("default-v1");
        assert_eq!(
            verdict.meta.get("rule_set_id").unwrap().as_str().unwrap(),
            "default-v1"
        );

        // 이미 있는 값은 유지
        verdict.ensure_rule_set_id("other-v2");
        assert_eq!(
            verdict.meta.get("rule_set_id").unwrap().as_str().unwrap(),
            "default-v1"
        );
    }

    #[test]
    fn confidence_percent_clamps_out_of_range() {
        let mut verdict = Verdict::fallback("x");
        verdict.confidence = 1.7;
        assert_eq!(verdict.confidence_percent(), 100);
        verdict.confidence = -0.3;
        assert_eq!(verdict.confidence_percent(), 0);
        verdict.confidence = 0.92;
        assert_eq!(verdict.confidence_percent(), 92);
    }

    #[test]
    fn badge_labels() {
        assert_eq!(VerdictLabel::Compliant.badge_label(), "ผ่านระเบียบ");
        assert_eq!(VerdictLabel::NonCompliant.badge_label(), "ไม่ผ่านระเบียบ");
        assert_eq!(VerdictLabel::Unsure.badge_label(), "ไม่แน่ใจ");
    }
}
