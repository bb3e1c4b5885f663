//! 두발 규정 텍스트.
//!
//! 모델에 그라운딩 컨텍스트로 전달되는 불투명 텍스트.
//! 설정 패널에서 수정 가능하며 세션 동안만 유지된다.

use serde::{Deserialize, Serialize};

/// 기본 규정 식별자 — 규정 텍스트가 버전 관리되기 전까지 고정
pub const DEFAULT_RULE_SET_ID: &str = "default-v1";

/// 기본 규정 (남학생, 태국어 — 원 서비스 배포 대상 학교 규정)
pub const DEFAULT_RULES: &str = "\
กฎระเบียบทรงผม (ชาย)
1) รองทรงสูง ด้านข้าง/ด้านหลังสั้น
2) ด้านบนยาวไม่เกิน 5 ซม.
3) ห้ามย้อม/ดัด/ไว้หนวดเครา
";

/// 두발 규정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// 규정 식별자 (meta.rule_set_id로 전달)
    pub id: String,
    /// 규정 본문 — 내부 구조 없는 불투명 텍스트
    pub text: String,
}

impl RuleSet {
    /// 텍스트로 규정 생성 — 빈 텍스트는 기본 규정으로 대체
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::default()
        } else {
            Self {
                id: DEFAULT_RULE_SET_ID.to_string(),
                text,
            }
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            id: DEFAULT_RULE_SET_ID.to_string(),
            text: DEFAULT_RULES.to_string(),
        }
    }
}
