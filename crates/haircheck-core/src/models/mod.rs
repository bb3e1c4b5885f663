//! HAIRCHECK 도메인 모델.
//!
//! 판정 파이프라인이 주고받는 핵심 데이터 구조체를 정의한다.
//! 외부 경계(모델 응답, 설정 파일, 내보내기)를 지나는 모델은
//! 전부 `serde` Serialize/Deserialize를 구현한다.

pub mod payload;
pub mod rule_set;
pub mod verdict;
