//! # haircheck-session
//!
//! 세션 파이프라인.
//! 현재 규정/마지막 판정/이력을 담는 세션 상태를 관리하고,
//! 비전 전처리와 판정 제공자를 하나의 분석 흐름으로 묶으며
//! 판정/이력의 JSON 내보내기를 제공한다.

pub mod analyzer;
pub mod export;
pub mod history;
pub mod state;
