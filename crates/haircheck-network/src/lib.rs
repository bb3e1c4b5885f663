//! # haircheck-network
//!
//! Gemini `generateContent` 네트워크 어댑터.
//! 자격증명 해석(키체인 → 환경변수), 인라인 이미지 전송,
//! 503 과부하 한정 선형 백오프 재시도, 자유 텍스트 응답에서의
//! JSON 판정 추출을 담당한다.

pub mod credentials;
pub mod gemini;
