//! # haircheck-vision
//!
//! Edge 이미지 전처리 크레이트.
//! 카메라 캡처 디코딩, 긴 변 기준 축소, PNG/JPEG 재인코딩,
//! 전송 상한 초과 시 재축소 등 업로드 전 파이프라인을 담당한다.

pub mod preprocess;
