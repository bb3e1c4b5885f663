//! 업로드 전 이미지 전처리.
//!
//! 모바일 네트워크 대역폭과 서비스 측 페이로드 상한을 고려해
//! 축소 + 재인코딩한다. 원본은 절대 변경하지 않는다 (복제본 위에서만 변환).
//!
//! - PNG 입력 → PNG 유지 (무손실, 최대 압축)
//! - 그 외 전부 → RGB 정규화 후 JPEG (설정 품질)

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, GenericImageView};
use tracing::{debug, warn};

use haircheck_core::config::VisionConfig;
use haircheck_core::error::CoreError;
use haircheck_core::models::payload::{ImageMime, ImagePayload};

/// 캡처 바이트 디코딩
///
/// 디코딩 불가 입력은 `InvalidImage`로 즉시 실패한다 — 빈 페이로드를
/// 조용히 만들어 원격 호출까지 가는 일은 없어야 한다.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::InvalidImage("빈 캡처 데이터".to_string()));
    }
    image::load_from_memory(bytes).map_err(|e| CoreError::InvalidImage(e.to_string()))
}

/// 긴 변이 `max_side` 이하가 되도록 축소 (확대는 하지 않음, 종횡비 유지)
fn shrink_to_bound(image: &DynamicImage, max_side: u32) -> DynamicImage {
    let (w, h) = image.dimensions();
    if w.max(h) <= max_side {
        return image.clone();
    }
    image.thumbnail(max_side, max_side)
}

/// 축소 + 재인코딩
///
/// 출력은 긴 변 ≤ `max_side`를 보장한다. 절대 바이트 크기는 보장하지 않으므로
/// 호출자가 전송 상한을 재확인해야 한다 ([`prepare_payload`] 참조).
pub fn compress(
    image: &DynamicImage,
    mime: ImageMime,
    max_side: u32,
    jpeg_quality: u8,
) -> Result<Vec<u8>, CoreError> {
    let resized = shrink_to_bound(image, max_side);
    let (w, h) = resized.dimensions();

    let mut buf: Vec<u8> = Vec::new();
    match mime {
        ImageMime::Png => {
            let encoder = PngEncoder::new_with_quality(
                &mut buf,
                CompressionType::Best,
                FilterType::Adaptive,
            );
            resized
                .write_with_encoder(encoder)
                .map_err(|e| CoreError::Internal(format!("PNG 인코딩 실패: {e}")))?;
        }
        ImageMime::Jpeg => {
            // JPEG는 알파 미지원 → RGB 정규화
            let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality);
            rgb.write_with_encoder(encoder)
                .map_err(|e| CoreError::Internal(format!("JPEG 인코딩 실패: {e}")))?;
        }
    }

    debug!(
        "이미지 전처리: {}x{} → {}x{}, {} bytes ({})",
        image.width(),
        image.height(),
        w,
        h,
        buf.len(),
        mime.as_str()
    );

    Ok(buf)
}

/// 전송용 페이로드 준비
///
/// 1차 인코딩이 `max_payload_bytes`를 초과하면 `retry_max_side`로
/// 한 번 더 축소 인코딩한다. 재인코딩 결과는 크기와 무관하게 전송한다.
pub fn prepare_payload(
    image: &DynamicImage,
    declared_mime: &str,
    config: &VisionConfig,
) -> Result<ImagePayload, CoreError> {
    let mime = ImageMime::from_declared(declared_mime);
    let data = compress(image, mime, config.max_side, config.jpeg_quality)?;

    if data.len() <= config.max_payload_bytes {
        return Ok(ImagePayload { data, mime });
    }

    warn!(
        "페이로드 상한 초과 ({} > {} bytes), {}px로 재인코딩",
        data.len(),
        config.max_payload_bytes,
        config.retry_max_side
    );
    let data = compress(image, mime, config.retry_max_side, config.jpeg_quality)?;
    Ok(ImagePayload { data, mime })
}
