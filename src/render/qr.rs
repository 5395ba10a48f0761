//! QR code rasterization.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};

use super::vcard::ContactPayload;
use super::RenderError;
use crate::config::StickerConfig;

/// Encodes `payload` as a QR code and renders it as a square grayscale image
/// of `config.qr_size_px()` pixels.
///
/// The symbol uses error-correction level M and the smallest version that
/// fits the payload. Modules are drawn at `config.qr_module_px` with a quiet
/// zone of `config.qr_quiet_zone` modules, then the whole image is resized
/// with nearest-neighbour sampling so modules stay crisp.
///
/// # Errors
/// Returns [`RenderError::QrEncoding`] when the payload does not fit in the
/// largest QR version at level M.
pub fn generate_qr(
    payload: &ContactPayload,
    config: &StickerConfig,
) -> Result<GrayImage, RenderError> {
    let code = QrCode::with_error_correction_level(payload.as_str(), EcLevel::M).map_err(
        |source| RenderError::QrEncoding {
            payload_len: payload.len(),
            source,
        },
    )?;

    let symbol = render_modules(&code, config.qr_module_px.max(1), config.qr_quiet_zone);
    let size = config.qr_size_px().max(1);
    Ok(imageops::resize(&symbol, size, size, FilterType::Nearest))
}

/// Draws the QR modules at `module_px` pixels each, surrounded by
/// `quiet_zone` light modules.
fn render_modules(code: &QrCode, module_px: u32, quiet_zone: u32) -> GrayImage {
    let modules = code.width() as u32;
    let side = (modules + 2 * quiet_zone) * module_px;
    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

    for (i, color) in code.to_colors().iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let mx = (i as u32) % modules + quiet_zone;
        let my = (i as u32) / modules + quiet_zone;
        for dy in 0..module_px {
            for dx in 0..module_px {
                img.put_pixel(mx * module_px + dx, my * module_px + dy, Luma([0u8]));
            }
        }
    }

    img
}
