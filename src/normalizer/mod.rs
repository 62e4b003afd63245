//! 画像正規化モジュール
//!
//! 認識サービスへ送る前に画像を縮小・再エンコードする。
//! - 800x800 に収まるよう縦横比を保って縮小（拡大はしない）
//! - JPEG（品質80）で再エンコード
//!
//! Base64 / Data URL 形式の入力もここでバイト列に戻す。

use crate::error::{PlantIdError, Result};
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// 縮小後の最大辺
pub const MAX_DIMENSION: u32 = 800;

/// JPEG品質
pub const JPEG_QUALITY: u8 = 80;

/// 画像を認識サービス向けに正規化
pub fn normalize_image(bytes: &[u8]) -> Result<Vec<u8>> {
    if bytes.is_empty() {
        return Err(PlantIdError::InvalidInput("画像データが空です".into()));
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| PlantIdError::ImageLoad(e.to_string()))?;
    let (width, height) = (img.width(), img.height());

    let resized = if width > MAX_DIMENSION || height > MAX_DIMENSION {
        img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEGはアルファを持てないためRGBに変換
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut out = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))
        .map_err(|e| PlantIdError::ImageLoad(e.to_string()))?;

    debug!(
        from = %format!("{}x{}", width, height),
        to = %format!("{}x{}", rgb.width(), rgb.height()),
        bytes = out.len(),
        "image normalized"
    );
    Ok(out)
}

/// Base64文字列（`data:image/jpeg;base64,` 接頭辞あり/なし）をデコード
pub fn decode_base64_image(text: &str) -> Result<Vec<u8>> {
    let data = match text.find("base64,") {
        Some(pos) => &text[pos + "base64,".len()..],
        None => text,
    };
    let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();

    if data.is_empty() {
        return Err(PlantIdError::InvalidInput("画像データが空です".into()));
    }

    base64::engine::general_purpose::STANDARD
        .decode(data.as_bytes())
        .map_err(|e| PlantIdError::InvalidInput(format!("Base64デコード失敗: {}", e)))
}
