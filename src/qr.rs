// src/qr.rs
use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as B64, Engine};
use image::{
    imageops::{self, FilterType},
    ImageFormat, Luma,
};
use qrcode::QrCode;

pub use qrcode::EcLevel;

pub const QR_LEVEL: EcLevel = EcLevel::M;
pub const QR_SIZE: u32 = 256;

/// Turns a string into a square PNG barcode `size` pixels wide.
pub trait QrEncoder: Send + Sync {
    fn encode(&self, data: &str, level: EcLevel, size: u32) -> anyhow::Result<Vec<u8>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PngQrEncoder;

impl QrEncoder for PngQrEncoder {
    fn encode(&self, data: &str, level: EcLevel, size: u32) -> anyhow::Result<Vec<u8>> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), level)?;
        let symbol = code.render::<Luma<u8>>().quiet_zone(true).module_dimensions(1, 1).build();
        // nearest keeps module edges hard
        let img = imageops::resize(&symbol, size, size, FilterType::Nearest);

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }
}

/// Builds the `itms-services` link a device follows to install from `manifest`.
///
/// The query separator is the literal entity `&amp;`, not a bare `&`.
pub fn install_uri(manifest: &str) -> String {
    format!("itms-services://?action=download-manifest&amp;url={manifest}")
}

pub fn html_page(png: &[u8]) -> String {
    format!(
        "<html><body><img src=\"data:image/png;base64,{}\" /></body></html>",
        B64.encode(png)
    )
}
