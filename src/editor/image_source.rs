// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nestdraw-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nestdraw and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::ImageFormat;

use crate::model::{Size, MAX_IMAGE_SIZE};

/// An image file prepared for an image node.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub data_url: String,
    /// Display size: the pixel size scaled down to fit [`MAX_IMAGE_SIZE`].
    pub size: Size,
}

pub fn load_image_source(path: &Path) -> Result<ImageSource, image::ImageError> {
    let bytes = std::fs::read(path).map_err(image::ImageError::IoError)?;
    image_source_from_bytes(&bytes)
}

pub fn image_source_from_bytes(bytes: &[u8]) -> Result<ImageSource, image::ImageError> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let pixels = Size::new(f64::from(decoded.width()), f64::from(decoded.height()));

    let data_url = format!("data:{};base64,{}", mime_type(format), STANDARD.encode(bytes));
    Ok(ImageSource { data_url, size: pixels.fit_within(MAX_IMAGE_SIZE) })
}

/// Only PNG decoding is built in, so other formats never get this far.
fn mime_type(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        _ => "application/octet-stream",
    }
}
