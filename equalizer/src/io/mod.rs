//! Decoding into and encoding out of [`PixelBuffer`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use common::Buffer2;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use thiserror::Error;

use crate::pixel::Pixel;
use crate::pixel_buffer::PixelBuffer;


/// Extensions accepted by [`read_image`].
pub const READ_EXTENSIONS: &[&str] = &["ppm", "pnm", "png", "jpg", "jpeg"];

/// Extensions accepted by [`save_image`]. `ppm` is written as binary P6.
pub const WRITE_EXTENSIONS: &[&str] = &["ppm", "png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("Invalid file extension for '{path}': {extension}")]
    InvalidExtension { path: PathBuf, extension: String },

    #[error("Failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Decoded image has invalid dimensions: {0}")]
    Dimensions(#[from] common::SizeMismatch),
}

fn checked_extension(path: &Path, allowed: &[&str]) -> Result<String, ImageIoError> {
    let extension = path
        .extension()
        .and_then(|os_str| os_str.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if allowed.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(ImageIoError::InvalidExtension {
            path: path.to_path_buf(),
            extension: if extension.is_empty() {
                "missing extension".to_string()
            } else {
                extension
            },
        })
    }
}

/// Loads a PPM, PNG or JPEG file, normalizing every channel by `1/255`.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, ImageIoError> {
    let path = path.as_ref();
    checked_extension(path, READ_EXTENSIONS)?;

    let decoded = image::open(path).map_err(|source| ImageIoError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let buffer = pixel_buffer_from_rgb8(&decoded.to_rgb8())?;
    tracing::debug!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        "image loaded"
    );
    Ok(buffer)
}

/// Writes `buffer` as 8-bit RGB; the format follows the file extension.
pub fn save_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<(), ImageIoError> {
    let path = path.as_ref();
    let extension = checked_extension(path, WRITE_EXTENSIONS)?;
    let image = pixel_buffer_to_rgb8(buffer);

    if extension == "ppm" {
        write_binary_ppm(&image, path)?;
    } else {
        image.save(path).map_err(|source| ImageIoError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    }

    tracing::debug!(path = %path.display(), "image saved");
    Ok(())
}

/// `image`'s default PNM encoder emits PAM (P7); this forces a P6 pixmap.
fn write_binary_ppm(image: &RgbImage, path: &Path) -> Result<(), ImageIoError> {
    let write_error = |source: std::io::Error| ImageIoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(write_error)?);
    PnmEncoder::new(&mut writer)
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|source| ImageIoError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(write_error)
}

pub fn pixel_buffer_from_rgb8(image: &RgbImage) -> Result<PixelBuffer, ImageIoError> {
    let normalize = |v: u8| v as f64 / 255.0;
    let pixels: Vec<Pixel> = image
        .pixels()
        .map(|Rgb([r, g, b])| Pixel::new(normalize(*r), normalize(*g), normalize(*b)))
        .collect();

    let width = image.width() as usize;
    let height = image.height() as usize;
    Ok(Buffer2::try_new(width, height, pixels)?.into())
}

/// Truncates `v * 255` to 8 bits, clamping out-of-range values.
#[inline]
pub fn to_8bit(value: f64) -> u8 {
    (value * 255.0).clamp(0.0, 255.0) as u8
}

pub fn pixel_buffer_to_rgb8(buffer: &PixelBuffer) -> RgbImage {
    let width = buffer.width();
    RgbImage::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        let pixel = buffer.pixels()[y as usize * width + x as usize];
        Rgb([to_8bit(pixel.r), to_8bit(pixel.g), to_8bit(pixel.b)])
    })
}
