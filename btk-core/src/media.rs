//! Post image download and the placeholder used when there's no image.
use btk_common::reqwest::Client;
use image::DynamicImage;
use log::debug;

use crate::error::ImageDownloadError;

/// Width and height of the placeholder image.
pub const PLACEHOLDER_SIZE: u32 = 64;

/// A black RGB image of [`PLACEHOLDER_SIZE`].
#[inline]
pub fn placeholder() -> DynamicImage {
    DynamicImage::new_rgb8(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE)
}

/// Downloads and decodes the image at `url` with a single `GET`.
pub async fn download_image(
    client: &Client,
    url: &str,
) -> Result<DynamicImage, ImageDownloadError> {
    debug!("Downloading image from {url}");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ImageDownloadError::HttpStatus { status });
    }

    let bytes = response.bytes().await?;
    debug!("Downloaded {} bytes, decoding", bytes.len());

    Ok(image::load_from_memory(&bytes)?)
}
