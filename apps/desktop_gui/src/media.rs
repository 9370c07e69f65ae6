use anyhow::Context;

/// RGBA pixels ready for upload as a texture.
pub struct PreviewImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

pub fn decode_preview(bytes: &[u8]) -> anyhow::Result<PreviewImage> {
    let decoded = image::load_from_memory(bytes).context("unsupported image data")?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(PreviewImage {
        size,
        rgba: rgba.into_raw(),
    })
}
