//! PDF Export Service
//!
//! Turns a client-captured PNG of an invite card into a single-page A4 PDF.
//! The image is stretched over the whole page with no margin; an alpha
//! channel, if present, becomes a soft mask.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

/// Required prefix of the `imageData` field.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A4 width in PDF points.
pub const A4_WIDTH_PT: f32 = 595.28;

/// A4 height in PDF points.
pub const A4_HEIGHT_PT: f32 = 841.89;

const IMAGE_NAME: Name<'static> = Name(b"Im1");
const COMPRESSION_LEVEL: u8 = 6;

/// PDF export errors.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("Invalid imageData")]
    InvalidDataUri,

    #[error("Invalid imageData: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Invalid PNG image: {0}")]
    InvalidPng(#[from] png::DecodingError),

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),
}

/// Decoded raster, 8 bits per component.
struct Raster {
    width: u32,
    height: u32,
    /// Color samples; RGB when `rgb`, else gray
    color: Vec<u8>,
    rgb: bool,
    /// Gray alpha samples, if the PNG carries transparency
    alpha: Option<Vec<u8>>,
}

/// Strip the PNG data URI prefix and base64-decode the payload.
pub fn decode_png_data_uri(data_uri: &str) -> Result<Vec<u8>, PdfError> {
    let encoded = data_uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or(PdfError::InvalidDataUri)?;
    if encoded.is_empty() {
        return Err(PdfError::InvalidDataUri);
    }
    Ok(STANDARD.decode(encoded.trim_end())?)
}

fn decode_png(bytes: &[u8]) -> Result<Raster, PdfError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // Palette and sub-byte depths expand to 8-bit gray/RGB(A); 16-bit is stripped
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let (color, rgb, alpha) = match info.color_type {
        png::ColorType::Rgb => (buf, true, None),
        png::ColorType::Grayscale => (buf, false, None),
        png::ColorType::Rgba => {
            let (color, alpha) = split_alpha(&buf, 4);
            (color, true, Some(alpha))
        }
        png::ColorType::GrayscaleAlpha => {
            let (color, alpha) = split_alpha(&buf, 2);
            (color, false, Some(alpha))
        }
        other => return Err(PdfError::UnsupportedColorType(other)),
    };

    Ok(Raster {
        width: info.width,
        height: info.height,
        color,
        rgb,
        alpha,
    })
}

/// Separate interleaved pixels into color samples and a trailing alpha sample.
fn split_alpha(pixels: &[u8], stride: usize) -> (Vec<u8>, Vec<u8>) {
    let count = pixels.len() / stride;
    let mut color = Vec::with_capacity(count * (stride - 1));
    let mut alpha = Vec::with_capacity(count);
    for px in pixels.chunks_exact(stride) {
        color.extend_from_slice(&px[..stride - 1]);
        alpha.push(px[stride - 1]);
    }
    (color, alpha)
}

/// Render PNG bytes onto a single A4 page and return the PDF document.
pub fn render_png_page(png_bytes: &[u8]) -> Result<Vec<u8>, PdfError> {
    let raster = decode_png(png_bytes)?;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let mask_id = Ref::new(5);
    let content_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    let mut page = pdf.page(page_id);
    page.media_box(Rect::new(0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT));
    page.parent(page_tree_id);
    page.contents(content_id);
    page.resources().x_objects().pair(IMAGE_NAME, image_id);
    page.finish();

    let width = raster.width as i32;
    let height = raster.height as i32;

    let encoded = compress_to_vec_zlib(&raster.color, COMPRESSION_LEVEL);
    let mut image = pdf.image_xobject(image_id, &encoded);
    image.filter(Filter::FlateDecode);
    image.width(width);
    image.height(height);
    if raster.rgb {
        image.color_space().device_rgb();
    } else {
        image.color_space().device_gray();
    }
    image.bits_per_component(8);
    if raster.alpha.is_some() {
        image.s_mask(mask_id);
    }
    image.finish();

    if let Some(alpha) = &raster.alpha {
        let encoded = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(mask_id, &encoded);
        mask.filter(Filter::FlateDecode);
        mask.width(width);
        mask.height(height);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
    }

    // Image space is the unit square; scale it to the full page
    let mut content = Content::new();
    content.save_state();
    content.transform([A4_WIDTH_PT, 0.0, 0.0, A4_HEIGHT_PT, 0.0, 0.0]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

/// Validate and decode a PNG data URI, then render it as a PDF page.
pub fn render_data_uri(data_uri: &str) -> Result<Vec<u8>, PdfError> {
    let png_bytes = decode_png_data_uri(data_uri)?;
    render_png_page(&png_bytes)
}

/// Attachment file name for an exported invite.
pub fn export_file_name(slug: &str) -> String {
    format!("invite-{}.pdf", slug)
}
