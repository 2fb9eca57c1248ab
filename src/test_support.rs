//! Fixture builders shared by the unit tests.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

const TIFF_ASCII: u16 = 2;
const TIFF_LONG: u16 = 4;
const EXIF_IFD_POINTER: u16 = 0x8769;

fn push_ascii_entry(out: &mut Vec<u8>, data: &mut Vec<u8>, data_base: usize, tag: u16, value: &str) {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&TIFF_ASCII.to_le_bytes());
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    if bytes.len() <= 4 {
        bytes.resize(4, 0);
        out.extend_from_slice(&bytes);
    } else {
        out.extend_from_slice(&((data_base + data.len()) as u32).to_le_bytes());
        data.extend_from_slice(&bytes);
        if data.len() % 2 == 1 {
            data.push(0);
        }
    }
}

/// Little-endian TIFF holding ASCII fields in IFD0 and, when non-empty, an Exif sub-IFD.
/// Tags within each list must be ascending and IFD0 tags below 0x8769.
pub fn exif_tiff(ifd0: &[(u16, &str)], exif_ifd: &[(u16, &str)]) -> Vec<u8> {
    let ifd0_count = ifd0.len() + usize::from(!exif_ifd.is_empty());
    let exif_offset = 8 + 2 + 12 * ifd0_count + 4;
    let exif_size = if exif_ifd.is_empty() { 0 } else { 2 + 12 * exif_ifd.len() + 4 };
    let data_base = exif_offset + exif_size;

    let mut out = Vec::new();
    let mut data = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    out.extend_from_slice(&(ifd0_count as u16).to_le_bytes());
    for &(tag, value) in ifd0 {
        push_ascii_entry(&mut out, &mut data, data_base, tag, value);
    }
    if !exif_ifd.is_empty() {
        out.extend_from_slice(&EXIF_IFD_POINTER.to_le_bytes());
        out.extend_from_slice(&TIFF_LONG.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&(exif_offset as u32).to_le_bytes());
    }
    out.extend_from_slice(&0u32.to_le_bytes());

    if !exif_ifd.is_empty() {
        out.extend_from_slice(&(exif_ifd.len() as u16).to_le_bytes());
        for &(tag, value) in exif_ifd {
            push_ascii_entry(&mut out, &mut data, data_base, tag, value);
        }
        out.extend_from_slice(&0u32.to_le_bytes());
    }

    assert_eq!(out.len(), data_base);
    out.extend_from_slice(&data);
    out
}

pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
}

pub fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

/// A baseline JPEG with `tiff` spliced in as an APP1 Exif segment right after SOI.
pub fn jpeg_with_exif(width: u32, height: u32, tiff: &[u8]) -> Vec<u8> {
    let jpeg = jpeg_bytes(width, height);
    let segment_len = (2 + 6 + tiff.len()) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}
