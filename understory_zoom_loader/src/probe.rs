// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intrinsic size probing.
//!
//! Raster formats are sniffed and measured with the `image` crate without
//! decoding pixel data. SVG documents are measured from the root element's
//! `width`, `height` and `viewBox` attributes.

use std::io::Cursor;

use image::ImageReader;
use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::{Document, ParsingOptions};
use understory_zoom::is_vector_url;

use crate::error::LoadError;

static SVG_LENGTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9]*\.?[0-9]+)\s*(?:px)?\s*$").expect("SVG length pattern is valid")
});

/// Intrinsic pixel size of the image in `bytes`.
///
/// `url` is only used to pick the SVG path for resources named like vector
/// content; otherwise the format is sniffed from the bytes.
pub fn probe_dimensions(bytes: &[u8], url: &str) -> Result<(u32, u32), LoadError> {
    if is_vector_url(url) || looks_like_svg(bytes) {
        let text = std::str::from_utf8(bytes).map_err(|_| LoadError::UnknownDimensions)?;
        return svg_dimensions(text).ok_or(LoadError::UnknownDimensions);
    }
    let (width, height) = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()?;
    if width == 0 || height == 0 {
        return Err(LoadError::UnknownDimensions);
    }
    Ok((width, height))
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(1024)]);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    (head.starts_with("<?xml") || head.starts_with("<svg") || head.starts_with("<!--"))
        && head.contains("<svg")
}

/// Intrinsic size of an SVG document, from its root element.
///
/// Explicit `width` and `height` win. A single explicit length is completed
/// from the `viewBox` aspect ratio; otherwise the `viewBox` size is used.
#[must_use]
pub fn svg_dimensions(text: &str) -> Option<(u32, u32)> {
    let mut options = ParsingOptions::default();
    // Exported SVGs routinely carry a DOCTYPE.
    options.allow_dtd = true;
    let doc = Document::parse_with_options(text, options).ok()?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return None;
    }
    let width = root.attribute("width").and_then(parse_length);
    let height = root.attribute("height").and_then(parse_length);
    let view_box = root.attribute("viewBox").and_then(parse_view_box);

    let (w, h) = match (width, height, view_box) {
        (Some(w), Some(h), _) => (w, h),
        (Some(w), None, Some((vw, vh))) => (w, w * vh / vw),
        (None, Some(h), Some((vw, vh))) => (h * vw / vh, h),
        (_, _, Some(size)) => size,
        _ => return None,
    };
    Some((to_pixels(w)?, to_pixels(h)?))
}

fn parse_length(value: &str) -> Option<f64> {
    let cap = SVG_LENGTH.captures(value)?;
    cap[1].parse::<f64>().ok().filter(|v| *v > 0.0)
}

fn parse_view_box(value: &str) -> Option<(f64, f64)> {
    let mut parts = value
        .split(|c: char| c.is_ascii_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(str::parse::<f64>);
    let (_, _, w, h) = (parts.next()?, parts.next()?, parts.next()?.ok()?, parts.next()?.ok()?);
    (w > 0.0 && h > 0.0).then_some((w, h))
}

fn to_pixels(v: f64) -> Option<u32> {
    let v = v.round();
    if !(1.0..=f64::from(u32::MAX)).contains(&v) {
        return None;
    }
    #[expect(clippy::cast_possible_truncation, reason = "range checked above")]
    let px = v as u32;
    Some(px)
}
