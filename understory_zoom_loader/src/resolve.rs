// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use once_cell::sync::Lazy;
use regex::Regex;
use understory_zoom::ResourceLocator;

static CSS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"url(?:\(['"]?)(.*?)(?:['"]?\))"#).expect("CSS url() pattern is valid")
});

/// Extracts the first URL from a computed `background-image` value.
///
/// Returns `None` for `none`, gradients, and empty `url()`s.
#[must_use]
pub fn background_url(value: &str) -> Option<&str> {
    CSS_URL
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|url| !url.is_empty())
}

/// Resolves the full-resolution resource of an element.
///
/// A non-empty `src` wins; otherwise the first `url()` of the computed
/// `background-image` is used.
#[must_use]
pub fn resolve_resource(src: Option<&str>, background_image: Option<&str>) -> Option<ResourceLocator> {
    if let Some(src) = src.map(str::trim).filter(|s| !s.is_empty()) {
        return Some(ResourceLocator::Source(src.to_owned()));
    }
    background_image
        .and_then(background_url)
        .map(|url| ResourceLocator::BackgroundImage(url.to_owned()))
}
