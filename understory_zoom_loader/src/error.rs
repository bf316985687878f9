// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;
use understory_zoom::ZoomError;

/// Why a full-resolution load produced no image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The fetcher could not produce the resource bytes.
    #[error("failed to fetch {url}: {reason}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Fetcher-specific reason.
        reason: String,
    },
    /// Reading the resource failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The bytes are not a decodable raster image.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    /// The resource decoded but has no usable intrinsic size.
    #[error("image has no intrinsic dimensions")]
    UnknownDimensions,
    /// The request was cancelled before the result could be used.
    #[error("load was cancelled")]
    Cancelled,
}

impl LoadError {
    /// Creates a [`LoadError::Fetch`].
    pub fn fetch(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl From<LoadError> for ZoomError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Cancelled => Self::StaleLoad,
            _ => Self::ResourceLoadFailure,
        }
    }
}
