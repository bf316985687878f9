// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The zoomable source element and immutable snapshots of it.

use alloc::string::String;
use core::str::FromStr;

use kurbo::{Rect, Size};

use crate::error::{ParseObjectFitError, ZoomError};

/// How a resource is scaled/cropped to fill its rendered box.
///
/// Mirrors the CSS `object-fit` keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ObjectFit {
    /// Preserve aspect ratio and fill the box, cropping overflow.
    Cover,
    /// Preserve aspect ratio and fit inside the box.
    Contain,
    /// Stretch to the box.
    #[default]
    Fill,
    /// Draw at intrinsic size.
    None,
    /// The smaller of `None` and `Contain`.
    ScaleDown,
}

impl ObjectFit {
    /// Returns the CSS keyword for this mode.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Contain => "contain",
            Self::Fill => "fill",
            Self::None => "none",
            Self::ScaleDown => "scale-down",
        }
    }
}

impl FromStr for ObjectFit {
    type Err = ParseObjectFitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cover" => Ok(Self::Cover),
            "contain" => Ok(Self::Contain),
            "fill" => Ok(Self::Fill),
            "none" => Ok(Self::None),
            "scale-down" => Ok(Self::ScaleDown),
            _ => Err(ParseObjectFitError),
        }
    }
}

/// Where the full-resolution image comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceLocator {
    /// A direct source attribute.
    Source(String),
    /// A URL extracted from a `background-image` declaration.
    BackgroundImage(String),
}

impl ResourceLocator {
    /// Returns the resource URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Source(url) | Self::BackgroundImage(url) => url,
        }
    }

    /// Returns `true` if the resource looks like vector content.
    ///
    /// This is a filename heuristic: a `.svg` extension (ignoring case, query
    /// and fragment) or an `image/svg+xml` data URL.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        is_vector_url(self.url())
    }
}

/// Filename heuristic for vector resources.
#[must_use]
pub fn is_vector_url(url: &str) -> bool {
    const SVG_DATA: &str = "data:image/svg+xml";
    let url = url.trim();
    if url
        .get(..SVG_DATA.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(SVG_DATA))
    {
        return true;
    }
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.len() >= 4
        && path
            .get(path.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".svg"))
}

/// A mounted element that can be zoomed.
///
/// Implemented by hosts over their own element handles. Every method is a
/// live query; the engine calls them again on each recompute.
pub trait SourceElement {
    /// Current bounding rectangle in viewport coordinates, or `None` when the
    /// element is not mounted.
    fn bounding_rect(&self) -> Option<Rect>;

    /// Intrinsic pixel size of the element's resource, or [`Size::ZERO`] if unknown.
    fn natural_size(&self) -> Size;

    /// Resolved `object-fit` of the element.
    fn object_fit(&self) -> ObjectFit;

    /// Resolved full-resolution resource, if any.
    fn resource(&self) -> Option<ResourceLocator>;
}

impl<T: SourceElement + ?Sized> SourceElement for &T {
    fn bounding_rect(&self) -> Option<Rect> {
        (**self).bounding_rect()
    }

    fn natural_size(&self) -> Size {
        (**self).natural_size()
    }

    fn object_fit(&self) -> ObjectFit {
        (**self).object_fit()
    }

    fn resource(&self) -> Option<ResourceLocator> {
        (**self).resource()
    }
}

/// Immutable capture of a source element at one moment.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceSnapshot {
    /// Rendered rectangle in viewport coordinates.
    pub rect: Rect,
    /// Intrinsic size, zero when unknown.
    pub natural_size: Size,
    /// Resolved fit mode.
    pub object_fit: ObjectFit,
    /// Resolved resource, if any.
    pub resource: Option<ResourceLocator>,
}

impl SourceSnapshot {
    /// Captures the current state of `element`.
    ///
    /// Fails with [`ZoomError::MeasurementUnavailable`] when the element is
    /// unmounted or its rectangle has no area.
    pub fn capture<E: SourceElement + ?Sized>(element: &E) -> Result<Self, ZoomError> {
        let rect = element
            .bounding_rect()
            .ok_or(ZoomError::MeasurementUnavailable)?;
        if !(rect.width() > 0.0 && rect.height() > 0.0) {
            return Err(ZoomError::MeasurementUnavailable);
        }
        Ok(Self {
            rect,
            natural_size: element.natural_size(),
            object_fit: element.object_fit(),
            resource: element.resource(),
        })
    }

    /// Rendered size of the element.
    #[must_use]
    pub fn rendered_size(&self) -> Size {
        self.rect.size()
    }

    /// Returns `true` if both natural dimensions are known.
    #[must_use]
    pub fn has_natural_size(&self) -> bool {
        self.natural_size.width > 0.0 && self.natural_size.height > 0.0
    }

    /// Returns `true` if the resource is vector content.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        self.resource
            .as_ref()
            .is_some_and(ResourceLocator::is_vector)
    }
}

/// A full-resolution image that finished loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedImage {
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
    /// URL the image was loaded from.
    pub resource_url: String,
}

impl LoadedImage {
    /// Creates a loaded image description.
    #[must_use]
    pub fn new(width: u32, height: u32, resource_url: impl Into<String>) -> Self {
        Self {
            width,
            height,
            resource_url: resource_url.into(),
        }
    }

    /// Intrinsic size as a [`Size`].
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}
