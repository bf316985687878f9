// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Interaction lifecycle stage of a zoomable element.
///
/// The only legal order is `Idle → Zooming → Zoomed → Unzooming → Idle`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ZoomPhase {
    /// Resting in place; no overlay.
    #[default]
    Idle,
    /// Overlay mounted at the rest transform, waiting for layout.
    Zooming,
    /// Overlay shows the centered, scaled image.
    Zoomed,
    /// Overlay is animating back to the rest transform.
    Unzooming,
}

impl ZoomPhase {
    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Idle => Self::Zooming,
            Self::Zooming => Self::Zoomed,
            Self::Zoomed => Self::Unzooming,
            Self::Unzooming => Self::Idle,
        }
    }

    /// Returns `true` while the zoom is requested (`Zooming` or `Zoomed`).
    ///
    /// This is what the overlay uses for tab order and keyboard dismissal.
    #[must_use]
    pub const fn is_zoomed(self) -> bool {
        matches!(self, Self::Zooming | Self::Zoomed)
    }

    /// Returns `true` while an overlay exists (every phase except `Idle`).
    #[must_use]
    pub const fn is_presenting(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Visibility of the original, in-flow element.
///
/// The original is hidden while the overlay stands in for it, so the image
/// is never painted twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum OriginalVisibility {
    /// The original element paints normally.
    #[default]
    Visible,
    /// The original element is hidden behind the overlay.
    Hidden,
}
