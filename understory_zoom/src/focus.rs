// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus containment for the zoom overlay.
//!
//! The overlay is laid out as:
//!
//! ```text
//! [start sentinel] [dialog [close control] [image]] [end sentinel]
//! ```
//!
//! While zoomed, the sentinels sit in tab order and bounce focus back to the
//! close control, so Tab and Shift+Tab cycle inside the overlay. Otherwise
//! they are out of tab order and focusing them does nothing.

use crate::phase::ZoomPhase;

/// Focusable parts of the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// Sentinel before the dialog.
    StartSentinel,
    /// Sentinel after the dialog.
    EndSentinel,
    /// The dialog container.
    Dialog,
    /// The dismissal control.
    CloseControl,
}

impl FocusTarget {
    /// Returns `true` for the two sentinels.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::StartSentinel | Self::EndSentinel)
    }

    /// Tab index for this target in `phase`.
    ///
    /// `None` means "leave the attribute unset" (natural order for the close
    /// control, not focusable for the others).
    #[must_use]
    pub const fn tab_index(self, phase: ZoomPhase) -> Option<i32> {
        let zoomed = phase.is_zoomed();
        match self {
            Self::StartSentinel | Self::EndSentinel => {
                if zoomed {
                    Some(0)
                } else {
                    None
                }
            }
            Self::Dialog => {
                if zoomed {
                    Some(-1)
                } else {
                    None
                }
            }
            Self::CloseControl => {
                if zoomed {
                    None
                } else {
                    Some(-1)
                }
            }
        }
    }

    /// Where focus should go after landing on this target in `phase`.
    ///
    /// Returns the close control for a sentinel while zoomed, `None` otherwise.
    #[must_use]
    pub const fn redirect(self, phase: ZoomPhase) -> Option<Self> {
        if self.is_sentinel() && phase.is_zoomed() {
            Some(Self::CloseControl)
        } else {
            None
        }
    }
}
