// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Conditions the zoom engine absorbs instead of surfacing to the host.
///
/// None of these are returned from event handlers. Each one degrades the
/// presentation (placeholder geometry, no animation) and is logged at `debug`.
/// They are exposed for hosts that want to introspect why a zoom did nothing,
/// via [`ZoomEngine::measure`](crate::ZoomEngine::measure).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ZoomError {
    /// The element is not mounted or has a zero-size rectangle.
    #[error("source element cannot be measured")]
    MeasurementUnavailable,
    /// The full-resolution image never loaded.
    #[error("image resource failed to load")]
    ResourceLoadFailure,
    /// The element was detached while a transition or load was in flight.
    #[error("source element was detached during a transition")]
    DetachedDuringTransition,
    /// A load result arrived for a resource that is no longer current.
    #[error("load result is stale")]
    StaleLoad,
}

/// Error returned when parsing an unknown `object-fit` keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("unknown object-fit keyword")]
pub struct ParseObjectFitError;
