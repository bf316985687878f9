// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: click-to-zoom presentation for images.
//!
//! This crate computes everything needed to present an image element
//! "zoomed": enlarged to fit the viewport, centered, over a backdrop, and
//! animated back to its original place on dismissal. It does not paint or
//! listen to anything itself. Hosts describe the element through
//! [`SourceElement`] and the viewport through [`ViewportQuery`], forward
//! input, and apply the returned [`ZoomEffect`]s.
//!
//! The pieces, bottom-up:
//!
//! - [`resolve`]: the geometry resolver. Given a [`SourceSnapshot`] of the
//!   element, a margin, and the viewport, yields the [`FitResult`] scale.
//! - [`compute`]: the transform calculator. Given a fit and a [`ZoomPhase`],
//!   yields the overlay image's [`TransformStyle`].
//! - [`ZoomMachine`]: the interaction state machine
//!   (`Idle → Zooming → Zoomed → Unzooming → Idle`), with deferred intents,
//!   listener bookkeeping, and the unzoom timers.
//! - [`ZoomEngine`]: one attached element. Owns the machine, the options, and
//!   the cancellable state of the deferred full-resolution load, and produces
//!   a [`ZoomFrame`] for the presenter.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_zoom::{
//!     LoadedImage, ObjectFit, ResourceLocator, SourceElement, StaticViewport, ZoomEngine,
//!     ZoomOptions, ZoomPhase,
//! };
//!
//! struct Img;
//!
//! impl SourceElement for Img {
//!     fn bounding_rect(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 100.0, 80.0))
//!     }
//!     fn natural_size(&self) -> Size {
//!         Size::new(100.0, 80.0)
//!     }
//!     fn object_fit(&self) -> ObjectFit {
//!         ObjectFit::Fill
//!     }
//!     fn resource(&self) -> Option<ResourceLocator> {
//!         Some(ResourceLocator::Source("cat.png".into()))
//!     }
//! }
//!
//! let viewport = StaticViewport::new(800.0, 600.0);
//! let mut zoom = ZoomEngine::attach(Img, viewport, ZoomOptions::default().with_margin(20.0));
//!
//! // The host loads the full-resolution image and reports back.
//! let request = zoom.take_load_request().unwrap();
//! assert!(zoom.complete_load(&request, LoadedImage::new(100, 80, request.url())));
//!
//! zoom.trigger();
//! zoom.layout_measured();
//! assert_eq!(zoom.phase(), ZoomPhase::Zoomed);
//!
//! let placement = zoom.frame().image.placement.unwrap();
//! assert_eq!(placement.scale, 1.0);
//! assert_eq!((placement.width, placement.height), (700.0, 560.0));
//! ```
//!
//! Decoding and fetching live in the companion `understory_zoom_loader` crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cancel;
mod effect;
mod engine;
mod error;
mod fit;
mod focus;
mod machine;
mod options;
mod overlay;
mod phase;
mod source;
mod timers;
mod transform;
mod viewport;

pub use cancel::{CancelToken, LoadRequest};
pub use effect::{DismissSource, Effects, Listeners, TimerId, TimerKind, ZoomEffect};
pub use engine::{ZoomEngine, ZoomFrame};
pub use error::{ParseObjectFitError, ZoomError};
pub use fit::{FitResult, available_space, resolve, scale_to_viewport, scale_to_viewport_max};
pub use focus::FocusTarget;
pub use machine::{Key, Propagation, VISIBILITY_HANDOFF_MS, ZoomMachine};
pub use options::{DEFAULT_TRANSITION_DURATION_MS, ZoomOptions};
pub use overlay::OverlayStyle;
pub use phase::{OriginalVisibility, ZoomPhase};
pub use source::{
    LoadedImage, ObjectFit, ResourceLocator, SourceElement, SourceSnapshot, is_vector_url,
};
pub use timers::TimerQueue;
pub use transform::{Placement, TransformStyle, compute, overlay_size};
pub use viewport::{StaticViewport, ViewportQuery};
