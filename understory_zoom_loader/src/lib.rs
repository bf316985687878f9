// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom_loader --heading-base-level=0

//! Understory Zoom Loader: deferred full-resolution loads for `understory_zoom`.
//!
//! A zoom engine asks for the full-resolution version of an element's image
//! through a cancellable `LoadRequest`. This crate answers those requests:
//!
//! - [`resolve_resource`] turns an element's `src` or computed
//!   `background-image` into a `ResourceLocator`.
//! - [`Fetch`] abstracts the transport; [`FileFetch`] reads local files.
//! - [`probe_dimensions`] measures raster images with the `image` crate
//!   (header only) and SVG documents from their root attributes.
//! - [`DeferredLoader`] strings these together and honors cancellation.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_zoom::ResourceLocator;
//! use understory_zoom_loader::{resolve_resource, svg_dimensions};
//!
//! let locator = resolve_resource(None, Some("url(\"diagram.svg\")"));
//! assert_eq!(locator, Some(ResourceLocator::BackgroundImage("diagram.svg".into())));
//!
//! let svg = r#"<svg viewBox="0 0 640 480"></svg>"#;
//! assert_eq!(svg_dimensions(svg), Some((640, 480)));
//! ```
//!
//! Loading is async but runtime-agnostic; the tests drive it with `pollster`.

mod error;
mod fetch;
mod loader;
mod probe;
mod resolve;

pub use error::LoadError;
pub use fetch::{Fetch, FileFetch};
pub use loader::DeferredLoader;
pub use probe::{probe_dimensions, svg_dimensions};
pub use resolve::{background_url, resolve_resource};
