// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for `understory_zoom_loader` driving a real `ZoomEngine`.

use std::collections::HashMap;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use kurbo::{Rect, Size};
use understory_zoom::{
    CancelToken, ObjectFit, ResourceLocator, SourceElement, StaticViewport, ZoomEngine,
    ZoomOptions, ZoomPhase,
};
use understory_zoom_loader::{DeferredLoader, Fetch, FileFetch, LoadError, resolve_resource};

#[derive(Default)]
struct MemoryFetch {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFetch {
    fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(url.to_string(), bytes);
        self
    }
}

impl Fetch for MemoryFetch {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        self.files
            .get(url)
            .cloned()
            .ok_or_else(|| LoadError::fetch(url, "not found"))
    }
}

/// Cancels a token while the fetch is in flight.
struct CancellingFetch {
    inner: MemoryFetch,
    token: CancelToken,
}

impl Fetch for CancellingFetch {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, LoadError> {
        self.token.cancel();
        self.inner.fetch(url).await
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

struct Thumb {
    src: Option<String>,
    background: Option<String>,
}

impl SourceElement for Thumb {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(Rect::new(20.0, 20.0, 120.0, 95.0))
    }

    fn natural_size(&self) -> Size {
        Size::new(100.0, 75.0)
    }

    fn object_fit(&self) -> ObjectFit {
        ObjectFit::Cover
    }

    fn resource(&self) -> Option<ResourceLocator> {
        resolve_resource(self.src.as_deref(), self.background.as_deref())
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn loads_png_dimensions() {
    init_logger();
    let loader = DeferredLoader::new(MemoryFetch::default().with("a.png", png(64, 48)));
    let image = pollster::block_on(loader.load_url("a.png")).unwrap();
    assert_eq!((image.width, image.height), (64, 48));
    assert_eq!(image.resource_url, "a.png");
}

#[test]
fn missing_resource_is_absorbed() {
    init_logger();
    let loader = DeferredLoader::new(MemoryFetch::default());
    let err = pollster::block_on(loader.load_url("nope.png")).unwrap_err();
    assert!(matches!(err, LoadError::Fetch { .. }));
}

#[test]
fn engine_applies_loaded_image() {
    init_logger();
    let loader = DeferredLoader::new(MemoryFetch::default().with("big.png", png(400, 200)));
    let thumb = Thumb {
        src: Some("big.png".into()),
        background: None,
    };
    let mut engine = ZoomEngine::attach(thumb, StaticViewport::new(800.0, 600.0), ZoomOptions::default());
    assert!(engine.frame().image.is_placeholder());

    assert!(pollster::block_on(loader.load_pending(&mut engine)));
    assert_eq!(engine.loaded_image().map(|i| (i.width, i.height)), Some((400, 200)));

    engine.trigger();
    engine.layout_measured();
    assert_eq!(engine.phase(), ZoomPhase::Zoomed);
    let p = engine.frame().image.placement.unwrap();
    // Cover keeps the loaded 2:1 ratio.
    assert!((p.width / p.height - 2.0).abs() < 1e-9);

    // Nothing left to load.
    assert!(!pollster::block_on(loader.load_pending(&mut engine)));
}

#[test]
fn background_image_resource_is_loaded() {
    init_logger();
    let svg = br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 300 200"></svg>"#.to_vec();
    let loader = DeferredLoader::new(MemoryFetch::default().with("art.svg", svg));
    let thumb = Thumb {
        src: None,
        background: Some("url('art.svg')".into()),
    };
    let mut engine = ZoomEngine::attach(thumb, StaticViewport::new(800.0, 600.0), ZoomOptions::default());
    assert!(pollster::block_on(loader.load_pending(&mut engine)));
    assert_eq!(engine.loaded_image().map(|i| (i.width, i.height)), Some((300, 200)));
}

#[test]
fn failed_load_keeps_placeholder() {
    init_logger();
    let loader = DeferredLoader::new(MemoryFetch::default().with("bad.png", b"not a png".to_vec()));
    let thumb = Thumb {
        src: Some("bad.png".into()),
        background: None,
    };
    let mut engine = ZoomEngine::attach(thumb, StaticViewport::new(800.0, 600.0), ZoomOptions::default());
    assert!(!pollster::block_on(loader.load_pending(&mut engine)));
    assert!(engine.frame().image.is_placeholder());
    assert!(engine.take_effects().is_empty());
}

#[test]
fn cancellation_during_fetch_discards_result() {
    init_logger();
    let thumb = Thumb {
        src: Some("a.png".into()),
        background: None,
    };
    let mut engine = ZoomEngine::attach(thumb, StaticViewport::new(800.0, 600.0), ZoomOptions::default());
    let request = engine.take_load_request().unwrap();

    let loader = DeferredLoader::new(CancellingFetch {
        inner: MemoryFetch::default().with("a.png", png(10, 10)),
        token: request.token().clone(),
    });
    let err = pollster::block_on(loader.try_load(&request)).unwrap_err();
    assert!(matches!(err, LoadError::Cancelled));
    assert!(pollster::block_on(loader.load(&request)).is_none());
    assert!(engine.loaded_image().is_none());
}

#[test]
fn cleanup_before_completion_is_stale() {
    init_logger();
    let loader = DeferredLoader::new(MemoryFetch::default().with("a.png", png(10, 10)));
    let thumb = Thumb {
        src: Some("a.png".into()),
        background: None,
    };
    let mut engine = ZoomEngine::attach(thumb, StaticViewport::new(800.0, 600.0), ZoomOptions::default());
    let request = engine.take_load_request().unwrap();
    let _ = engine.cleanup();
    assert!(request.is_cancelled());
    assert!(pollster::block_on(loader.load(&request)).is_none());
}

#[test]
fn file_fetch_reads_from_disk() {
    init_logger();
    let dir = std::env::temp_dir().join("understory_zoom_loader_test");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("disk.png"), png(33, 17)).unwrap();

    let loader = DeferredLoader::new(FileFetch::new(&dir));
    let image = pollster::block_on(loader.load_url("disk.png")).unwrap();
    assert_eq!((image.width, image.height), (33, 17));
}
