#![allow(dead_code)]

use cropmark::ir::{BBoxXYXY, Detection, Pixel, RawDetection};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const CLASS_NAMES: [&str; 4] = ["rust", "blight", "TYLCV", "Downy-mildew"];

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Boxes that may be unordered, overhanging, or entirely off a canvas of up
/// to ~1000 pixels.
pub fn arb_bbox() -> BoxedStrategy<BBoxXYXY<Pixel>> {
    let coord = -200.0f64..1200.0;
    (coord.clone(), coord.clone(), coord.clone(), coord)
        .prop_map(|(x1, y1, x2, y2)| BBoxXYXY::from_xyxy(x1, y1, x2, y2))
        .boxed()
}

pub fn arb_detection() -> BoxedStrategy<Detection> {
    (0..CLASS_NAMES.len(), 0.0f64..=1.0, arb_bbox())
        .prop_map(|(class, confidence, bbox)| Detection::new(CLASS_NAMES[class], confidence, bbox))
        .boxed()
}

pub fn arb_detections(max_len: usize) -> BoxedStrategy<Vec<Detection>> {
    proptest::collection::vec(arb_detection(), 0..=max_len).boxed()
}

/// Raw rows whose class indices are all inside a catalog of `catalog_len`.
pub fn arb_raw_detections(catalog_len: u64, max_len: usize) -> BoxedStrategy<Vec<RawDetection>> {
    proptest::collection::vec(
        (0..catalog_len, 0.0f64..=1.0, arb_bbox())
            .prop_map(|(index, confidence, bbox)| RawDetection::new(index, confidence, bbox)),
        0..=max_len,
    )
    .boxed()
}
