//! One detection per class name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ir::Detection;

/// Which detection survives when several share a class name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupPolicy {
    /// Keep the first detection in detector emission order.
    #[default]
    FirstSeen,

    /// Keep the most confident detection; ties go to the earlier one. The
    /// survivor takes the position of its class's first occurrence.
    HighestConfidence,
}

/// Reduces `detections` to at most one per `class_name`, preserving the
/// relative order of the survivors. Empty input gives empty output.
pub fn dedup_by_class(detections: Vec<Detection>, policy: DedupPolicy) -> Vec<Detection> {
    let mut slot_by_class: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Detection> = Vec::with_capacity(detections.len());

    for detection in detections {
        match slot_by_class.get(&detection.class_name) {
            None => {
                slot_by_class.insert(detection.class_name.clone(), kept.len());
                kept.push(detection);
            }
            Some(&slot) => {
                if policy == DedupPolicy::HighestConfidence
                    && detection.confidence > kept[slot].confidence
                {
                    kept[slot] = detection;
                }
            }
        }
    }

    kept
}
