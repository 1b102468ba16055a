//! # Program Memory
//!
//! The evaluator's output as seen by the transform engine: named values and
//! sketch groups made of tagged segments. The engine only reads memory; it
//! uses it to resolve segment tags into geometry.

use std::collections::BTreeMap;

use config::constants::EPSILON;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Values bound by name after evaluating a program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramMemory {
    pub root: BTreeMap<String, MemoryItem>,
}

/// One bound value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum MemoryItem {
    UserVal(f64),
    SketchGroup(SketchGroup),
}

/// A continuous path of segments starting at `start`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchGroup {
    pub start: [f64; 2],
    pub value: Vec<SegmentPath>,
}

/// A drawn segment. `name` is its tag, empty when untagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentPath {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub name: String,
}

/// A segment looked up by tag and handed to transform callbacks.
pub type SegmentRef = SegmentPath;

// =============================================================================
// PROGRAM MEMORY
// =============================================================================

impl ProgramMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, item: MemoryItem) {
        self.root.insert(name.into(), item);
    }

    pub fn get(&self, name: &str) -> Option<&MemoryItem> {
        self.root.get(name)
    }

    /// The sketch group bound to `name`, if that binding is a sketch group.
    pub fn sketch_group(&self, name: &str) -> Option<&SketchGroup> {
        match self.root.get(name)? {
            MemoryItem::SketchGroup(group) => Some(group),
            MemoryItem::UserVal(_) => None,
        }
    }

    /// First segment tagged `tag` across all sketch groups, in name order.
    pub fn find_segment_by_tag(&self, tag: &str) -> Option<&SegmentRef> {
        if tag.is_empty() {
            return None;
        }
        self.root.values().find_map(|item| match item {
            MemoryItem::SketchGroup(group) => group.segment(tag),
            MemoryItem::UserVal(_) => None,
        })
    }
}

// =============================================================================
// SKETCH GROUP
// =============================================================================

impl SketchGroup {
    pub fn new(start: [f64; 2]) -> Self {
        Self {
            start,
            value: Vec::new(),
        }
    }

    /// Appends a segment from the current end point to `to`.
    pub fn line_to(mut self, to: [f64; 2], name: impl Into<String>) -> Self {
        let from = self.last_point().to_array();
        self.value.push(SegmentPath {
            from,
            to,
            name: name.into(),
        });
        self
    }

    /// Where the next segment starts: the last segment's end, or `start`.
    pub fn last_point(&self) -> DVec2 {
        self.value
            .last()
            .map_or(DVec2::from(self.start), SegmentPath::to_point)
    }

    pub fn segment(&self, tag: &str) -> Option<&SegmentPath> {
        self.value.iter().find(|s| s.name == tag)
    }
}

// =============================================================================
// SEGMENT GEOMETRY
// =============================================================================

impl SegmentPath {
    pub fn from_point(&self) -> DVec2 {
        DVec2::from(self.from)
    }

    pub fn to_point(&self) -> DVec2 {
        DVec2::from(self.to)
    }

    /// Signed distance of `point` from the infinite line through this
    /// segment. Positive on the left when walking from `from` to `to`.
    ///
    /// A segment shorter than `EPSILON` has no direction; the distance to
    /// `from` is returned instead.
    pub fn offset_of(&self, point: DVec2) -> f64 {
        let origin = self.from_point();
        let direction = self.to_point() - origin;
        let length = direction.length();
        if length < EPSILON {
            return point.distance(origin);
        }
        (point - origin).dot(direction.perp() / length)
    }
}

// =============================================================================
// TESTS
// =============================================================================
