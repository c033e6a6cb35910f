//! Motion nodes and the toolpath they form.

use serde::{Deserialize, Serialize};
use spherepath_math::{Point3, Vec3};

/// One instructed position along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionNode {
    /// Tool tip position (mm).
    pub position: Point3,
    /// Tool axis unit vector.
    pub orientation: Option<Vec3>,
    /// Material to deposit while moving here. `None` marks a rapid move.
    pub extrusion: Option<f64>,
    /// Feed rate. Reserved: generators leave it unset.
    pub feed_rate: Option<f64>,
}

impl MotionNode {
    /// Non-extruding positioning move.
    pub fn rapid(position: Point3, orientation: Vec3) -> Self {
        Self {
            position,
            orientation: Some(orientation),
            extrusion: None,
            feed_rate: None,
        }
    }

    /// Extruding move depositing `amount`.
    pub fn extrude(position: Point3, orientation: Vec3, amount: f64) -> Self {
        Self {
            position,
            orientation: Some(orientation),
            extrusion: Some(amount),
            feed_rate: None,
        }
    }

    /// Same node with a feed rate attached.
    pub fn with_feed_rate(mut self, feed_rate: f64) -> Self {
        self.feed_rate = Some(feed_rate);
        self
    }

    /// Is this a rapid (non-extruding) move?
    pub fn is_rapid(&self) -> bool {
        self.extrusion.is_none()
    }
}

/// An ordered, append-only sequence of motion nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toolpath {
    nodes: Vec<MotionNode>,
}

impl Toolpath {
    /// Create an empty toolpath.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append one discretized ring or arc.
    pub fn append(&mut self, ring: Vec<MotionNode>) {
        self.nodes.extend(ring);
    }

    /// Nodes in traversal order.
    pub fn nodes(&self) -> &[MotionNode] {
        &self.nodes
    }

    /// Iterate nodes in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, MotionNode> {
        self.nodes.iter()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// First node.
    pub fn start(&self) -> Option<&MotionNode> {
        self.nodes.first()
    }

    /// Last node.
    pub fn end(&self) -> Option<&MotionNode> {
        self.nodes.last()
    }

    /// Split the path back into rings/arcs. Each one begins at a rapid move.
    pub fn rings(&self) -> Vec<&[MotionNode]> {
        let mut rings = Vec::new();
        let mut start = 0;
        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            if node.is_rapid() {
                rings.push(&self.nodes[start..i]);
                start = i;
            }
        }
        if start < self.nodes.len() {
            rings.push(&self.nodes[start..]);
        }
        rings
    }

    /// Compute summary statistics.
    pub fn stats(&self) -> PathStats {
        let mut bounds_min = [f64::INFINITY; 3];
        let mut bounds_max = [f64::NEG_INFINITY; 3];
        for node in &self.nodes {
            let p = node.position;
            for (axis, v) in [p.x, p.y, p.z].into_iter().enumerate() {
                bounds_min[axis] = bounds_min[axis].min(v);
                bounds_max[axis] = bounds_max[axis].max(v);
            }
        }
        if self.nodes.is_empty() {
            bounds_min = [0.0; 3];
            bounds_max = [0.0; 3];
        }

        let extrusion_length = self
            .nodes
            .windows(2)
            .filter(|w| !w[1].is_rapid())
            .map(|w| (w[1].position - w[0].position).norm())
            .sum();

        PathStats {
            node_count: self.nodes.len(),
            ring_count: self.rings().len(),
            extrusion_length,
            total_extrusion: self.nodes.iter().filter_map(|n| n.extrusion).sum(),
            bounds_min,
            bounds_max,
        }
    }
}

impl<'a> IntoIterator for &'a Toolpath {
    type Item = &'a MotionNode;
    type IntoIter = std::slice::Iter<'a, MotionNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// Statistics about a generated toolpath.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStats {
    /// Total number of nodes.
    pub node_count: usize,
    /// Number of rings/arcs (rapid moves).
    pub ring_count: usize,
    /// Distance covered by extruding moves (mm).
    pub extrusion_length: f64,
    /// Sum of all extrusion amounts.
    pub total_extrusion: f64,
    /// Bounding box min corner.
    pub bounds_min: [f64; 3],
    /// Bounding box max corner.
    pub bounds_max: [f64; 3],
}
