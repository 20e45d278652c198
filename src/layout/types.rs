use std::collections::BTreeMap;

/// Manual position overrides keyed by person id. An entry always wins over
/// the computed layout until explicitly cleared.
pub type OverrideMap = BTreeMap<String, (f32, f32)>;

/// Straight segment between two card centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// A marriage connection: the direct segment between the two parents plus
/// the two parallel offset path strings it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct MarriageLine {
    pub line: Line,
    /// Parent pair in canonical (sorted) order, used for de-duplication.
    pub parents: (String, String),
    pub path_a: String,
    pub path_b: String,
}

/// A parent-centroid to child connection with its rounded L-path.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentChildLine {
    pub line: Line,
    pub family_id: String,
    pub child_id: String,
    pub path: String,
}

/// The full drawable edge set derived from one positioned snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSet {
    pub marriage_lines: Vec<MarriageLine>,
    pub parent_child_lines: Vec<ParentChildLine>,
    /// Sibling connectors: the horizontal bar followed by one vertical stub
    /// per child, per family unit with two or more children.
    pub sibling_lines: Vec<Line>,
}

/// Bounding box of the positioned cards, for viewport fitting.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}
