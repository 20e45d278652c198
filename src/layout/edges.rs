//! Relationship edge derivation over an already-positioned person list.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::ir::{FamilyUnit, Person};

use super::paths::{double_line_paths, l_shaped_path};
use super::{EdgeSet, Line, MarriageLine, ParentChildLine};

/// Card-edge clearance for parent-child lines: the line leaves 20px below
/// the parent centroid and arrives 20px above the child center.
const PARENT_CHILD_CLEARANCE: f32 = 20.0;
/// Height of the sibling bar above the topmost child center.
const SIBLING_BAR_RISE: f32 = 50.0;
/// Where a sibling stub stops short of the child card.
const SIBLING_STUB_CLEARANCE: f32 = 30.0;

/// Derive the three drawable line sets from positioned persons and their
/// family units. Purely positional: never mutates the inputs.
pub fn derive_edges(
    persons: &[Person],
    families: &[FamilyUnit],
    config: &LayoutConfig,
) -> EdgeSet {
    let by_id: HashMap<&str, &Person> = persons.iter().map(|p| (p.id.as_str(), p)).collect();

    let mut edges = EdgeSet::default();
    // Remarriage after divorce can reference the same couple from two
    // units; a parent pair yields at most one marriage line.
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();

    for family in families {
        derive_marriage(family, &by_id, config, &mut seen_pairs, &mut edges);
        derive_parent_child(family, &by_id, config, &mut edges);
        derive_siblings(family, &by_id, &mut edges);
    }

    edges
}

fn derive_marriage(
    family: &FamilyUnit,
    by_id: &HashMap<&str, &Person>,
    config: &LayoutConfig,
    seen_pairs: &mut HashSet<(String, String)>,
    edges: &mut EdgeSet,
) {
    if family.parents.len() < 2 {
        return;
    }
    // Units with more than two parents are not a modeled case; the couple
    // rule applies to the first two.
    let (Some(a), Some(b)) = (
        by_id.get(family.parents[0].as_str()),
        by_id.get(family.parents[1].as_str()),
    ) else {
        return;
    };

    let key = canonical_pair(&a.id, &b.id);
    if !seen_pairs.insert(key.clone()) {
        return;
    }

    let line = Line {
        x1: a.x,
        y1: a.y,
        x2: b.x,
        y2: b.y,
    };
    let (path_a, path_b) = double_line_paths(line, config.corner_radius);
    edges.marriage_lines.push(MarriageLine {
        line,
        parents: key,
        path_a,
        path_b,
    });
}

fn derive_parent_child(
    family: &FamilyUnit,
    by_id: &HashMap<&str, &Person>,
    config: &LayoutConfig,
    edges: &mut EdgeSet,
) {
    if family.children.is_empty() {
        return;
    }
    let parents: Vec<&Person> = family
        .parents
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect();
    if parents.is_empty() {
        return;
    }

    // Lines fan out from the arithmetic centroid of all parents, not from
    // each parent individually.
    let center_x = parents.iter().map(|p| p.x).sum::<f32>() / parents.len() as f32;
    let center_y = parents.iter().map(|p| p.y).sum::<f32>() / parents.len() as f32;

    for child_id in &family.children {
        let Some(child) = by_id.get(child_id.as_str()) else {
            continue;
        };
        let line = Line {
            x1: center_x,
            y1: center_y + PARENT_CHILD_CLEARANCE,
            x2: child.x,
            y2: child.y - PARENT_CHILD_CLEARANCE,
        };
        edges.parent_child_lines.push(ParentChildLine {
            line,
            family_id: family.id.clone(),
            child_id: child.id.clone(),
            path: l_shaped_path(line, config.corner_radius),
        });
    }
}

fn derive_siblings(family: &FamilyUnit, by_id: &HashMap<&str, &Person>, edges: &mut EdgeSet) {
    if family.children.len() < 2 {
        return;
    }
    let mut children: Vec<&Person> = family
        .children
        .iter()
        .filter_map(|id| by_id.get(id.as_str()).copied())
        .collect();
    if children.len() < 2 {
        return;
    }

    // Left to right; equal x falls back to birth-date order with dated
    // children first, and a stable sort preserves input order past that.
    children.sort_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (&a.birth.date, &b.birth.date) {
                (Some(da), Some(db)) => da.cmp(db),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });

    let bar_y = children
        .iter()
        .map(|c| c.y)
        .fold(f32::INFINITY, f32::min)
        - SIBLING_BAR_RISE;

    edges.sibling_lines.push(Line {
        x1: children[0].x,
        y1: bar_y,
        x2: children[children.len() - 1].x,
        y2: bar_y,
    });
    for child in &children {
        edges.sibling_lines.push(Line {
            x1: child.x,
            y1: bar_y,
            x2: child.x,
            y2: child.y - SIBLING_STUB_CLEARANCE,
        });
    }
}

fn canonical_pair(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
