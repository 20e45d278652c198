//! Deterministic coordinate assignment.
//!
//! Rows are generations, processed in ascending order; within a row,
//! family units are clustered left to right in encounter order and
//! everyone else is placed behind them with collision avoidance. Manual
//! overrides always win and survive recomputation until cleared. Layout
//! never fails: unresolvable input has already been repaired upstream.

mod edges;
mod paths;
pub(crate) mod types;

pub use edges::derive_edges;
pub use types::*;

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;

use crate::config::LayoutConfig;
use crate::ir::{FamilyUnit, Person};

/// Assign an (x, y) to every person. Pure: returns a new list, identical
/// inputs (including `overrides`) produce identical output.
pub fn compute_layout(
    persons: &[Person],
    families: &[FamilyUnit],
    overrides: &OverrideMap,
    config: &LayoutConfig,
) -> Vec<Person> {
    let mut placed: Vec<Person> = persons.to_vec();
    let index: HashMap<String, usize> = placed
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();

    // Input order within each generation is preserved.
    let mut generations: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, person) in placed.iter().enumerate() {
        generations.entry(person.generation).or_default().push(i);
    }

    for (&generation, members) in &generations {
        let row_y = config.initial_y + (generation - 1) as f32 * config.generation_spacing;
        let mut cursor = config.initial_x;
        // Applied x positions in this row so far, for collision checks.
        let mut row_xs: Vec<f32> = Vec::new();
        let mut clustered: HashSet<usize> = HashSet::new();

        for family in families {
            // A person already clustered by an earlier unit in this row
            // keeps that position; remarriage must not re-place the couple.
            let row_parents: Vec<usize> = family
                .parents
                .iter()
                .filter_map(|id| index.get(id).copied())
                .filter(|&i| placed[i].generation == generation && !clustered.contains(&i))
                .take(2)
                .collect();

            match row_parents[..] {
                [parent] => {
                    let x = apply_position(&mut placed, parent, overrides, (cursor, row_y));
                    row_xs.push(x);
                    clustered.insert(parent);
                    cursor += config.min_family_spacing;
                }
                [first, second] => {
                    let x1 = apply_position(&mut placed, first, overrides, (cursor, row_y));
                    let x2 = apply_position(
                        &mut placed,
                        second,
                        overrides,
                        (cursor + config.spouse_spacing, row_y),
                    );
                    row_xs.push(x1);
                    row_xs.push(x2);
                    clustered.insert(first);
                    clustered.insert(second);
                    cursor += config.spouse_spacing + config.min_family_spacing;
                }
                _ => {}
            }
        }

        let mut unaffiliated = 0usize;
        for &i in members {
            if clustered.contains(&i) {
                continue;
            }
            let mut proposed = cursor;
            while row_xs
                .iter()
                .any(|&x| (x - proposed).abs() < config.card_spacing)
            {
                proposed += config.card_spacing;
            }
            let x = apply_position(&mut placed, i, overrides, (proposed, row_y));
            row_xs.push(x);
            cursor = proposed + config.card_spacing;
            unaffiliated += 1;
        }

        debug!(
            "layout: generation {generation}: {} clustered, {unaffiliated} unaffiliated",
            clustered.len()
        );
    }

    placed
}

/// Set a person's position: the manual override if present, otherwise the
/// computed fallback. Returns the x actually applied.
fn apply_position(
    persons: &mut [Person],
    idx: usize,
    overrides: &OverrideMap,
    fallback: (f32, f32),
) -> f32 {
    let person = &mut persons[idx];
    let (x, y) = overrides.get(&person.id).copied().unwrap_or(fallback);
    person.x = x;
    person.y = y;
    x
}

/// Bounding box of the positioned cards, padded to the card edges.
pub fn bounds(persons: &[Person], config: &LayoutConfig) -> Bounds {
    if persons.is_empty() {
        return Bounds::default();
    }
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for person in persons {
        min_x = min_x.min(person.x);
        max_x = max_x.max(person.x);
        min_y = min_y.min(person.y);
        max_y = max_y.max(person.y);
    }
    Bounds {
        min_x: min_x - config.card_width / 2.0,
        max_x: max_x + config.card_width / 2.0,
        min_y: min_y - config.card_height / 2.0,
        max_y: max_y + config.card_height / 2.0,
    }
}
