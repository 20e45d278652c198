//! JSON dump of a positioned tree, for inspection and golden tests.

use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::LayoutConfig;
use crate::ir::Person;
use crate::layout::{self, Bounds, EdgeSet, Line};

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub persons: Vec<PersonDump>,
    pub marriage_lines: Vec<MarriageLineDump>,
    pub parent_child_lines: Vec<ParentChildLineDump>,
    pub sibling_lines: Vec<LineDump>,
    pub bounds: BoundsDump,
}

#[derive(Debug, Serialize)]
pub struct PersonDump {
    pub id: String,
    pub display_name: String,
    pub generation: i32,
    pub sex: String,
    pub x: f32,
    pub y: f32,
    pub is_uncertain: bool,
}

#[derive(Debug, Serialize)]
pub struct LineDump {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

#[derive(Debug, Serialize)]
pub struct MarriageLineDump {
    pub parents: (String, String),
    pub line: LineDump,
    pub path_a: String,
    pub path_b: String,
}

#[derive(Debug, Serialize)]
pub struct ParentChildLineDump {
    pub family_id: String,
    pub child_id: String,
    pub line: LineDump,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct BoundsDump {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl From<Line> for LineDump {
    fn from(line: Line) -> Self {
        Self {
            x1: line.x1,
            y1: line.y1,
            x2: line.x2,
            y2: line.y2,
        }
    }
}

impl From<Bounds> for BoundsDump {
    fn from(bounds: Bounds) -> Self {
        Self {
            min_x: bounds.min_x,
            max_x: bounds.max_x,
            min_y: bounds.min_y,
            max_y: bounds.max_y,
        }
    }
}

impl LayoutDump {
    pub fn from_layout(persons: &[Person], edges: &EdgeSet, config: &LayoutConfig) -> Self {
        let person_dumps = persons
            .iter()
            .map(|p| PersonDump {
                id: p.id.clone(),
                display_name: p.display_name.clone(),
                generation: p.generation,
                sex: p.sex.as_str().to_string(),
                x: p.x,
                y: p.y,
                is_uncertain: p.is_uncertain,
            })
            .collect();

        let marriage_lines = edges
            .marriage_lines
            .iter()
            .map(|m| MarriageLineDump {
                parents: m.parents.clone(),
                line: m.line.into(),
                path_a: m.path_a.clone(),
                path_b: m.path_b.clone(),
            })
            .collect();

        let parent_child_lines = edges
            .parent_child_lines
            .iter()
            .map(|p| ParentChildLineDump {
                family_id: p.family_id.clone(),
                child_id: p.child_id.clone(),
                line: p.line.into(),
                path: p.path.clone(),
            })
            .collect();

        let sibling_lines = edges.sibling_lines.iter().map(|&l| l.into()).collect();

        LayoutDump {
            persons: person_dumps,
            marriage_lines,
            parent_child_lines,
            sibling_lines,
            bounds: layout::bounds(persons, config).into(),
        }
    }

    pub fn write(&self, output: Option<&Path>) -> anyhow::Result<()> {
        match output {
            Some(path) => {
                let file = File::create(path)?;
                serde_json::to_writer_pretty(BufWriter::new(file), self)?;
            }
            None => {
                println!("{}", serde_json::to_string_pretty(self)?);
            }
        }
        Ok(())
    }
}
