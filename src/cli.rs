use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::config::load_config;
use crate::dump::LayoutDump;
use crate::interchange::FamilyTreeData;
use crate::layout::{compute_layout, derive_edges, OverrideMap};
use crate::normalize::normalize;
use crate::render::{render_svg, write_output_svg};

#[derive(Parser, Debug)]
#[command(name = "ftree", version, about = "Family tree layout and rendering")]
pub struct Args {
    /// Input file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (layout, history, theme overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    /// Positioned persons and derived lines as JSON.
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let data = FamilyTreeData::from_json(&input)?;
    let snapshot = normalize(&data, &config.data);

    let placed = compute_layout(
        &snapshot.persons,
        &snapshot.families,
        &OverrideMap::new(),
        &config.layout,
    );
    let edges = derive_edges(&placed, &snapshot.families, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&placed, &edges, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            let dump = LayoutDump::from_layout(&placed, &edges, &config.layout);
            dump.write(args.output.as_deref())?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
