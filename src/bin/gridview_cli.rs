//! CLI tool for gridview - lays out a grid from a JSON config and outputs JSON
//!
//! Usage:
//!   gridview_cli <config.json>                          # 15 x 8 grid, JSON to stdout
//!   gridview_cli <config.json> --rows 100 --columns 20  # Custom dimensions
//!   gridview_cli <config.json> -o layout.json           # Output JSON to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use gridview::{ColumnStore, ConfigHost, GridConfig, GridView, Result};

const USAGE: &str = "Usage: gridview_cli <config.json> [--rows N] [--columns N] [-o output.json]";

#[derive(Debug, PartialEq)]
struct Options {
    input_path: String,
    rows: usize,
    columns: usize,
    output_path: Option<String>,
}

fn flag_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a String> {
    value.ok_or_else(|| format!("{flag} expects a value\n{USAGE}").into())
}

fn parse_count(flag: &str, value: Option<&String>) -> Result<usize> {
    flag_value(flag, value)?
        .parse::<usize>()
        .map_err(|_| format!("{flag} expects a non-negative integer\n{USAGE}").into())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let Some(input_path) = args.get(1) else {
        return Err(USAGE.into());
    };
    let mut options = Options {
        input_path: input_path.clone(),
        rows: 15,
        columns: 8,
        output_path: None,
    };

    let mut i = 2;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--rows" => options.rows = parse_count("--rows", value)?,
            "--columns" => options.columns = parse_count("--columns", value)?,
            "-o" => options.output_path = Some(flag_value("-o", value)?.clone()),
            other => return Err(format!("Unknown argument: {other}\n{USAGE}").into()),
        }
        i += 2;
    }
    Ok(options)
}

fn run(options: &Options) -> Result<()> {
    // Read config
    let text = fs::read_to_string(&options.input_path)?;
    let config = GridConfig::from_json(&text)?;

    // Lay out
    let (rows, columns) = (options.rows, options.columns);
    let host = ConfigHost::new(config, ColumnStore::sample(rows, columns));
    let mut grid = GridView::new(host);
    grid.reload();
    let Some(layout) = grid.layout() else {
        return Err(format!("Grid is empty ({rows} rows x {columns} columns)").into());
    };

    // Serialize to JSON
    let json = serde_json::to_string_pretty(&layout.snapshot())
        .map_err(|e| format!("Error serializing JSON: {e}"))?;

    // Output
    match &options.output_path {
        Some(path) => {
            fs::write(path, &json)?;
            let size = layout.content_size();
            eprintln!("Written: {} ({} x {})", path, size.width, size.height);
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(json.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let result = parse_args(&args).and_then(|options| run(&options));
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
