//! CLI tool for gridcore - replays a navigation scenario and prints the trace
//!
//! Usage:
//!   gridcore_cli <scenario.json>              # Output JSON to stdout
//!   gridcore_cli <scenario.json> -o out.json  # Output JSON to file
//!
//! Scenario format:
//! ```json
//! {
//!   "rows": 5, "cols": 5,
//!   "settings": { "autoWrapRow": true },
//!   "hiddenRows": [2],
//!   "select": { "row": 0, "col": 0 },
//!   "keys": [{ "key": "ArrowRight" }, { "key": "Tab", "shift": true }]
//! }
//! ```
//!
//! Set `RUST_LOG=gridcore=trace` to see each transformation.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::cell::RefCell;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use gridcore::focus::{FocusCoordinator, FocusDecision};
use gridcore::viewer::action_for_key;
use gridcore::{CellCoords, Grid, GridEvent, GridSettings, LayerKind, SelectionRange};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scenario {
    rows: usize,
    cols: usize,
    #[serde(default)]
    settings: GridSettings,
    #[serde(default)]
    hidden_rows: Vec<usize>,
    #[serde(default)]
    hidden_cols: Vec<usize>,
    select: CellCoords,
    #[serde(default)]
    keys: Vec<KeyPress>,
}

#[derive(Deserialize)]
struct KeyPress {
    key: String,
    #[serde(default)]
    ctrl: bool,
    #[serde(default)]
    shift: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Step {
    key: String,
    selection: Option<SelectionRange>,
    focus: Option<FocusDecision>,
    events: Vec<GridEvent>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: gridcore_cli <scenario.json> [-o output.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let scenario: Scenario = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scenario: {}", e);
            std::process::exit(1);
        }
    };

    let steps = match run(scenario) {
        Ok(steps) => steps,
        Err(e) => {
            eprintln!("Error running scenario: {}", e);
            std::process::exit(1);
        }
    };

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&steps) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

fn run(scenario: Scenario) -> gridcore::Result<Vec<Step>> {
    let mut grid = Grid::new(scenario.rows, scenario.cols, scenario.settings);
    hide(&mut grid, true, &scenario.hidden_rows)?;
    hide(&mut grid, false, &scenario.hidden_cols)?;

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    grid.add_hook(move |event| sink.borrow_mut().push(*event));

    if !grid.select_cell(scenario.select) {
        return Err(format!("cannot select {:?}", scenario.select).into());
    }

    let mut focus = FocusCoordinator::new();
    let mut steps = Vec::with_capacity(scenario.keys.len());
    for press in &scenario.keys {
        let decision = if press.key == "Tab" && !press.ctrl {
            Some(focus.handle_tab(&mut grid, press.shift).1)
        } else {
            if let Some(action) = action_for_key(&press.key, press.ctrl, press.shift) {
                grid.apply(action);
            }
            None
        };

        steps.push(Step {
            key: press.key.clone(),
            selection: grid.selected_range(),
            focus: decision,
            events: events.borrow_mut().drain(..).collect(),
        });
        if decision == Some(FocusDecision::Release) {
            break;
        }
    }
    Ok(steps)
}

fn hide(grid: &mut Grid, rows: bool, visual: &[usize]) -> gridcore::Result<()> {
    if visual.is_empty() {
        return Ok(());
    }
    let mapper = if rows {
        grid.row_mapper_mut()
    } else {
        grid.column_mapper_mut()
    };
    mapper.register_layer("hidden", LayerKind::Hiding, false)?;
    for &index in visual {
        mapper.hide_visual("hidden", index, true)?;
    }
    Ok(())
}
