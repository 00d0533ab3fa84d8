//! Phasor - Steady-State Circuit Solver
//!
//! Solves a JSON circuit description for its DC or single-frequency AC
//! steady state, or exports the same topology as a SPICE-style netlist.
//!
//! # Usage
//!
//! ```bash
//! phasor solve circuit.json
//! phasor netlist circuit.json --out netlists/output.txt
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use phasor_core::{
    error::{PhasorError, Result},
    netlist::render_netlist,
    schema::{CircuitRequest, NetlistResponse, SimulateResponse},
    solve_circuit,
    topology::NodeMap,
};

/// Steady-state linear circuit solver
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the circuit and print node voltages and branch quantities
    Solve {
        /// Path to the circuit description file (JSON)
        #[arg(value_name = "CIRCUIT_FILE")]
        circuit_file: PathBuf,
    },
    /// Export the circuit topology as a SPICE-style netlist
    Netlist {
        /// Path to the circuit description file (JSON)
        #[arg(value_name = "CIRCUIT_FILE")]
        circuit_file: PathBuf,

        /// Output path for the netlist
        #[arg(short, long, default_value = "netlists/output.txt")]
        out: PathBuf,
    },
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let outcome = match args.command {
        Command::Solve { circuit_file } => run_solve(&circuit_file),
        Command::Netlist { circuit_file, out } => run_netlist(&circuit_file, &out),
    };

    if let Err(error) = outcome {
        let response = SimulateResponse::from_error(&error);
        // The error response is itself plain data; fall back to Display if
        // even that fails to serialize.
        match serde_json::to_string_pretty(&response) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{error}"),
        }
        std::process::exit(1);
    }
}

fn load_request(path: &PathBuf) -> Result<CircuitRequest> {
    let contents = std::fs::read_to_string(path).map_err(|source| PhasorError::FileRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&contents)?)
}

fn run_solve(path: &PathBuf) -> Result<()> {
    let circuit = load_request(path)?.into_circuit()?;
    let solution = solve_circuit(&circuit)?;
    let response = SimulateResponse::from_solution(&solution);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_netlist(path: &PathBuf, out: &PathBuf) -> Result<()> {
    let circuit = load_request(path)?.into_circuit()?;
    let node_map = NodeMap::build(&circuit);
    let lines = render_netlist(&circuit, &node_map);

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| PhasorError::FileWrite {
                path: out.display().to_string(),
                source,
            })?;
        }
    }

    let mut contents = lines.join("\n");
    contents.push('\n');
    std::fs::write(out, contents).map_err(|source| PhasorError::FileWrite {
        path: out.display().to_string(),
        source,
    })?;

    let response = NetlistResponse {
        status: "success".to_string(),
        netlist_path: out.display().to_string(),
        line_count: lines.len(),
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
