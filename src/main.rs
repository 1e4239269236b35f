//! PlanWise - AI-assisted task planning for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = planwise::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
