#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use budgets::cli::{parse_cli_args, suggest_commands, CliAction, CliError, HELP_TEXT};
use budgets::error::{code, get_error_info};
use serde_json::{json, Value};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

const CLI_EXIT_CODE: u8 = 1;

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let action = match parse_cli_args(&args) {
        Ok(action) => action,
        Err(err) => return report_cli_error(&err),
    };

    match action {
        CliAction::ShowHelp => {
            println!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        CliAction::ShowVersion => {
            println!("budgets {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        CliAction::Command(command) => match command.execute() {
            Ok(output) => print_json(&output),
            Err(err) => {
                let fix = get_error_info(err.code()).map(|(_, fix)| fix);
                print_error(&json!({
                    "code": err.code(),
                    "message": err.to_string(),
                    "fix": fix,
                }));
                ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(u8::MAX))
            }
        },
    }
}

fn report_cli_error(err: &CliError) -> ExitCode {
    let suggestions = match err {
        CliError::UnknownCommand { cmd } => suggest_commands(cmd),
        _ => Vec::new(),
    };
    print_error(&json!({
        "code": code::CLI_ERROR,
        "message": err.to_string(),
        "suggestions": suggestions,
    }));
    ExitCode::from(CLI_EXIT_CODE)
}

fn print_json(value: &Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("Failed to render output: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_error(error: &Value) {
    eprintln!("{}", json!({ "ok": false, "error": error }));
}
