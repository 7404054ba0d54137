use std::process::ExitCode;

use clap::Parser;
use vvtrans::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("VVTRANS_LOG", "warn"))
        .format_timestamp(None)
        .init();

    let args = Arguments::parse();

    if matches!(args.command, Some(Command::Serve)) {
        if let Err(err) = vvtrans::mcp::run_server() {
            eprintln!("Error: {:#}", err);
            return ExitStatus::Error.into();
        }
        return ExitStatus::Success.into();
    }

    match vvtrans::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
