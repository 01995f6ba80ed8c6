//! Binary entrypoint for the `reposcope` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();

    match reposcope::run(std::env::args_os()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
