use std::process::ExitCode;

fn main() -> ExitCode {
    stocky_cli::run()
}
