use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = level_zap::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            level_zap::output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
