//! Application orchestrator.
//! Loads and merges config, initializes logging, installs the Ctrl-C handler,
//! builds the host collaborators and runs the zap through the menu handler.

use anyhow::{Context, Result};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use level_zap::cli::Args;
use level_zap::config::{CONFIG_ENV, LoadResult, load_or_init};
use level_zap::host::{AssumeYes, Confirm, NativeFileOps, TerminalConfirm, UuidTokens};
use level_zap::output as out;
use level_zap::{ContextMenuHandler, ResultCode, Zapper, default_config_path, shutdown};

use crate::logging::init_tracing;

/// Run the CLI application and return the process exit status.
pub fn run(args: Args) -> Result<ExitCode> {
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }

    let mut cfg = match load_or_init()? {
        LoadResult::Loaded(cfg) | LoadResult::Defaults(cfg) => cfg,
        LoadResult::CreatedTemplate(path, cfg) => {
            out::print_success(&format!("A template level_zap config was written to: {}", path.display()));
            out::print_info("Edit it to set `meta_dir`, `meta_files`, `prompt_user`, `log_level` and `log_file`.");
            cfg
        }
    };
    args.apply_overrides(&mut cfg);
    cfg.validate().context("invalid configuration")?;

    let guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("failed to initialize logging")?;

    // Held here and dropped by the Ctrl-C handler so file logs get flushed.
    let guard_slot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Interrupted; stopping after the current folder...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!(?args, meta_dir = %cfg.meta_dir, meta_files = %cfg.meta_extensions, "Starting level_zap");

    let silent = args.no_ui;
    let terminal = TerminalConfirm;
    let confirm: &dyn Confirm = if silent { &AssumeYes } else { &terminal };
    let files = if silent {
        NativeFileOps::silent()
    } else {
        NativeFileOps::new(Box::new(TerminalConfirm))
    };
    let tokens = UuidTokens;
    let zapper = Zapper::new(&cfg, confirm, &files, &tokens)
        .silent(silent)
        .assume_yes(args.yes);

    let mut handler = ContextMenuHandler::new();
    let populated = handler.initialize(args.resolved_folders()).is_ok() && handler.query_context_menu(0);
    let code = if !populated {
        out::print_error("Nothing selected to zap.");
        ResultCode::InvalidArgument
    } else {
        match handler.invoke(0, &zapper, args.recursive) {
            Ok(report) => {
                out::print_report(&report);
                let code = report.result_code();
                info!(folders = report.len(), result = ?code, "Zap finished");
                code
            }
            Err(code) => code,
        }
    };

    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }
    Ok(exit_code(code))
}

fn exit_code(code: ResultCode) -> ExitCode {
    ExitCode::from(u8::try_from(code.exit_code()).unwrap_or(1))
}

fn print_config_location() {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {explicit}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or point it at another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default level_zap config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run level_zap once to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}
