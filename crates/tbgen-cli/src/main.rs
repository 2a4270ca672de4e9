// crates/tbgen-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use std::process::ExitCode;

use anyhow::Result;
use tbgen_cli::{
    cli::{diagnostic, exit_code, parse_args, Cli},
    config::RunConfig,
    run,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    init_tracing();

    let cli = match parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => {
            let code = exit_code(&err);
            if code == 0 {
                // Help and version go to stdout; nothing useful to do if that write fails.
                err.print().ok();
            } else {
                eprint!("{}", diagnostic(&err));
            }
            return ExitCode::from(code);
        }
    };

    match dispatch(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn dispatch(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.verify_manifest {
        let n = run::verify(path)?;
        println!("OK: {n} cases in {} match the resolver", path.display());
        return Ok(());
    }

    let cfg = RunConfig::from_cli(cli)?;
    let summary = run::generate(&cfg)?;
    println!(
        "Generated {} test benches in {} (seed {})",
        summary.files.len(),
        cfg.directory.display(),
        summary.seed
    );
    Ok(())
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
