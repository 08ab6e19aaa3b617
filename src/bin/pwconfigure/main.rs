//! pwconfigure CLI - writes Makefile.conf for the make-based build

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use pwconfigure::util::diagnostic::emit;
use pwconfigure::util::Shell;
use pwconfigure::{configure, ConfigureEnv, ConfigureError, ShellProbe};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("pwconfigure=debug")
    } else {
        EnvFilter::new("pwconfigure=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut shell = Shell::new(cli.color);

    if let Err(e) = run(&cli, &mut shell) {
        match e.downcast_ref::<ConfigureError>() {
            Some(err) => emit(&err.to_diagnostic(), shell.use_color()),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli, shell: &mut Shell) -> Result<()> {
    let root = std::env::current_dir().context("failed to determine current directory")?;
    let env = ConfigureEnv::detect(root);
    let probe = ShellProbe::new(env.config.shell()).in_dir(&env.root);

    tracing::debug!("probing with `{}` in {}", probe.shell().display(), env.root.display());

    configure(&cli.options(), &env, &probe, shell)?;

    shell.line("Configure complete.");
    Ok(())
}
