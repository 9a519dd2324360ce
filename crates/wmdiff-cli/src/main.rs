//! wmdiff: compare webMethods IS assets between branches or local folders

use clap::Parser;
use wmdiff_cli::commands::{self, RunOptions};
use wmdiff_cli::logging::setup_logging;
use wmdiff_cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.log_dir.as_deref())?;

    let options = RunOptions {
        report_dir: cli.report_dir,
        format: cli.format.into(),
        parallel: cli.parallel,
    };

    match cli.command {
        Commands::Branches {
            repo,
            base,
            head,
            workdir,
        } => {
            commands::branches::run(&repo, &base, &head, &workdir, &options)?;
        }
        Commands::Local {
            repo,
            branch,
            packages,
            properties,
            workdir,
        } => {
            commands::local::run(
                &repo,
                &branch,
                packages.as_deref(),
                properties.as_deref(),
                &workdir,
                &options,
            )?;
        }
    }

    Ok(())
}
