use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use swapx::cli::swap::SwapArgs;
use swapx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for swapx::AppCommand {
    fn from(cmd: Commands) -> swapx::AppCommand {
        match cmd {
            Commands::List { exclude } => swapx::AppCommand::List { exclude },
            Commands::Swap {
                amount,
                from,
                to,
                assume_unit,
            } => swapx::AppCommand::Swap(SwapArgs {
                amount,
                from,
                to,
                assume_unit,
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the currencies available in the price catalog
    List {
        /// Hide this currency code from the listing
        #[arg(long)]
        exclude: Option<String>,
    },
    /// Convert an amount from one currency into another
    Swap {
        /// Amount to send, a non-negative decimal number
        amount: String,
        /// Source currency code; defaults to the first catalog entry
        #[arg(long)]
        from: Option<String>,
        /// Target currency code; defaults to the second catalog entry
        #[arg(long)]
        to: Option<String>,
        /// Price currencies missing from the catalog at 1 instead of failing
        #[arg(long)]
        assume_unit: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => swapx::cli::setup::setup(),
        Some(cmd) => swapx::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
