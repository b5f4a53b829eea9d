use clap::{Parser, Subcommand};
use uifed::commands::{build, check, init};
use uifed::common::GlobalOpts;
use uifed::logger;

#[derive(Parser)]
#[command(name = "uifed")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Plugin UI federation build tool",
    long_about = "uifed turns a plugin's UI capability declaration into the manifest and module-federation artifacts consumed by the host application."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the manifest and federation artifacts
    Build(build::BuildArgs),
    /// Validate the declaration without writing anything
    Check(check::CheckArgs),
    /// Create a starter declaration file
    Init(init::InitArgs),
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.global.verbosity_level());

    match cli.command {
        Commands::Build(args) => {
            if let Err(e) = build::handle_build(args, &cli.global) {
                logger::error(&format!("Build failed: {:#}", e));
                std::process::exit(1);
            }
        }
        Commands::Check(args) => {
            if let Err(e) = check::handle_check(args, &cli.global) {
                logger::error(&format!("Check failed: {:#}", e));
                std::process::exit(1);
            }
        }
        Commands::Init(args) => {
            if let Err(e) = init::handle_init(args, &cli.global) {
                logger::error(&format!("Init failed: {:#}", e));
                std::process::exit(1);
            }
        }
    }
}
