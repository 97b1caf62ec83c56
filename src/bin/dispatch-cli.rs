use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fs_dispatch::config::{load_config, AppConfig};
use fs_dispatch::dispatch::{Dispatch, LiveDispatcher, TreeDispatcher};
use fs_dispatch::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "dispatch-cli")]
#[command(about = "Inspect how a www root dispatches request paths", long_about = None)]
struct Cli {
    /// Configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// www root, overriding the configuration.
    #[arg(short, long)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a request path and print the result as JSON
    Resolve {
        /// Raw request path, e.g. `/blog/2024/hello.html`
        path: String,

        /// Consult the filesystem directly instead of building a tree
        #[arg(long)]
        live: bool,
    },
    /// Print the routing tree
    Tree,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(root) = cli.root {
        config.dispatch.www_root = root;
    }
    init_logging("warn");
    let options = config.dispatch.to_options();

    match cli.command {
        Commands::Resolve { path, live } => {
            let result = if live {
                LiveDispatcher::new(options)?.dispatch_raw(&path)
            } else {
                TreeDispatcher::build(&options)?.dispatch_raw(&path)
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Tree => {
            let tree = TreeDispatcher::build(&options)?;
            println!("{}/", tree.www_root().display());
            print!("{}", tree.tree().outline());
        }
    }

    Ok(())
}
