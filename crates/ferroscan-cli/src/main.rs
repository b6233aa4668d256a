use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ferroscan_nvt::default_classes;
use ferroscan_plugin_scanner::{ClassRegistry, Scanner};
use ferroscan_plugins::RawSocket;
use ferroscan_prefs::Preferences;

#[derive(Parser, Debug)]
#[command(
    name = "ferroscan-cli",
    about = "Plugin loading tools for the Ferroscan scanner"
)]
struct Args {
    /// Path to the scanner preferences file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured plugins folder.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Suppress progress output while loading.
    #[arg(long)]
    quiet: bool,

    /// Bind this descriptor to every loaded plugin record.
    #[arg(long)]
    socket: Option<RawSocket>,

    /// Print the loaded records as JSON instead of plain lines.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .ok();

    let args = Args::parse();

    let mut prefs = match &args.config {
        Some(path) => Preferences::from_file(path)
            .with_context(|| format!("failed to load preferences from {}", path.display()))?,
        None => Preferences::new(),
    };
    if let Some(folder) = &args.folder {
        prefs.set("plugins_folder", folder.display().to_string());
    }
    let prefs = Arc::new(prefs);

    let scanner = Scanner::new(ClassRegistry::new(default_classes()));
    let mut plugins = scanner.init_collection(&prefs, args.quiet);

    if let Some(socket) = args.socket {
        plugins.set_socket_all(socket);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plugins)?);
    } else {
        for record in &plugins {
            let class = record.class().map(|tag| tag.name()).unwrap_or("unknown");
            println!("{} ({}) {}", record.name(), class, record.path().display());
        }
    }

    plugins.free();
    Ok(())
}
