#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod dialogs;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Global public assets directory, set from command line
static ASSETS_DIR: OnceLock<PathBuf> = OnceLock::new();

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardforge")
}

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR.get().cloned().unwrap_or_else(default_data_dir)
}

/// Get the assets directory holding `models/cards` and `models/icons`
pub fn get_assets_dir() -> PathBuf {
    ASSETS_DIR
        .get()
        .cloned()
        .unwrap_or_else(|| PathBuf::from("public"))
}

/// cardforge - local card and tutorial page designer
#[derive(Parser, Debug)]
#[command(name = "cardforge-desktop")]
#[command(about = "cardforge - design cards and tutorial pages, locally")]
struct Args {
    /// Data directory for storage (use different dirs for multiple instances)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Public assets directory (card backgrounds and icon catalog)
    #[arg(short, long, default_value = "public")]
    assets_dir: PathBuf,

    /// Instance name (creates data dir: cardforge-<name>)
    #[arg(short, long)]
    name: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Determine data directory and display name
    let (data_dir, display_name) = if let Some(dir) = args.data_dir {
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("custom")
            .to_string();
        (dir, name)
    } else if let Some(ref name) = args.name {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(format!("cardforge-{}", name));
        (base, name.clone())
    } else {
        (default_data_dir(), String::new())
    };

    let _ = DATA_DIR.set(data_dir.clone());
    let _ = ASSETS_DIR.set(args.assets_dir.clone());

    let title = if !display_name.is_empty() {
        format!("cardforge - {}", display_name)
    } else {
        "cardforge".to_string()
    };

    tracing::info!(
        "Starting '{}' with data dir: {:?}, assets: {:?}",
        display_name,
        data_dir,
        args.assets_dir
    );

    // Public paths like /models/cards/fire.png resolve against the assets dir
    let config = Config::new()
        .with_resource_directory(args.assets_dir)
        .with_window(
            WindowBuilder::new()
                .with_title(&title)
                .with_inner_size(dioxus::desktop::LogicalSize::new(1400.0, 900.0))
                .with_resizable(true),
        );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
