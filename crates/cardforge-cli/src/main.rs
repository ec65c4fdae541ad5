//! cardforge CLI
//!
//! Thin wrapper around cardforge-core for inspecting and moving local data.
//!
//! ## Usage
//!
//! ```bash
//! # Show where data lives and what is stored
//! cardforge info
//!
//! # Create, list, inspect and delete cards
//! cardforge card new "Ember" --template fire --description "Deal **2** damage"
//! cardforge card list
//! cardforge card show <id>
//! cardforge card delete <id>
//!
//! # Backups and images
//! cardforge export json cards.json
//! cardforge import json cards.json
//! cardforge export archive cards.zip
//! cardforge export pages core tutorial.zip
//!
//! # Tutorials
//! cardforge tutorial show core
//! cardforge tutorial migrate expansion
//!
//! # Icon catalog and image conversion
//! cardforge catalog elements
//! cardforge convert art.png --max-width 750 --max-height 1050
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cardforge_core::catalog::{handle_query, IconCatalog};
use cardforge_core::storage::{database_path, SCHEMA_VERSION};
use cardforge_core::{
    convert, export, templates, CardId, CardWorkspace, GameProfile, ImageSource, LocalStore,
    Partition, Storage, SvgRasterizer, TutorialLoad, TutorialPage,
};

/// cardforge - local card and tutorial page designer
#[derive(Parser)]
#[command(name = "cardforge")]
#[command(version = "0.1.0")]
#[command(about = "cardforge - local card and tutorial page designer")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Data directory (default: platform data dir/cardforge)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Public assets directory holding models/cards and models/icons
    #[arg(short, long, global = true, default_value = "public")]
    assets_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show storage information
    Info,

    /// Card management
    Card {
        #[command(subcommand)]
        action: CardAction,
    },

    /// Export cards or tutorial pages
    Export {
        #[command(subcommand)]
        action: ExportAction,
    },

    /// Import cards
    Import {
        #[command(subcommand)]
        action: ImportAction,
    },

    /// Tutorial pages
    Tutorial {
        #[command(subcommand)]
        action: TutorialAction,
    },

    /// List the icons of a catalog folder as JSON
    Catalog {
        /// Folder relative to models/icons
        path: String,
    },

    /// Convert an image to a WebP data URI
    Convert {
        image: PathBuf,

        #[arg(long, default_value_t = convert::OVERLAY_BOUNDS.0)]
        max_width: u32,

        #[arg(long, default_value_t = convert::OVERLAY_BOUNDS.1)]
        max_height: u32,

        /// Write the data URI to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum CardAction {
    /// Create and save a card
    New {
        title: String,

        #[arg(short, long, default_value = "fire")]
        template: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// List saved cards
    List,
    /// Show one card as JSON
    Show { id: String },
    /// Delete a card and its artwork
    Delete { id: String },
}

#[derive(Subcommand)]
enum ExportAction {
    /// Editable card fields as a JSON backup
    Json { file: PathBuf },
    /// One PNG per saved card in a zip archive
    Archive { file: PathBuf },
    /// One PNG per tutorial page in a zip archive
    Pages { profile: String, file: PathBuf },
}

#[derive(Subcommand)]
enum ImportAction {
    /// Append cards from a JSON backup
    Json { file: PathBuf },
}

#[derive(Subcommand)]
enum TutorialAction {
    /// Summarize the pages of a profile
    Show { profile: String },
    /// Convert a legacy record to the current format
    Migrate { profile: String },
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

/// Get the default data directory (<platform data dir>/cardforge)
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardforge")
}

fn parse_card_id(s: &str) -> Result<CardId> {
    CardId::from_string(s.trim()).map_err(|e| anyhow::anyhow!("Invalid card ID '{}': {}", s, e))
}

fn parse_profile(s: &str) -> Result<GameProfile> {
    s.parse::<GameProfile>()
        .context("expected one of: core, expansion")
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

fn describe_page(index: usize, page: &TutorialPage) -> String {
    let title = page
        .titles
        .iter()
        .map(|t| t.text.trim())
        .find(|t| !t.is_empty())
        .unwrap_or("(untitled)");
    let background = page
        .background()
        .map(|b| format!(", background: {}", b.image_type()))
        .unwrap_or_default();
    format!(
        "Page {}: {} ({} titles, {} descriptions{})",
        index + 1,
        title,
        page.titles.len(),
        page.descriptions.len(),
        background
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    let assets_dir = cli.assets_dir;

    // Commands that never touch the database
    match &cli.command {
        Commands::Catalog { path } => {
            let catalog = IconCatalog::from_assets_dir(&assets_dir);
            let response = handle_query(&catalog, Some(path.as_str()));
            if !response.is_success() {
                bail!("catalog query failed ({}): {}", response.status, response.body);
            }
            println!("{}", response.body);
            return Ok(());
        }
        Commands::Convert {
            image,
            max_width,
            max_height,
            output,
        } => {
            let uri = convert::file_to_webp_data_uri(image, *max_width, *max_height)
                .with_context(|| format!("converting {}", image.display()))?;
            match output {
                Some(path) => {
                    write_file(path, uri.as_bytes())?;
                    println!("Wrote {} bytes to {}", uri.len(), path.display());
                }
                None => println!("{}", uri),
            }
            return Ok(());
        }
        _ => {}
    }

    let db_path = database_path(&data_dir);
    let storage = Storage::open(&db_path)
        .with_context(|| format!("opening database at {}", db_path.display()))?;
    let store = LocalStore::with_storage(storage.clone());

    match cli.command {
        Commands::Info => {
            println!("cardforge v0.1.0");
            println!();
            println!("Data directory: {}", data_dir.display());
            println!("Database: {}", db_path.display());
            println!(
                "Schema version: {} (this build: {})",
                storage.schema_version()?,
                SCHEMA_VERSION
            );
            println!();
            for partition in Partition::ALL {
                println!("  {}: {} entries", partition, storage.keys(partition)?.len());
            }
            println!();
            println!("Decks: {}", store.load_decks().await.len());
        }

        Commands::Card { action } => match action {
            CardAction::New {
                title,
                template,
                description,
            } => {
                if templates::find(&template).is_none() {
                    bail!("Unknown template '{}'", template);
                }
                let mut workspace = CardWorkspace::load(store).await;
                workspace.editor.new_card(templates::find_or_default(&template));
                workspace.editor.set_title(title);
                workspace.editor.set_description(description);
                if !workspace.save().await {
                    bail!("Failed to save card");
                }
                let card = workspace.editor.form();
                println!("Created card:");
                println!("  ID: {}", card.id);
                println!("  Title: {}", card.title);
                println!("  Template: {}", card.template);
            }

            CardAction::List => {
                let cards = storage.list_cards()?;
                if cards.is_empty() {
                    println!("No cards saved.");
                } else {
                    println!("Cards ({}):", cards.len());
                    for card in cards {
                        let title = if card.title.is_empty() {
                            "(untitled)"
                        } else {
                            card.title.as_str()
                        };
                        println!("  {}  {}  [{}]", card.id, title, card.template);
                    }
                }
            }

            CardAction::Show { id } => {
                let id = parse_card_id(&id)?;
                let Some(card) = storage.load_card(&id)? else {
                    bail!("Card not found: {}", id);
                };
                println!("{}", serde_json::to_string_pretty(&card)?);
                if let Some(overlay) = storage.load_overlay(&id)? {
                    let source = ImageSource::from_src(&overlay);
                    match &source {
                        ImageSource::DataUri(uri) => {
                            let bytes = convert::decode_data_uri(uri)?;
                            println!("Artwork: {}, {} bytes", source.image_type(), bytes.len());
                        }
                        ImageSource::AssetPath(path) => {
                            println!("Artwork: {}, {}", source.image_type(), path);
                        }
                    }
                }
            }

            CardAction::Delete { id } => {
                let id = parse_card_id(&id)?;
                if storage.load_card(&id)?.is_none() {
                    bail!("Card not found: {}", id);
                }
                let mut workspace = CardWorkspace::load(store).await;
                if !workspace.delete(id).await {
                    bail!("Failed to delete card {}", id);
                }
                println!("Deleted card {}", id);
            }
        },

        Commands::Export { action } => match action {
            ExportAction::Json { file } => {
                let cards = storage.list_cards()?;
                write_file(&file, export::cards_to_json(&cards)?.as_bytes())?;
                println!("Exported {} cards to {}", cards.len(), file.display());
            }

            ExportAction::Archive { file } => {
                let cards = storage.list_cards()?;
                let mut overlays = std::collections::HashMap::new();
                for card in &cards {
                    if let Some(overlay) = storage.load_overlay(&card.id)? {
                        overlays.insert(card.id, overlay);
                    }
                }
                let rasterizer = SvgRasterizer::new(&assets_dir);
                let report = export::build_card_archive(&cards, &overlays, &rasterizer)?;
                write_file(&file, &report.bytes)?;
                println!(
                    "Rendered {} cards ({} skipped) to {}",
                    report.rendered,
                    report.skipped,
                    file.display()
                );
            }

            ExportAction::Pages { profile, file } => {
                let profile = parse_profile(&profile)?;
                let pages = store.load_tutorial(profile, vec![TutorialPage::blank()]).await;
                let rasterizer = SvgRasterizer::new(&assets_dir);
                let report = export::build_page_archive(&pages, &rasterizer)?;
                write_file(&file, &report.bytes)?;
                println!(
                    "Rendered {} pages ({} skipped) to {}",
                    report.rendered,
                    report.skipped,
                    file.display()
                );
            }
        },

        Commands::Import { action } => match action {
            ImportAction::Json { file } => {
                let text = std::fs::read_to_string(&file)
                    .with_context(|| format!("reading {}", file.display()))?;
                let mut workspace = CardWorkspace::load(store).await;
                let count = workspace.import_json(&text).await?;
                println!("Imported {} cards", count);
            }
        },

        Commands::Tutorial { action } => match action {
            TutorialAction::Show { profile } => {
                let profile = parse_profile(&profile)?;
                let pages = store.load_tutorial(profile, vec![TutorialPage::blank()]).await;
                println!("{} ({} pages):", profile.label(), pages.len());
                for (i, page) in pages.iter().enumerate() {
                    println!("  {}", describe_page(i, page));
                }
            }

            TutorialAction::Migrate { profile } => {
                let profile = parse_profile(&profile)?;
                match storage.load_tutorial(profile)? {
                    TutorialLoad::Migrated(pages) => {
                        println!("Migrated {} legacy pages for {}", pages.len(), profile)
                    }
                    TutorialLoad::Current(pages) => {
                        println!("{} already current ({} pages)", profile, pages.len())
                    }
                    TutorialLoad::Missing => println!("Nothing stored for {}", profile),
                }
            }
        },

        Commands::Catalog { .. } | Commands::Convert { .. } => {}
    }

    Ok(())
}
