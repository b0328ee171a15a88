use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use bookstore::cli::{
    book, confirm, handle_backup_command, run_menu, BackupCommands, Context, LocationArgs,
};
use bookstore::config::{paths::BookstorePaths, settings::Settings};
use bookstore::logging;
use bookstore::models::BookId;

#[derive(Parser)]
#[command(
    name = "bookstore",
    version,
    about = "Bookstore inventory manager",
    long_about = "Manage a small bookstore's inventory from the command line. \
                  Every change is preceded by a snapshot of the database, and \
                  old snapshots are pruned automatically."
)]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    locations: LocationArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new book (backed up first)
    Add {
        /// Book title
        #[arg(long)]
        title: String,
        /// Author name
        #[arg(long)]
        author: String,
        /// Publication year; anything that is not a whole number is stored as unknown
        #[arg(long)]
        year: Option<String>,
        /// Price
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
    },

    /// List all books
    #[command(alias = "ls")]
    List,

    /// Change the price of a book (backed up first)
    UpdatePrice {
        /// Book ID
        #[arg(long)]
        id: BookId,
        /// New price
        #[arg(long, allow_negative_numbers = true)]
        price: f64,
    },

    /// Remove a book (backed up first)
    #[command(alias = "rm")]
    Delete {
        /// Book ID
        #[arg(long)]
        id: BookId,
    },

    /// Find books whose author contains the given text
    Search {
        /// Author (or part of the name)
        #[arg(long)]
        author: String,
    },

    /// Export all books to CSV
    Export {
        /// Output file; relative names are placed in the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import books from a CSV file (backed up first)
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Snapshot management (defaults to creating a snapshot)
    Backup {
        #[command(subcommand)]
        command: Option<BackupCommands>,
    },

    /// Delete every book (backed up first)
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a PDF report of the inventory
    Report {
        /// Output file; relative names are placed in the export directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive numbered menu
    Menu,

    /// Initialize the database and write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = cli.locations.into_paths();

    let Some(command) = cli.command else {
        println!("Bookstore - inventory manager");
        println!();
        println!("Run 'bookstore --help' for usage information.");
        println!("Run 'bookstore menu' to launch the interactive menu.");
        return Ok(());
    };

    match command {
        Commands::Config => show_config(&paths),
        command => run(Context::open(paths)?, command),
    }
}

fn run(ctx: Context, command: Commands) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Add {
            title,
            author,
            year,
            price,
        } => book::handle_add(&ctx, &mut out, &title, &author, year.as_deref(), price)?,
        Commands::List => book::handle_list(&ctx, &mut out)?,
        Commands::UpdatePrice { id, price } => {
            book::handle_update_price(&ctx, &mut out, id, price)?
        }
        Commands::Delete { id } => book::handle_delete(&ctx, &mut out, id)?,
        Commands::Search { author } => book::handle_search(&ctx, &mut out, &author)?,
        Commands::Export { output } => book::handle_export(&ctx, &mut out, output)?,
        Commands::Import { file } => book::handle_import(&ctx, &mut out, &file)?,
        Commands::Backup { command } => handle_backup_command(&ctx, &mut out, command)?,
        Commands::Clear { force } => {
            let confirmed = force
                || confirm(
                    &mut io::stdin().lock(),
                    &mut out,
                    "Are you sure you want to delete all data?",
                )?;
            book::handle_clear(&ctx, &mut out, confirmed)?;
        }
        Commands::Report { output } => book::handle_report(&ctx, &mut out, output)?,
        Commands::Menu => run_menu(&ctx, &mut io::stdin().lock(), &mut out)?,
        Commands::Init => {
            ctx.settings.save(&ctx.paths)?;
            writeln!(out, "Database ready at {}", ctx.paths.db_path().display())?;
            writeln!(out, "Settings written to {}", ctx.paths.settings_file().display())?;
            writeln!(out, "Books in inventory: {}", ctx.storage.books.count()?)?;
        }
        Commands::Config => show_config(&ctx.paths)?,
    }

    Ok(())
}

fn show_config(paths: &BookstorePaths) -> Result<()> {
    let settings = Settings::load_or_create(paths)?;
    println!("Bookstore Configuration");
    println!("=======================");
    println!("Database:         {}", paths.db_path().display());
    match paths.seed_script() {
        Some(seed) => println!("Seed script:      {}", seed.display()),
        None => println!("Seed script:      (none)"),
    }
    println!("Backup directory: {}", paths.backup_dir().display());
    println!("Export directory: {}", paths.exports_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Backup prefix:  {}", settings.backup_prefix);
    println!("  Backups kept:   {}", settings.backup_keep);
    println!("  Export file:    {}", settings.export_file);
    println!("  Report file:    {}", settings.report_file);
    println!("  Report title:   {}", settings.report_title);
    Ok(())
}
