use anyhow::{Context, Result};
use clap::Parser;
use starblog_server::db::Database;

/// Star Blog Database Utility
///
/// Creates the schema in a SQLite database, optionally loading the demo
/// dataset, and reports how many rows each table holds.
#[derive(Parser, Debug)]
#[command(name = "starblog-migrate")]
#[command(about = "Create, seed or reset a Star Blog database", long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, default_value = "./starblog.db", env = "DATABASE_PATH")]
    database: String,

    /// Load the demo users, reference data and posts
    #[arg(short, long)]
    seed: bool,

    /// Drop every table before recreating the schema
    #[arg(long)]
    reset: bool,

    /// Skip confirmation for destructive operations
    #[arg(short = 'y', long)]
    yes: bool,
}

/// Apply the requested steps and return per-table row counts
fn run(args: &Args) -> Result<Vec<(&'static str, i64)>> {
    if args.reset && !args.yes {
        anyhow::bail!("--reset drops all data; pass --yes to confirm");
    }

    let db = Database::new(&args.database)
        .with_context(|| format!("Failed to open database: {}", args.database))?;

    if args.reset {
        println!("Dropping all tables...");
        db.reset().context("Failed to reset database")?;
    } else {
        db.initialize().context("Failed to initialize schema")?;
    }

    if args.seed {
        println!("Loading demo data...");
        db.seed_test_data().context("Failed to seed database")?;
    }

    db.table_counts()
}

fn display_counts(counts: &[(&'static str, i64)]) {
    println!();
    println!("Table Summary");
    println!("=============");
    for (table, count) in counts {
        println!("{:<12} {:>6}", table, count);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Star Blog Database Utility");
    println!("==========================");
    println!();
    println!("Database: {}", args.database);
    println!();

    let counts = run(&args)?;
    display_counts(&counts);

    println!();
    println!("Done.");
    Ok(())
}
