// Reading List Core - Reading list tracker for mobile
// Copyright (C) 2025 Henning Berge
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use reading_list_core::api::{ApiClient, ClientConfig, DEFAULT_IMPORT_ENDPOINT};
use reading_list_core::{init_logging, BookController, BookId, MemoryStore, StatusFilter};

#[derive(Parser)]
#[command(name = "reading-list-cli")]
#[command(about = "Reading list CLI - Desktop testing tool", long_about = None)]
struct Cli {
    /// Only show books whose title contains this text
    #[arg(short, long, global = true, default_value = "")]
    search: String,

    /// Only show books with this status (all, planning, reading, done)
    #[arg(long, global = true, default_value = "all")]
    status: StatusFilter,

    /// Import endpoint
    #[arg(long, global = true, default_value = DEFAULT_IMPORT_ENDPOINT)]
    endpoint: String,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the seeded books
    List,
    /// Add a book
    Add {
        title: String,
        #[arg(short, long)]
        author: Option<String>,
    },
    /// Import books from the endpoint
    Import,
    /// Advance a book to its next status
    Cycle { id: BookId },
    /// Delete a book
    Delete { id: BookId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    let client = ApiClient::with_config(ClientConfig::builder().endpoint(cli.endpoint.clone()).build())?;
    let mut controller = BookController::new(Arc::new(MemoryStore::new()), Arc::new(client));
    controller.initialize().await?;

    match cli.command {
        Commands::List => {}
        Commands::Add { title, author } => {
            let book = controller.insert_book(&title, author.as_deref()).await?;
            println!("Added #{}: {}", book.id, book.title);
        }
        Commands::Import => {
            println!("Importing from {}...", cli.endpoint);
            let stats = controller.import_books_from_api().await;
            if let Some(error) = controller.import_error() {
                println!("Import failed: {}", error);
            } else if let Some(notice) = controller.import_notice() {
                println!("{}", notice);
            } else {
                println!(
                    "Imported {} of {} books ({} skipped)",
                    stats.books_added, stats.total_items, stats.books_skipped
                );
            }
        }
        Commands::Cycle { id } => {
            let book = controller
                .book(id)
                .cloned()
                .with_context(|| format!("No book with id {}", id))?;
            if let Some(updated) = controller.cycle_status(&book).await? {
                println!("#{} {} -> {}", updated.id, book.status, updated.status);
            }
        }
        Commands::Delete { id } => {
            controller.delete_book(id).await?;
            println!("Deleted #{}", id);
        }
    }

    controller.set_search_text(cli.search);
    controller.set_filter_status(cli.status);

    println!();
    for book in controller.books() {
        println!(
            "#{:<4} [{:<8}] {}{}",
            book.id,
            book.status,
            book.title,
            book.author
                .as_deref()
                .map(|a| format!(" - {}", a))
                .unwrap_or_default()
        );
    }
    println!("{} of {} books shown", controller.books().len(), controller.all_books().len());

    Ok(())
}
