//! kitabu CLI: book discovery against a remote catalog service.

use clap::{Parser, Subcommand};
use miette::Result;

use kitabu::book::{BookRecord, SearchCriteria};
use kitabu::client::{Catalog, CatalogClient};
use kitabu::config::{ApiConfig, OVERRIDE_ENV};
use kitabu::dispatch::{Dispatch, Dispatcher, GenreShortcut, LoadingFlag, Outcome, Severity};
use kitabu::tui::BookTui;

#[derive(Parser)]
#[command(name = "kitabu", version, about = "Book discovery client")]
struct Cli {
    /// Catalog base-URL override (defaults to $KITABU_API_URL).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Host the catalog is resolved against when no override is set.
    #[arg(long, global = true, default_value = "localhost")]
    host: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by free text and/or genre.
    Search {
        /// Free-text query matched against title, author, and genre.
        #[arg(long, short)]
        query: Option<String>,

        /// Genre filter.
        #[arg(long, short)]
        genre: Option<String>,
    },

    /// Recommend books similar to a favorite title.
    Recommend {
        /// The favorite book title.
        title: String,
    },

    /// List the top rated books.
    Top,

    /// Romance listing.
    Romance,

    /// Fantasy listing.
    Fantasy,

    /// A random sample of books.
    Random,

    /// List the catalog's genres.
    Genres,

    /// Launch the interactive TUI (default when no subcommand is given).
    Tui,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let override_url = cli
        .api_url
        .clone()
        .or_else(|| std::env::var(OVERRIDE_ENV).ok());
    let config = ApiConfig::resolve(override_url.as_deref(), &cli.host);
    let client = CatalogClient::new(&config);
    let dispatcher = Dispatcher::new(client, LoadingFlag::new());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => BookTui::new(dispatcher).run(),
        Commands::Search { query, genre } => {
            print_dispatch(dispatcher.search(&SearchCriteria { query, genre }));
            Ok(())
        }
        Commands::Recommend { title } => {
            print_dispatch(dispatcher.recommend_by_title(&title));
            Ok(())
        }
        Commands::Top => {
            print_dispatch(dispatcher.top_rated());
            Ok(())
        }
        Commands::Romance => {
            print_dispatch(dispatcher.genre_shortcut(GenreShortcut::Romance));
            Ok(())
        }
        Commands::Fantasy => {
            print_dispatch(dispatcher.genre_shortcut(GenreShortcut::Fantasy));
            Ok(())
        }
        Commands::Random => {
            print_dispatch(dispatcher.random());
            Ok(())
        }
        Commands::Genres => {
            match dispatcher.catalog().genres() {
                Ok(envelope) if envelope.success => {
                    for genre in envelope.genres {
                        println!("{genre}");
                    }
                }
                Ok(_) => println!("[error] could not load genres"),
                Err(e) => return Err(kitabu::error::KitabuError::from(e).into()),
            }
            Ok(())
        }
    }
}

fn print_dispatch(dispatch: Dispatch) {
    match dispatch.outcome {
        Outcome::Books { caption, books } => {
            if books.is_empty() {
                println!("[info] No books found");
                return;
            }
            println!("{caption}");
            println!();
            for book in &books {
                print_card(book);
            }
        }
        Outcome::Notice { severity, text } => {
            let label = match severity {
                Severity::Info => "info",
                Severity::Error => "error",
            };
            println!("[{label}] {text}");
        }
    }
}

fn print_card(book: &BookRecord) {
    println!("{}", book.title);
    println!("  by {}", book.author);
    if !book.genre.is_empty() {
        println!("  [{}]", book.genre);
    }
    println!("  {} {}", "★".repeat(book.stars()), book.rating_display());
    if !book.summary.is_empty() {
        println!("  {}", book.summary);
    }
    println!();
}
