//! Command-line surface for `bookshelf-cli`.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bookshelf-cli", version, about = "Bookshelf catalogue API client", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <http://127.0.0.1:8080>
    #[arg(long, env = "BOOKSHELF_SERVER_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Author records
    Authors(AuthorsArgs),
    /// Book records
    Books(BooksArgs),
}

#[derive(Parser, Debug)]
pub struct AuthorsArgs {
    #[command(subcommand)]
    pub action: AuthorsCmd,
}

#[derive(Subcommand, Debug)]
pub enum AuthorsCmd {
    /// Create an author
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        year_born: i32,
    },
    /// Fetch an author with its books
    Get {
        id: i64,
        /// Read through the server-side cache
        #[arg(long)]
        cached: bool,
    },
    /// Fetch the author's id, name and birth year only
    Overview { id: i64 },
}

#[derive(Parser, Debug)]
pub struct BooksArgs {
    #[command(subcommand)]
    pub action: BooksCmd,
}

#[derive(Subcommand, Debug)]
pub enum BooksCmd {
    /// Create a book for an existing author; the server generates its payload
    Create {
        #[arg(long)]
        author_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        year_published: i32,
    },
    /// Fetch a book with its author
    Get {
        id: i64,
        /// Read through the server-side cache
        #[arg(long)]
        cached: bool,
        /// Replace the payload with its length in the output
        #[arg(long)]
        omit_data: bool,
    },
    /// Fetch the book's id, name and publication year only
    Overview { id: i64 },
}
