use bookshelf_api_types::{Book, BookOverview, CreateBookRequest};
use serde_json::Value;

use crate::args::BooksCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: BooksCmd) -> Result<(), CliError> {
    match cmd {
        BooksCmd::Create {
            author_id,
            name,
            year_published,
        } => {
            let book = create(ctx, author_id, name, year_published).await?;
            print_json(&summarize(&book)?)
        }
        BooksCmd::Get {
            id,
            cached,
            omit_data,
        } => {
            let book = get(ctx, id, cached).await?;
            if omit_data {
                print_json(&summarize(&book)?)
            } else {
                print_json(&book)
            }
        }
        BooksCmd::Overview { id } => print_json(&overview(ctx, id).await?),
    }
}

pub async fn create(
    ctx: &Ctx,
    author_id: i64,
    name: String,
    year_published: i32,
) -> Result<Book, CliError> {
    let request = CreateBookRequest {
        author_id,
        name,
        year_published,
    };
    ctx.post("books", &request).await
}

pub async fn get(ctx: &Ctx, id: i64, cached: bool) -> Result<Book, CliError> {
    let path = if cached {
        format!("books/{id}/cached")
    } else {
        format!("books/{id}")
    };
    ctx.get(&path).await
}

pub async fn overview(ctx: &Ctx, id: i64) -> Result<BookOverview, CliError> {
    ctx.get(&format!("books/{id}/overview")).await
}

/// The book as JSON with `data` swapped for `dataBytes`, its decoded length.
pub fn summarize(book: &Book) -> Result<Value, CliError> {
    let mut value = serde_json::to_value(book)
        .map_err(|e| CliError::Server(format!("failed to render output: {e}")))?;
    if let Value::Object(fields) = &mut value {
        fields.remove("data");
        fields.insert("dataBytes".to_string(), Value::from(book.data.len()));
    }
    Ok(value)
}
