use bookshelf_api_types::{Author, AuthorOverview, CreateAuthorRequest};

use crate::args::AuthorsCmd;
use crate::client::{CliError, Ctx};
use crate::print::print_json;

pub async fn handle(ctx: &Ctx, cmd: AuthorsCmd) -> Result<(), CliError> {
    match cmd {
        AuthorsCmd::Create { name, year_born } => print_json(&create(ctx, name, year_born).await?),
        AuthorsCmd::Get { id, cached } => print_json(&get(ctx, id, cached).await?),
        AuthorsCmd::Overview { id } => print_json(&overview(ctx, id).await?),
    }
}

pub async fn create(ctx: &Ctx, name: String, year_born: i32) -> Result<Author, CliError> {
    ctx.post("authors", &CreateAuthorRequest { name, year_born })
        .await
}

pub async fn get(ctx: &Ctx, id: i64, cached: bool) -> Result<Author, CliError> {
    let path = if cached {
        format!("authors/{id}/cached")
    } else {
        format!("authors/{id}")
    };
    ctx.get(&path).await
}

pub async fn overview(ctx: &Ctx, id: i64) -> Result<AuthorOverview, CliError> {
    ctx.get(&format!("authors/{id}/overview")).await
}
