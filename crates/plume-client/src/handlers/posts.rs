use std::path::PathBuf;

use plume_api_types::PostInput;
use plume_client::{FallbackCache, PostsApi, SyncCoordinator, SyncError};
use uuid::Uuid;

use crate::args::PostsCmd;
use crate::context::{CliError, Ctx};
use crate::io::read_value;
use crate::print::{print_collection, print_json};

pub async fn handle(ctx: &Ctx, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List => list(ctx).await,
        PostsCmd::Get { id } => get(ctx, id).await,
        PostsCmd::Search { term } => search(ctx, term).await,
        PostsCmd::Filter { term } => filter(ctx, term).await,
        PostsCmd::Create {
            title,
            author,
            content,
            content_file,
        } => create(ctx, title, author, content, content_file).await,
        PostsCmd::Update {
            id,
            title,
            author,
            content,
            content_file,
        } => update(ctx, id, title, author, content, content_file).await,
        PostsCmd::Delete { id } => delete(ctx, id).await,
    }
}

fn coordinator(ctx: &Ctx) -> SyncCoordinator {
    let transport: std::sync::Arc<dyn PostsApi> = ctx.api.clone();
    SyncCoordinator::new(transport, FallbackCache::new(), ctx.signal.clone())
}

async fn list(ctx: &Ctx) -> Result<(), CliError> {
    let mut coordinator = coordinator(ctx);
    let view = coordinator.refresh().await?;
    print_collection(&view)
}

async fn get(ctx: &Ctx, id: Uuid) -> Result<(), CliError> {
    let post = ctx.api.get_post(id).await?;
    print_json(&post)
}

async fn search(ctx: &Ctx, term: String) -> Result<(), CliError> {
    let posts = ctx.api.search_posts(&term).await?;
    print_json(&posts)
}

async fn filter(ctx: &Ctx, term: String) -> Result<(), CliError> {
    let mut coordinator = coordinator(ctx);
    let view = coordinator.refresh().await?;
    let hits = coordinator.search(&term);

    if let plume_client::CollectionSource::FallbackCache { .. } = view.source {
        eprintln!("offline: filtering the cached snapshot");
    }
    print_json(&hits)
}

async fn create(
    ctx: &Ctx,
    title: String,
    author: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<(), CliError> {
    // The create surface is disabled offline; the coordinator would refuse
    // anyway, but the contract puts the check on the caller.
    if !ctx.signal.is_online() {
        return Err(CliError::Sync(SyncError::Offline));
    }

    let content = read_value(content, content_file)?;
    let mut coordinator = coordinator(ctx);
    let post = coordinator
        .create(PostInput::new(title, author, content))
        .await?;
    print_json(&post)
}

async fn update(
    ctx: &Ctx,
    id: Uuid,
    title: String,
    author: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<(), CliError> {
    if !ctx.signal.is_online() {
        return Err(CliError::Sync(SyncError::Offline));
    }

    let content = read_value(content, content_file)?;
    let post = ctx
        .api
        .update_post(id, &PostInput::new(title, author, content))
        .await?;
    print_json(&post)
}

async fn delete(ctx: &Ctx, id: Uuid) -> Result<(), CliError> {
    if !ctx.signal.is_online() {
        return Err(CliError::Sync(SyncError::Offline));
    }

    let confirmation = ctx.api.delete_post(id).await?;
    print_json(&confirmation)
}
