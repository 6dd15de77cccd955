//! Command-line surface for `plume-client`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "plume-client", version, about = "Plume blog API CLI", long_about = None)]
pub struct Cli {
    /// API base URL, e.g. <http://localhost:3000>
    #[arg(long, env = "PLUME_SITE_URL")]
    pub site: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "PLUME_TIMEOUT_MS", default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Treat the session as offline: reads come from the fallback cache,
    /// writes are refused
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post management (list/read/search/write)
    Posts(PostsArgs),
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// Fetch the post collection (cached snapshot when offline)
    List,
    /// Get a post by id
    Get { id: Uuid },
    /// Server-side search across title, author, and content
    Search { term: String },
    /// Client-side filter over the refreshed collection
    Filter { term: String },
    /// Create a post
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Replace all fields of a post
    Update {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
    },
    /// Delete a post
    Delete { id: Uuid },
}
