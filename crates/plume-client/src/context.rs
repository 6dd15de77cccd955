use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use plume_client::{ClientError, ConnectivitySignal, HttpPostsApi, SyncError};

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("site URL is required (use --site or PLUME_SITE_URL)")]
    MissingSite,
    #[error("provide content via --content or --content-file")]
    MissingContent,
    #[error("failed to read input file {path}: {source}")]
    InputFile {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("failed to render output: {0}")]
    Render(String),
}

#[derive(Clone)]
pub struct Ctx {
    pub api: Arc<HttpPostsApi>,
    pub signal: ConnectivitySignal,
}

pub fn build_ctx_from_cli(cli: &Cli) -> Result<Ctx, CliError> {
    let site = cli.site.clone().ok_or(CliError::MissingSite)?;
    let api = HttpPostsApi::new(&site, Duration::from_millis(cli.timeout_ms))?;

    Ok(Ctx {
        api: Arc::new(api),
        signal: ConnectivitySignal::new(!cli.offline),
    })
}
