use serde::Serialize;
use time::format_description::well_known::Rfc3339;

use plume_client::{CollectionSource, CollectionView};

use crate::context::CliError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(|e| CliError::Render(e.to_string()))?;
    println!("{out}");
    Ok(())
}

/// Render a collection, flagging cached snapshots on stderr so stale data
/// is never mistaken for live results.
pub fn print_collection(view: &CollectionView) -> Result<(), CliError> {
    if let CollectionSource::FallbackCache { captured_at } = view.source {
        let stamp = captured_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| captured_at.to_string());
        eprintln!("offline: serving cached snapshot captured at {stamp}");
    }
    print_json(&view.posts)
}
