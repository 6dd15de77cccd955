use std::fs;
use std::path::PathBuf;

use crate::context::CliError;

/// Resolve a value supplied inline or via file; the inline flag wins.
pub fn read_value(inline: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(value) = inline {
        return Ok(value);
    }

    let Some(path) = file else {
        return Err(CliError::MissingContent);
    };

    fs::read_to_string(&path).map_err(|source| CliError::InputFile {
        path: path.display().to_string(),
        source,
    })
}
