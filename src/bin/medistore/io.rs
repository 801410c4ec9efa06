use std::fs;
use std::path::PathBuf;

use medistore::domain::params::QueryParams;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::args::PayloadOpts;
use crate::client::CliError;

pub fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = file {
        fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(CliError::InvalidInput(
            "payload required (use --data or --file)".into(),
        ))
    }
}

pub fn read_payload(opts: PayloadOpts) -> Result<Value, CliError> {
    let raw = read_value(opts.data, opts.file)?;
    serde_json::from_str(&raw).map_err(|e| CliError::InvalidInput(format!("payload is not JSON: {e}")))
}

pub fn read_typed<T: DeserializeOwned>(opts: PayloadOpts) -> Result<T, CliError> {
    serde_json::from_value(read_payload(opts)?)
        .map_err(|e| CliError::InvalidInput(format!("payload has the wrong shape: {e}")))
}

/// Parse repeated `KEY=VALUE` flags; `KEY=` drops the key.
pub fn parse_params(raw: &[String]) -> Result<QueryParams, CliError> {
    let mut params = QueryParams::new();
    for pair in raw {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            CliError::InvalidInput(format!("expected KEY=VALUE, got `{pair}`"))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::InvalidInput(format!("empty key in `{pair}`")));
        }
        params.set(key, Some(value));
    }
    Ok(params)
}
