#![deny(missing_docs)]

//! # Document Acquisition
//!
//! Reads the raw OpenAPI document from a local file or an HTTP(S) URL.
//! Failures surface once; nothing is retried here.

use crate::error::{CliError, CliResult};
use std::fs;

/// Fetches the raw document bytes behind a location string. `http://` and
/// `https://` prefixes go over the network; anything else is a file path.
pub fn fetch(location: &str) -> CliResult<String> {
    if location.starts_with("http://") || location.starts_with("https://") {
        fetch_url(location)
    } else {
        Ok(fs::read_to_string(location)?)
    }
}

fn fetch_url(url: &str) -> CliResult<String> {
    ureq::get(url)
        .call()
        .map_err(|e| CliError::Fetch(e.to_string()))?
        .into_string()
        .map_err(CliError::Io)
}
