//! JSON decoding utilities for the PokéAPI client.

use anyhow::Result;

/// Decode a JSON value into `T`, prefixing decode failures with the serde
/// path of the offending field ("stats[2].stat.name") instead of
/// serde_json's bare message.
pub fn decode_with_path<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    match serde_path_to_error::deserialize(value) {
        Ok(decoded) => Ok(decoded),
        Err(err) => {
            let path = err.path().to_string();
            let msg = err.into_inner().to_string();
            if path.is_empty() || path == "." {
                Err(anyhow::anyhow!(msg))
            } else {
                Err(anyhow::anyhow!("at path '{path}': {msg}"))
            }
        }
    }
}
