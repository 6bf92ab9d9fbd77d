//! Typed access to JSON values in a key-value store.

use serde::Serialize;
use serde::de::DeserializeOwned;

use gemdex_core::error::StoreError;
use gemdex_core::{KeyValueStore, Result};

pub(crate) async fn read_key<S, T>(store: &S, key: &str) -> Result<Option<T>>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|e| codec_error(key, e)),
        None => Ok(None),
    }
}

pub(crate) async fn write_key<S, T>(store: &S, key: &str, value: &T) -> Result<()>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let value = serde_json::to_value(value).map_err(|e| codec_error(key, e))?;
    store.set(key, value).await
}

pub(crate) fn codec_error(key: &str, err: serde_json::Error) -> gemdex_core::Error {
    StoreError::Codec {
        key: key.to_string(),
        message: err.to_string(),
    }
    .into()
}
