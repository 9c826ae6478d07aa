use crate::error::StoreError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::{Read, Write};

/// Saves `value` to `path` using the bincode format.
pub(super) fn save<T: Serialize>(value: &T, path: &str) -> Result<(), StoreError> {
    let bytes = to_bytes(value)?;
    let mut file = fs::File::create(path)
        .map_err(|e| StoreError::Snapshot(format!("Could not create file '{}': {}", path, e)))?;
    file.write_all(&bytes).map_err(|e| {
        StoreError::Snapshot(format!("Could not write to file '{}': {}", path, e))
    })?;
    Ok(())
}

/// Loads a snapshot previously written by [`save`].
pub(super) fn load<T: DeserializeOwned>(path: &str) -> Result<T, StoreError> {
    let mut file = fs::File::open(path)
        .map_err(|e| StoreError::Snapshot(format!("Could not open file '{}': {}", path, e)))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(|e| {
        StoreError::Snapshot(format!("Could not read from file '{}': {}", path, e))
    })?;
    from_bytes(&bytes)
}

pub(super) fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    encode_to_vec(value, standard())
        .map_err(|e| StoreError::Snapshot(format!("Serialization failed: {}", e)))
}

pub(super) fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, StoreError> {
    decode_from_slice(bytes, standard())
        .map(|(value, _)| value) // bincode 2 returns a tuple (data, bytes_read)
        .map_err(|e| StoreError::Snapshot(format!("Deserialization failed: {}", e)))
}
