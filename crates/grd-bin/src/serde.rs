/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sidecar metadata files
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use grd::{GrdMetadata, MetadataSource, MetadataUnavailable};
use log::debug;

use crate::errors::GrdToolErrors;

/// Look up the sidecar at `path`
///
/// Never fails, a missing or unreadable sidecar is reported
/// as unavailable and the caller decides what to do with it.
pub fn load_metadata(path: &Path) -> MetadataSource {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return MetadataSource::Unavailable(MetadataUnavailable::Missing)
        }
        Err(e) => {
            return MetadataSource::Unavailable(MetadataUnavailable::Malformed(e.to_string()))
        }
    };

    match serde_json::from_str::<GrdMetadata>(&contents) {
        Ok(metadata) => {
            debug!("Loaded {:?}: {:?}", path, metadata);
            MetadataSource::Descriptor(metadata)
        }
        Err(e) => MetadataSource::Unavailable(MetadataUnavailable::Malformed(e.to_string()))
    }
}

/// Write `metadata` to `path` as indented JSON
pub fn save_metadata(path: &Path, metadata: &GrdMetadata) -> Result<(), GrdToolErrors> {
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(path, json)?;

    debug!("Wrote {:?}", path);
    Ok(())
}
