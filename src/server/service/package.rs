//! Archive packaging.
//!
//! The snapshot is serialized to a single JSON document and written, deflate-compressed,
//! as the sole entry of a zip archive held in memory. Nothing touches the filesystem.

use std::io::{Cursor, Read, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipArchive, ZipWriter};

use crate::server::{error::AppError, model::snapshot::GuildSnapshot, util::naming::strip_extension};

const COMPRESSION_LEVEL: i64 = 9;

/// A packaged archive ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Archive filename, e.g. `Guild_data_2024-01-01_00.00.00.json.zip`.
    pub name: String,
    pub bytes: Vec<u8>,
}

pub struct ArtifactPackager;

impl ArtifactPackager {
    /// Serializes the snapshot to its JSON text payload.
    pub fn serialize(snapshot: &GuildSnapshot) -> Result<String, AppError> {
        Ok(serde_json::to_string(snapshot)?)
    }

    /// Packages the snapshot into an in-memory zip archive.
    ///
    /// The entry name is `filename` with its final extension stripped.
    ///
    /// # Arguments
    /// - `snapshot` - Snapshot to package
    /// - `filename` - Archive filename
    ///
    /// # Returns
    /// - `Ok(Artifact)` - Archive named `filename`
    /// - `Err(AppError::JsonErr)` - The snapshot could not be serialized
    /// - `Err(AppError::ZipErr)` - The archive could not be written
    pub fn package(snapshot: &GuildSnapshot, filename: &str) -> Result<Artifact, AppError> {
        let payload = Self::serialize(snapshot)?;
        let bytes = Self::compress(&payload, strip_extension(filename))?;

        Ok(Artifact {
            name: filename.to_string(),
            bytes,
        })
    }

    /// Writes `payload` as the sole entry of a new archive.
    pub fn compress(payload: &str, entry_name: &str) -> Result<Vec<u8>, AppError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL));

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file(entry_name, options)?;
        writer.write_all(payload.as_bytes())?;

        Ok(writer.finish()?.into_inner())
    }

    /// Reads the entries of an archive back as `(name, contents)` pairs.
    pub fn unpack(bytes: &[u8]) -> Result<Vec<(String, String)>, AppError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let mut contents = String::new();
            entry.read_to_string(&mut contents)?;
            entries.push((entry.name().to_string(), contents));
        }

        Ok(entries)
    }
}
