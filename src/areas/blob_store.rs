//! Content-addressed blob store
//!
//! Maps a content digest to immutable byte content. Each unique content is
//! stored exactly once, zlib-compressed, under a two-character fan-out
//! directory (`blobs/xx/yyyy...`). Blobs are never updated or deleted; the
//! store has no knowledge of commits or branches.

use crate::artifacts::digest::Digest;
use crate::errors::{JotError, JotResult};
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Debug)]
pub struct BlobStore {
    path: PathBuf,
}

impl BlobStore {
    pub fn new(path: PathBuf) -> Self {
        BlobStore { path }
    }

    /// Store content under its digest
    ///
    /// Idempotent: writing content that is already present is a no-op.
    ///
    /// # Returns
    ///
    /// The digest of `content`
    pub fn put(&self, content: &Bytes) -> JotResult<Digest> {
        let digest = Digest::over(content);
        let blob_path = self.path.join(digest.to_path());

        if !blob_path.exists() {
            std::fs::create_dir_all(
                blob_path
                    .parent()
                    .context(format!("Invalid blob path {}", blob_path.display()))?,
            )
            .context(format!(
                "Unable to create blob directory {}",
                blob_path.display()
            ))?;

            self.write_blob(blob_path, content)?;
        }

        Ok(digest)
    }

    /// Read the content stored under a digest
    pub fn get(&self, digest: &Digest) -> JotResult<Bytes> {
        let blob_path = self.path.join(digest.to_path());

        if !blob_path.exists() {
            return Err(JotError::BlobNotFound(digest.to_string()));
        }

        let compressed = std::fs::read(&blob_path)
            .context(format!("Unable to read blob file {}", blob_path.display()))?;

        Self::decompress(compressed.into()).map_err(Into::into)
    }

    fn write_blob(&self, blob_path: PathBuf, content: &Bytes) -> anyhow::Result<()> {
        let blob_dir = blob_path
            .parent()
            .context(format!("Invalid blob path {}", blob_path.display()))?;
        let temp_blob_path = blob_dir.join(Self::generate_temp_name());

        let compressed = Self::compress(content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_blob_path)
            .context(format!(
                "Unable to open blob file {}",
                temp_blob_path.display()
            ))?;

        file.write_all(&compressed).context(format!(
            "Unable to write blob file {}",
            temp_blob_path.display()
        ))?;

        // rename the temp file to the blob file to make the write atomic
        std::fs::rename(&temp_blob_path, &blob_path).context(format!(
            "Unable to rename blob file to {}",
            blob_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: &Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(data)
            .context("Unable to compress blob content")?;

        encoder
            .finish()
            .map(|compressed| compressed.into())
            .context("Unable to finish compressing blob content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed = Vec::new();
        decoder
            .read_to_end(&mut decompressed)
            .context("Unable to decompress blob content")?;

        Ok(decompressed.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-blob-{}", rand::random::<u32>())
    }
}
