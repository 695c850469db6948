//! File system stager implementation.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::config::StagingConfig;
use super::error::StagingError;
use super::types::{design_stem, CopiedFile};

/// Writes staged orders to local directories.
pub struct FsStager {
    config: StagingConfig,
}

impl FsStager {
    /// Creates a new stager with the given configuration.
    pub fn new(config: StagingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StagingConfig {
        &self.config
    }

    /// Working folder of one design: `{download_dir}/{reference}_{index}`.
    pub fn design_folder(&self, reference: &str, index: usize) -> PathBuf {
        self.config.download_dir.join(design_stem(reference, index))
    }

    /// Archive path of one design: `{outbox_dir}/{reference}_{index}.zip`.
    pub fn archive_path(&self, reference: &str, index: usize) -> PathBuf {
        self.config
            .outbox_dir
            .join(format!("{}.zip", design_stem(reference, index)))
    }

    /// Creates the download and outbox directories.
    pub async fn ensure_dirs(&self) -> Result<(), StagingError> {
        create_dir(&self.config.download_dir).await?;
        create_dir(&self.config.outbox_dir).await?;
        if let Some(ref secondary) = self.config.secondary_dir {
            create_dir(secondary).await?;
        }
        Ok(())
    }

    /// Writes a record as `{ref}_{i}/{ref}_{i}.json` inside the download dir.
    pub async fn write_record<T: Serialize>(
        &self,
        record: &T,
        reference: &str,
        index: usize,
    ) -> Result<PathBuf, StagingError> {
        let path = self
            .design_folder(reference, index)
            .join(format!("{}.json", design_stem(reference, index)));
        self.save_json(record, &path).await?;
        debug!(path = %path.display(), "Wrote order record");
        Ok(path)
    }

    /// Serializes `value` as pretty-printed JSON, creating parent directories.
    pub async fn save_json<T: Serialize>(&self, value: &T, path: &Path) -> Result<(), StagingError> {
        let json = serde_json::to_vec_pretty(value)?;
        if let Some(parent) = path.parent() {
            create_dir(parent).await?;
        }
        fs::write(path, json)
            .await
            .map_err(|e| StagingError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })
    }

    /// Reads a JSON document.
    pub async fn load_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, StagingError> {
        let bytes = fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StagingError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                StagingError::ReadFailed {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Zips every file below `source` into `{dest_stem}.zip`.
    ///
    /// Entry names are relative to `source`.
    pub async fn zip_directory(
        &self,
        source: &Path,
        dest_stem: &Path,
    ) -> Result<PathBuf, StagingError> {
        if !source.is_dir() {
            return Err(StagingError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        let mut archive = dest_stem.as_os_str().to_owned();
        archive.push(".zip");
        let archive = PathBuf::from(archive);

        if let Some(parent) = archive.parent() {
            create_dir(parent).await?;
        }

        let src = source.to_path_buf();
        let dest = archive.clone();
        let entries = tokio::task::spawn_blocking(move || write_zip(&src, &dest))
            .await
            .map_err(|e| StagingError::TaskFailed(e.to_string()))??;

        debug!(archive = %archive.display(), entries, "Created archive");
        Ok(archive)
    }

    /// Zips a design folder into the outbox.
    pub async fn archive_design(
        &self,
        reference: &str,
        index: usize,
    ) -> Result<PathBuf, StagingError> {
        let folder = self.design_folder(reference, index);
        let stem = self.config.outbox_dir.join(design_stem(reference, index));
        let archive = self.zip_directory(&folder, &stem).await?;
        info!(archive = %archive.display(), "Design archived");
        Ok(archive)
    }

    /// Copies a file into the secondary directory under `file_name`.
    ///
    /// Returns `Ok(None)` when no secondary directory is configured.
    pub async fn copy_to_secondary(
        &self,
        source: &Path,
        file_name: &str,
    ) -> Result<Option<CopiedFile>, StagingError> {
        let Some(ref secondary) = self.config.secondary_dir else {
            return Ok(None);
        };

        create_dir(secondary).await?;
        let destination = secondary.join(file_name);
        let verify = self.config.verify_copies;

        let (size, checksum) = self.copy_file(source, &destination, verify).await?;

        let checksum = if verify {
            let expected = self.checksum(source).await?;
            let actual = checksum.unwrap_or_default();
            if expected != actual {
                return Err(StagingError::ChecksumMismatch {
                    path: destination,
                    expected,
                    actual,
                });
            }
            Some(actual)
        } else {
            None
        };

        debug!(
            source = %source.display(),
            destination = %destination.display(),
            size,
            "Copied to secondary location"
        );

        Ok(Some(CopiedFile {
            source: source.to_path_buf(),
            destination,
            size,
            checksum,
        }))
    }

    /// Copies a file with optional checksum calculation.
    async fn copy_file(
        &self,
        source: &Path,
        destination: &Path,
        calculate_checksum: bool,
    ) -> Result<(u64, Option<String>), StagingError> {
        let source_file = File::open(source).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StagingError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                StagingError::Io(e)
            }
        })?;

        let dest_file = File::create(destination).await.map_err(|e| {
            StagingError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, dest_file);

        let mut hasher = if calculate_checksum {
            Some(Sha256::new())
        } else {
            None
        };

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; self.config.buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await.map_err(|e| {
                StagingError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            if bytes_read == 0 {
                break;
            }

            if let Some(ref mut h) = hasher {
                h.update(&buffer[..bytes_read]);
            }

            writer.write_all(&buffer[..bytes_read]).await.map_err(|e| {
                StagingError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().await.map_err(|e| {
            StagingError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        let checksum = hasher.map(|h| format!("{:x}", h.finalize()));

        Ok((total_bytes, checksum))
    }

    /// SHA-256 of a file.
    async fn checksum(&self, path: &Path) -> Result<String, StagingError> {
        let file = File::open(path)
            .await
            .map_err(|e| StagingError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut buffer = vec![0u8; self.config.buffer_size];
        let mut hasher = Sha256::new();
        loop {
            let bytes_read =
                reader
                    .read(&mut buffer)
                    .await
                    .map_err(|e| StagingError::ReadFailed {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }
        Ok(format!("{:x}", hasher.finalize()))
    }
}

async fn create_dir(path: &Path) -> Result<(), StagingError> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| StagingError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Writes the archive synchronously. Returns the number of entries.
fn write_zip(source: &Path, archive: &Path) -> Result<usize, StagingError> {
    let archive_err = |reason: String| StagingError::Archive {
        path: archive.to_path_buf(),
        reason,
    };

    let mut files = Vec::new();
    collect_files(source, &mut files)?;
    files.sort();

    let out = std::fs::File::create(archive).map_err(|e| StagingError::WriteFailed {
        path: archive.to_path_buf(),
        source: e,
    })?;
    let mut zip = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = Vec::new();
    for file in &files {
        let relative = file
            .strip_prefix(source)
            .map_err(|e| archive_err(e.to_string()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        buffer.clear();
        std::fs::File::open(file)
            .and_then(|mut f| std::io::Read::read_to_end(&mut f, &mut buffer))
            .map_err(|e| StagingError::ReadFailed {
                path: file.clone(),
                source: e,
            })?;

        zip.start_file(name, options)
            .map_err(|e| archive_err(e.to_string()))?;
        std::io::Write::write_all(&mut zip, &buffer)
            .map_err(|e| archive_err(e.to_string()))?;
    }

    zip.finish().map_err(|e| archive_err(e.to_string()))?;
    Ok(files.len())
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), StagingError> {
    let entries = std::fs::read_dir(dir).map_err(|e| StagingError::ReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}
