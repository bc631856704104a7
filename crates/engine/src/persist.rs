//! Workbench persistence with zstd compression.
//!
//! Each workbench saves to a single `.cbw` file: a fixed header
//! (magic, version, CRC32, payload length) followed by a
//! zstd-compressed bincode payload of the [`WorkbenchState`]. Loading
//! verifies magic, version, and CRC before decoding, and normalizes
//! malformed slot data to empty instead of propagating it.

use crate::bench::WorkbenchState;
use anyhow::{Context, Result};
use crc32fast::Hasher;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Magic number for workbench file identification ("CBWF").
const BENCH_MAGIC: u32 = 0x43425746;

/// Current workbench file format version.
const BENCH_VERSION: u16 = 1;

/// Workbench file header structure.
#[derive(Debug, Clone)]
struct BenchHeader {
    magic: u32,
    version: u16,
    crc32: u32,
    payload_len: u32,
}

impl BenchHeader {
    fn new(crc32: u32, payload_len: u32) -> Self {
        Self {
            magic: BENCH_MAGIC,
            version: BENCH_VERSION,
            crc32,
            payload_len,
        }
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(14);
        bytes.extend_from_slice(&self.magic.to_le_bytes());
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.crc32.to_le_bytes());
        bytes.extend_from_slice(&self.payload_len.to_le_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < 14 {
            anyhow::bail!("Workbench header too short");
        }

        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != BENCH_MAGIC {
            anyhow::bail!(
                "Invalid workbench magic: expected 0x{:08X}, got 0x{:08X}",
                BENCH_MAGIC,
                magic
            );
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != BENCH_VERSION {
            anyhow::bail!(
                "Unsupported workbench version: expected {}, got {}",
                BENCH_VERSION,
                version
            );
        }

        let crc32 = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let payload_len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]);

        Ok(Self {
            magic,
            version,
            crc32,
            payload_len,
        })
    }
}

/// File store for saving/loading workbench states.
pub struct WorkbenchStore {
    save_dir: PathBuf,
}

impl WorkbenchStore {
    /// Create a new store rooted at the given save directory.
    pub fn new<P: AsRef<Path>>(save_dir: P) -> Result<Self> {
        let save_dir = save_dir.as_ref().to_path_buf();
        fs::create_dir_all(&save_dir).context("Failed to create save directory")?;
        Ok(Self { save_dir })
    }

    /// Get the path to a workbench file for the given name.
    fn bench_path(&self, name: &str) -> PathBuf {
        self.save_dir.join(format!("{name}.cbw"))
    }

    /// Save a workbench state under the given name.
    pub fn save(&self, name: &str, state: &WorkbenchState) -> Result<()> {
        let serialized = bincode::serialize(state).context("Failed to serialize workbench")?;

        // Compress with zstd (level 3 for balanced speed/compression).
        let compressed =
            zstd::encode_all(&serialized[..], 3).context("Failed to compress workbench")?;

        let mut hasher = Hasher::new();
        hasher.update(&compressed);
        let crc32 = hasher.finalize();

        let header = BenchHeader::new(crc32, compressed.len() as u32);

        let mut file =
            File::create(self.bench_path(name)).context("Failed to create workbench file")?;
        file.write_all(&header.to_bytes())
            .context("Failed to write header")?;
        file.write_all(&compressed)
            .context("Failed to write payload")?;

        Ok(())
    }

    /// Load a workbench state by name.
    pub fn load(&self, name: &str) -> Result<WorkbenchState> {
        let path = self.bench_path(name);
        let mut file = File::open(&path).context("Failed to open workbench file")?;

        let mut header_bytes = [0u8; 14];
        file.read_exact(&mut header_bytes)
            .context("Failed to read workbench header")?;
        let header = BenchHeader::from_bytes(&header_bytes)?;

        let mut compressed = vec![0u8; header.payload_len as usize];
        file.read_exact(&mut compressed)
            .context("Failed to read workbench payload")?;

        let mut hasher = Hasher::new();
        hasher.update(&compressed);
        let computed_crc = hasher.finalize();

        if computed_crc != header.crc32 {
            anyhow::bail!(
                "CRC32 mismatch: expected {:08X}, got {:08X}",
                header.crc32,
                computed_crc
            );
        }

        let decompressed =
            zstd::decode_all(&compressed[..]).context("Failed to decompress workbench")?;

        let mut state: WorkbenchState =
            bincode::deserialize(&decompressed).context("Failed to deserialize workbench")?;

        // A zero-count stack in a hand-edited or corrupt save becomes
        // an empty slot rather than a phantom ingredient.
        state.grid.normalize();

        Ok(state)
    }

    /// Check if a workbench file exists.
    pub fn exists(&self, name: &str) -> bool {
        self.bench_path(name).exists()
    }
}
