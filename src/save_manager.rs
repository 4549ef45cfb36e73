//! Persisted-state store for the session record.
//!
//! Saves are a small checksummed binary file: version magic (8 bytes), data
//! length (4 bytes), bincode-encoded record, SHA-256 checksum (32 bytes) over
//! everything before it. A missing file, wrong magic, bad checksum, or
//! undecodable payload all surface as `io::Error`s; the host treats any load
//! failure as "start fresh".

use crate::constants::SAVE_VERSION_MAGIC;
use crate::game_session::SessionRecord;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub struct SaveManager {
    save_path: PathBuf,
}

impl SaveManager {
    /// Store under the platform's config directory for this game.
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "coindrop").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            save_path: config_dir.join("session.dat"),
        })
    }

    /// Store at an explicit path (tests, portable installs).
    pub fn with_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    pub fn path(&self) -> &Path {
        &self.save_path
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn save(&self, record: &SessionRecord) -> io::Result<()> {
        let data = bincode::serialize(record)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut out = Vec::with_capacity(12 + data.len() + 32);
        out.extend_from_slice(&SAVE_VERSION_MAGIC.to_le_bytes());
        out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&data);

        let checksum = Sha256::digest(&out);
        out.extend_from_slice(&checksum);

        fs::write(&self.save_path, out)
    }

    pub fn load(&self) -> io::Result<SessionRecord> {
        let mut file = fs::File::open(&self.save_path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SAVE_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid save version: expected 0x{:016X}, got 0x{:016X}",
                    SAVE_VERSION_MAGIC, magic
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        let computed_checksum = hasher.finalize();

        if stored_checksum != computed_checksum.as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
