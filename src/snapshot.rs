//! Checksummed binary snapshots of the world store.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - Bincode-serialized world data (variable length)
//! - SHA256 checksum over the preceding bytes (32 bytes)

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use directories::ProjectDirs;
use sha2::{Digest, Sha256};

use crate::constants::SNAPSHOT_VERSION_MAGIC;
use crate::error::{QuestError, Result};
use crate::store::WorldData;

pub struct SnapshotManager {
    snapshot_path: PathBuf,
}

impl SnapshotManager {
    /// Resolves the platform snapshot location and ensures the
    /// directory exists.
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "questmap")
            .ok_or_else(|| QuestError::storage("could not determine config directory"))?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Ok(Self {
            snapshot_path: config_dir.join("world.dat"),
        })
    }

    /// Uses an explicit snapshot file path. Tests point this at a temp
    /// location.
    pub fn with_path(snapshot_path: PathBuf) -> Self {
        Self { snapshot_path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.snapshot_path
    }

    pub fn snapshot_exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    /// Writes the world to disk. The in-memory world the data was
    /// exported from is untouched on failure.
    pub fn save(&self, data: &WorldData) -> Result<()> {
        let payload =
            bincode::serialize(data).map_err(|e| QuestError::storage(e.to_string()))?;
        let payload_len = payload.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SNAPSHOT_VERSION_MAGIC.to_le_bytes());
        hasher.update(payload_len.to_le_bytes());
        hasher.update(&payload);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.snapshot_path)?;
        file.write_all(&SNAPSHOT_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&payload_len.to_le_bytes())?;
        file.write_all(&payload)?;
        file.write_all(&checksum)?;

        Ok(())
    }

    /// Reads a snapshot back, rejecting wrong magic, a bad checksum, or
    /// an undecodable payload.
    pub fn load(&self) -> Result<WorldData> {
        let mut file = fs::File::open(&self.snapshot_path)?;

        let mut magic_bytes = [0u8; 8];
        file.read_exact(&mut magic_bytes)?;
        let magic = u64::from_le_bytes(magic_bytes);
        if magic != SNAPSHOT_VERSION_MAGIC {
            return Err(QuestError::storage(format!(
                "invalid snapshot magic: expected 0x{SNAPSHOT_VERSION_MAGIC:016X}, got 0x{magic:016X}"
            )));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let payload_len = u32::from_le_bytes(length_bytes);

        let mut payload = vec![0u8; payload_len as usize];
        file.read_exact(&mut payload)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(magic_bytes);
        hasher.update(length_bytes);
        hasher.update(&payload);
        let computed = hasher.finalize();

        if stored_checksum != computed.as_slice() {
            return Err(QuestError::storage("snapshot checksum mismatch"));
        }

        bincode::deserialize(&payload).map_err(|e| QuestError::storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ChildProfile;
    use crate::store::{ChildProfileStore, MemoryStore, ZoneStore};
    use crate::zones::starter_world;

    fn temp_manager(name: &str) -> SnapshotManager {
        SnapshotManager::with_path(std::env::temp_dir().join(name))
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let store = MemoryStore::new();
        crate::zones::seed_starter_world(&store).unwrap();
        let mut profile = ChildProfile::new("Mira", 42);
        profile.grant_key("meadow_key");
        let child_id = profile.id.clone();
        store.put_child(profile).unwrap();

        let manager = temp_manager("questmap_roundtrip.dat");
        manager.save(&store.export().unwrap()).unwrap();
        assert!(manager.snapshot_exists());

        let restored = MemoryStore::from_data(manager.load().unwrap());
        assert_eq!(restored.zones().unwrap().len(), 3);
        let child = restored.child(&child_id).unwrap().unwrap();
        assert_eq!(child.name, "Mira");
        assert!(child.has_key("meadow_key"));

        fs::remove_file(manager.path()).ok();
    }

    #[test]
    fn test_load_missing_snapshot_fails() {
        let manager = temp_manager("questmap_missing.dat");
        fs::remove_file(manager.path()).ok();
        assert!(manager.load().is_err());
    }

    #[test]
    fn test_load_rejects_corrupted_payload() {
        let manager = temp_manager("questmap_corrupt.dat");
        manager.save(&WorldData::default()).unwrap();

        // Flip a payload byte; the checksum no longer matches
        let mut bytes = fs::read(manager.path()).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(manager.path(), &bytes).unwrap();

        assert!(manager.load().is_err());
        fs::remove_file(manager.path()).ok();
    }

    #[test]
    fn test_load_rejects_wrong_magic() {
        let manager = temp_manager("questmap_magic.dat");
        manager.save(&WorldData::default()).unwrap();

        let mut bytes = fs::read(manager.path()).unwrap();
        bytes[0] ^= 0xFF;
        fs::write(manager.path(), &bytes).unwrap();

        let err = manager.load().unwrap_err();
        assert!(err.to_string().contains("magic"));
        fs::remove_file(manager.path()).ok();
    }

    #[test]
    fn test_starter_world_snapshot_preserves_gate() {
        use crate::store::GateStore;

        let world = starter_world();
        let store = MemoryStore::new();
        crate::zones::seed_starter_world(&store).unwrap();

        let manager = temp_manager("questmap_gate.dat");
        manager.save(&store.export().unwrap()).unwrap();

        let restored = MemoryStore::from_data(manager.load().unwrap());
        let gate = restored
            .gate("astoria", "crystal-gate")
            .unwrap()
            .unwrap();
        assert_eq!(gate.required_keys, world.gates[0].required_keys);

        fs::remove_file(manager.path()).ok();
    }
}
