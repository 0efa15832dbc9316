use crate::model::Student;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Everything that is persisted: students keyed by id plus the class names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSnapshot")]
pub struct Snapshot {
    pub students: BTreeMap<String, Student>,
    pub class_names: Vec<String>,
}

// Files written by older versions may carry `null` for either field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    students: Option<BTreeMap<String, Student>>,
    class_names: Option<Vec<String>>,
}

impl From<RawSnapshot> for Snapshot {
    fn from(raw: RawSnapshot) -> Self {
        Self {
            students: raw.students.unwrap_or_default(),
            class_names: raw.class_names.unwrap_or_default(),
        }
    }
}

pub fn parse_snapshot(bytes: &[u8]) -> anyhow::Result<Snapshot> {
    serde_json::from_slice(bytes).context("data file is not a valid grade snapshot")
}

pub fn encode_snapshot(snapshot: &Snapshot) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(snapshot).context("failed to serialize snapshot")
}

/// Returns `Ok(None)` when the file does not exist yet.
pub fn read_snapshot(path: &Path) -> anyhow::Result<Option<Snapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read data file {}", path.to_string_lossy()))?;
    parse_snapshot(&bytes)
        .with_context(|| format!("failed to load {}", path.to_string_lossy()))
        .map(Some)
}

/// Writes through a sibling temp file and a rename, so a failed write never
/// clobbers the previous file.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let bytes = encode_snapshot(snapshot)?;
    replace_file(path, &bytes)
}

pub(crate) fn replace_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let tmp = temp_sibling(path);
    let result = File::create(&tmp)
        .with_context(|| format!("failed to create temp file {}", tmp.to_string_lossy()))
        .and_then(|mut f| {
            f.write_all(bytes)
                .and_then(|_| f.flush())
                .and_then(|_| f.sync_all())
                .with_context(|| format!("failed to write {}", tmp.to_string_lossy()))
        })
        .and_then(|_| {
            std::fs::rename(&tmp, path).with_context(|| {
                format!(
                    "failed to move {} into place at {}",
                    tmp.to_string_lossy(),
                    path.to_string_lossy()
                )
            })
        });

    if result.is_err() && tmp.is_file() {
        let _ = std::fs::remove_file(&tmp);
    }
    result
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_DATA_FILE.into());
    name.push(".saving");
    path.with_file_name(name)
}
