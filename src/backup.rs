use crate::store::{self, Snapshot};
use anyhow::{anyhow, Context};
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const MANIFEST_ENTRY: &str = "manifest.json";
const DATA_ENTRY: &str = "data/students.json";
pub const BUNDLE_FORMAT_V1: &str = "gradetrack-backup-v1";
pub const PLAIN_DATA_FORMAT: &str = "plain-json";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub bundle_format: String,
    pub student_count: usize,
    pub class_count: usize,
    pub data_sha256: String,
}

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub bundle_format_detected: String,
    pub student_count: usize,
    pub class_count: usize,
}

fn sha256_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

pub fn export_bundle(snapshot: &Snapshot, out_path: &Path) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let data = store::encode_snapshot(snapshot)?;
    let data_sha256 = sha256_hex(&data);

    let out_file = File::create(out_path).with_context(|| {
        format!(
            "failed to create output file {}",
            out_path.to_string_lossy()
        )
    })?;
    let mut zip = ZipWriter::new(out_file);
    let opts = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let manifest = json!({
        "format": BUNDLE_FORMAT_V1,
        "version": 1,
        "appVersion": env!("CARGO_PKG_VERSION"),
        "exportedAt": chrono::Utc::now().to_rfc3339(),
        "studentCount": snapshot.students.len(),
        "classCount": snapshot.class_names.len(),
        "dataSha256": data_sha256,
    });
    zip.start_file(MANIFEST_ENTRY, opts)
        .context("failed to start manifest entry")?;
    zip.write_all(
        serde_json::to_string_pretty(&manifest)
            .context("failed to serialize manifest")?
            .as_bytes(),
    )
    .context("failed to write manifest entry")?;

    zip.start_file(DATA_ENTRY, opts)
        .context("failed to start data entry")?;
    zip.write_all(&data).context("failed to write data entry")?;

    zip.finish().context("failed to finalize zip bundle")?;

    tracing::info!(bundle = %out_path.display(), students = snapshot.students.len(), "exported backup bundle");
    Ok(ExportSummary {
        bundle_format: BUNDLE_FORMAT_V1.to_string(),
        student_count: snapshot.students.len(),
        class_count: snapshot.class_names.len(),
        data_sha256,
    })
}

/// Restores `data_path` from a bundle. Anything that is not a zip archive is
/// taken to be a plain data file and must parse before it is copied in.
pub fn import_bundle(in_path: &Path, data_path: &Path) -> anyhow::Result<ImportSummary> {
    let (format, data) = if is_zip_file(in_path)? {
        (BUNDLE_FORMAT_V1, read_bundle_data(in_path)?)
    } else {
        let bytes = std::fs::read(in_path)
            .with_context(|| format!("failed to read {}", in_path.to_string_lossy()))?;
        (PLAIN_DATA_FORMAT, bytes)
    };

    let snapshot = store::parse_snapshot(&data)?;
    store::replace_file(data_path, &data)?;

    tracing::info!(
        source = %in_path.display(),
        data = %data_path.display(),
        format,
        "imported backup"
    );
    Ok(ImportSummary {
        bundle_format_detected: format.to_string(),
        student_count: snapshot.students.len(),
        class_count: snapshot.class_names.len(),
    })
}

fn read_bundle_data(in_path: &Path) -> anyhow::Result<Vec<u8>> {
    let in_file = File::open(in_path)
        .with_context(|| format!("failed to open bundle {}", in_path.to_string_lossy()))?;
    let mut archive = ZipArchive::new(in_file).context("invalid zip archive")?;

    let mut manifest_text = String::new();
    archive
        .by_name(MANIFEST_ENTRY)
        .context("bundle missing manifest.json")?
        .read_to_string(&mut manifest_text)
        .context("failed to read manifest.json")?;
    let manifest: serde_json::Value =
        serde_json::from_str(&manifest_text).context("manifest.json is invalid JSON")?;
    let format = manifest
        .get("format")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    if format != BUNDLE_FORMAT_V1 {
        return Err(anyhow!("unsupported bundle format: {}", format));
    }

    let mut data = Vec::new();
    archive
        .by_name(DATA_ENTRY)
        .context("bundle missing data/students.json")?
        .read_to_end(&mut data)
        .context("failed to extract data entry")?;

    let expected = manifest
        .get("dataSha256")
        .and_then(|v| v.as_str())
        .ok_or_else(|| anyhow!("bundle manifest missing dataSha256"))?;
    let actual = sha256_hex(&data);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(anyhow!(
            "data checksum mismatch: manifest {}, bundle {}",
            expected,
            actual
        ));
    }
    Ok(data)
}

fn is_zip_file(path: &Path) -> anyhow::Result<bool> {
    let mut f = File::open(path)
        .with_context(|| format!("failed to open input file {}", path.to_string_lossy()))?;
    let mut sig = [0u8; 4];
    let read = f.read(&mut sig).context("failed to read file signature")?;
    if read < 4 {
        return Ok(false);
    }
    Ok(sig == [0x50, 0x4B, 0x03, 0x04])
}
