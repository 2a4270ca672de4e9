//! Manifest of generated cases, with JSON / JSON Lines / CBOR I/O.
//!
//! A manifest is the `Vec<ManifestEntry>` of one run. Format is picked by
//! extension: `.json`, `.jsonl`/`.ndjson`, `.cbor`. Unknown or missing
//! extensions are rejected for reads and default to JSON for writes.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::generator::Placement;
use crate::types::{SlotMask, StoredConfiguration};

/// One generated test bench as recorded in a manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Test id (1-based, matches `test<id>.vhd`).
    pub test_id: u32,
    /// Number of slots placed at the minimum distance.
    pub near_count: u8,
    /// Minimum distance `d` chosen for the case.
    pub min_distance: u32,
    /// Slots placed at `d`, independent of the input mask.
    pub near_slots: SlotMask,
    /// The configuration, including its output mask as written.
    pub configuration: StoredConfiguration,
}

impl ManifestEntry {
    /// Record a placement under `test_id`.
    #[must_use]
    pub fn from_placement(test_id: u32, placement: &Placement) -> Self {
        let near = placement.near_slots.len();
        Self {
            test_id,
            near_count: u8::try_from(near).unwrap_or(u8::MAX),
            min_distance: placement.min_distance,
            near_slots: placement.near_slots,
            configuration: StoredConfiguration::from(&placement.configuration),
        }
    }
}

/// An entry whose stored output mask disagrees with the Resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Test id of the entry.
    pub test_id: u32,
    /// Output mask found in the manifest.
    pub stored: SlotMask,
    /// Output mask the Resolver computes.
    pub expected: SlotMask,
}

/// Re-run the Resolver on every entry and collect disagreements.
#[must_use]
pub fn verify_manifest(entries: &[ManifestEntry]) -> Vec<Mismatch> {
    entries
        .iter()
        .filter_map(|e| {
            let expected = e.configuration.resolve().output_mask();
            let stored = e.configuration.output_mask;
            (expected != stored).then_some(Mismatch {
                test_id: e.test_id,
                stored,
                expected,
            })
        })
        .collect()
}

/* ---------------- JSON ---------------- */

/// Read a manifest from **JSON**.
pub fn read_manifest_json<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestEntry>> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let rdr = BufReader::new(f);
    let v = serde_json::from_reader(rdr).with_context(|| "deserialize JSON manifest")?;
    Ok(v)
}

/// Write a manifest to **JSON** (pretty).
pub fn write_manifest_json<P: AsRef<Path>>(path: P, v: &[ManifestEntry]) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, v).with_context(|| "serialize JSON manifest")?;
    w.flush().with_context(|| "flush JSON writer")?;
    Ok(())
}

/* ---------------- JSON Lines ---------------- */

/// Read a manifest from **JSON Lines** (one entry per line, blank lines skipped).
pub fn read_manifest_jsonl<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestEntry>> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let mut out = Vec::new();
    for (idx, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("read line {}", idx + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry = serde_json::from_str(&line)
            .with_context(|| format!("parse jsonl line {}", idx + 1))?;
        out.push(entry);
    }
    Ok(out)
}

/// Write a manifest as **JSON Lines**.
pub fn write_manifest_jsonl<P: AsRef<Path>>(path: P, v: &[ManifestEntry]) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    for entry in v {
        serde_json::to_writer(&mut w, entry).context("serialize manifest entry")?;
        w.write_all(b"\n").context("write newline")?;
    }
    w.flush().context("flush writer")?;
    Ok(())
}

/* ---------------- CBOR ---------------- */

/// Read a manifest from **CBOR**.
pub fn read_manifest_cbor<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestEntry>> {
    let path_ref = path.as_ref();
    let f = File::open(path_ref).with_context(|| format!("open {}", display(path_ref)))?;
    let mut rdr = BufReader::new(f);
    let v = ciborium::de::from_reader(&mut rdr).with_context(|| "deserialize CBOR manifest")?;
    Ok(v)
}

/// Write a manifest to **CBOR**.
pub fn write_manifest_cbor<P: AsRef<Path>>(path: P, v: &[ManifestEntry]) -> Result<()> {
    let path_ref = path.as_ref();
    ensure_parent_dir(path_ref)?;
    let f = File::create(path_ref).with_context(|| format!("create {}", display(path_ref)))?;
    let mut w = BufWriter::new(f);
    ciborium::ser::into_writer(v, &mut w).with_context(|| "serialize CBOR manifest")?;
    w.flush().with_context(|| "flush CBOR writer")?;
    Ok(())
}

/* --------------- Auto-detect by extension --------------- */

/// Auto-detect **read** by extension (case-insensitive).
pub fn read_manifest_auto<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestEntry>> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("json") => read_manifest_json(path),
        Some("jsonl" | "ndjson") => read_manifest_jsonl(path),
        Some("cbor") => read_manifest_cbor(path),
        Some(other) => Err(anyhow!(
            "unsupported manifest extension: {} (supported: .json, .jsonl, .ndjson, .cbor)",
            other
        )),
        None => Err(anyhow!(
            "path has no extension (expected .json, .jsonl, .ndjson or .cbor)"
        )),
    }
}

/// Auto-detect **write** (defaults to JSON if unknown/missing).
pub fn write_manifest_auto<P: AsRef<Path>>(path: P, v: &[ManifestEntry]) -> Result<()> {
    match ext_lower(path.as_ref()).as_deref() {
        Some("jsonl" | "ndjson") => write_manifest_jsonl(path, v),
        Some("cbor") => write_manifest_cbor(path, v),
        _ => write_manifest_json(path, v),
    }
}

/* ---------------- Small helpers ---------------- */

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating parent directory {}", display(dir)))?;
        }
    }
    Ok(())
}

#[inline]
fn ext_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
}

#[inline]
fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
