//! Generation and verification drivers.

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use tbgen_core::manifest::{read_manifest_auto, verify_manifest, write_manifest_auto, ManifestEntry};
use tbgen_core::Generator;
use tbgen_vhdl::{file_name, TestBench};

use crate::config::RunConfig;

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Seed the run was generated from.
    pub seed: u64,
    /// Test bench files, in test id order.
    pub files: Vec<PathBuf>,
    /// Manifest path, if one was written.
    pub manifest: Option<PathBuf>,
}

/// Seed derived from the wall clock.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() ^ u64::from(d.subsec_nanos()).rotate_left(32))
}

/// Generate `cfg.random_cases` test benches into `cfg.directory`.
pub fn generate(cfg: &RunConfig) -> Result<RunSummary> {
    let seed = cfg.seed.unwrap_or_else(clock_seed);
    info!(
        cases = cfg.random_cases,
        arch = %cfg.arch_name,
        dir = %cfg.directory.display(),
        seed,
        "generating test benches"
    );

    let mut tb = Generator::seeded(seed);
    let mut files = Vec::new();
    let mut entries = Vec::new();

    for test_id in 1..=cfg.random_cases {
        let near_count = cfg.near_count.unwrap_or_else(|| tb.random_near_count());
        let placement = tb
            .generate_case(near_count)
            .with_context(|| format!("generating test {test_id}"))?;

        let path = cfg.directory.join(file_name(test_id));
        write_test_bench(&path, &placement.configuration, test_id, &cfg.arch_name)?;
        debug!(test_id, near_count, d = placement.min_distance, path = %path.display(), "wrote test bench");

        if cfg.manifest.is_some() {
            entries.push(ManifestEntry::from_placement(test_id, &placement));
        }
        files.push(path);
    }

    if let Some(path) = &cfg.manifest {
        write_manifest_auto(path, &entries)
            .with_context(|| format!("writing manifest to {}", path.display()))?;
        info!(manifest = %path.display(), entries = entries.len(), "wrote manifest");
    }

    Ok(RunSummary {
        seed,
        files,
        manifest: cfg.manifest.clone(),
    })
}

fn write_test_bench(
    path: &Path,
    config: &tbgen_core::Configuration,
    test_id: u32,
    arch_name: &str,
) -> Result<()> {
    let f = File::create(path).with_context(|| {
        format!(
            "could not open file {}. Please make sure that the target directory exists",
            path.display()
        )
    })?;
    TestBench::new(config, test_id, arch_name)
        .write_to(BufWriter::new(f))
        .with_context(|| format!("writing {}", path.display()))
}

/// Re-solve every case in a manifest; fails if any stored output disagrees.
///
/// Returns the number of cases checked.
pub fn verify(path: &Path) -> Result<usize> {
    info!(manifest = %path.display(), "verifying manifest");
    let entries = read_manifest_auto(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;

    let mismatches = verify_manifest(&entries);
    for m in &mismatches {
        warn!(
            test_id = m.test_id,
            stored = %format!("{:08b}", m.stored),
            expected = %format!("{:08b}", m.expected),
            "expected output disagrees with resolver"
        );
    }
    if !mismatches.is_empty() {
        bail!(
            "{} of {} cases in {} disagree with the resolver",
            mismatches.len(),
            entries.len(),
            path.display()
        );
    }
    Ok(entries.len())
}
