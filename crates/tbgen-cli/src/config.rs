//! Run configuration: built-in defaults, then an optional TOML profile, then
//! command-line flags.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use tbgen_core::SLOT_COUNT;
use tbgen_vhdl::{is_basic_identifier, DEFAULT_ARCH_NAME};

use crate::cli::Cli;

/// Number of cases when nothing else is configured.
pub const DEFAULT_CASE_COUNT: u32 = 20;

/// TOML profile; every key is optional.
///
/// ```toml
/// random_cases = 50
/// arch_name = "rtl"
/// seed = 7
/// near_count = 3
/// manifest = "cases.jsonl"
/// directory = "benches"
/// ```
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Profile {
    pub random_cases: Option<u32>,
    pub arch_name: Option<String>,
    pub seed: Option<u64>,
    pub near_count: Option<u8>,
    pub manifest: Option<PathBuf>,
    pub directory: Option<PathBuf>,
}

impl Profile {
    /// Read and parse a profile file.
    pub fn load(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path)
            .with_context(|| format!("read profile {}", path.display()))?;
        Self::parse(&src).with_context(|| format!("parse profile {}", path.display()))
    }

    /// Parse profile text.
    pub fn parse(src: &str) -> Result<Self> {
        toml::from_str(src).context("parse profile toml")
    }
}

/// Fully resolved generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub random_cases: u32,
    pub arch_name: String,
    pub directory: PathBuf,
    pub seed: Option<u64>,
    pub near_count: Option<usize>,
    pub manifest: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            random_cases: DEFAULT_CASE_COUNT,
            arch_name: DEFAULT_ARCH_NAME.to_owned(),
            directory: PathBuf::from("."),
            seed: None,
            near_count: None,
            manifest: None,
        }
    }
}

impl RunConfig {
    /// Defaults, overlaid by the profile named in `--config` (if any), overlaid by flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let profile = match &cli.config {
            Some(path) => Profile::load(path)?,
            None => Profile::default(),
        };
        Self::merge(profile, cli)
    }

    /// Overlay `profile` and then `cli` onto the defaults and validate.
    pub fn merge(profile: Profile, cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        if let Some(n) = profile.random_cases {
            cfg.random_cases = n;
        }
        if let Some(name) = profile.arch_name {
            cfg.arch_name = name;
        }
        if let Some(dir) = profile.directory {
            cfg.directory = dir;
        }
        cfg.seed = profile.seed;
        cfg.near_count = profile.near_count.map(usize::from);
        cfg.manifest = profile.manifest;

        if let Some(n) = cli.random_cases {
            cfg.random_cases = n;
        }
        if let Some(name) = &cli.arch_name {
            cfg.arch_name.clone_from(name);
        }
        if let Some(dir) = &cli.dir {
            cfg.directory.clone_from(dir);
        }
        if cli.seed.is_some() {
            cfg.seed = cli.seed;
        }
        if let Some(n) = cli.near_count {
            cfg.near_count = Some(usize::from(n));
        }
        if cli.manifest.is_some() {
            cfg.manifest.clone_from(&cli.manifest);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if !is_basic_identifier(&self.arch_name) {
            bail!(
                "invalid architecture name {:?}: expected a VHDL identifier (letter first, then letters, digits, single underscores)",
                self.arch_name
            );
        }
        if let Some(n) = self.near_count {
            if !(1..=SLOT_COUNT).contains(&n) {
                bail!("near count must be in 1..={SLOT_COUNT}, got {n}");
            }
        }
        Ok(())
    }
}
