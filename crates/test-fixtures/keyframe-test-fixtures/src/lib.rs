//! Shared JSON fixtures for keyframe sequence tests.
//!
//! Fixtures live under `fixtures/` at the workspace root and are indexed by
//! `fixtures/manifest.json`. Each sequence entry names the stored sequence
//! document and, optionally, a table of expected samples.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    sequences: HashMap<String, SequenceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SequenceEntry {
    Path(String),
    Detailed {
        sequence: String,
        #[serde(default)]
        samples: Option<String>,
    },
}

impl SequenceEntry {
    fn sequence_path(&self) -> &str {
        match self {
            SequenceEntry::Path(path) => path,
            SequenceEntry::Detailed { sequence, .. } => sequence,
        }
    }

    fn samples_path(&self) -> Option<&str> {
        match self {
            SequenceEntry::Path(_) => None,
            SequenceEntry::Detailed { samples, .. } => samples.as_deref(),
        }
    }
}

/// One expected sample of a fixture sequence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpectedSample {
    pub time: i32,
    pub value: Vec<f32>,
    #[serde(default = "default_in_range")]
    pub in_range: bool,
}

fn default_in_range() -> bool {
    true
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod sequences {
    use super::*;

    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.sequences.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.sequences, "sequence", name)?;
        read_to_string(entry.sequence_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.sequences, "sequence", name)?;
        super::load_json(entry.sequence_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.sequences, "sequence", name)?;
        Ok(resolve_path(entry.sequence_path()))
    }

    /// Expected samples for `name`, if the manifest lists any.
    pub fn samples(name: &str) -> Result<Option<Vec<ExpectedSample>>> {
        let entry = lookup(&MANIFEST.sequences, "sequence", name)?;
        match entry.samples_path() {
            Some(rel) => super::load_json(rel).map(Some),
            None => Ok(None),
        }
    }
}
