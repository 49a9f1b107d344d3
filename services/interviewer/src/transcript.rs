//! Transcript files: the full turn log as JSON Lines.

use anyhow::{Context, Result};
use interviewer_core::TurnStore;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

pub fn save_transcript(path: &Path, store: &TurnStore) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create transcript {}", path.display()))?;
    store.write_jsonl(BufWriter::new(file))?;
    Ok(())
}

pub fn load_transcript(path: &Path) -> Result<TurnStore> {
    let file =
        File::open(path).with_context(|| format!("Failed to open transcript {}", path.display()))?;
    let store = TurnStore::read_jsonl(BufReader::new(file))
        .with_context(|| format!("Invalid transcript {}", path.display()))?;
    Ok(store)
}
