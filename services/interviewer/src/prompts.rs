//! Prompt overrides loaded from a directory of Markdown files.

use anyhow::{Context, Result};
use interviewer_core::prompts::Prompts;
use std::{collections::HashMap, fs, path::Path};
use tracing::info;

/// Reads every `*.md` file in `prompts_path`, keyed by file stem.
fn read_prompt_files(prompts_path: &Path) -> Result<HashMap<String, String>> {
    let mut prompts = HashMap::new();
    for entry in fs::read_dir(prompts_path)
        .with_context(|| format!("Failed to read prompts directory {}", prompts_path.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            let prompt_key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .context("Could not get file stem")?
                .to_string();
            let content = fs::read_to_string(&path)?;
            prompts.insert(prompt_key, content.trim().to_string());
        }
    }
    Ok(prompts)
}

/// Built-in prompts, with `system_prompt.md` and `reflection_prompt.md`
/// from `prompts_path` taking precedence when present.
pub fn load_prompts(prompts_path: Option<&Path>) -> Result<Prompts> {
    let mut prompts = Prompts::default();
    let Some(dir) = prompts_path else {
        return Ok(prompts);
    };

    let mut files = read_prompt_files(dir)?;
    if let Some(system_prompt) = files.remove("system_prompt") {
        info!(path = %dir.display(), "Using system prompt override");
        prompts.system_prompt = system_prompt;
    }
    if let Some(reflection_prompt) = files.remove("reflection_prompt") {
        info!(path = %dir.display(), "Using reflection prompt override");
        prompts.reflection_prompt = reflection_prompt;
    }
    Ok(prompts)
}
