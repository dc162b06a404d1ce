// Input discovery and output naming
use crate::domain::error::DocError;
use std::path::{Path, PathBuf};

/// First regular file in `dir` whose name contains `.html`, by name order.
pub fn find_html_file(dir: &Path) -> Result<PathBuf, DocError> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().contains(".html"))
                .unwrap_or(false)
        })
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        DocError::InvalidInput(
            "At least specify input file with --input or -i.".to_string(),
        )
    })
}

/// `report.html` + `DE` -> `report.de.html`, next to the input.
pub fn derive_output_path(input: &Path, target_lang: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "html".to_string());
    let name = format!("{}.{}.{}", stem, target_lang.trim().to_lowercase(), ext);
    input.with_file_name(name)
}
