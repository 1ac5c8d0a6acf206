//! Reading document samples from JSON Lines.

use anyhow::Context;
use json_types::json_to_document;
use panel_core::Document;
use std::io::BufRead;
use std::path::Path;

/// Parse one JSON object per line. Blank lines are skipped.
pub fn read_documents<R: BufRead>(reader: R) -> anyhow::Result<Vec<Document>> {
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(&line)
            .with_context(|| format!("Invalid JSON on line {line_number}"))?;
        let document = json_to_document(value)
            .with_context(|| format!("Line {line_number} is not a document"))?;
        documents.push(document);
    }
    Ok(documents)
}

/// Read every document of a JSONL file.
pub fn read_documents_from_file(path: &Path) -> anyhow::Result<Vec<Document>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_documents(std::io::BufReader::new(file))
}
