//! Notes loader

use std::fs;

use crate::error::{Error, Result};

/// Resolve the notes argument to the text placed under each table title
///
/// Input ending in `.md` is read as a file and returned verbatim; anything
/// else is the notes text itself (surrounding whitespace trimmed).
pub fn load_notes(input: &str) -> Result<String> {
    let input = input.trim();

    if input.ends_with(".md") {
        let text = fs::read_to_string(input).map_err(|e| Error::from_io(e, "Notes file", input))?;
        log::debug!("Loaded {} bytes of notes from {}", text.len(), input);
        return Ok(text);
    }

    Ok(input.to_string())
}
