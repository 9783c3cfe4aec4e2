//! File I/O utilities for reading JSONL, text files, and ensuring directories.
//!
//! Helper functions shared across CLI commands:
//! - Reading from stdin (interactive input)
//! - Reading text files with automatic .zst decompression
//! - Ensuring parent directories exist before file writes

use std::io::BufRead;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Trims whitespace from the input and returns `None` on EOF or read errors.
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => {
            let trimmed = line.trim();
            Some(trimmed.to_string())
        }
        Err(_) => None,
    }
}

/// Read a text file with automatic .zst decompression detection.
///
/// Paths ending in ".zst" are decompressed with Zstandard. A UTF-8 BOM is
/// stripped if present.
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        // Read the whole compressed file then decompress; portable across platforms
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::bulk::decompress(&comp, 8 * 1024 * 1024).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure the parent directory exists for the given path, creating if needed.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
        }
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
