//! Reading user-supplied documents from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("'{0}' is not a PDF file (expected a .pdf extension)")]
    NotPdf(String),
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a PDF upload. Only files with a `.pdf` extension are accepted.
pub fn read_pdf(path: &Path) -> Result<Vec<u8>, InputError> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf {
        return Err(InputError::NotPdf(path.display().to_string()));
    }
    fs::read(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_read_pdf_rejects_other_extensions() {
        let result = read_pdf(Path::new("notes.txt"));
        assert!(matches!(result, Err(InputError::NotPdf(_))));
    }

    #[test]
    fn test_read_pdf_accepts_uppercase_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("REPORT.PDF");
        fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.7")
            .unwrap();

        assert_eq!(read_pdf(&path).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_read_pdf_missing_file() {
        let result = read_pdf(Path::new("definitely/missing.pdf"));
        assert!(matches!(result, Err(InputError::Read { .. })));
    }
}
