//! File-kind classification from the declared extension

/// Broad processing category for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Portable Document Format; goes through per-page text extraction.
    Pdf,
    /// Excel-family workbook (xls, xlsx, xlsm, xlsb, xlt, xltx, xltm, xlam).
    Spreadsheet,
    /// Comma-separated values.
    Csv,
    /// Raster image; accepted by the upload filter, not yet processable.
    Image,
}

const IMAGE_EXTENSIONS: &[&str] = &["gif", "tiff", "jpeg", "jpg", "png", "bmp", "webp"];
const SPREADSHEET_EXTENSIONS: &[&str] =
    &["xls", "xlsx", "xlsm", "xlsb", "xlt", "xltx", "xltm", "xlam"];

impl FileKind {
    /// Classify a bare extension (no dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(FileKind::Pdf),
            "csv" => Some(FileKind::Csv),
            e if SPREADSHEET_EXTENSIONS.contains(&e) => Some(FileKind::Spreadsheet),
            e if IMAGE_EXTENSIONS.contains(&e) => Some(FileKind::Image),
            _ => None,
        }
    }

    /// Classify a filename by its last extension.
    pub fn from_filename(filename: &str) -> Option<FileKind> {
        extension_of(filename).and_then(|ext| Self::from_extension(&ext))
    }
}

/// Last extension of a filename, lowercased. `None` when there is no dot.
pub(crate) fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() {
        // Dotfiles like ".csv" have no stem and no real extension.
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether an uploaded filename passes the recognized-extension filter.
pub fn is_allowed(filename: &str) -> bool {
    FileKind::from_filename(filename).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_pdf() {
        assert_eq!(FileKind::from_filename("doc.pdf"), Some(FileKind::Pdf));
        assert_eq!(FileKind::from_filename("DOC.PDF"), Some(FileKind::Pdf));
    }

    #[test]
    fn test_classifies_spreadsheets() {
        for name in [
            "a.xls", "a.xlsx", "a.xlsm", "a.xlsb", "a.xlt", "a.xltx", "a.xltm", "a.xlam",
        ] {
            assert_eq!(
                FileKind::from_filename(name),
                Some(FileKind::Spreadsheet),
                "{name}"
            );
        }
    }

    #[test]
    fn test_classifies_images() {
        for name in ["a.gif", "a.tiff", "a.jpeg", "a.jpg", "a.png", "a.bmp", "a.webp"] {
            assert_eq!(FileKind::from_filename(name), Some(FileKind::Image), "{name}");
        }
    }

    #[test]
    fn test_rejects_unknown() {
        assert_eq!(FileKind::from_filename("a.txt"), None);
        assert_eq!(FileKind::from_filename("no_extension"), None);
        assert_eq!(FileKind::from_filename(".csv"), None);
    }

    #[test]
    fn test_uses_last_extension() {
        assert_eq!(FileKind::from_filename("a.pdf.csv"), Some(FileKind::Csv));
    }

    #[test]
    fn test_is_allowed() {
        assert!(is_allowed("manifest.csv"));
        assert!(is_allowed("scan.webp"));
        assert!(!is_allowed("README.md"));
    }
}
