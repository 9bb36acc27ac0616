/// Upload format, as declared by the uploader or sniffed from the payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileFormat {
    Csv,
    Workbook,
    Pdf,
}

const PDF_MAGIC: &[u8] = b"%PDF";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
// Legacy .xls files are OLE compound documents
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Resolves the upload format. A declared name or content type wins over
/// sniffing; unidentified payloads fall back to CSV, the loosest format.
pub fn detect_format(
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: &[u8],
) -> FileFormat {
    if let Some(name) = file_name {
        let name = name.to_ascii_lowercase();
        if name.ends_with(".csv") {
            return FileFormat::Csv;
        }
        if name.ends_with(".xlsx") || name.ends_with(".xls") {
            return FileFormat::Workbook;
        }
        if name.ends_with(".pdf") {
            return FileFormat::Pdf;
        }
    }

    match content_type {
        Some("text/csv") => return FileFormat::Csv,
        Some("application/pdf") => return FileFormat::Pdf,
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        | Some("application/vnd.ms-excel") => return FileFormat::Workbook,
        _ => {}
    }

    if bytes.starts_with(PDF_MAGIC) {
        return FileFormat::Pdf;
    }
    if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
        return FileFormat::Workbook;
    }
    FileFormat::Csv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_extension_wins() {
        assert_eq!(
            detect_format(Some("contacts.CSV"), None, b"%PDF-1.4"),
            FileFormat::Csv
        );
        assert_eq!(
            detect_format(Some("contacts.xlsx"), None, b""),
            FileFormat::Workbook
        );
        assert_eq!(
            detect_format(Some("contacts.xls"), None, b""),
            FileFormat::Workbook
        );
        assert_eq!(
            detect_format(Some("flyer.pdf"), None, b""),
            FileFormat::Pdf
        );
    }

    #[test]
    fn content_type_is_used_when_the_name_is_inconclusive() {
        assert_eq!(
            detect_format(Some("upload.bin"), Some("text/csv"), b""),
            FileFormat::Csv
        );
        assert_eq!(
            detect_format(
                None,
                Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
                b""
            ),
            FileFormat::Workbook
        );
        assert_eq!(
            detect_format(None, Some("application/pdf"), b""),
            FileFormat::Pdf
        );
    }

    #[test]
    fn magic_bytes_are_the_last_resort() {
        assert_eq!(detect_format(None, None, b"%PDF-1.7..."), FileFormat::Pdf);
        assert_eq!(
            detect_format(None, None, b"PK\x03\x04zipdata"),
            FileFormat::Workbook
        );
        assert_eq!(
            detect_format(None, None, &[0xD0, 0xCF, 0x11, 0xE0, 0x00]),
            FileFormat::Workbook
        );
        assert_eq!(
            detect_format(None, None, b"name,email\nAda,ada@example.com\n"),
            FileFormat::Csv
        );
    }
}
