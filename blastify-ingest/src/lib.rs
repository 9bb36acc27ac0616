pub mod error;
mod format;

pub use format::{detect_format, FileFormat};

use blastify_core::contact::Contact;
use calamine::Reader;
use error::IngestError;
use std::io::Cursor;
use tracing::debug;

const NAME_FALLBACK: &str = "Unknown";

/// Converts an uploaded file into an ordered contact list.
///
/// Rows are keyed by column header (matched case-insensitively, surrounding
/// whitespace ignored); a missing `name` becomes "Unknown", missing `email`
/// and `phone` become empty strings. Ids are 1-based decimal indexes scoped
/// to this call. No deduplication or value validation is performed.
pub fn parse_contacts(bytes: &[u8], format: FileFormat) -> Result<Vec<Contact>, IngestError> {
    match format {
        FileFormat::Csv => parse_csv(bytes),
        FileFormat::Workbook => parse_workbook(bytes),
        // Accepted at the upload boundary, but no extractor is wired up.
        FileFormat::Pdf => Err(IngestError::UnsupportedFormat("pdf".to_owned())),
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Vec<Contact>, IngestError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

    let headers = normalize_headers(reader.headers()?.iter());
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_owned).collect());
    }
    Ok(assemble(&headers, rows))
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<Contact>, IngestError> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(bytes))?;

    // Only the first sheet is read, like the original spreadsheet-to-JSON pass.
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(vec![]),
    };

    let mut sheet_rows = range.rows();
    let headers = match sheet_rows.next() {
        Some(header_row) => normalize_headers(header_row.iter().map(|cell| cell.to_string())),
        None => return Ok(vec![]),
    };

    let rows = sheet_rows
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Ok(assemble(&headers, rows))
}

fn normalize_headers<I, S>(headers: I) -> Vec<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    headers
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect()
}

fn assemble(headers: &[String], rows: Vec<Vec<String>>) -> Vec<Contact> {
    let column = |name: &str| headers.iter().position(|h| h == name);
    let name_col = column("name");
    let email_col = column("email");
    let phone_col = column("phone");

    let mut contacts = Vec::new();
    for cells in rows {
        // Fully blank rows are skipped, not turned into empty contacts.
        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }

        let cell = |col: Option<usize>| {
            col.and_then(|i| cells.get(i)).cloned().unwrap_or_default()
        };

        let name = match cell(name_col) {
            name if name.is_empty() => NAME_FALLBACK.to_owned(),
            name => name,
        };

        contacts.push(Contact {
            id: (contacts.len() + 1).to_string(),
            name,
            email: cell(email_col),
            phone: cell(phone_col),
        });
    }

    debug!("Parsed {} contacts", contacts.len());
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_csv_text(text: &str) -> Vec<Contact> {
        parse_contacts(text.as_bytes(), FileFormat::Csv).unwrap()
    }

    #[test]
    fn one_contact_per_data_row_in_order() {
        let contacts = parse_csv_text(
            "name,email,phone\nJohn Doe,john@example.com,+1\nJane Smith,jane@example.com,+2\n",
        );

        assert_eq!(contacts.len(), 2);
        assert_eq!(
            contacts[0],
            Contact {
                id: "1".into(),
                name: "John Doe".into(),
                email: "john@example.com".into(),
                phone: "+1".into(),
            }
        );
        assert_eq!(
            contacts[1],
            Contact {
                id: "2".into(),
                name: "Jane Smith".into(),
                email: "jane@example.com".into(),
                phone: "+2".into(),
            }
        );
    }

    #[test]
    fn missing_name_column_defaults_to_unknown() {
        let contacts = parse_csv_text("email,phone\njohn@example.com,+1\n");

        assert_eq!(contacts[0].name, "Unknown");
        assert_eq!(contacts[0].email, "john@example.com");
    }

    #[test]
    fn empty_name_cell_defaults_to_unknown() {
        let contacts = parse_csv_text("name,email\n,john@example.com\n");

        assert_eq!(contacts[0].name, "Unknown");
    }

    #[test]
    fn missing_email_and_phone_default_to_empty() {
        let contacts = parse_csv_text("name\nJohn Doe\n");

        assert_eq!(contacts[0].email, "");
        assert_eq!(contacts[0].phone, "");
    }

    #[test]
    fn headers_match_case_insensitively_and_ignore_whitespace() {
        let contacts = parse_csv_text(" Name , EMAIL ,Phone\nAda,ada@example.com,+44\n");

        assert_eq!(contacts[0].name, "Ada");
        assert_eq!(contacts[0].email, "ada@example.com");
        assert_eq!(contacts[0].phone, "+44");
    }

    #[test]
    fn values_are_passed_through_untrimmed() {
        let contacts = parse_csv_text("name,email\n Ada , ada@example.com \n");

        assert_eq!(contacts[0].name, " Ada ");
        assert_eq!(contacts[0].email, " ada@example.com ");
    }

    #[test]
    fn blank_rows_are_skipped_and_ids_stay_sequential() {
        let contacts = parse_csv_text("name,email\nAda,ada@example.com\n,\nGrace,grace@example.com\n");

        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[1].id, "2");
        assert_eq!(contacts[1].name, "Grace");
    }

    #[test]
    fn short_rows_are_padded_with_defaults() {
        let contacts = parse_csv_text("name,email,phone\nAda\n");

        assert_eq!(contacts[0].name, "Ada");
        assert_eq!(contacts[0].email, "");
        assert_eq!(contacts[0].phone, "");
    }

    #[test]
    fn pdf_is_rejected_as_unsupported() {
        let result = parse_contacts(b"%PDF-1.4 ...", FileFormat::Pdf);

        assert!(matches!(result, Err(IngestError::UnsupportedFormat(kind)) if kind == "pdf"));
    }

    #[test]
    fn garbage_workbook_bytes_are_a_parse_failure() {
        let result = parse_contacts(b"PK\x03\x04 not actually a workbook", FileFormat::Workbook);

        assert!(matches!(result, Err(IngestError::Spreadsheet(_))));
    }

    #[test]
    fn invalid_utf8_csv_is_a_parse_failure() {
        let result = parse_contacts(&[0xFF, 0xFE, b'a', b',', b'b'], FileFormat::Csv);

        assert!(matches!(result, Err(IngestError::Csv(_))));
    }
}
