use thiserror::Error;

/// UTF-8 byte order mark; Excel needs it to read accented characters in CSV.
const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush export buffer: {0}")]
    Flush(String),
    #[error("export is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Renders a table as CSV that spreadsheet applications open directly.
pub fn rows_to_csv<H, R, C>(headers: &[H], rows: &[R]) -> Result<String, ExportError>
where
    H: AsRef<str>,
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers.iter().map(|h| h.as_ref()))?;
    for row in rows {
        writer.write_record(row.as_ref().iter().map(|c| c.as_ref()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    Ok(format!("{}{}", UTF8_BOM, String::from_utf8(bytes)?))
}

/// `base` with spaces replaced by underscores and the given extension.
pub fn export_file_name(base: &str, extension: &str) -> String {
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}.{}", joined, extension.trim_start_matches('.'))
}
