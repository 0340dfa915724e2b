use std::io::Write;

use walkmate_distance::BatchResult;

use crate::error::IoError;

/// Write the result of a batch as pretty-printed JSON.
///
/// # Arguments
///
/// * `writer` - Destination of the JSON text, e.g. a file or stdout.
/// * `result` - The batch result with its reports and skipped records.
pub fn write_reports_json<W: Write>(mut writer: W, result: &BatchResult) -> Result<(), IoError> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    Ok(())
}
