use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use walkmate_distance::RawDetection;

use crate::error::IoError;

/// One record of the detector's JSON export.
///
/// Coordinates that are missing, `null` or not a number are carried as `None`,
/// validation drops such records.
#[derive(Debug, Default, Deserialize)]
struct DetectionRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    class: Option<Value>,
    #[serde(default)]
    confidence: Option<Value>,
    #[serde(default, rename = "box")]
    bbox: Option<BoxRecord>,
}

/// The four corners of an oriented box, `x1, y1` to `x4, y4`.
#[derive(Debug, Default, Deserialize)]
struct BoxRecord {
    #[serde(default)]
    x1: Option<Value>,
    #[serde(default)]
    y1: Option<Value>,
    #[serde(default)]
    x2: Option<Value>,
    #[serde(default)]
    y2: Option<Value>,
    #[serde(default)]
    x3: Option<Value>,
    #[serde(default)]
    y3: Option<Value>,
    #[serde(default)]
    x4: Option<Value>,
    #[serde(default)]
    y4: Option<Value>,
}

fn as_number(value: &Option<Value>) -> Option<f64> {
    value.as_ref().and_then(Value::as_f64)
}

impl From<DetectionRecord> for RawDetection {
    fn from(record: DetectionRecord) -> Self {
        let label = match (record.name, record.class) {
            (Some(name), _) => name,
            (None, Some(Value::String(class))) => class,
            (None, Some(class)) => class.to_string(),
            (None, None) => "unknown".to_string(),
        };

        let confidence = as_number(&record.confidence).unwrap_or(0.0);

        let b = record.bbox.unwrap_or_default();
        let vertices = [
            [as_number(&b.x1), as_number(&b.y1)],
            [as_number(&b.x2), as_number(&b.y2)],
            [as_number(&b.x3), as_number(&b.y3)],
            [as_number(&b.x4), as_number(&b.y4)],
        ];

        RawDetection {
            id: None,
            label,
            confidence,
            vertices,
        }
    }
}

/// Parse detection records from the detector's JSON export.
///
/// The export is an array of objects such as
/// `{"name": "braille_block", "class": 0, "confidence": 0.91, "box": {"x1": .., "y1": .., .., "y4": ..}}`.
///
/// # Arguments
///
/// * `json` - The JSON text.
///
/// # Returns
///
/// The records in file order.
pub fn parse_detections(json: &str) -> Result<Vec<RawDetection>, IoError> {
    let records: Vec<DetectionRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(RawDetection::from).collect())
}

/// Read detection records from a JSON file.
///
/// See [`parse_detections`] for the expected format.
pub fn read_detections_json(file_path: impl AsRef<Path>) -> Result<Vec<RawDetection>, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let json = std::fs::read_to_string(file_path)?;
    let detections = parse_detections(&json)?;
    log::debug!(
        "read {} detections from {}",
        detections.len(),
        file_path.display()
    );

    Ok(detections)
}
