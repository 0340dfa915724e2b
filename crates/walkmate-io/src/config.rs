use std::path::Path;

use walkmate_distance::DistanceConfig;

use crate::error::IoError;

/// Read a [`DistanceConfig`] from a JSON file.
///
/// Missing fields take their default values, e.g. `{"block_side_cm": 50.0}`.
///
/// # Arguments
///
/// * `file_path` - Path to the JSON file.
pub fn read_config_json(file_path: impl AsRef<Path>) -> Result<DistanceConfig, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let file = std::fs::File::open(file_path)?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))?;

    Ok(config)
}
