use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::PrefError;

const APP_NAME: &str = "content-prefs";

pub fn get_app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn save_json_in<T: Serialize>(dir: &Path, data: &T, filename: &str) -> Result<(), PrefError> {
    let file_path = dir.join(filename);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&file_path, json)?;
    tracing::debug!("Data saved to: {}", file_path.display());
    Ok(())
}

/// Reads `filename` from `dir`. A missing file is not an error: `Ok(None)`.
pub fn load_json_in<T: for<'de> Deserialize<'de>>(
    dir: &Path,
    filename: &str,
) -> Result<Option<T>, PrefError> {
    let file_path = dir.join(filename);

    if !file_path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&file_path)?;
    let data: T = serde_json::from_str(&json)?;
    tracing::debug!("Data loaded from: {}", file_path.display());
    Ok(Some(data))
}

#[cfg(test)]
mod tests {
    use serde::{
        Deserialize,
        Serialize,
    };

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        url: String,
        retries: u32,
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let sample = Sample { url: "http://localhost".to_string(), retries: 3 };

        save_json_in(dir.path(), &sample, "sample.json").unwrap();
        let loaded: Option<Sample> = load_json_in(dir.path(), "sample.json").unwrap();
        assert_eq!(loaded, Some(sample));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Option<Sample> = load_json_in(dir.path(), "absent.json").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let loaded = load_json_in::<Sample>(dir.path(), "broken.json");
        assert!(matches!(loaded, Err(PrefError::Json(_))));
    }
}
