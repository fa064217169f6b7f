use crate::datekey::to_key;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use thiserror::Error;
use time::Date;

/// The notes recorded for a single day.  Every field is optional; a missing
/// field means there is nothing to show for that category.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotationRecord {
    #[serde(default)]
    pub(crate) fast: Option<String>,
    #[serde(default)]
    pub(crate) holiday: Option<String>,
    #[serde(default)]
    pub(crate) special_day: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub(crate) saints: Vec<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Annotation records keyed by `YYYY-MM-DD`.  Never modified after it is
/// built; a reload replaces the whole mapping.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct CalendarData(HashMap<String, AnnotationRecord>);

impl CalendarData {
    pub(crate) fn empty() -> CalendarData {
        CalendarData::default()
    }

    /// Parse a data file.  Only a document that is not a JSON object fails;
    /// a record that does not have the expected shape is logged and skipped.
    pub(crate) fn from_json_str(s: &str) -> Result<CalendarData, serde_json::Error> {
        let raw = serde_json::from_str::<HashMap<String, serde_json::Value>>(s)?;
        let records = raw
            .into_iter()
            .filter_map(|(key, value)| match serde_json::from_value(value) {
                Ok(record) => Some((key, record)),
                Err(e) => {
                    log::warn!("Skipping annotation record {key:?}: {e}");
                    None
                }
            })
            .collect();
        Ok(CalendarData(records))
    }

    pub(crate) fn try_load(path: &Path) -> Result<CalendarData, LoadError> {
        let src = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::Missing {
                    path: path.to_owned(),
                }
            } else {
                LoadError::Read {
                    path: path.to_owned(),
                    source,
                }
            }
        })?;
        CalendarData::from_json_str(&src).map_err(|source| LoadError::Malformed {
            path: path.to_owned(),
            source,
        })
    }

    /// Load the data file, degrading to an empty mapping on any failure
    pub(crate) fn load(path: &Path) -> CalendarData {
        match CalendarData::try_load(path) {
            Ok(data) => {
                if data.is_empty() {
                    log::warn!("Annotation file {} has no entries", path.display());
                } else {
                    log::info!(
                        "Loaded annotations for {} dates from {}",
                        data.len(),
                        path.display()
                    );
                }
                data
            }
            Err(e) => {
                log::warn!("{e}; continuing without annotations");
                CalendarData::empty()
            }
        }
    }

    pub(crate) fn lookup(&self, date: Date) -> Option<&AnnotationRecord> {
        self.0.get(&to_key(date))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("annotation file {} does not exist", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read annotation file {}", .path.display())]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("annotation file {} is malformed: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A data file being read on a background thread
#[derive(Debug)]
pub(crate) struct DataLoad {
    path: PathBuf,
    receiver: Receiver<CalendarData>,
}

impl DataLoad {
    pub(crate) fn spawn(path: PathBuf) -> DataLoad {
        let (sender, receiver) = mpsc::channel();
        let thread_path = path.clone();
        thread::spawn(move || {
            // The receiver may have been dropped if the app quit first.
            let _ = sender.send(CalendarData::load(&thread_path));
        });
        DataLoad { path, receiver }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the loaded data once it is available without blocking.  A
    /// loader thread that died without sending is treated as an empty load.
    pub(crate) fn try_finish(&self) -> Option<CalendarData> {
        match self.receiver.try_recv() {
            Ok(data) => Some(data),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::warn!(
                    "Loader for {} exited without a result; continuing without annotations",
                    self.path.display()
                );
                Some(CalendarData::empty())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn wait(self) -> CalendarData {
        self.receiver.recv().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "synaxis-{}-{name}.json",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parse_record() {
        let data = CalendarData::from_json_str(
            r#"{
                "2025-08-10": {"holiday": "Feast X", "saints": ["A", "B"]},
                "2025-08-15": {"fast": "Fish allowed", "specialDay": "Dormition", "note": 1}
            }"#,
        )
        .unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(
            data.lookup(date!(2025 - 08 - 10)),
            Some(&AnnotationRecord {
                fast: None,
                holiday: Some(String::from("Feast X")),
                special_day: None,
                saints: vec![String::from("A"), String::from("B")],
            })
        );
        let rec = data.lookup(date!(2025 - 08 - 15)).unwrap();
        assert_eq!(rec.fast.as_deref(), Some("Fish allowed"));
        assert_eq!(rec.special_day.as_deref(), Some("Dormition"));
        assert!(rec.saints.is_empty());
        assert_eq!(data.lookup(date!(2025 - 08 - 11)), None);
    }

    #[test]
    fn test_null_fields() {
        let data = CalendarData::from_json_str(r#"{"2025-01-07": {"fast": null}}"#).unwrap();
        assert_eq!(
            data.lookup(date!(2025 - 01 - 07)),
            Some(&AnnotationRecord::default())
        );
    }

    #[test]
    fn test_null_saints_is_empty() {
        let data = CalendarData::from_json_str(
            r#"{"2025-08-10": {"holiday": "Feast X", "saints": null},
                "2025-08-11": {"holiday": "Feast Y"}}"#,
        )
        .unwrap();
        assert_eq!(data.len(), 2);
        let rec = data.lookup(date!(2025 - 08 - 10)).unwrap();
        assert_eq!(rec.holiday.as_deref(), Some("Feast X"));
        assert!(rec.saints.is_empty());
        assert_eq!(
            data.lookup(date!(2025 - 08 - 11))
                .and_then(|r| r.holiday.as_deref()),
            Some("Feast Y")
        );
    }

    #[test]
    fn test_bad_record_is_skipped() {
        let data = CalendarData::from_json_str(
            r#"{"2025-08-10": {"holiday": "Feast X"},
                "2025-08-11": {"fast": 1},
                "2025-08-12": "fast",
                "2025-08-13": {"saints": ["A", 2]}}"#,
        )
        .unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(
            data.lookup(date!(2025 - 08 - 10))
                .and_then(|r| r.holiday.as_deref()),
            Some("Feast X")
        );
        assert_eq!(data.lookup(date!(2025 - 08 - 11)), None);
        assert_eq!(data.lookup(date!(2025 - 08 - 12)), None);
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(CalendarData::from_json_str("[1, 2, 3]").is_err());
        assert!(CalendarData::from_json_str(r#""fast""#).is_err());
        assert!(CalendarData::from_json_str("{").is_err());
    }

    #[test]
    fn test_try_load_missing() {
        let path = std::env::temp_dir().join("synaxis-definitely-not-here.json");
        assert!(matches!(
            CalendarData::try_load(&path),
            Err(LoadError::Missing { .. })
        ));
        assert!(CalendarData::load(&path).is_empty());
    }

    #[test]
    fn test_try_load_malformed() {
        let path = temp_file("malformed", "{\"2025-01-07\": ");
        let r = CalendarData::try_load(&path);
        assert!(matches!(r, Err(LoadError::Malformed { .. })));
        assert!(CalendarData::load(&path).is_empty());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_background_load() {
        let path = temp_file("background", r#"{"2025-12-25": {"holiday": "Nativity"}}"#);
        let load = DataLoad::spawn(path.clone());
        assert_eq!(load.path(), path.as_path());
        let data = load.wait();
        assert_eq!(
            data.lookup(date!(2025 - 12 - 25))
                .and_then(|r| r.holiday.as_deref()),
            Some("Nativity")
        );
        std::fs::remove_file(path).unwrap();
    }
}
