//! Dataset artifact on disk.
//!
//! One pretty-printed JSON array per (selector, collection date) at
//! `{data_dir}/pois/raw/yelp_{selector}_{YYYY-MM-DD}.json`. Content is written
//! to a temp file in the same directory and renamed over the target, so a
//! failed write never leaves a partial artifact and a rerun on the same day
//! replaces the previous one.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{CollectorError, Result};
use crate::runner::Dataset;
use crate::selector::CategorySelector;

#[cfg_attr(not(unix), allow(dead_code))]
const ARTIFACT_MODE: u32 = 0o644;

pub struct Persister {
    output_dir: PathBuf,
    collection_date: NaiveDate,
}

impl Persister {
    pub fn new(data_dir: &Path, collection_date: NaiveDate) -> Self {
        Self {
            output_dir: data_dir.join("pois").join("raw"),
            collection_date,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn artifact_path(&self, selector: CategorySelector) -> PathBuf {
        self.output_dir.join(format!(
            "yelp_{}_{}.json",
            selector.as_str(),
            self.collection_date.format("%Y-%m-%d")
        ))
    }

    pub fn save(&self, dataset: &Dataset, selector: CategorySelector) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(dataset)?;

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| CollectorError::io(&self.output_dir, e))?;

        let path = self.artifact_path(selector);
        let mut tmp = NamedTempFile::new_in(&self.output_dir)
            .map_err(|e| CollectorError::io(&self.output_dir, e))?;
        let written = write_synced(&mut tmp, json.as_bytes()).and_then(|_| make_readable(&tmp));
        if let Err(e) = written {
            return Err(CollectorError::io(tmp.path(), e));
        }
        tmp.persist(&path)
            .map_err(|e| CollectorError::io(&path, e.error))?;

        info!(path = %path.display(), pois = dataset.len(), "Saved POI dataset");
        Ok(path)
    }
}

/// Temp files are created owner-only; the artifact is read by other tooling.
#[cfg(unix)]
fn make_readable(tmp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(std::fs::Permissions::from_mode(ARTIFACT_MODE))
}

#[cfg(not(unix))]
fn make_readable(_tmp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}

fn write_synced(tmp: &mut NamedTempFile, bytes: &[u8]) -> std::io::Result<()> {
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchors::Anchor;
    use crate::record::RecordBuilder;
    use chrono::Utc;
    use yelp_client::Business;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    fn one_poi() -> Dataset {
        let mut ds = Dataset::new();
        let business = Business {
            id: "x".into(),
            ..Default::default()
        };
        let anchor = Anchor::new("Luxor", 36.0955, -115.1761, "South Strip");
        ds.push(RecordBuilder::new(Utc::now()).build(&business, &anchor, 1000));
        ds
    }

    #[test]
    fn artifact_name_is_selector_and_day() {
        let persister = Persister::new(Path::new("/data"), date());
        assert_eq!(
            persister.artifact_path(CategorySelector::Bars),
            PathBuf::from("/data/pois/raw/yelp_bars_2026-02-14.json")
        );
    }

    #[test]
    fn save_writes_json_array_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let persister = Persister::new(dir.path(), date());
        let path = persister.save(&one_poi(), CategorySelector::Restaurants).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let arr = value.as_array().unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["id"], "poi_1000");
    }

    #[test]
    fn rerun_overwrites_same_day_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let persister = Persister::new(dir.path(), date());
        persister.save(&one_poi(), CategorySelector::All).unwrap();
        let path = persister.save(&Dataset::new(), CategorySelector::All).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
        let files: Vec<_> = std::fs::read_dir(persister.output_dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn artifact_is_readable_by_group_and_world() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let persister = Persister::new(dir.path(), date());
        let path = persister.save(&one_poi(), CategorySelector::Bars).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let persister = Persister::new(&blocker, date());
        let err = persister.save(&one_poi(), CategorySelector::Shopping).unwrap_err();
        assert!(matches!(err, CollectorError::Io { .. }));
        assert!(!persister.artifact_path(CategorySelector::Shopping).exists());
    }
}
