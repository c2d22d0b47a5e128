//! GTFS feed reader: archive extraction, CSV decoding into typed records,
//! and cleaning into a [`feed::TransitFeed`] the graph builder can consume.

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::feed::{FeedRecords, TransitFeed};

pub mod data_model;
pub mod feed;

const REQUIRED_FILES: [&str; 4] =
    ["stops.txt", "routes.txt", "trips.txt", "stop_times.txt"];

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("csv decode error: {0}")]
    Csv(#[from] csv::Error),
    #[error("feed download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("missing required feed file '{0}'")]
    MissingFile(&'static str),
}

/// Reads a feed from a directory of extracted `.txt` files.
/// `calendar.txt` and `calendar_dates.txt` are optional; the four files in
/// [`REQUIRED_FILES`] are not.
pub fn read_feed_dir(dir: &Path) -> Result<TransitFeed, FeedError> {
    for file in REQUIRED_FILES {
        if !dir.join(file).exists() {
            return Err(FeedError::MissingFile(file));
        }
    }

    let records = FeedRecords {
        stops: read_records(File::open(dir.join("stops.txt"))?)?,
        routes: read_records(File::open(dir.join("routes.txt"))?)?,
        trips: read_records(File::open(dir.join("trips.txt"))?)?,
        stop_times: read_records(File::open(dir.join("stop_times.txt"))?)?,
        calendars: read_optional_file(dir, "calendar.txt")?,
        calendar_dates: read_optional_file(dir, "calendar_dates.txt")?,
    };
    Ok(TransitFeed::from_records(records))
}

/// Reads a feed straight out of a GTFS ZIP archive, without extracting it
/// to disk.
pub fn read_feed_zip(path: &Path) -> Result<TransitFeed, FeedError> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;

    let stops = read_records(required_entry(&mut archive, "stops.txt")?)?;
    let routes = read_records(required_entry(&mut archive, "routes.txt")?)?;
    let trips = read_records(required_entry(&mut archive, "trips.txt")?)?;
    let stop_times = read_records(required_entry(&mut archive, "stop_times.txt")?)?;
    let calendars = read_optional_entry(&mut archive, "calendar.txt")?;
    let calendar_dates = read_optional_entry(&mut archive, "calendar_dates.txt")?;

    let records = FeedRecords {
        stops,
        routes,
        trips,
        stop_times,
        calendars,
        calendar_dates,
    };
    Ok(TransitFeed::from_records(records))
}

/// Downloads a GTFS archive to a local file and returns its path-ready name.
pub async fn download_feed(url: &str, file_name: &str) -> Result<(), FeedError> {
    let client = reqwest::Client::builder().build()?;
    let response = client.get(url).send().await?.error_for_status()?;

    let mut file = File::create(file_name)?;
    let mut content = Cursor::new(response.bytes().await?);
    io::copy(&mut content, &mut file)?;
    Ok(())
}

fn read_records<R: Read, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, FeedError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

fn read_optional_file<T: DeserializeOwned>(
    dir: &Path,
    file: &str,
) -> Result<Vec<T>, FeedError> {
    let path = dir.join(file);
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_records(File::open(path)?)
}

fn required_entry<'a, R: Read + io::Seek>(
    archive: &'a mut zip::ZipArchive<R>,
    name: &'static str,
) -> Result<zip::read::ZipFile<'a>, FeedError> {
    match archive.by_name(name) {
        Ok(entry) => Ok(entry),
        Err(zip::result::ZipError::FileNotFound) => Err(FeedError::MissingFile(name)),
        Err(why) => Err(why.into()),
    }
}

fn read_optional_entry<R: Read + io::Seek, T: DeserializeOwned>(
    archive: &mut zip::ZipArchive<R>,
    name: &str,
) -> Result<Vec<T>, FeedError> {
    match archive.by_name(name) {
        Ok(entry) => read_records(entry),
        Err(zip::result::ZipError::FileNotFound) => Ok(Vec::new()),
        Err(why) => Err(why.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_model::stops::StopRecord;

    #[test]
    fn decodes_csv_records() {
        let csv = "stop_id,stop_name,stop_lat,stop_lon\n\
                   A,Gare A,14.7,-17.4\n\
                   B,,,\n";
        let records: Vec<StopRecord> = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].stop_id, "A");
        assert_eq!(records[0].stop_lat, Some(14.7));
        assert_eq!(records[1].stop_name, None);
        assert_eq!(records[1].stop_lat, None);
    }

    #[test]
    fn missing_required_file_is_reported() {
        let dir = std::env::temp_dir().join("gtfs-empty-feed-test");
        std::fs::create_dir_all(&dir).unwrap();
        let result = read_feed_dir(&dir);
        assert!(matches!(result, Err(FeedError::MissingFile(_))));
    }
}
