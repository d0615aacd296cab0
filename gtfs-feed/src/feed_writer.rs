//! Writes the export tables to a directory of CSV files.
use crate::{objects::*, Error, ExportStopTime, ExportTrip, Feed};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Writes a compiled export next to the untouched tables.
///
/// `trips.txt` and `stop_times.txt` come from the compiler output; the other
/// tables are passed through from the editable feed as-is. Rows are sorted by
/// id so two exports of the same session are byte-identical.
pub fn write_export(
    dir: &Path,
    export_trips: &[ExportTrip],
    export_stop_times: &[ExportStopTime],
    feed: &Feed,
) -> Result<(), Error> {
    std::fs::create_dir_all(dir)?;

    write_objs(dir.join("trips.txt"), export_trips)?;
    write_objs(dir.join("stop_times.txt"), export_stop_times)?;

    let mut stops: Vec<&Stop> = feed.stops.values().collect();
    stops.sort_by(|a, b| a.id.cmp(&b.id));
    write_objs(dir.join("stops.txt"), stops)?;

    let mut routes: Vec<&Route> = feed.routes.values().collect();
    routes.sort_by(|a, b| a.id.cmp(&b.id));
    write_objs(dir.join("routes.txt"), routes)?;

    write_objs(dir.join("agency.txt"), &feed.agencies)?;

    if !feed.calendar.is_empty() {
        let mut calendars: Vec<&Calendar> = feed.calendar.values().collect();
        calendars.sort_by(|a, b| a.id.cmp(&b.id));
        write_objs(dir.join("calendar.txt"), calendars)?;
    }

    if !feed.shapes.is_empty() {
        let mut shape_ids: Vec<&String> = feed.shapes.keys().collect();
        shape_ids.sort();
        let points = shape_ids
            .into_iter()
            .flat_map(|id| feed.shapes[id].iter());
        write_objs(dir.join("shapes.txt"), points)?;
    }

    Ok(())
}

fn write_objs<O>(path: PathBuf, rows: impl IntoIterator<Item = O>) -> Result<(), Error>
where
    O: Serialize,
{
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("invalid_file_name")
        .to_string();
    let mut writer = csv::Writer::from_path(&path).map_err(|e| Error::Csv {
        file_name: file_name.clone(),
        source: e,
    })?;
    for row in rows {
        writer.serialize(row).map_err(|e| Error::Csv {
            file_name: file_name.clone(),
            source: e,
        })?;
    }
    writer.flush()?;
    Ok(())
}
