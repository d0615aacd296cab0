//! Reads a feed from a directory of CSV tables.
//!
//! Zip archives are deliberately not handled here: packaging is the
//! responsibility of an external collaborator, this crate only consumes the
//! already-unpacked tables.
use crate::{Error, Feed};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub(crate) fn read_from_directory(dir: &Path) -> Result<Feed, Error> {
    if !dir.is_dir() {
        return Err(Error::NotADirectory(format!("{}", dir.display())));
    }

    // calendar and shapes are not mandatory, an absent file is an empty table
    Feed::assemble(
        read_objs_from_path(dir.join("stops.txt"))?,
        read_objs_from_path(dir.join("routes.txt"))?,
        read_objs_from_path(dir.join("trips.txt"))?,
        read_objs_from_path(dir.join("stop_times.txt"))?,
        read_objs_from_optional_path(dir, "calendar.txt")?,
        read_objs_from_optional_path(dir, "shapes.txt")?,
        read_objs_from_path(dir.join("agency.txt"))?,
    )
}

fn read_objs<T, O>(mut reader: T, file_name: &str) -> Result<Vec<O>, Error>
where
    O: DeserializeOwned,
    T: Read,
{
    // a UTF-8 BOM at the start of the file would otherwise end up glued to
    // the first header name
    let mut bom = [0; 3];
    reader.read_exact(&mut bom).map_err(|e| Error::NamedFileIo {
        file_name: file_name.to_owned(),
        source: Box::new(e),
    })?;

    let chained = if bom != [0xefu8, 0xbbu8, 0xbfu8] {
        bom.chain(reader)
    } else {
        [].chain(reader)
    };

    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(chained)
        .deserialize()
        .collect::<Result<Vec<O>, _>>()
        .map_err(|e| Error::Csv {
            file_name: file_name.to_owned(),
            source: e,
        })
}

fn read_objs_from_path<O>(path: std::path::PathBuf) -> Result<Vec<O>, Error>
where
    O: DeserializeOwned,
{
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("invalid_file_name")
        .to_string();
    if path.exists() {
        File::open(path)
            .map_err(|e| Error::NamedFileIo {
                file_name: file_name.clone(),
                source: Box::new(e),
            })
            .and_then(|r| read_objs(r, &file_name))
    } else {
        Err(Error::MissingFile(file_name))
    }
}

fn read_objs_from_optional_path<O>(dir: &Path, file_name: &str) -> Result<Vec<O>, Error>
where
    O: DeserializeOwned,
{
    match File::open(dir.join(file_name)) {
        Ok(reader) => read_objs(reader, file_name),
        Err(_) => Ok(Vec::new()),
    }
}
