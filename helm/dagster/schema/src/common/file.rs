use crate::common::error::{Result, TempFileCreation, WriteToTempFile};
use snafu::ResultExt;
use std::{io::Write, path::Path};
use tempfile::NamedTempFile as TempFile;

/// Write buffer to a new temporary file, inside file_dir if one is provided, else in the
/// system's temporary directory. The file is removed when the returned handle is dropped.
pub(crate) fn write_to_tempfile<P>(file_dir: Option<P>, buf: &[u8]) -> Result<TempFile>
where
    P: AsRef<Path>,
{
    let mut handle: TempFile = match file_dir {
        Some(dir) => tempfile::Builder::new().suffix(".yaml").tempfile_in(dir),
        None => tempfile::Builder::new().suffix(".yaml").tempfile(),
    }
    .context(TempFileCreation)?;

    handle.write_all(buf).context(WriteToTempFile {
        filepath: handle.path().to_path_buf(),
    })?;
    handle.flush().context(WriteToTempFile {
        filepath: handle.path().to_path_buf(),
    })?;

    Ok(handle)
}
