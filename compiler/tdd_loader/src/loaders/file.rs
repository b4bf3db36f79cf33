//! Data files named by the first loader argument.

use std::fs;
use std::path::{Path, PathBuf};

use tdd_ir::{Fragment, Value};

use crate::{Engine, LoaderError};

/// The contents of a data file.
pub(crate) struct DataFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl DataFile {
    /// Read the file named by `args[0]`, relative to the data root.
    pub(crate) fn read(engine: &dyn Engine, args: &[Value]) -> Result<DataFile, LoaderError> {
        let Some(first) = args.first() else {
            return Err(LoaderError::arguments("At least 1 argument (file name) needed"));
        };
        let Some(name) = first.as_str() else {
            return Err(LoaderError::arguments(
                "The 1st argument (file name) must be a string.",
            ));
        };
        let path = resolve_path(engine.data_root(), name);
        tracing::debug!(path = %path.display(), "reading data file");
        let bytes = fs::read(&path).map_err(|source| LoaderError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(DataFile { path, bytes })
    }

    /// The decoded text without a byte order mark.
    pub(crate) fn text(&self, encoding: &str) -> Result<String, LoaderError> {
        let text = crate::decode(&self.bytes, encoding)?;
        Ok(match text.strip_prefix('\u{FEFF}') {
            Some(rest) => rest.to_owned(),
            None => text,
        })
    }

    /// `text` as a fragment named after this file.
    pub(crate) fn fragment(&self, text: String) -> Result<Fragment, LoaderError> {
        let name = self.path.display().to_string();
        Fragment::whole(text, Some(name.into())).map_err(|e| LoaderError::format(e.to_string()))
    }
}

/// `name` uses `/` separators; relative names are resolved against `root`.
pub(crate) fn resolve_path(root: &Path, name: &str) -> PathBuf {
    let path = Path::new(name);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    root.join(name.split('/').filter(|part| !part.is_empty()).collect::<PathBuf>())
}
