use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Where the program text came from, for diagnostics headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSource {
    pub name: String,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("program is required: use a positional FILE, - for stdin, or -e/--expr")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub fn load_source(
    source_path: Option<&Path>,
    source_text: Option<&str>,
) -> Result<LoadedSource, LoadError> {
    if let Some(text) = source_text {
        return Ok(LoadedSource {
            name: "<expr>".to_string(),
            text: text.to_string(),
        });
    }

    let Some(path) = source_path else {
        return Err(LoadError::Missing);
    };

    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(LoadError::Stdin)?;
        return Ok(LoadedSource {
            name: "<stdin>".to_string(),
            text,
        });
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LoadedSource {
        name: path.to_string_lossy().into_owned(),
        text,
    })
}
