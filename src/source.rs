use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Anything that can hand back its full contents as a string.
pub trait Readable {
    fn contents(&self) -> io::Result<String>;
}

/// Resolves a string, a file path, or a caller-supplied [`Readable`] down to a
/// contents-bearing value. This is the only I/O surface the parser façade needs.
pub enum Source {
    Str(String),
    Path(PathBuf),
    Reader(Box<dyn Readable>),
}

impl Source {
    pub fn from_str(source: impl Into<String>) -> Self {
        Source::Str(source.into())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Source::Path(path.as_ref().to_path_buf())
    }

    pub fn from_reader(reader: impl Readable + 'static) -> Self {
        Source::Reader(Box::new(reader))
    }

    pub fn contents(&self) -> io::Result<String> {
        match self {
            Source::Str(s) => Ok(s.clone()),
            Source::Path(p) => fs::read_to_string(p),
            Source::Reader(r) => r.contents(),
        }
    }
}

impl From<String> for Source {
    fn from(s: String) -> Self {
        Source::Str(s)
    }
}

impl From<&str> for Source {
    fn from(s: &str) -> Self {
        Source::Str(s.to_string())
    }
}

impl From<PathBuf> for Source {
    fn from(p: PathBuf) -> Self {
        Source::Path(p)
    }
}
