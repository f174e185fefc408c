use std::path::PathBuf;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum ShelfError {
    Io { path: PathBuf, source: io::Error },
    Walk(walkdir::Error),
    Verify { from: PathBuf, to: PathBuf },
}

impl ShelfError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ShelfError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::error::Error for ShelfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use ShelfError::*;
        match self {
            Io { source, .. } => Some(source as &dyn Error),
            Walk(e) => Some(e),
            Verify { .. } => None,
        }
    }
}

impl fmt::Display for ShelfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ShelfError::*;
        match self {
            Io { path, .. } => write!(f, "IoError: {}", path.display()),
            Walk(_) => write!(f, "WalkError"),
            Verify { from, to } => write!(
                f,
                "VerifyError: copy of {} at {} does not match the original",
                from.display(),
                to.display()
            ),
        }
    }
}

impl From<walkdir::Error> for ShelfError {
    fn from(error: walkdir::Error) -> Self {
        ShelfError::Walk(error)
    }
}
