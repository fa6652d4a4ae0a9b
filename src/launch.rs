//! Where a launch came from and which file it names.
//!
//! Process arguments and desktop "open file" requests are both reduced to a
//! [`LaunchTarget`] before the session sees them.

use std::path::PathBuf;

use url::Url;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LaunchOrigin {
    /// This process's own command line.
    Startup,
    /// The command line of a later process that lost the instance lock.
    SecondInstance,
    /// A desktop request to open a file in the running instance.
    OpenFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    pub origin: LaunchOrigin,
    /// Candidate file, not yet classified.
    pub path: Option<PathBuf>,
}

impl LaunchTarget {
    /// Take the last argument of `argv` as the candidate path.
    ///
    /// `argv[0]` is the program itself, so a lone element names nothing.
    pub fn from_args<S: AsRef<str>>(origin: LaunchOrigin, argv: &[S]) -> Self {
        let path = match argv {
            [_, .., last] => Some(PathBuf::from(last.as_ref())),
            _ => None,
        };
        Self { origin, path }
    }

    pub fn from_open_file(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: LaunchOrigin::OpenFile,
            path: Some(path.into()),
        }
    }

    /// Use the last `file://` URI in `uris`; anything else is ignored.
    pub fn from_uris<S: AsRef<str>>(uris: &[S]) -> Self {
        uris.iter()
            .rev()
            .filter_map(|uri| Url::parse(uri.as_ref()).ok())
            .filter(|url| url.scheme() == "file")
            .find_map(|url| url.to_file_path().ok())
            .map(Self::from_open_file)
            .unwrap_or(Self {
                origin: LaunchOrigin::OpenFile,
                path: None,
            })
    }

    /// Whether this launch should bring an existing window forward.
    pub fn raises_window(&self) -> bool {
        self.origin != LaunchOrigin::Startup
    }
}
