//! Failure modes for the fallible persistence helpers.
//!
//! Mirrors the `thiserror`-derived-enum idiom the client uses for
//! `NetError` (`src/base/neterror.rs`: `#[error("...")]` messages,
//! `#[source]` on I/O-wrapping variants), but deliberately small. Only
//! the persistence layer's internal, fallible helpers return
//! `Result<_, HstsError>`; the public `open`/`save` absorb it into an
//! empty store or a logged no-op, and `record`/`match` never return
//! anything but `bool`.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HstsError {
    #[error("failed to read HSTS database {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write HSTS database {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat HSTS database {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
