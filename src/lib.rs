//! # chromenet-hsts
//!
//! HTTP Strict Transport Security (RFC 6797) core, extracted from
//! `chromenet`'s `tls` module into a standalone, single-threaded-
//! cooperative crate: the domain-matching engine, the Known HSTS Host
//! store lifecycle, the `Strict-Transport-Security` header parser, and
//! the line-oriented on-disk persistence format.
//!
//! ## Quick start
//!
//! ```rust
//! use chromenet_hsts::{HstsStore, Scheme};
//! use url::Url;
//!
//! let mut store = HstsStore::empty();
//! store.record(Scheme::Https, "example.com", 443, 31_536_000, true);
//!
//! let mut u = Url::parse("http://sub.example.com/").unwrap();
//! assert!(store.match_url(&mut u));
//! assert_eq!(u.scheme(), "https");
//! ```
//!
//! ## Modules
//!
//! - [`hsts`]: the subsystem itself (key, info, match engine, store,
//!   policy, header parser, persistence)
//! - [`error`]: failure modes for the fallible persistence helpers

mod clock;
pub mod error;
pub mod hsts;

pub use hsts::{HostInfo, HostKey, HstsStore, MatchKind, Scheme, StsDirectives};
