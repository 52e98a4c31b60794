//! HTTP Strict Transport Security (RFC 6797) core.
//!
//! Maintains the durable set of Known HSTS Hosts and answers the two
//! questions the surrounding HTTP client needs: does an outbound URL need
//! rewriting to HTTPS (`HstsStore::match_url`), and does an inbound
//! `Strict-Transport-Security` header create or refresh a policy
//! (`HstsStore::record`/`record_header`). The module tree below mirrors
//! Chromium's `net/http/transport_security_state` split: key identity,
//! per-entry state, the match engine, the in-memory store, the RFC 6797
//! policy rules on top of it, the header parser, and on-disk persistence.

pub mod header;
pub mod info;
pub mod key;
pub mod match_engine;
mod persistence;
mod policy;
pub mod store;

pub use header::{parse_sts_header, StsDirectives};
pub use info::HostInfo;
pub use key::{HostKey, Scheme};
pub use match_engine::{match_hosts, MatchKind};
pub use store::HstsStore;
