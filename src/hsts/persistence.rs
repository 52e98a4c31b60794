//! Line-oriented persistence for the Known HSTS Host store (C7).
//!
//! Format is bit-exact with the original `.wget-hsts`-style database
//! (`hsts_store_dump`/`hsts_read_database`/`hsts_parse_line` in
//! `original_source/src/hsts.c`), not the client's existing JSON
//! (`serde_json`-based) `HstsStore::save_to_file`/`load_from_file`: this
//! format exists so that independent client processes sharing one file on
//! disk stay compatible with each other, which a private JSON shape can't
//! promise across versions.
//!
//! ```text
//! # HSTS 1.0 Known Hosts database for chromenet.
//! # Edit at your own risk.
//! # <hostname>[:<port>]\t<incl. subdomains>\t<created>\t<max-age>
//! <host>[:<port>]\t<0|1>\t<created>\t<max-age>
//! ```

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::SystemTime;

use crate::error::HstsError;
use crate::hsts::info::HostInfo;
use crate::hsts::key::HostKey;
use crate::hsts::store::HstsStore;

const PREAMBLE: &str = "\
# HSTS 1.0 Known Hosts database for chromenet.
# Edit at your own risk.
# <hostname>[:<port>]\t<incl. subdomains>\t<created>\t<max-age>
";

fn mtime_secs(path: &Path) -> Result<i64, HstsError> {
    let to_stat_err = |source| HstsError::Stat {
        path: path.to_path_buf(),
        source,
    };
    let meta = fs::metadata(path).map_err(to_stat_err)?;
    let modified = meta.modified().map_err(to_stat_err)?;
    Ok(modified
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0))
}

/// Parse one non-comment line's four tab-separated fields. `None` on any
/// malformed field, matching `hsts_parse_line`'s per-line tolerance: a
/// bad line is skipped, not a fatal error for the whole file.
fn parse_line(line: &str) -> Option<(String, u16, i64, i64, bool)> {
    let mut fields = line.splitn(4, '\t');
    let host_field = fields.next()?;
    let subdomains_field = fields.next()?;
    let created_field = fields.next()?;
    let max_age_field = fields.next()?.trim_end_matches(['\r', '\n']);

    let (host, port) = match host_field.rsplit_once(':') {
        Some((h, p)) => match p.parse::<u16>() {
            Ok(p) => (h, p),
            Err(_) => (host_field, 0),
        },
        None => (host_field, 0),
    };

    if host.is_empty() {
        return None;
    }

    let include_subdomains = match subdomains_field {
        "1" => true,
        "0" => false,
        _ => return None,
    };

    let created = created_field.parse::<i64>().ok()?;
    let max_age = max_age_field.parse::<i64>().ok()?;

    Some((host.to_ascii_lowercase(), port, created, max_age, include_subdomains))
}

/// Read every well-formed, non-comment record out of `path`. Rejects
/// entries whose `expires_at` overflows, and duplicate keys within the
/// file (first-wins). Does not touch any in-memory state; `open` and
/// `merge_from_disk` decide what to do with the result.
fn read_records(path: &Path) -> Result<Vec<(HostKey, HostInfo)>, HstsError> {
    let text = fs::read_to_string(path).map_err(|source| HstsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((host, port, created, max_age, include_subdomains)) = parse_line(line) else {
            tracing::debug!(line, "hsts: skipping malformed database line");
            continue;
        };

        let Some(expires_at) = created.checked_add(max_age) else {
            tracing::debug!(host, "hsts: skipping database entry with overflowing expiry");
            continue;
        };
        if expires_at < created {
            tracing::debug!(host, "hsts: skipping database entry with overflowing expiry");
            continue;
        }

        let key = HostKey::from_parts(host, port);
        if !seen.insert(key.clone()) {
            continue;
        }

        out.push((key, HostInfo::new(created, max_age, include_subdomains)));
    }

    Ok(out)
}

fn write_records<'a>(
    path: &Path,
    entries: impl Iterator<Item = (&'a HostKey, &'a HostInfo)>,
) -> Result<(), HstsError> {
    let mut buf = String::with_capacity(PREAMBLE.len() + 64);
    buf.push_str(PREAMBLE);

    for (key, info) in entries {
        buf.push_str(key.host());
        if key.explicit_port() != 0 {
            buf.push(':');
            buf.push_str(&key.explicit_port().to_string());
        }
        buf.push('\t');
        buf.push(if info.include_subdomains { '1' } else { '0' });
        buf.push('\t');
        buf.push_str(&info.created.to_string());
        buf.push('\t');
        buf.push_str(&info.max_age.to_string());
        buf.push('\n');
    }

    let mut file = fs::File::create(path).map_err(|source| HstsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(buf.as_bytes()).map_err(|source| HstsError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

impl HstsStore {
    /// Open the Known Hosts database at `path`. Any failure here (missing
    /// file, unreadable file, corrupt content) degrades to an empty store
    /// rather than propagating: a first-run client has no database yet,
    /// and that is not an error condition.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut store = HstsStore::empty();

        if !path.exists() {
            return store;
        }

        match mtime_secs(path) {
            Ok(mtime) => store.last_mtime = mtime,
            Err(err) => tracing::warn!(%err, "hsts: could not stat database at open"),
        }

        match read_records(path) {
            Ok(records) => {
                for (key, info) in records {
                    store.entries.insert(key, info);
                }
            }
            Err(err) => tracing::warn!(%err, "hsts: could not read database, starting empty"),
        }

        store
    }

    /// Persist the store to `path`. A no-op when the store is empty.
    /// Merges with on-disk changes from another process if the file's
    /// mtime has advanced past what this store last observed. Fails
    /// silently on I/O error, logged via `tracing`.
    pub fn save(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if self.entries.is_empty() {
            return;
        }

        if path.exists() {
            match mtime_secs(path) {
                Ok(mtime) if mtime > self.last_mtime => {
                    self.merge_from_disk(path);
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "hsts: could not stat database before save"),
            }
        }

        if let Err(err) = write_records(path, self.entries.iter()) {
            tracing::warn!(%err, "hsts: failed to save database");
        }
    }

    /// Reconcile with records currently on disk: for every on-disk record
    /// congruent with an in-memory entry, keep whichever of the two has
    /// the newer `created`. On-disk-only records are intentionally
    /// **not** inserted; this process never observed them, and save is a
    /// durability operation for what this process knows about, not a
    /// general union.
    fn merge_from_disk(&mut self, path: &Path) {
        let records = match read_records(path) {
            Ok(r) => r,
            Err(err) => {
                tracing::warn!(%err, "hsts: merge read failed, keeping in-memory state");
                return;
            }
        };

        for (key, disk_info) in records {
            if let Some(mem_info) = self.entries.get_mut(&key) {
                if disk_info.created > mem_info.created {
                    *mem_info = disk_info;
                }
            }
        }
    }
}
