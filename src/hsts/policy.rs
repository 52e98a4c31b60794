//! RFC 6797 policy layer (C5): eligibility, create/update/expire/delete
//! lifecycle rules, and the match-precedence search shared by `record`
//! and `match`.

use url::{Host, Url};

use crate::clock::current_unix_time;
use crate::hsts::header::parse_sts_header;
use crate::hsts::info::HostInfo;
use crate::hsts::key::{canonicalize_host, HostKey, Scheme};
use crate::hsts::store::HstsStore;

/// Outcome of a best-match probe. Congruent wins unconditionally over
/// superdomain. RFC 6797 leaves unresolved the case of a host with *both*
/// a default-port entry and an explicit-port entry matching the same
/// query port; this implementation prefers the exact port match.
enum Found {
    Congruent(HostKey, HostInfo),
    Superdomain(HostKey, HostInfo),
}

fn is_ip_literal(host: &str) -> bool {
    !matches!(Host::parse(host), Ok(Host::Domain(_)))
}

impl HstsStore {
    /// A single host/port probe: exact port first, then the default-port
    /// wildcard (a stored `explicit_port` of `0` matches any query port).
    fn probe(&self, host: &str, port: u16) -> Option<(HostKey, HostInfo)> {
        let exact = HostKey::from_parts(host.to_string(), port);
        if let Some(info) = self.get(&exact) {
            return Some((exact, *info));
        }
        if port != 0 {
            let wildcard = HostKey::from_parts(host.to_string(), 0);
            if let Some(info) = self.get(&wildcard) {
                return Some((wildcard, *info));
            }
        }
        None
    }

    /// Two-pass match-precedence scan, implemented as an iterative
    /// label-stripping lookup (O(labels) rather than O(entries)): the
    /// congruent pass is a direct probe; the superdomain pass repeatedly
    /// strips the leftmost label of the query and probes each suffix,
    /// stopping before a single remaining label (mirroring
    /// `hsts_find_entry`'s `countchars(...) > 1` guard against ever
    /// matching a bare TLD).
    fn find_best_match(&self, canonical_host: &str, port: u16) -> Option<Found> {
        if let Some((k, i)) = self.probe(canonical_host, port) {
            return Some(Found::Congruent(k, i));
        }

        let mut rest = canonical_host;
        while let Some(idx) = rest.find('.') {
            let candidate = &rest[idx + 1..];
            if !candidate.contains('.') {
                break;
            }
            if let Some((k, i)) = self.probe(candidate, port) {
                return Some(Found::Superdomain(k, i));
            }
            rest = candidate;
        }

        None
    }

    /// Record an HSTS policy for `host`, using the wall clock. Returns
    /// `true` iff a brand-new entry was created.
    pub fn record(
        &mut self,
        scheme: Scheme,
        host: &str,
        port: u16,
        max_age: i64,
        include_subdomains: bool,
    ) -> bool {
        match current_unix_time() {
            Some(now) => self.record_at(scheme, host, port, max_age, include_subdomains, now),
            None => {
                tracing::warn!(host, "hsts: clock failure, record aborted");
                false
            }
        }
    }

    /// `record` with an explicitly supplied clock reading, for
    /// deterministic testing and for callers with their own time source.
    pub fn record_at(
        &mut self,
        scheme: Scheme,
        host: &str,
        port: u16,
        max_age: i64,
        include_subdomains: bool,
        now: i64,
    ) -> bool {
        if scheme != Scheme::Https || host.is_empty() || is_ip_literal(host) {
            return false;
        }
        if max_age < 0 {
            return false;
        }

        let canonical_host = canonicalize_host(host);

        match self.find_best_match(&canonical_host, port) {
            Some(Found::Congruent(key, mut info)) => {
                if max_age == 0 {
                    self.remove(&key);
                    return false;
                }
                info.include_subdomains = include_subdomains;
                if info.max_age != max_age {
                    info.created = now;
                    info.max_age = max_age;
                }
                self.put(key, info);
                false
            }
            _ => {
                if max_age == 0 {
                    return false;
                }
                let Some(expires_at) = now.checked_add(max_age) else {
                    return false;
                };
                if expires_at < now {
                    return false;
                }
                let key = HostKey::build(host, port, scheme);
                self.put(key, HostInfo::new(now, max_age, include_subdomains));
                true
            }
        }
    }

    /// Parse and apply a `Strict-Transport-Security` header received over
    /// `response_url` (C6 → C5 flow). Returns `true` iff a brand-new entry
    /// was created.
    pub fn record_header(&mut self, response_url: &Url, header_value: &str) -> bool {
        let directives = parse_sts_header(header_value);
        let Some(max_age) = directives.max_age.and_then(|v| i64::try_from(v).ok()) else {
            tracing::debug!(header_value, "hsts: header missing or invalid max-age, ignored");
            return false;
        };
        let Some(scheme) = Scheme::from_str_opt(response_url.scheme()) else {
            return false;
        };
        let Some(host) = response_url.host_str() else {
            return false;
        };
        let port = response_url
            .port_or_known_default()
            .unwrap_or_else(|| scheme.default_port());

        self.record(scheme, host, port, max_age, directives.include_subdomains)
    }

    /// Rewrite `url` to HTTPS if it matches a Known HSTS Host, using the
    /// wall clock.
    pub fn match_url(&mut self, url: &mut Url) -> bool {
        match current_unix_time() {
            Some(now) => self.match_url_at(url, now),
            None => {
                tracing::warn!("hsts: clock failure, url left unchanged");
                false
            }
        }
    }

    /// `match_url` with an explicitly supplied clock reading.
    pub fn match_url_at(&mut self, url: &mut Url, now: i64) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        let canonical_host = canonicalize_host(host);
        let query_port = url.port_or_known_default().unwrap_or(80);

        let found = match self.find_best_match(&canonical_host, query_port) {
            Some(found) => found,
            None => return false,
        };

        let (key, info) = match &found {
            Found::Congruent(k, i) => (k, i),
            Found::Superdomain(k, i) => (k, i),
        };

        if info.is_expired(now) {
            self.remove(key);
            return false;
        }

        let accept = match &found {
            Found::Congruent(..) => true,
            Found::Superdomain(_, i) => i.include_subdomains,
        };
        if !accept {
            return false;
        }

        let _ = url.set_scheme("https");
        if url.port() == Some(80) {
            let _ = url.set_port(Some(443));
        }
        true
    }
}
