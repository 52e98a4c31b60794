//! Host key identity for a Known HSTS Host (C1).

use std::fmt;

/// Transport scheme relevant to HSTS eligibility. RFC 6797 only ever
/// concerns itself with HTTP vs HTTPS; anything else never reaches this
/// crate (the surrounding client filters it upstream).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    /// Classify a URL scheme string. `None` for anything other than
    /// `http`/`https`.
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            _ => None,
        }
    }
}

/// Lowercase `host`, stripping a single trailing root-label dot. Shared by
/// `HostKey::build` and the policy layer's match-precedence search, which
/// needs the same canonical form without collapsing a port.
pub(crate) fn canonicalize_host(host: &str) -> String {
    let mut host = host.to_ascii_lowercase();
    if host.ends_with('.') && host.len() > 1 {
        host.pop();
    }
    host
}

/// Identity of a Known HSTS Host: a case-folded hostname plus an explicit
/// port (`0` meaning "the default port for HTTPS").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostKey {
    host: String,
    explicit_port: u16,
}

impl HostKey {
    /// Canonicalise `host`/`port` under `scheme` into a `HostKey`.
    /// `record` always calls this with `Scheme::Https`; the
    /// generic `scheme` parameter exists because the algorithm is
    /// scheme-agnostic and the persistence layer reuses the same
    /// canonicalisation rules for on-disk keys.
    pub fn build(host: &str, port: u16, scheme: Scheme) -> Self {
        let host = canonicalize_host(host);
        let explicit_port = if port == scheme.default_port() { 0 } else { port };
        Self { host, explicit_port }
    }

    /// Build a key from fields already in on-disk/explicit form. Used by
    /// the persistence layer and the policy layer's match-precedence
    /// probes, neither of which has a `Scheme` to resolve a default port
    /// against.
    pub(crate) fn from_parts(host: String, explicit_port: u16) -> Self {
        Self { host, explicit_port }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn explicit_port(&self) -> u16 {
        self.explicit_port
    }
}

impl fmt::Display for HostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.explicit_port != 0 {
            write!(f, "{}:{}", self.host, self.explicit_port)
        } else {
            write!(f, "{}", self.host)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_collapses_default_https_port() {
        let k = HostKey::build("Example.COM", 443, Scheme::Https);
        assert_eq!(k.host(), "example.com");
        assert_eq!(k.explicit_port(), 0);
    }

    #[test]
    fn build_keeps_non_default_port_explicit() {
        let k = HostKey::build("example.com", 8080, Scheme::Https);
        assert_eq!(k.explicit_port(), 8080);
    }

    #[test]
    fn build_strips_trailing_root_dot() {
        let k = HostKey::build("example.com.", 443, Scheme::Https);
        assert_eq!(k.host(), "example.com");
    }

    #[test]
    fn equality_is_by_value_not_identity() {
        let a = HostKey::build("example.com", 443, Scheme::Https);
        let b = HostKey::build("EXAMPLE.COM", 443, Scheme::Https);
        assert_eq!(a, b);
    }

    #[test]
    fn display_omits_default_port() {
        let k = HostKey::build("example.com", 443, Scheme::Https);
        assert_eq!(k.to_string(), "example.com");
        let k = HostKey::build("example.com", 8080, Scheme::Https);
        assert_eq!(k.to_string(), "example.com:8080");
    }
}
