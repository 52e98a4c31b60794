//! Integration tests exercising the HSTS façade across module boundaries:
//! record/match lifecycle and the file-backed persistence round trip.
//! The merge-on-stale-mtime reconciliation is covered by `persistence`'s
//! own unit tests, which need crate-internal access to force the merge
//! path deterministically.

use std::fs;
use std::io::Write;

use chromenet_hsts::{HostKey, HstsStore, Scheme};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[test]
fn full_lifecycle_record_match_expire() {
    let mut store = HstsStore::empty();

    // record() over HTTP is a no-op.
    assert!(!store.record_at(Scheme::Http, "www.foo.com", 80, 1234, true, 0));
    assert_eq!(store.count(), 0);

    // record() over HTTPS creates an entry.
    assert!(store.record_at(Scheme::Https, "www.foo.com", 443, 1000, true, 0));
    assert_eq!(store.count(), 1);

    // An outbound HTTP request to a subdomain is upgraded.
    let mut u = url("http://deep.www.foo.com/");
    assert!(store.match_url_at(&mut u, 10));
    assert_eq!(u.scheme(), "https");

    // Past the TTL, the entry is expired and removed on next match.
    let mut u = url("http://www.foo.com/");
    assert!(!store.match_url_at(&mut u, 5000));
    assert_eq!(store.count(), 0);
}

#[test]
fn open_empty_database_then_record_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hsts.db");

    let mut store = HstsStore::open(&path);
    assert_eq!(store.count(), 0);

    store.record_at(Scheme::Https, "example.com", 443, 1_000_000, true, 1000);
    store.save(&path);

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("example.com\t1\t1000\t1000000"));

    let reopened = HstsStore::open(&path);
    assert_eq!(reopened.count(), 1);
    assert!(reopened.contains(&HostKey::build("example.com", 443, Scheme::Https)));
}

/// A store opened from a file with two records, one at an explicit
/// non-default port, matches an outbound request at that same port.
#[test]
fn open_database_with_explicit_port_entry_matches_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hsts.db");

    let body = "\
# HSTS 1.0 Known Hosts database for chromenet.
# Edit at your own risk.
foo.example.com\t1\t100\t123123123
test.example.com:8080\t0\t200\t789789789
";
    fs::write(&path, body).unwrap();

    let mut store = HstsStore::open(&path);
    assert_eq!(store.count(), 2);

    let mut u = url("http://test.example.com:8080/");
    assert!(store.match_url_at(&mut u, 500));
    assert_eq!(u.scheme(), "https");
    assert_eq!(u.port(), Some(8080));

    let mut u = url("http://bar.foo.example.com/");
    assert!(store.match_url_at(&mut u, 500));
    assert_eq!(u.scheme(), "https");
}

#[test]
fn malformed_lines_are_skipped_without_aborting_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hsts.db");

    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "# a comment").unwrap();
    writeln!(f, "not-enough-fields\t1").unwrap();
    writeln!(f, "good.example.com\t1\t100\t1000").unwrap();
    writeln!(f, "bad-flag.example.com\t7\t100\t1000").unwrap();

    let store = HstsStore::open(&path);
    assert_eq!(store.count(), 1);
    assert!(store.contains(&HostKey::build("good.example.com", 443, Scheme::Https)));
}

#[test]
fn record_header_end_to_end_from_a_response_url() {
    let mut store = HstsStore::empty();
    let response_url = url("https://secure.example.com/login");

    assert!(store.record_header(&response_url, "max-age=31536000; includeSubDomains"));

    let mut outbound = url("http://api.secure.example.com/data");
    assert!(store.match_url_at(&mut outbound, 0));
    assert_eq!(outbound.scheme(), "https");
}
