//! `Strict-Transport-Security` header value parser (C6).
//!
//! A hand-rolled token scanner rather than a regex or parser-combinator
//! dependency, grounded in the header-value parsers retrieved alongside
//! this crate (the `hyper`/`hyperx` `StrictTransportSecurity` scanner in
//! particular) and matching the client's own preference for small
//! hand-rolled scanners over a generic parsing crate for header grammars.

/// Parsed contents of a `Strict-Transport-Security` header value. This is
/// not itself a policy decision: the policy layer (`policy::record_header`)
/// applies the "missing `max-age` rejects the header" rule and the
/// eligibility rules on top of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StsDirectives {
    pub max_age: Option<u64>,
    pub include_subdomains: bool,
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_lws(&mut self) {
        while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
            self.pos += 1;
        }
    }

    fn is_token_char(c: u8) -> bool {
        c.is_ascii_graphic()
            && !matches!(
                c,
                b'(' | b')'
                    | b'<'
                    | b'>'
                    | b'@'
                    | b','
                    | b';'
                    | b':'
                    | b'\\'
                    | b'"'
                    | b'/'
                    | b'['
                    | b']'
                    | b'?'
                    | b'='
                    | b'{'
                    | b'}'
            )
    }

    fn parse_token(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_token_char) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.input[start..self.pos]).unwrap_or("")
    }

    /// Caller has confirmed `peek() == Some(b'"')`.
    fn parse_quoted(&mut self) -> String {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some(b'"') => break,
                Some(b'\\') => {
                    if let Some(c) = self.bump() {
                        out.push(c as char);
                    }
                }
                Some(c) => out.push(c as char),
            }
        }
        out
    }

    /// Skip anything left of the current directive up to and including
    /// the next `;`, so a malformed or partially-consumed directive can't
    /// desynchronise the scanner.
    fn skip_to_separator(&mut self) {
        while !matches!(self.peek(), None | Some(b';')) {
            self.pos += 1;
        }
        if self.peek() == Some(b';') {
            self.pos += 1;
        }
    }
}

/// Parse a `Strict-Transport-Security` header *value* (the field-value,
/// not the field name) per RFC 6797 section 6.1. Unknown directives are ignored
/// for forward compatibility; a missing or malformed `max-age` simply
/// leaves `max_age` as `None`, rejecting the header outright is the
/// policy layer's job.
pub fn parse_sts_header(value: &str) -> StsDirectives {
    let mut scanner = Scanner::new(value);
    let mut result = StsDirectives::default();

    loop {
        scanner.skip_lws();
        match scanner.peek() {
            None => break,
            Some(b';') => {
                scanner.bump();
                continue;
            }
            _ => {}
        }

        let name = scanner.parse_token().to_ascii_lowercase();
        scanner.skip_lws();

        let directive_value = if scanner.peek() == Some(b'=') {
            scanner.bump();
            scanner.skip_lws();
            let v = if scanner.peek() == Some(b'"') {
                scanner.parse_quoted()
            } else {
                scanner.parse_token().to_string()
            };
            scanner.skip_lws();
            Some(v)
        } else {
            None
        };

        match name.as_str() {
            "max-age" => {
                if let Some(v) = directive_value.as_deref().and_then(|v| v.parse::<u64>().ok()) {
                    result.max_age = Some(v);
                }
            }
            "includesubdomains" => result.include_subdomains = true,
            _ => {}
        }

        scanner.skip_to_separator();
    }

    result
}
