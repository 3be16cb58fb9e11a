//! URL column handling.
//!
//! Exports hold full URLs, bare `host:port` pairs, paths and occasionally
//! junk. The column is read with the usual URI reference rules (RFC 3986
//! shaped, lenient about what follows the authority). The host is taken
//! from the authority exactly as written: letter case, a default port and
//! non-ASCII names are left alone so the directory matches the export.

use std::fmt;

use percent_encoding::percent_decode_str;

/// The URL column of an entry, parsed leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryUrl {
    /// Reference with a scheme. `scheme` is lowercased, `host` is the
    /// authority minus userinfo (`""` for opaque forms like `mailto:x`).
    Absolute {
        scheme: String,
        host: String,
        raw: String,
    },
    /// Scheme-less reference such as `example.com/login`, `//host/path` or
    /// an empty field. Only the `//host` form carries a host.
    Relative { host: String, raw: String },
    /// Not a URI reference; the raw field becomes the host.
    Fallback { host: String },
}

/// Why a field is not a URI reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum RefError {
    #[error("control character in URL")]
    ControlChar,
    #[error("missing scheme before ':'")]
    MissingScheme,
    #[error("first path segment contains ':'")]
    ColonInFirstSegment,
    #[error("missing ']' in host")]
    UnclosedBracket,
    #[error("invalid port {0:?}")]
    InvalidPort(String),
    #[error("invalid character {0:?} in host")]
    InvalidHostChar(char),
    #[error("invalid userinfo")]
    InvalidUserinfo,
    #[error("invalid escape {0:?}")]
    InvalidEscape(String),
}

/// Which part of the reference an escape sequence sits in.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Part {
    Host,
    Other,
}

impl EntryUrl {
    pub fn parse(raw: &str) -> Self {
        match parse_reference(raw) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!(%err, "url column is not a URI, using it as host");
                EntryUrl::Fallback {
                    host: raw.to_string(),
                }
            }
        }
    }

    /// Host used as the second path segment, or `""` when there is none.
    /// A port is kept as written (`host:port`).
    pub fn host(&self) -> &str {
        match self {
            EntryUrl::Absolute { host, .. }
            | EntryUrl::Relative { host, .. }
            | EntryUrl::Fallback { host } => host,
        }
    }
}

impl fmt::Display for EntryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryUrl::Absolute { raw, .. } | EntryUrl::Relative { raw, .. } => f.write_str(raw),
            EntryUrl::Fallback { host } => write!(f, "//{host}"),
        }
    }
}

fn parse_reference(raw: &str) -> Result<EntryUrl, RefError> {
    let (before_fragment, fragment) = match raw.split_once('#') {
        Some((head, frag)) => (head, Some(frag)),
        None => (raw, None),
    };
    if before_fragment.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err(RefError::ControlChar);
    }
    if let Some(frag) = fragment {
        check_escapes(frag, Part::Other)?;
    }

    if before_fragment == "*" {
        return Ok(EntryUrl::Relative {
            host: String::new(),
            raw: raw.to_string(),
        });
    }

    let (scheme, rest) = split_scheme(before_fragment)?;
    let rest = rest.split_once('?').map_or(rest, |(path, _query)| path);

    let mut host = String::new();
    if !rest.starts_with('/') {
        if let Some(scheme) = scheme {
            // Opaque: `mailto:a@b`, `urn:x:y`.
            return Ok(EntryUrl::Absolute {
                scheme: scheme.to_ascii_lowercase(),
                host,
                raw: raw.to_string(),
            });
        }
        let first_segment = rest.split('/').next().unwrap_or_default();
        if first_segment.contains(':') {
            return Err(RefError::ColonInFirstSegment);
        }
    }

    let mut path = rest;
    if (scheme.is_some() || !rest.starts_with("///")) && rest.starts_with("//") {
        let after = &rest[2..];
        let (authority, tail) = match after.find('/') {
            Some(i) => after.split_at(i),
            None => (after, ""),
        };
        host = parse_authority(authority)?;
        path = tail;
    }
    check_escapes(path, Part::Other)?;

    Ok(match scheme {
        Some(scheme) => EntryUrl::Absolute {
            scheme: scheme.to_ascii_lowercase(),
            host,
            raw: raw.to_string(),
        },
        None => EntryUrl::Relative {
            host,
            raw: raw.to_string(),
        },
    })
}

/// Split `scheme:rest`. A leading digit or any character outside the
/// scheme alphabet before the first `:` means there is no scheme.
fn split_scheme(s: &str) -> Result<(Option<&str>, &str), RefError> {
    for (i, c) in s.bytes().enumerate() {
        match c {
            b'a'..=b'z' | b'A'..=b'Z' => {}
            b'0'..=b'9' | b'+' | b'-' | b'.' if i > 0 => {}
            b':' if i == 0 => return Err(RefError::MissingScheme),
            b':' => return Ok((Some(&s[..i]), &s[i + 1..])),
            _ => return Ok((None, s)),
        }
    }
    Ok((None, s))
}

/// Host (with port) of `[userinfo@]host[:port]`, percent-decoded.
fn parse_authority(authority: &str) -> Result<String, RefError> {
    let (userinfo, host) = match authority.rfind('@') {
        Some(i) => (Some(&authority[..i]), &authority[i + 1..]),
        None => (None, authority),
    };
    let host = parse_host(host)?;
    if let Some(userinfo) = userinfo {
        if !userinfo.chars().all(valid_userinfo_char) {
            return Err(RefError::InvalidUserinfo);
        }
        check_escapes(userinfo, Part::Other)?;
    }
    Ok(host)
}

fn parse_host(host: &str) -> Result<String, RefError> {
    if host.starts_with('[') {
        let close = host.rfind(']').ok_or(RefError::UnclosedBracket)?;
        check_port(&host[close + 1..])?;
        // IPv6 zone (`%25eth0`) is not held to host character rules.
        let inside = &host[..close];
        match inside.find("%25") {
            Some(zone) => {
                check_escapes(&inside[..zone], Part::Host)?;
                check_escapes(&inside[zone..], Part::Other)?;
                check_escapes(&host[close..], Part::Host)?;
            }
            None => check_escapes(host, Part::Host)?,
        }
    } else {
        if let Some(colon) = host.rfind(':') {
            check_port(&host[colon..])?;
        }
        check_escapes(host, Part::Host)?;
    }
    Ok(percent_decode_str(host).decode_utf8_lossy().into_owned())
}

/// `""` or `:` followed by digits only.
fn check_port(colon_port: &str) -> Result<(), RefError> {
    if colon_port.is_empty() {
        return Ok(());
    }
    match colon_port.strip_prefix(':') {
        Some(digits) if digits.bytes().all(|b| b.is_ascii_digit()) => Ok(()),
        _ => Err(RefError::InvalidPort(colon_port.to_string())),
    }
}

/// Every `%` must start a two-digit hex escape. In a host, escapes may only
/// encode non-ASCII bytes (or `%25`), and ASCII characters outside the host
/// alphabet are rejected.
fn check_escapes(s: &str, part: Part) -> Result<(), RefError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let escape = bytes.get(i + 1..i + 3).filter(|h| h.iter().all(u8::is_ascii_hexdigit));
                let Some(hex) = escape else {
                    let end = (i + 3).min(bytes.len());
                    return Err(RefError::InvalidEscape(
                        String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                    ));
                };
                if part == Part::Host && hex[0] < b'8' && hex != b"25" {
                    return Err(RefError::InvalidEscape(format!(
                        "%{}",
                        String::from_utf8_lossy(hex)
                    )));
                }
                i += 3;
            }
            c if part == Part::Host && c.is_ascii() && !valid_host_byte(c) => {
                return Err(RefError::InvalidHostChar(char::from(c)));
            }
            _ => i += 1,
        }
    }
    Ok(())
}

fn valid_host_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || b"-_.~!$&'()*+,;=:[]<>\"".contains(&c)
}

fn valid_userinfo_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "-._:~!$&'()*+,;=%@".contains(c)
}
