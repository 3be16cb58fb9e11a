//! gpg binary detection.

use std::process::{Command, Stdio};

use crate::error::StoreError;

/// Probe order: `$PATH` lookups first, then the usual install locations.
pub const DEFAULT_GPG_CANDIDATES: [&str; 8] = [
    "gpg2",
    "gpg",
    "/bin/gpg2",
    "/usr/bin/gpg2",
    "/usr/local/bin/gpg2",
    "/bin/gpg",
    "/usr/bin/gpg",
    "/usr/local/bin/gpg",
];

/// Run `<binary> --version` and report whether it exited successfully.
pub fn probe_version(binary: &str) -> bool {
    Command::new(binary)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Return the first candidate `probe` accepts.
pub fn detect_binary<S, F>(candidates: &[S], mut probe: F) -> Result<String, StoreError>
where
    S: AsRef<str>,
    F: FnMut(&str) -> bool,
{
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if probe(candidate) {
            tracing::debug!(binary = candidate, "using gpg binary");
            return Ok(candidate.to_string());
        }
        tracing::debug!(binary = candidate, "gpg candidate not usable");
    }
    Err(StoreError::BinaryNotFound {
        tried: candidates.iter().map(|c| c.as_ref().to_string()).collect(),
    })
}

/// [`detect_binary`] with the real `--version` probe.
pub fn detect_gpg_binary<S: AsRef<str>>(candidates: &[S]) -> Result<String, StoreError> {
    detect_binary(candidates, probe_version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_working_candidate_wins() {
        let mut probed = Vec::new();
        let found = detect_binary(&DEFAULT_GPG_CANDIDATES, |b| {
            probed.push(b.to_string());
            b == "/usr/bin/gpg2" || b == "/usr/bin/gpg"
        })
        .unwrap();
        assert_eq!(found, "/usr/bin/gpg2");
        assert_eq!(probed, ["gpg2", "gpg", "/bin/gpg2", "/usr/bin/gpg2"]);
    }

    #[test]
    fn prefers_gpg2_over_gpg() {
        let found = detect_binary(&DEFAULT_GPG_CANDIDATES, |_| true).unwrap();
        assert_eq!(found, "gpg2");
    }

    #[test]
    fn none_usable() {
        let err = detect_binary(&["a", "b"], |_| false).unwrap_err();
        match err {
            StoreError::BinaryNotFound { tried } => assert_eq!(tried, ["a", "b"]),
            other => panic!("expected BinaryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn empty_candidate_list() {
        let none: [&str; 0] = [];
        assert!(detect_binary(&none, |_| true).is_err());
    }

    #[test]
    fn probe_missing_binary_is_false() {
        assert!(!probe_version("/nonexistent/csv2pass-test-gpg"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_real_binary() {
        // `true` ignores its arguments and exits 0.
        assert!(probe_version("true"));
    }
}
