//! Encryption interface for store entries.
//!
//! The writer only depends on [`Encryptor`]; [`GpgEncryptor`] is the real
//! implementation that shells out to gpg.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::EncryptError;

/// Encrypts plaintext for one recipient into a file.
pub trait Encryptor {
    /// Encrypt `plaintext` for `recipient` and write the ciphertext to
    /// `output`, which does not exist yet.
    fn encrypt(&self, recipient: &str, plaintext: &[u8], output: &Path)
        -> Result<(), EncryptError>;
}

impl<E: Encryptor + ?Sized> Encryptor for &E {
    fn encrypt(&self, recipient: &str, plaintext: &[u8], output: &Path) -> Result<(), EncryptError> {
        (**self).encrypt(recipient, plaintext, output)
    }
}

/// Runs `<binary> --encrypt --recipient <id> --output <file>` with the
/// plaintext on stdin.
#[derive(Debug, Clone)]
pub struct GpgEncryptor {
    binary: String,
}

impl GpgEncryptor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }
}

impl Encryptor for GpgEncryptor {
    fn encrypt(
        &self,
        recipient: &str,
        plaintext: &[u8],
        output: &Path,
    ) -> Result<(), EncryptError> {
        let mut child = Command::new(&self.binary)
            .arg("--encrypt")
            .arg("--recipient")
            .arg(recipient)
            .arg("--output")
            .arg(output)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EncryptError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        // Closing stdin (dropping the handle) signals end of plaintext.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(plaintext),
            None => Ok(()),
        };

        let out = child.wait_with_output().map_err(|source| EncryptError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        // A failed exit explains a broken pipe better than the pipe error does.
        if !out.status.success() {
            return Err(EncryptError::Failed {
                binary: self.binary.clone(),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }
        write_result.map_err(|source| EncryptError::Stdin {
            binary: self.binary.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    /// Writes an executable shell script standing in for gpg.
    fn fake_gpg(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-gpg");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    /// Retries while the freshly written script is still open in a forked
    /// sibling test (ETXTBSY).
    fn encrypt(bin: &str, recipient: &str, plaintext: &[u8], out: &Path) -> Result<(), EncryptError> {
        let gpg = GpgEncryptor::new(bin);
        for _ in 0..20 {
            match gpg.encrypt(recipient, plaintext, out) {
                Err(EncryptError::Spawn { source, .. }) if source.raw_os_error() == Some(26) => {
                    std::thread::sleep(std::time::Duration::from_millis(25));
                }
                other => return other,
            }
        }
        gpg.encrypt(recipient, plaintext, out)
    }

    #[test]
    fn passes_recipient_output_and_stdin() {
        let dir = tempfile::tempdir().unwrap();
        // $1=--encrypt $2=--recipient $3=<id> $4=--output $5=<file>
        let bin = fake_gpg(
            dir.path(),
            r#"[ "$1" = "--encrypt" ] || exit 3
{ echo "to:$3"; cat; } > "$5""#,
        );
        let out = dir.path().join("entry.gpg");
        encrypt(&bin, "0xABCD", b"secret\ntitle: x\n", &out).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "to:0xABCD\nsecret\ntitle: x\n"
        );
    }

    #[test]
    fn nonzero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let bin = fake_gpg(
            dir.path(),
            "cat >/dev/null\necho 'gpg: 0xABCD: skipped: No public key' >&2\nexit 2",
        );
        let err = encrypt(&bin, "0xABCD", b"pw\n", &dir.path().join("x.gpg")).unwrap_err();
        match err {
            EncryptError::Failed { code, stderr, .. } => {
                assert_eq!(code, Some(2));
                assert!(stderr.contains("No public key"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn binary_is_the_resolved_candidate() {
        assert_eq!(GpgEncryptor::new("/usr/bin/gpg2").binary(), "/usr/bin/gpg2");
    }

    #[test]
    fn missing_binary_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GpgEncryptor::new("/nonexistent/csv2pass-test-gpg")
            .encrypt("k", b"pw\n", &dir.path().join("x.gpg"))
            .unwrap_err();
        assert!(matches!(err, EncryptError::Spawn { .. }));
    }
}
