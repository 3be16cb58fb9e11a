//! In-process stand-in for gpg.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use csv2pass_core::encrypt::Encryptor;
use csv2pass_core::error::EncryptError;

/// "Encrypts" by writing `ENC[<recipient>]` followed by the plaintext.
/// Optionally fails on the n-th call (1-based).
#[derive(Default)]
pub struct FakeGpg {
    pub calls: RefCell<Vec<(String, PathBuf)>>,
    pub fail_on_call: Option<usize>,
}

impl FakeGpg {
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Encryptor for FakeGpg {
    fn encrypt(
        &self,
        recipient: &str,
        plaintext: &[u8],
        output: &Path,
    ) -> Result<(), EncryptError> {
        self.calls
            .borrow_mut()
            .push((recipient.to_string(), output.to_path_buf()));
        if self.fail_on_call == Some(self.call_count()) {
            return Err(EncryptError::Failed {
                binary: "fake-gpg".to_string(),
                code: Some(2),
                stderr: format!("gpg: {recipient}: skipped: No public key"),
            });
        }
        let mut data = format!("ENC[{recipient}]\n").into_bytes();
        data.extend_from_slice(plaintext);
        fs::write(output, data).unwrap();
        Ok(())
    }
}
