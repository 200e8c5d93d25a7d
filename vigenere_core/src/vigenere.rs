use std::io::{Read, Write};

use log::debug;

use crate::alphabet::{alphabet_position, case_base, shift_char};
use crate::error::CipherError;

/// Polyalphabetic cipher keyed by a repeating password.
///
/// Each letter of the input consumes one key byte; everything else is
/// copied through without advancing the key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VigenereCipher {
    password: String,
}

impl VigenereCipher {
    pub fn new(password: impl Into<String>) -> Result<Self, CipherError> {
        let password = password.into();
        if password.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(Self { password })
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn shift<R: Read, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
        decrypt: bool,
    ) -> Result<(), CipherError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        let result = self.shift_text(&String::from_utf8_lossy(&content), decrypt);
        debug!(
            "vigenere {} {} bytes with {}-byte key",
            if decrypt { "decrypt" } else { "encrypt" },
            result.len(),
            self.password.len()
        );
        writer.write_all(result.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn shift_text(&self, text: &str, decrypt: bool) -> String {
        let key = self.password.as_bytes();
        let mut key_index = 0usize;
        text.chars()
            .map(|c| {
                if case_base(c).is_none() {
                    return c;
                }
                let shift = key_shift(key[key_index % key.len()]);
                key_index += 1;
                shift_char(c, if decrypt { -shift } else { shift })
            })
            .collect()
    }
}

/// Shift contributed by one key byte; non-letters contribute nothing.
fn key_shift(byte: u8) -> i32 {
    alphabet_position(char::from(byte)).unwrap_or(0)
}
