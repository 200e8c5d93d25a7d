//! Caesar and Vigenère substitution ciphers over the Latin alphabet, plus a
//! frequency-analysis cracker that recovers an unknown Caesar shift.
//!
//! All stream operations buffer their whole input before writing. Reference
//! profiles for cracking are always passed in explicitly.

pub mod alphabet;
pub mod caesar;
pub mod error;
pub mod frequency;
pub mod profile_store;
pub mod reference;
pub mod vigenere;

pub use crate::alphabet::{normalize_shift, shift_text};
pub use crate::caesar::{
    CANDIDATE_SHIFTS, CaesarCipher, CrackConfig, DEFAULT_SAMPLE_LIMIT, ShiftScore,
};
pub use crate::error::CipherError;
pub use crate::frequency::{ErrorSummation, FrequencyProfile, FrequencyTable, ProfileRecord};
pub use crate::profile_store::{
    load_profile, load_profile_file, store_profile, store_profile_file, store_table,
};
pub use crate::vigenere::VigenereCipher;
