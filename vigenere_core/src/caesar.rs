use std::io::{Read, Write};
use std::ops::RangeInclusive;

use chrono::Utc;
use log::{debug, info};

use crate::alphabet::{normalize_shift, shift_text};
use crate::error::CipherError;
use crate::frequency::{ErrorSummation, FrequencyProfile, FrequencyTable};

/// Bytes of input examined per candidate shift while cracking.
pub const DEFAULT_SAMPLE_LIMIT: usize = 64 * 1024;

/// Shifts tried by the cracker, in order.
pub const CANDIDATE_SHIFTS: RangeInclusive<i32> = 1..=26;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrackConfig {
    pub sample_limit: usize,
    pub summation: ErrorSummation,
}

impl CrackConfig {
    pub const fn new(sample_limit: usize, summation: ErrorSummation) -> Self {
        Self {
            sample_limit,
            summation,
        }
    }

    pub fn with_sample_limit(mut self, sample_limit: usize) -> Self {
        self.sample_limit = sample_limit;
        self
    }

    pub fn with_summation(mut self, summation: ErrorSummation) -> Self {
        self.summation = summation;
        self
    }
}

impl Default for CrackConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_LIMIT, ErrorSummation::Candidate)
    }
}

/// Outcome of a shift search: the winning shift and its squared error.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShiftScore {
    pub shift: i32,
    pub error: f64,
}

/// Fixed-offset substitution cipher with a frequency-analysis cracker.
///
/// The reference profile is only used by [`CaesarCipher::crack`] and
/// [`CaesarCipher::find_best_shift`]; the search never touches `offset`.
#[derive(Clone, Debug)]
pub struct CaesarCipher {
    offset: i32,
    reference: FrequencyProfile,
    config: CrackConfig,
}

impl CaesarCipher {
    pub fn new(offset: i32, reference: FrequencyProfile) -> Self {
        Self {
            offset,
            reference,
            config: CrackConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CrackConfig) -> Self {
        self.config = config;
        self
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn reference(&self) -> &FrequencyProfile {
        &self.reference
    }

    pub fn config(&self) -> CrackConfig {
        self.config
    }

    /// Encrypts (shift right) or decrypts (shift left) the whole of `reader`
    /// by the stored offset into `writer`.
    pub fn shift<R: Read, W: Write>(
        &self,
        reader: R,
        writer: W,
        decrypt: bool,
    ) -> Result<(), CipherError> {
        let offset = normalize_shift(self.offset);
        let shift = if decrypt { -offset } else { offset };
        transform(reader, writer, shift)
    }

    pub fn shift_with_offset(&self, input: &str, shift: i32) -> String {
        shift_text(input, shift)
    }

    /// Counts the lowercase letters of the whole stream into a fresh table
    /// named after the current time.
    pub fn sample_frequency<R: Read>(
        &self,
        mut reader: R,
    ) -> Result<FrequencyTable, CipherError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        let text = String::from_utf8_lossy(&content).to_lowercase();

        let mut table = FrequencyTable::new(format!("Sampled-{}", Utc::now().to_rfc3339()));
        table.merge(&self.frequency_analysis(&text));
        Ok(table)
    }

    /// Raw per-character counts of `line`, unfiltered.
    pub fn frequency_analysis(&self, line: &str) -> FrequencyTable {
        FrequencyTable::tally("line", line)
    }

    /// Scores every candidate shift against the reference profile using a
    /// bounded prefix of `input`. Ties keep the earliest candidate.
    pub fn find_best_shift(&self, input: &[u8]) -> Result<ShiftScore, CipherError> {
        let limit = self.config.sample_limit as u64;
        let mut best = ShiftScore {
            shift: 0,
            error: f64::MAX,
        };

        for candidate in CANDIDATE_SHIFTS {
            debug!("trying offset {} on at most {} sample bytes", candidate, limit);
            let mut decrypted = Vec::new();
            transform(Read::take(input, limit), &mut decrypted, -candidate)?;

            let distribution = self.sample_frequency(decrypted.as_slice())?.to_fractions();
            let error = self.config.summation.score(&distribution, &self.reference);
            if error < best.error {
                best = ShiftScore {
                    shift: candidate,
                    error,
                };
                info!(
                    "new least cumulative error: {:.6}, shift: {}",
                    best.error, best.shift
                );
            }
        }
        Ok(best)
    }

    /// Recovers the most likely shift of `input` and writes the fully
    /// decrypted text to `output`.
    pub fn crack<R: Read, W: Write>(
        &self,
        mut input: R,
        output: W,
    ) -> Result<ShiftScore, CipherError> {
        let mut buffer = Vec::new();
        input.read_to_end(&mut buffer)?;
        debug!("cached {} bytes input", buffer.len());

        let best = self.find_best_shift(&buffer)?;
        debug!("processing output at shift {}", best.shift);
        transform(buffer.as_slice(), output, -best.shift)?;
        Ok(best)
    }
}

fn transform<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    shift: i32,
) -> Result<(), CipherError> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;
    let shifted = shift_text(&String::from_utf8_lossy(&content), shift);
    writer.write_all(shifted.as_bytes())?;
    writer.flush()?;
    Ok(())
}
