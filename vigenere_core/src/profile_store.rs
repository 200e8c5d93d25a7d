//! JSON persistence for reference profiles.
//!
//! The stored form is `{"name": ..., "values": {"a": 0.08, ...}}`, written
//! pretty-printed. Every key must be a single character.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::error::CipherError;
use crate::frequency::{FrequencyProfile, FrequencyTable, ProfileRecord};

pub fn load_profile<R: Read>(reader: R) -> Result<FrequencyProfile, CipherError> {
    let record: ProfileRecord = serde_json::from_reader(reader)?;
    FrequencyProfile::try_from(record)
}

pub fn load_profile_file(path: &Path) -> Result<FrequencyProfile, CipherError> {
    let file = File::open(path)?;
    let profile = load_profile(BufReader::new(file))?;
    debug!(
        "loaded profile '{}' ({} keys) from {}",
        profile.name(),
        profile.values().len(),
        path.display()
    );
    Ok(profile)
}

pub fn store_profile<W: Write>(
    mut writer: W,
    profile: &FrequencyProfile,
) -> Result<(), CipherError> {
    serde_json::to_writer_pretty(&mut writer, &ProfileRecord::from(profile))?;
    writer.flush()?;
    Ok(())
}

pub fn store_profile_file(path: &Path, profile: &FrequencyProfile) -> Result<(), CipherError> {
    let file = File::create(path)?;
    store_profile(BufWriter::new(file), profile)?;
    debug!("stored profile '{}' to {}", profile.name(), path.display());
    Ok(())
}

/// Converts a counted table into a named reference profile and stores it.
pub fn store_table<W: Write>(
    writer: W,
    table: &FrequencyTable,
    name: &str,
) -> Result<FrequencyProfile, CipherError> {
    let profile = table.to_fractions().renamed(name);
    store_profile(writer, &profile)?;
    Ok(profile)
}
