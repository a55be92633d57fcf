//! Random sample directories for exercising the TUI with realistic volume.
//!
//! The generator writes through [`RecordStore`] so sample files always use
//! exactly the same line format the application reads back.

use std::path::Path;

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::store::RecordStore;

/// Line count written when the caller does not ask for a specific size.
pub const DEFAULT_SAMPLE_COUNT: usize = 500;
/// File name used when no output path is given.
pub const DEFAULT_SAMPLE_FILE: &str = "random_data.txt";
/// Digits in every generated phone number.
const PHONE_DIGITS: usize = 10;

const NAMES: &[&str] = &[
    "John", "Jane", "David", "Sarah", "Michael", "Emily", "Robert", "Olivia", "William", "Ava",
];

/// Pick a first name from the fixed pool.
pub fn random_name<R: Rng>(rng: &mut R) -> &'static str {
    NAMES[rng.random_range(0..NAMES.len())]
}

/// Ten random decimal digits.
pub fn random_phone_number<R: Rng>(rng: &mut R) -> String {
    (0..PHONE_DIGITS)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Build `count` random `(name, phone)` pairs.
pub fn generate_records<R: Rng>(rng: &mut R, count: usize) -> Vec<(String, String)> {
    (0..count)
        .map(|_| (random_name(rng).to_string(), random_phone_number(rng)))
        .collect()
}

/// Overwrite `path` with `count` random records using the thread-local RNG.
pub fn write_sample_file(path: &Path, count: usize) -> Result<()> {
    write_sample_file_with(&mut rand::rng(), path, count)
}

/// Same as [`write_sample_file`] but with a caller-provided RNG.
pub fn write_sample_file_with<R: Rng>(rng: &mut R, path: &Path, count: usize) -> Result<()> {
    let mut store = RecordStore::new(path);
    for (name, phone_number) in generate_records(rng, count) {
        store.add(name, phone_number);
    }
    store.save()?;
    info!(count, path = %path.display(), "wrote sample directory");
    Ok(())
}
