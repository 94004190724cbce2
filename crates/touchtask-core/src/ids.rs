//! Opaque identifier generation.

use jiff::Timestamp;
use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Generates an id of the form `<unix-millis>-<9 base36 chars>`.
///
/// Ids are only compared for equality, never parsed.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}-{suffix}", Timestamp::now().as_millisecond())
}
