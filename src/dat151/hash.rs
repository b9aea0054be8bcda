//! Jenkins one-at-a-time hash as used by the game for name identifiers

use crate::constants::dat151::LINK_PREFIX;

/// One-at-a-time 32-bit hash of the ASCII-lowercased name
///
/// Bytes are added as unsigned values, so non-ASCII UTF-8 input hashes the
/// way the game does rather than with sign-extended `char`s.
pub fn joaat(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes().map(|b| b.to_ascii_lowercase()) {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Hash formatted as 8 lowercase hex digits
pub fn joaat_hex(name: &str) -> String {
    format!("{:08x}", joaat(name))
}

/// `dasl_xxxxxxxx` name of a door's link item
pub fn link_name(door_name: &str) -> String {
    format!("{LINK_PREFIX}{}", joaat_hex(door_name))
}
