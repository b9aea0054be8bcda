//! Dat151 XML interchange for door audio settings
//!
//! Each door becomes a `DoorAudioSettings` item plus a
//! `DoorAudioSettingsLink` item keyed by the name's one-at-a-time hash.
//! Only the settings items are read back on import.

pub mod export;
pub mod hash;
pub mod import;

use crate::constants::dat151::DOOR_PREFIX;

pub use export::export_to_file;
pub use hash::link_name;
pub use import::import_into;

/// `d_<name>` as written in Name and Door elements
pub fn prefixed_name(door_name: &str) -> String {
    format!("{DOOR_PREFIX}{door_name}")
}

/// Strip exactly one leading `d_`; names without it are used verbatim
pub fn bare_name(item_name: &str) -> &str {
    item_name.strip_prefix(DOOR_PREFIX).unwrap_or(item_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_handling() {
        assert_eq!(prefixed_name("front"), "d_front");
        assert_eq!(bare_name("d_front"), "front");
        assert_eq!(bare_name("d_d_front"), "d_front");
        assert_eq!(bare_name("front"), "front");
        assert_eq!(bare_name("d"), "d");
    }
}
