//! Writes the door list as a Dat151 `Items` document

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::{hash::link_name, prefixed_name};
use crate::constants::dat151::*;
use crate::doors::Door;

/// Export `doors` to `path`, replacing any existing file
pub fn export_to_file<'a>(path: &Path, doors: impl IntoIterator<Item = &'a Door> + Clone) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut out = BufWriter::new(file);
    let count = write_document(&mut out, doors)
        .with_context(|| format!("Failed to write Dat151 XML to {:?}", path))?;
    out.flush().with_context(|| format!("Failed to flush {:?}", path))?;

    info!(path = %path.display(), doors = count, "Exported doors");
    Ok(())
}

/// Write the full document and return the number of doors written
///
/// All `DoorAudioSettings` items come first, then all
/// `DoorAudioSettingsLink` items in the same order.
pub fn write_document<'a, W: Write>(
    out: W,
    doors: impl IntoIterator<Item = &'a Door> + Clone,
) -> Result<usize> {
    let mut writer = Writer::new_with_indent(out, b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT)))?;
    writer.write_event(Event::Empty(
        BytesStart::new("Version").with_attributes([("value", VERSION)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("Items")))?;

    let mut count = 0;
    for door in doors.clone() {
        write_settings_item(&mut writer, door)?;
        count += 1;
    }
    for door in doors {
        write_link_item(&mut writer, door)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Items")))?;
    writer.write_event(Event::End(BytesEnd::new(ROOT)))?;
    writer.get_mut().write_all(b"\n")?;
    Ok(count)
}

fn write_settings_item<W: Write>(writer: &mut Writer<W>, door: &Door) -> Result<()> {
    writer.write_event(Event::Start(item_start(DOOR_SETTINGS_TYPE)))?;
    write_text_element(writer, "Name", &prefixed_name(&door.name))?;
    write_text_element(writer, "Sounds", &door.sounds)?;
    write_text_element(writer, "TuningParams", &door.tuning_params)?;
    let occlusion = door.max_occlusion.to_string();
    writer.write_event(Event::Empty(
        BytesStart::new("MaxOcclusion").with_attributes([("value", occlusion.as_str())]),
    ))?;
    writer.write_event(Event::End(BytesEnd::new("Item")))?;
    Ok(())
}

fn write_link_item<W: Write>(writer: &mut Writer<W>, door: &Door) -> Result<()> {
    writer.write_event(Event::Start(item_start(DOOR_LINK_TYPE)))?;
    write_text_element(writer, "Name", &link_name(&door.name))?;
    write_text_element(writer, "Door", &prefixed_name(&door.name))?;
    writer.write_event(Event::End(BytesEnd::new("Item")))?;
    Ok(())
}

fn item_start(kind: &str) -> BytesStart<'_> {
    BytesStart::new("Item").with_attributes([("type", kind), ("ntOffset", NT_OFFSET)])
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(tag)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(tag)))?;
        writer.write_event(Event::Text(BytesText::new(text)))?;
        writer.write_event(Event::End(BytesEnd::new(tag)))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doors::DoorCollection;

    fn to_string<'a>(doors: impl IntoIterator<Item = &'a Door> + Clone) -> Result<String> {
        let mut buf = Vec::new();
        write_document(&mut buf, doors)?;
        Ok(String::from_utf8(buf)?)
    }

    fn sample() -> DoorCollection {
        let mut doors = DoorCollection::new();
        doors.add(Door::new("door1", "dlc_door1_sounds", "dlc_door1_tuning", 0.7));
        doors.add(Door::new("Garage", "garage_sounds", "garage_tuning", 0.25));
        doors
    }

    #[test]
    fn test_header_and_version() {
        let xml = to_string(&sample()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<Version value="9458585"/>"#));
        assert!(xml.contains("<Dat151>"));
        assert!(xml.trim_end().ends_with("</Dat151>"));
    }

    #[test]
    fn test_settings_items_precede_links() {
        let xml = to_string(&sample()).unwrap();

        let settings_1 = xml.find("<Name>d_door1</Name>").unwrap();
        let settings_2 = xml.find("<Name>d_Garage</Name>").unwrap();
        let link_1 = xml.find("<Name>dasl_a4f0cb6f</Name>").unwrap();
        let link_2 = xml.find(&format!("<Name>{}</Name>", link_name("Garage"))).unwrap();
        assert!(settings_1 < settings_2);
        assert!(settings_2 < link_1);
        assert!(link_1 < link_2);

        assert_eq!(xml.matches(r#"type="DoorAudioSettings" ntOffset="0""#).count(), 2);
        assert_eq!(xml.matches(r#"type="DoorAudioSettingsLink" ntOffset="0""#).count(), 2);
    }

    #[test]
    fn test_item_contents() {
        let xml = to_string(&sample()).unwrap();
        assert!(xml.contains("<Sounds>dlc_door1_sounds</Sounds>"));
        assert!(xml.contains("<TuningParams>dlc_door1_tuning</TuningParams>"));
        assert!(xml.contains(r#"<MaxOcclusion value="0.7"/>"#));
        assert!(xml.contains(r#"<MaxOcclusion value="0.25"/>"#));
        assert!(xml.contains("<Door>d_door1</Door>"));
    }

    #[test]
    fn test_link_hash_uses_lowercased_name() {
        let xml = to_string(&sample()).unwrap();
        assert!(xml.contains(&format!("<Name>{}</Name>", link_name("garage"))));
    }

    #[test]
    fn test_special_characters_escaped() {
        let doors = [Door::new("a&b", "<s>", "", 0.5)];
        let xml = to_string(&doors).unwrap();
        assert!(xml.contains("<Name>d_a&amp;b</Name>"));
        assert!(xml.contains("<Sounds>&lt;s"));
        assert!(!xml.contains("<s>"));
        assert!(xml.contains("<TuningParams/>"));
    }

    #[test]
    fn test_empty_collection() {
        let xml = to_string(&DoorCollection::new()).unwrap();
        assert!(!xml.contains("<Item "));
        assert!(xml.contains("<Items>"));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("door_game.dat151.rel.xml");
        export_to_file(&path, &sample()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, to_string(&sample()).unwrap());
    }

    #[test]
    fn test_export_to_bad_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing_dir").join("out.xml");
        assert!(export_to_file(&path, &sample()).is_err());
    }
}
