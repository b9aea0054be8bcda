//! Reads `DoorAudioSettings` items back from a Dat151 document
//!
//! Parsing is permissive per item: foreign elements are skipped, the first
//! of each repeated child wins, missing text reads as empty and a missing
//! or unreadable `MaxOcclusion` reads as the door default. Text is kept
//! verbatim, surrounding whitespace included.
//! A missing `Dat151` root or `Items` node rejects the whole file.

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::bare_name;
use crate::constants::dat151::{DOOR_SETTINGS_TYPE, ROOT};
use crate::constants::door::DEFAULT_MAX_OCCLUSION;
use crate::doors::{Door, DoorCollection, Upsert};

/// Element depths below the document
const ROOT_DEPTH: usize = 1;
const ITEMS_DEPTH: usize = 2;
const ITEM_DEPTH: usize = 3;
const FIELD_DEPTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemsState {
    Pending,
    Open,
    Done,
}

#[derive(Debug, Clone, Copy)]
enum TextField {
    Name,
    Sounds,
    TuningParams,
}

/// Fields of one settings item; `None` until the first matching child closes
#[derive(Debug, Default)]
struct RawItem {
    name: Option<String>,
    sounds: Option<String>,
    tuning_params: Option<String>,
    max_occlusion: Option<Option<String>>,
}

impl RawItem {
    fn slot(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::Name => &mut self.name,
            TextField::Sounds => &mut self.sounds,
            TextField::TuningParams => &mut self.tuning_params,
        }
    }

    fn into_door(self) -> Door {
        let name = self.name.unwrap_or_default();
        let max_occlusion = self
            .max_occlusion
            .flatten()
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .unwrap_or_else(|| {
                debug!(item = %name, "MaxOcclusion missing or unreadable, using default");
                DEFAULT_MAX_OCCLUSION
            });

        Door::new(
            bare_name(&name),
            self.sounds.unwrap_or_default(),
            self.tuning_params.unwrap_or_default(),
            max_occlusion,
        )
    }
}

/// Walks reader events, collecting settings items from the first `Items` node
struct ItemCollector {
    depth: usize,
    items: ItemsState,
    item: Option<RawItem>,
    capture: Option<(TextField, String)>,
    doors: Vec<Door>,
}

impl ItemCollector {
    fn new() -> Self {
        Self {
            depth: 0,
            items: ItemsState::Pending,
            item: None,
            capture: None,
            doors: Vec::new(),
        }
    }

    fn open(&mut self, e: &BytesStart<'_>) -> Result<()> {
        self.depth += 1;
        let name = e.name();
        let name = name.as_ref();

        match self.depth {
            ROOT_DEPTH => check_root_name(name)?,
            ITEMS_DEPTH if self.items == ItemsState::Pending && name == b"Items" => {
                self.items = ItemsState::Open;
            }
            ITEM_DEPTH if self.items == ItemsState::Open && name == b"Item" => {
                if attribute(e, "type")?.as_deref() == Some(DOOR_SETTINGS_TYPE) {
                    self.item = Some(RawItem::default());
                }
            }
            FIELD_DEPTH => {
                let Some(item) = self.item.as_mut() else {
                    return Ok(());
                };
                let field = match name {
                    b"Name" => TextField::Name,
                    b"Sounds" => TextField::Sounds,
                    b"TuningParams" => TextField::TuningParams,
                    b"MaxOcclusion" => {
                        if item.max_occlusion.is_none() {
                            item.max_occlusion = Some(attribute(e, "value")?);
                        }
                        return Ok(());
                    }
                    _ => return Ok(()),
                };
                if item.slot(field).is_none() {
                    self.capture = Some((field, String::new()));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.depth != FIELD_DEPTH {
            return;
        }
        if let Some((_, buf)) = self.capture.as_mut() {
            buf.push_str(text);
        }
    }

    fn close(&mut self) {
        match self.depth {
            ITEMS_DEPTH if self.items == ItemsState::Open => self.items = ItemsState::Done,
            ITEM_DEPTH => {
                if let Some(raw) = self.item.take() {
                    self.doors.push(raw.into_door());
                }
            }
            FIELD_DEPTH => {
                if let (Some((field, text)), Some(item)) = (self.capture.take(), self.item.as_mut()) {
                    *item.slot(field) = Some(text);
                }
            }
            _ => {}
        }
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Counts from a completed import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub inserted: usize,
    pub replaced: usize,
}

/// Parse every door settings item in document order
pub fn parse_str(text: &str) -> Result<Vec<Door>> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(false);

    let mut collector = ItemCollector::new();
    let mut root_seen = false;
    loop {
        match reader.read_event().context("Malformed XML")? {
            Event::Start(e) => {
                root_seen = true;
                collector.open(&e)?;
            }
            Event::Empty(e) => {
                root_seen = true;
                collector.open(&e)?;
                collector.close();
            }
            Event::End(_) => collector.close(),
            Event::Text(t) => collector.text(&t.unescape().context("Malformed XML text")?),
            Event::CData(c) => collector.text(&String::from_utf8_lossy(&c)),
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        bail!("No '{ROOT}' node found in XML file (document is empty)");
    }
    if collector.depth > 0 {
        bail!("Malformed XML: unexpected end of document");
    }
    if collector.items == ItemsState::Pending {
        bail!("No 'Items' node found in XML file");
    }
    Ok(collector.doors)
}

pub fn read_file(path: &Path) -> Result<Vec<Door>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read XML file {:?}", path))?;
    parse_str(&text).with_context(|| format!("Failed to import {:?}", path))
}

/// Merge the file's doors into `doors`, replacing same-named entries in place
/// The collection is untouched if the file can't be read or parsed
pub fn import_into(doors: &mut DoorCollection, path: &Path) -> Result<ImportSummary> {
    let parsed = read_file(path)?;

    let mut summary = ImportSummary::default();
    for door in parsed {
        match doors.upsert(door) {
            Upsert::Inserted(_) => summary.inserted += 1,
            Upsert::Replaced(_) => summary.replaced += 1,
        }
    }

    info!(
        path = %path.display(),
        inserted = summary.inserted,
        replaced = summary.replaced,
        "Imported doors"
    );
    Ok(summary)
}

fn check_root_name(name: &[u8]) -> Result<()> {
    if name != ROOT.as_bytes() {
        bail!(
            "No '{ROOT}' node found in XML file (root is '{}')",
            String::from_utf8_lossy(name)
        );
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>> {
    match e.try_get_attribute(key).context("Malformed XML attribute")? {
        Some(attr) => Ok(Some(
            attr.unescape_value().context("Malformed XML attribute")?.into_owned(),
        )),
        None => Ok(None),
    }
}
