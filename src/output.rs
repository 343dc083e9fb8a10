use std::collections::BTreeMap;
use std::io::Write;

use serde::Serialize;

use crate::generator::Layout;
use crate::location::Position;

/// Every time as `HH:MM` mapped to the `[x, y]` cells spelling it out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HighlightDocument(pub BTreeMap<String, Vec<Position>>);

impl From<&Layout> for HighlightDocument {
    fn from(layout: &Layout) -> Self {
        Self(layout.highlights()
            .into_iter()
            .map(|(key, cells)| (key.to_string(), cells.into_iter().collect()))
            .collect())
    }
}

impl Layout {
    /// The highlight document as a single line of JSON, keys sorted.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&HighlightDocument::from(self))
    }

    /// Write the highlight document to `writer` followed by a newline.
    pub fn write_json<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer(&mut writer, &HighlightDocument::from(self))?;
        writeln!(writer)?;
        writer.flush()
    }
}
