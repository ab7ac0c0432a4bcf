//! Cart export formats.
//!
//! - Shopping list: one `"<name>, <price>"` line per item.
//! - JSON: array of `{ "id", "item", "price" }` objects.
//! - Log: recorded audit lines joined by newlines.

use crate::model::item::Item;
use std::io::{self, Write};

/// Writes the plain-text shopping list.
///
/// Prices use the shortest round-trip form with a decimal point (`2.0`, `1.2`).
pub fn write_shopping_list<W: Write>(items: &[Item], mut writer: W) -> io::Result<()> {
    for item in items {
        writeln!(writer, "{}, {:?}", item.name, item.price)?;
    }
    writer.flush()
}

/// Writes the JSON export.
pub fn write_json<W: Write>(items: &[Item], mut writer: W) -> io::Result<()> {
    serde_json::to_writer(&mut writer, items)?;
    writer.flush()
}

/// Writes lines separated by `\n`, without a trailing newline.
pub fn write_lines<W: Write>(lines: &[String], mut writer: W) -> io::Result<()> {
    writer.write_all(lines.join("\n").as_bytes())?;
    writer.flush()
}
