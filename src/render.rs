use crate::search::DisplayRecord;
use std::fmt::Write;

/// Renders search results as a Markdown listing: one section per dataset
/// with its last-modified caption and a link per resource.
pub fn render_markdown(records: &[DisplayRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### Found {} datasets", records.len());

    for record in records {
        let _ = writeln!(out, "\n#### {}", record.title);
        let _ = writeln!(out, "_Last Modified: {}_\n", record.last_modified);
        for res in &record.resources {
            let _ = writeln!(out, "- [{}](<{}>) ({})", escape_label(&res.name), escape_destination(&res.url), res.format);
        }
        let _ = writeln!(out, "\n---");
    }

    out
}

fn escape_label(label: &str) -> String {
    label.replace('[', "\\[").replace(']', "\\]")
}

/// Angle-bracket destinations allow spaces and parentheses but not `<`, `>` or line breaks.
fn escape_destination(url: &str) -> String {
    url.trim()
        .replace('<', "%3C")
        .replace('>', "%3E")
        .replace('\n', "%0A")
        .replace('\r', "%0D")
}
