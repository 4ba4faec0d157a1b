//! CLI command for decoding compiled blobs

use std::path::Path;

use crate::formats::dialog::{Dialog, Section, read_blob};
use crate::text::latin1_to_utf8;

pub fn execute(source: &Path) -> anyhow::Result<()> {
    let blob = std::fs::read(source)?;
    let dialog = read_blob(&blob)?;
    print!("{}", render(&dialog));
    Ok(())
}

/// Render a decoded dialog back in the authoring format
pub fn render(dialog: &Dialog) -> String {
    let mut out = String::from("type: Dialog\n");
    for section in [Section::Bottom, Section::Top] {
        out.push_str(section.name());
        out.push_str(":\n");
        for line in dialog.section(section) {
            let text = latin1_to_utf8(&line.bytes);
            // Pick the quote that does not appear in the text
            let quote = if text.contains('"') { '\'' } else { '"' };
            out.push_str(&format!(
                "  - {{ cmd: 0x{:02X}, string: {quote}{text}{quote} }}\n",
                line.cmd
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::dialog::{BkString, parse_dialog};

    #[test]
    fn test_render_is_reparseable() {
        let dialog = Dialog {
            bottom: vec![BkString::new(0x83, "Say \"cheese\"")],
            top: vec![BkString::new(0x80, "Banjo")],
        };
        let text = render(&dialog);
        assert!(text.contains("  - { cmd: 0x83, string: 'Say \"cheese\"' }"));
        assert_eq!(parse_dialog(text.as_bytes()).unwrap(), dialog);
    }
}
