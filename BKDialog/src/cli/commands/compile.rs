//! CLI command for compiling a single dialog file

use std::path::Path;

use crate::cache::{BlobSlot, SLOT_SIZE};
use crate::formats::dialog::{read_dialog, serialize_dialog_with_warnings};

pub fn execute(source: &Path, output: Option<&Path>, slot: bool) -> anyhow::Result<()> {
    let dialog = read_dialog(source)?;
    let (mut blob, warnings) = serialize_dialog_with_warnings(&dialog);

    for warning in &warnings {
        eprintln!("warning: {warning}");
    }
    if blob.len() > SLOT_SIZE {
        eprintln!(
            "warning: blob is {} bytes, the loader keeps only the first {SLOT_SIZE}",
            blob.len()
        );
    }

    if slot {
        blob = BlobSlot::from_blob(&blob).as_bytes().to_vec();
    }

    match output {
        Some(path) => {
            std::fs::write(path, &blob)?;
            println!(
                "Compiled {} ({} bottom, {} top lines, {} bytes) -> {}",
                source.display(),
                dialog.bottom.len(),
                dialog.top.len(),
                blob.len(),
                path.display()
            );
        }
        None => print!("{}", hex_dump(&blob)),
    }

    Ok(())
}

/// Classic 16-bytes-per-row hex dump with offsets
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in bytes.chunks(16).enumerate() {
        out.push_str(&format!("{:08X} ", row * 16));
        for byte in chunk {
            out.push_str(&format!(" {byte:02X}"));
        }
        out.push('\n');
    }
    out
}
