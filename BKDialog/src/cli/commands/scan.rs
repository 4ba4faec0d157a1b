//! CLI command for checking a whole mods folder

use std::path::Path;

use crate::loader::DialogLoader;

pub fn execute(mod_root: &Path, quiet: bool) -> anyhow::Result<()> {
    if !mod_root.is_dir() {
        anyhow::bail!("mods folder not found: {}", mod_root.display());
    }

    let mut loader = DialogLoader::with_mod_root(mod_root);
    let report = loader.refresh_all();

    if !quiet {
        for id in &report.loaded {
            println!("ok      {id}");
        }
        for path in &report.skipped {
            println!("skipped {} (stem is not a hex text id)", path.display());
        }
        for id in &report.unresolved {
            println!("missing {} (file name must be exactly {})", id, id.file_name());
        }
    }
    for failure in &report.failures {
        println!("FAILED  {} {}: {}", failure.id, failure.path.display(), failure.error);
    }

    println!(
        "{} loaded, {} failed, {} skipped",
        report.loaded.len(),
        report.failures.len(),
        report.skipped.len() + report.unresolved.len()
    );

    if !report.failures.is_empty() {
        anyhow::bail!("{} dialog files failed to compile", report.failures.len());
    }
    Ok(())
}
