use super::load;
use anyhow::{bail, Context, Result};
use tracing::info;

pub fn run(fingerprint_file: String, output_file: Option<String>) -> Result<()> {
    let mut fp = load(&fingerprint_file)?;
    if fp.content().is_none() {
        bail!("{} is not a well-formed fingerprint", fingerprint_file);
    }

    let old_digest = fp.digest().to_string();
    fp.update_digest();

    let output_path = output_file.unwrap_or_else(|| fingerprint_file.clone());
    fp.write_to_file(&output_path)
        .with_context(|| format!("Failed to write {}", output_path))?;

    if old_digest == fp.digest() {
        info!("{}: digest already current", fingerprint_file);
    } else {
        info!("{}: digest {} replaced", fingerprint_file, old_digest);
    }
    println!("{}", fp.digest());
    Ok(())
}
