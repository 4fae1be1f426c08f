pub mod build;
pub mod script;

use std::path::Path;

/// Write `content` to `output`, or to stdout when no path is given
pub fn emit(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            std::fs::write(path, content)?;
            eprintln!("✓ Written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
