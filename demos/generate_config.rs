//! Write the default engine configuration and check it loads back
//!
//! The saved file is reloaded through `from_json_file`, which validates it,
//! and the resulting engine previews the adaptive palette for a base color.

use std::path::PathBuf;
use std::{env, process};

use chroma_palette::{Color, EngineConfig, PaletteEngine, PaletteError};

fn run(output: PathBuf, base: &str) -> Result<(), PaletteError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| PaletteError::config(format!("cannot create {}", parent.display()), e))?;
    }
    EngineConfig::default().to_json_file(&output)?;

    let engine = PaletteEngine::with_config(EngineConfig::from_json_file(&output)?)?;
    let (palette, harmony) = engine.generate_harmonized_palette(&Color::from_hex(base)?)?;
    let analysis = engine.analyze_palette(&palette);

    println!("{}", output.display());
    println!(
        "{} -> {} [{}] harmony {:.0}, max contrast {:.2}:1",
        base,
        palette.hex_codes().join(" "),
        harmony,
        analysis.harmony_score,
        analysis.max_contrast_ratio
    );
    Ok(())
}

fn main() {
    let mut args = env::args().skip(1);
    let Some(output) = args.next().map(PathBuf::from) else {
        eprintln!("usage: generate_config <output.json> [base-hex]");
        process::exit(2);
    };
    let base = args.next().unwrap_or_else(|| "#3366CC".to_string());

    if let Err(e) = run(output, &base) {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }
}
