//! Editing a `.env` file without disturbing its layout.
//!
//! Run with: cargo run --example edit_env

use kvedit::{parse_str, KeyValueFile, WriteOptions};
use std::error::Error;

const ENV: &str = "\
# Application settings
APP_NAME = demo        # shown in the title bar
APP_PORT = 8080

  # Database
DB_URL='postgres://localhost/demo'
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut doc = parse_str(ENV)?;
    assert_eq!(doc.to_string(), ENV);
    println!("✓ Round-trip successful");

    doc.set("APP_PORT", 9090)
        .rename("DB_URL", "DATABASE_URL")
        .set("LOG_LEVEL", "debug");
    println!("Edited:\n{}\n", doc);

    doc.remove_comments();
    println!("Without comments:\n{}\n", doc);
    println!("Collapsed:\n{}\n", doc.to_string_collapsed());

    let path = std::env::temp_dir().join("kvedit-demo.env");
    let mut file = KeyValueFile::with_document(&path, doc);
    file.write_file(false, &WriteOptions::default())?;
    println!("✓ Written to {}", file.path().display());

    Ok(())
}
