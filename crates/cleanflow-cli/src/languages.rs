//! # Languages Subcommand
//!
//! Lists the configured languages with their writing direction and the name
//! each pack declares for itself.

use anyhow::Result;

use cleanflow_core::CleanflowConfig;

/// Execute the languages subcommand.
pub fn run_languages(config: &CleanflowConfig) -> Result<u8> {
    let table = config.language_table()?;
    let store = crate::pack_store(config)?;
    let loaded = crate::runtime()?.block_on(store.load_all(table.as_slice()));

    println!("Supported languages:");
    println!();
    for code in table.iter() {
        let name = match loaded.get(&code) {
            Some(Ok(pack)) => pack.display_name(code).unwrap_or("-").to_string(),
            Some(Err(e)) => format!("({e})"),
            None => "-".to_string(),
        };
        let mut roles = Vec::new();
        if code == table.default_language() {
            roles.push("default");
        }
        if code == table.reference_language() {
            roles.push("reference");
        }
        println!(
            "  {:<4} {:<4} {:<12} {}",
            code.as_str(),
            code.direction().as_str(),
            name,
            roles.join(", ")
        );
    }
    println!();
    println!("Total: {} languages", table.len());
    Ok(0)
}
