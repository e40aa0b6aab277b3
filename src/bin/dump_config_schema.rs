//! Prints the JSON schema of `config.toml` for editor integrations.

use anyhow::Result;

fn main() -> Result<()> {
    let schema = sizechart::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
