use anyhow::{Context, Result};
use toml_edit::{value, DocumentMut};

use biblia_etl::{config, Config};

const KEYS: &[&str] = &[
    "database_path",
    "corpus_dir",
    "version",
    "remote_base_url",
    "remote_translation",
    "request_delay_ms",
    "batch_size",
    "log_level",
    "log_coloured",
];

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!("Unknown config key: {}\n\nValid keys: {}", key, KEYS.join(", "))
}

/// Effective value of one key, as it would be written to the file.
fn effective_value(config: &Config, key: &str) -> Result<String> {
    let rendered = match key {
        "database_path" => config.database_path.display().to_string(),
        "corpus_dir" => config.corpus_dir.display().to_string(),
        "version" => config.version.clone(),
        "remote_base_url" => config.remote_base_url.clone(),
        "remote_translation" => config.remote_translation.clone(),
        "request_delay_ms" => config.request_delay_ms.to_string(),
        "batch_size" => config.batch_size.to_string(),
        "log_level" => config.log_level.clone(),
        "log_coloured" => config.log_coloured.to_string(),
        _ => return Err(unknown_key(key)),
    };
    Ok(rendered)
}

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let path = config::config_file_path();
    println!("Config file: {}", path.display());
    println!(
        "File exists: {}\n",
        if path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    for key in KEYS {
        println!("  {key}: {}", effective_value(config, key)?);
    }

    println!("\nPriority: CLI args > ENV vars (BIBLIA_*) > Config file > Defaults");
    Ok(())
}

/// Get a specific config value, or print the whole file.
pub fn get_config(config: &Config, key: Option<&str>) -> Result<()> {
    if let Some(key) = key {
        println!("{}", effective_value(config, key)?);
        return Ok(());
    }

    let config_path = config::config_file_path();
    if config_path.exists() {
        let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
        print!("{contents}");
    } else {
        println!("Config file does not exist: {}", config_path.display());
        println!("\nRun 'biblia config init' to create it.");
    }
    Ok(())
}

/// Set `key` in `contents`, keeping comments and layout.
fn set_in_document(contents: &str, key: &str, raw: &str) -> Result<String> {
    let mut doc = contents
        .parse::<DocumentMut>()
        .context("Config file is not valid TOML")?;

    let item = match key {
        "request_delay_ms" | "batch_size" => {
            let n: i64 = raw
                .parse()
                .with_context(|| format!("{key} must be a non-negative integer"))?;
            if n < 0 {
                anyhow::bail!("{key} must be a non-negative integer");
            }
            value(n)
        }
        "log_coloured" => value(
            raw.parse::<bool>()
                .with_context(|| format!("{key} must be true or false"))?,
        ),
        k if KEYS.contains(&k) => value(raw),
        _ => return Err(unknown_key(key)),
    };
    doc[key] = item;
    Ok(doc.to_string())
}

/// Set a config value.
pub fn set_config(key: &str, raw: &str) -> Result<()> {
    let config_path = config::config_file_path();
    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = set_in_document(&contents, key, raw)?;
    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {key} = {raw}");
    println!("  in {}", config_path.display());
    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure biblia.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_comments() {
        let updated = set_in_document(config::example_config(), "version", "kjv").unwrap();
        assert!(updated.contains("version = \"kjv\""));
        assert!(updated.contains("# Biblia Configuration File"));
    }

    #[test]
    fn test_set_typed_values() {
        let updated = set_in_document("", "batch_size", "250").unwrap();
        assert!(updated.contains("batch_size = 250"));
        let updated = set_in_document(&updated, "log_coloured", "false").unwrap();
        assert!(updated.contains("log_coloured = false"));
        assert!(set_in_document("", "batch_size", "many").is_err());
        assert!(set_in_document("", "batch_size", "-1").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(set_in_document("", "acoustid_api_key", "x").is_err());
        assert!(effective_value(&Config::default(), "nope").is_err());
    }

    #[test]
    fn test_effective_values() {
        let config = Config::default();
        assert_eq!(effective_value(&config, "version").unwrap(), "acf");
        assert_eq!(effective_value(&config, "request_delay_ms").unwrap(), "500");
    }
}
