//! List command implementation

use anyhow::{Context, Result};
use config_registry::Registry;
use std::path::Path;
use walkdir::WalkDir;

use super::utils::RegistryArgs;

pub fn run(registry_args: &RegistryArgs) -> Result<()> {
    let mut registry = registry_args.build()?;
    let Some(dir) = registry.dir().map(Path::to_path_buf) else {
        anyhow::bail!("No config directory set; pass --dir or set `dir` in the settings file");
    };

    for name in config_names(&dir, registry.suffix())? {
        registry.load(&name).with_context(|| format!("Failed loading config '{name}'"))?;
    }

    print_summary(&dir, &registry);
    Ok(())
}

/// Names of `<name><suffix>` files directly inside `dir`, sorted.
fn config_names(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("Failed reading {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non UTF-8 filename");
            continue;
        };
        if let Some(name) = file_name.strip_suffix(suffix) {
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

fn print_summary(dir: &Path, registry: &Registry) {
    let configs = registry.all();
    println!("Config directory: {}", dir.display());
    println!(
        "{} configuration{} loaded",
        configs.len(),
        if configs.len() == 1 { "" } else { "s" }
    );
    for (name, instances) in configs {
        let names: Vec<&str> = instances.keys().map(String::as_str).collect();
        if names.is_empty() {
            println!("  {name}: (no instances)");
        } else {
            println!("  {name}: {}", names.join(", "));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_names_filters_by_suffix() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.json"), "{}").unwrap();
        fs::write(tmp.path().join("a.json"), "{}").unwrap();
        fs::write(tmp.path().join("c.ini"), "").unwrap();
        fs::write(tmp.path().join(".json"), "{}").unwrap();
        fs::create_dir(tmp.path().join("d.json")).unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("e.json"), "{}").unwrap();

        let names = config_names(tmp.path(), ".json").unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }
}
