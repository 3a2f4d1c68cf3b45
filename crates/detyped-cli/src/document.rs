//! Reading YAML or JSON documents from disk.

use std::path::Path;

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;

/// Document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// `.json` is JSON; `.yaml` and `.yml` are YAML.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => bail!(
                "cannot tell the format of {}: expected .json, .yaml, or .yml",
                path.display()
            ),
        }
    }
}

/// Parse `text` as `T` in the given syntax.
pub fn parse<T: DeserializeOwned>(text: &str, format: Format) -> anyhow::Result<T> {
    let parsed = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(parsed)
}

/// Read and parse a document, with the path in any error.
pub fn load<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&text, format).with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_by_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.yml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("dir/a.yaml")).unwrap(), Format::Yaml);
        assert!(Format::from_path(Path::new("a.toml")).is_err());
        assert!(Format::from_path(Path::new("a")).is_err());
    }

    #[test]
    fn parse_both_syntaxes() {
        let from_json: Vec<String> = parse(r#"["a", "b"]"#, Format::Json).unwrap();
        let from_yaml: Vec<String> = parse("- a\n- b\n", Format::Yaml).unwrap();
        assert_eq!(from_json, from_yaml);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load::<Vec<String>>(Path::new("/nonexistent/detyped.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/detyped.json"));
    }
}
