//! # Check Subcommand
//!
//! Loads a persisted descriptor and a value and reports whether the value
//! is an instance of the descriptor.
//!
//! ```text
//! detyped check --type interface.yaml --value eth0.json --allow-list site.yaml
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use detyped_types::{AllowList, MetaType, MetaTypeRepr, Value};

use crate::document;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Descriptor document (YAML or JSON).
    #[arg(long = "type", value_name = "FILE")]
    pub type_path: PathBuf,

    /// Value document (YAML or JSON).
    #[arg(long, value_name = "FILE")]
    pub value: PathBuf,

    /// Allow-list configuration; the standard list when omitted.
    #[arg(long, value_name = "FILE")]
    pub allow_list: Option<PathBuf>,
}

/// Run the check, writing a one-line verdict. Exit code 1 if the value is
/// not an instance.
pub fn run_check(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let custom;
    let allow = match &args.allow_list {
        Some(path) => {
            custom = AllowList::load(path)
                .with_context(|| format!("failed to load allow-list {}", path.display()))?;
            &custom
        }
        None => AllowList::standard(),
    };

    let repr: MetaTypeRepr = document::load(&args.type_path)?;
    let value: Value = document::load(&args.value)?;
    let (meta_type, accepted) = check(repr, &value, allow)
        .with_context(|| format!("invalid descriptor in {}", args.type_path.display()))?;

    tracing::info!(
        type_name = %meta_type.type_name(),
        accepted,
        "checked value"
    );
    let verdict = if accepted { "is" } else { "is NOT" };
    writeln!(
        out,
        "{} {verdict} an instance of {}",
        args.value.display(),
        meta_type
    )?;
    Ok(u8::from(!accepted))
}

/// Rebuild the descriptor against `allow` and check `value` against it.
pub fn check(
    repr: MetaTypeRepr,
    value: &Value,
    allow: &AllowList,
) -> anyhow::Result<(MetaType, bool)> {
    let meta_type = MetaType::from_repr(repr, allow)?;
    let accepted = meta_type.is_value(value);
    Ok((meta_type, accepted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse, Format};

    const POINT: &str = r#"
kind: composite
type_name: Point
description: A 2D point
items:
  - name: x
    meta_type: { kind: simple, class_name: int }
  - name: y
    meta_type: { kind: simple, class_name: int }
"#;

    fn point() -> MetaTypeRepr {
        parse(POINT, Format::Yaml).unwrap()
    }

    #[test]
    fn accepts_matching_value() {
        let value: Value = parse(r#"{"map": {"x": {"int": 1}, "y": {"int": 2}}}"#, Format::Json)
            .unwrap();
        let (t, accepted) = check(point(), &value, AllowList::standard()).unwrap();
        assert!(accepted);
        assert_eq!(t.type_name(), "Point");
    }

    #[test]
    fn rejects_mismatched_value() {
        let value: Value = parse(r#"{"map": {"x": {"int": 1}}}"#, Format::Json).unwrap();
        let (_, accepted) = check(point(), &value, AllowList::standard()).unwrap();
        assert!(!accepted);
    }

    #[test]
    fn invalid_descriptor_is_an_error() {
        let repr: MetaTypeRepr =
            parse("{kind: simple, class_name: Money}", Format::Yaml).unwrap();
        assert!(check(repr.clone(), &Value::Null, AllowList::standard()).is_err());

        let allow = AllowList::from_yaml_str("classes: [Money]").unwrap();
        let (_, accepted) = check(repr, &Value::Null, &allow).unwrap();
        assert!(!accepted);
    }
}
