//! # Encoding Subcommand
//!
//! Prints the parse of each bracket-encoded class name.

use std::io::Write;

use clap::Args;

use detyped_types::encoding;

/// Arguments for the encoding subcommand.
#[derive(Args, Debug)]
pub struct EncodingArgs {
    /// Class names to parse, e.g. `[I` or `[[LString;`.
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Write one line per name. Exit code 1 if any name is malformed.
pub fn run_encoding(args: &EncodingArgs, out: &mut impl Write) -> anyhow::Result<u8> {
    let mut invalid = 0;
    for name in &args.names {
        match encoding::parse(name) {
            Some(parsed) => writeln!(
                out,
                "{name}\tbase={}\tdimension={}\t{parsed}",
                parsed.base_class_name(),
                parsed.dimension()
            )?,
            None => {
                invalid += 1;
                writeln!(out, "{name}\tINVALID")?;
            }
        }
    }
    Ok(u8::from(invalid > 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(names: &[&str]) -> (String, u8) {
        let args = EncodingArgs {
            names: names.iter().map(|s| s.to_string()).collect(),
        };
        let mut out = Vec::new();
        let code = run_encoding(&args, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), code)
    }

    #[test]
    fn prints_each_parse() {
        let (out, code) = run(&["[I", "[[LString;", "String"]);
        assert_eq!(code, 0);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[I\tbase=I\tdimension=1\t1-dimension array of int");
        assert_eq!(
            lines[1],
            "[[LString;\tbase=String\tdimension=2\t2-dimension array of String"
        );
        assert_eq!(lines[2], "String\tbase=String\tdimension=0\tString (not an array)");
    }

    #[test]
    fn flags_invalid_names() {
        let (out, code) = run(&["[LString", "[II", "[I"]);
        assert_eq!(code, 1);
        assert!(out.starts_with("[LString\tINVALID\n[II\tINVALID\n"));
    }
}
