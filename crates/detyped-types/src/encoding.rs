//! # Array Encoding
//!
//! The textual grammar for array class names:
//!
//! ```text
//! encoding  := "["* element
//! element   := primitive            (only when at least one "[")
//!            | "L" name ";"         (only when at least one "[")
//!            | name                 (only when no "[")
//! primitive := B | C | D | F | I | J | S | Z | V
//! ```
//!
//! The parser only computes structure. Whether the base class is permitted
//! is the allow-list's business, not this module's.

use std::fmt;

use crate::meta_type::SimpleKind;

/// Deepest array an encoded class name may describe.
pub const MAX_DIMENSION: usize = 255;

/// The single-letter codes for primitive array elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveCode {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
}

impl PrimitiveCode {
    /// Every code, in letter order.
    pub const ALL: [PrimitiveCode; 9] = [
        Self::Byte,
        Self::Char,
        Self::Double,
        Self::Float,
        Self::Int,
        Self::Long,
        Self::Short,
        Self::Boolean,
        Self::Void,
    ];

    /// Decode a primitive letter.
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'B' => Some(Self::Byte),
            'C' => Some(Self::Char),
            'D' => Some(Self::Double),
            'F' => Some(Self::Float),
            'I' => Some(Self::Int),
            'J' => Some(Self::Long),
            'S' => Some(Self::Short),
            'Z' => Some(Self::Boolean),
            'V' => Some(Self::Void),
            _ => None,
        }
    }

    /// Decode a base class name that consists of exactly one primitive letter.
    pub fn from_base_name(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c),
            _ => None,
        }
    }

    /// The encoding letter.
    pub const fn letter(self) -> char {
        match self {
            Self::Byte => 'B',
            Self::Char => 'C',
            Self::Double => 'D',
            Self::Float => 'F',
            Self::Int => 'I',
            Self::Long => 'J',
            Self::Short => 'S',
            Self::Boolean => 'Z',
            Self::Void => 'V',
        }
    }

    /// The primitive class name (`int`, `boolean`, ...).
    pub const fn primitive_name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Double => "double",
            Self::Float => "float",
            Self::Int => "int",
            Self::Long => "long",
            Self::Short => "short",
            Self::Boolean => "boolean",
            Self::Void => "void",
        }
    }

    /// Whether arrays of this code can hold values. Void parses but has no
    /// instances.
    pub const fn is_array_element(self) -> bool {
        !matches!(self, Self::Void)
    }

    /// The scalar kind this code denotes.
    pub const fn kind(self) -> SimpleKind {
        match self {
            Self::Byte => SimpleKind::Byte,
            Self::Char => SimpleKind::Char,
            Self::Double => SimpleKind::Double,
            Self::Float => SimpleKind::Float,
            Self::Int => SimpleKind::Int,
            Self::Long => SimpleKind::Long,
            Self::Short => SimpleKind::Short,
            Self::Boolean => SimpleKind::Boolean,
            Self::Void => SimpleKind::Void,
        }
    }
}

/// What follows the brackets of an encoded class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEncoding {
    /// A class name, either bare or wrapped as `L...;`.
    Class,
    /// A primitive letter.
    Primitive(PrimitiveCode),
}

/// The parsed structure of a class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayEncoding<'a> {
    dimension: usize,
    base: &'a str,
    element: ElementEncoding,
}

impl<'a> ArrayEncoding<'a> {
    /// Number of leading brackets. Zero for non-arrays.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Whether the name denotes an array.
    pub fn is_array(&self) -> bool {
        self.dimension > 0
    }

    /// The element class name: the input itself for non-arrays, the letter
    /// for primitive arrays, the text between `L` and `;` otherwise.
    pub fn base_class_name(&self) -> &'a str {
        self.base
    }

    /// The element encoding.
    pub fn element(&self) -> ElementEncoding {
        self.element
    }

    /// The primitive code, for primitive arrays.
    pub fn primitive(&self) -> Option<PrimitiveCode> {
        match self.element {
            ElementEncoding::Primitive(code) => Some(code),
            ElementEncoding::Class => None,
        }
    }
}

impl fmt::Display for ArrayEncoding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.dimension, self.element) {
            (0, _) => write!(f, "{} (not an array)", self.base),
            (d, ElementEncoding::Primitive(code)) => {
                write!(f, "{d}-dimension array of {}", code.primitive_name())
            }
            (d, ElementEncoding::Class) => write!(f, "{d}-dimension array of {}", self.base),
        }
    }
}

/// Parse a class name. Returns `None` for malformed array encodings.
///
/// Total over all inputs; never panics.
pub fn parse(encoded: &str) -> Option<ArrayEncoding<'_>> {
    let dimension = encoded.bytes().take_while(|b| *b == b'[').count();
    if dimension == 0 {
        return Some(ArrayEncoding {
            dimension,
            base: encoded,
            element: ElementEncoding::Class,
        });
    }

    // '[' is one byte, so this slice is on a char boundary.
    let rest = &encoded[dimension..];
    let first = rest.chars().next()?;

    if let Some(code) = PrimitiveCode::from_letter(first) {
        // The letter must be the last character.
        if rest.len() != 1 {
            return None;
        }
        return Some(ArrayEncoding {
            dimension,
            base: rest,
            element: ElementEncoding::Primitive(code),
        });
    }

    // Object array: "L" name ";" with a non-empty name.
    if first != 'L' || rest.len() < 3 || !rest.ends_with(';') {
        return None;
    }
    Some(ArrayEncoding {
        dimension,
        base: &rest[1..rest.len() - 1],
        element: ElementEncoding::Class,
    })
}

/// The base class name of an encoded class name, or `None` if malformed.
/// Non-array names are returned unchanged.
pub fn base_class_name(encoded: &str) -> Option<&str> {
    parse(encoded).map(|e| e.base_class_name())
}

/// Encode `base` with `dimension` array levels. The inverse of [`parse`].
///
/// A single primitive letter is encoded bare (`[I`); anything else is
/// wrapped (`[LString;`). Dimension zero returns `base` unchanged.
pub fn encode(base: &str, dimension: usize) -> String {
    if dimension == 0 {
        return base.to_string();
    }
    let brackets = "[".repeat(dimension);
    match PrimitiveCode::from_base_name(base) {
        Some(code) => format!("{brackets}{}", code.letter()),
        None => format!("{brackets}L{base};"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_an_array_returns_input() {
        let e = parse("String").unwrap();
        assert!(!e.is_array());
        assert_eq!(e.base_class_name(), "String");
        assert_eq!(base_class_name("int"), Some("int"));
    }

    #[test]
    fn test_empty_string_is_not_an_array() {
        assert_eq!(base_class_name(""), Some(""));
    }

    #[test]
    fn test_primitive_array() {
        let e = parse("[I").unwrap();
        assert!(e.is_array());
        assert_eq!(e.dimension(), 1);
        assert_eq!(e.base_class_name(), "I");
        assert_eq!(e.primitive(), Some(PrimitiveCode::Int));
    }

    #[test]
    fn test_multi_dimension_primitive_array() {
        let e = parse("[[[J").unwrap();
        assert_eq!(e.dimension(), 3);
        assert_eq!(e.base_class_name(), "J");
    }

    #[test]
    fn test_object_array() {
        let e = parse("[[LString;").unwrap();
        assert_eq!(e.dimension(), 2);
        assert_eq!(e.base_class_name(), "String");
        assert_eq!(e.element(), ElementEncoding::Class);
    }

    #[test]
    fn test_primitive_letter_not_last_is_invalid() {
        assert_eq!(parse("[II"), None);
        assert_eq!(parse("[I;"), None);
    }

    #[test]
    fn test_unterminated_object_is_invalid() {
        assert_eq!(parse("[LString"), None);
    }

    #[test]
    fn test_empty_object_name_is_invalid() {
        assert_eq!(parse("[L;"), None);
    }

    #[test]
    fn test_unknown_letter_is_invalid() {
        assert_eq!(parse("[Q"), None);
        assert_eq!(parse("[XString;"), None);
    }

    #[test]
    fn test_brackets_only_is_invalid() {
        assert_eq!(parse("["), None);
        assert_eq!(parse("[[["), None);
    }

    #[test]
    fn test_void_letter_parses() {
        assert_eq!(parse("[V").unwrap().primitive(), Some(PrimitiveCode::Void));
        assert!(!PrimitiveCode::Void.is_array_element());
    }

    #[test]
    fn test_non_ascii_after_brackets_is_invalid() {
        assert_eq!(parse("[é"), None);
    }

    #[test]
    fn test_object_name_is_not_checked() {
        // Structure only: the allow-list decides whether the name is real.
        assert_eq!(base_class_name("[Lfoo;bar;"), Some("foo;bar"));
    }

    #[test]
    fn test_letter_roundtrip() {
        for code in PrimitiveCode::ALL {
            assert_eq!(PrimitiveCode::from_letter(code.letter()), Some(code));
        }
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("I", 1), "[I");
        assert_eq!(encode("String", 2), "[[LString;");
        assert_eq!(encode("String", 0), "String");
    }

    #[test]
    fn test_display() {
        assert_eq!(parse("[[I").unwrap().to_string(), "2-dimension array of int");
        assert_eq!(parse("Date").unwrap().to_string(), "Date (not an array)");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn base_name() -> impl Strategy<Value = String> {
        prop_oneof![
            "[A-Za-z][A-Za-z0-9_.]{1,16}",
            prop::sample::select(PrimitiveCode::ALL.to_vec()).prop_map(|c| c.letter().to_string()),
        ]
    }

    proptest! {
        /// Encoding then parsing recovers the base name and the array flag.
        #[test]
        fn encode_parse_recovers_base(base in base_name(), dimension in 0usize..=3) {
            let encoded = encode(&base, dimension);
            let parsed = parse(&encoded);
            prop_assert!(parsed.is_some(), "failed to parse {:?}", encoded);
            let parsed = parsed.unwrap();
            prop_assert_eq!(parsed.base_class_name(), base.as_str());
            prop_assert_eq!(parsed.is_array(), dimension > 0);
            prop_assert_eq!(parsed.dimension(), dimension);
        }

        /// Parsing never panics.
        #[test]
        fn parse_is_total(s in ".{0,12}") {
            let _ = parse(&s);
        }

        /// Wrapped names missing the terminator never parse.
        #[test]
        fn unterminated_object_is_invalid(name in "[A-Za-z]{1,10}", dimension in 1usize..=3) {
            let encoded = format!("{}L{name}", "[".repeat(dimension));
            prop_assert_eq!(parse(&encoded), None);
        }
    }
}
