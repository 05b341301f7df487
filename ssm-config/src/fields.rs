//! Field descriptor tables for configuration structs.
//!
//! `#[derive(SsmConfig)]` generates [`SsmConfig::layout`], which lends out one
//! [`Field`] per `#[ssm("...")]` field in declaration order. The same table can
//! be written by hand for types that cannot use the derive.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::coerce::{self, ParseError};

/// A value the populator can be pointed at.
pub trait SsmConfig {
    fn layout(&mut self) -> Layout<'_>;
}

pub enum Layout<'a> {
    /// A struct, with its annotated fields in declaration order.
    Struct(Vec<Field<'a>>),
    /// Anything that is not a struct: a scalar, an enum, an absent value.
    Other {
        kind: &'static str,
        type_name: &'static str,
    },
}

impl Layout<'_> {
    pub fn other<T: ?Sized>(kind: &'static str) -> Self {
        Layout::Other {
            kind,
            type_name: std::any::type_name::<T>(),
        }
    }
}

pub struct Field<'a> {
    name: &'static str,
    parameter: &'static str,
    target: FieldTarget<'a>,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, parameter: &'static str, target: FieldTarget<'a>) -> Self {
        Self {
            name,
            parameter,
            target,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parameter(&self) -> &'static str {
        self.parameter
    }

    pub fn kind(&self) -> &'static str {
        self.target.kind()
    }

    pub fn into_target(self) -> FieldTarget<'a> {
        self.target
    }
}

/// Mutable access to a single field, tagged with its kind.
pub enum FieldTarget<'a> {
    Str(&'a mut String),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    I128(&'a mut i128),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    U128(&'a mut u128),
    Usize(&'a mut usize),
    Bool(&'a mut bool),
    Unsupported(&'static str),
}

impl FieldTarget<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "String",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::I128(_) => "i128",
            Self::Isize(_) => "isize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::U128(_) => "u128",
            Self::Usize(_) => "usize",
            Self::Bool(_) => "bool",
            Self::Unsupported(kind) => *kind,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Parses `raw` into the field. The field is left as it was on error.
    /// Unsupported targets are never written.
    pub fn assign(self, raw: &str) -> Result<(), ParseError> {
        match self {
            Self::Str(slot) => *slot = raw.to_string(),
            Self::I8(slot) => *slot = coerce::parse_signed(raw)?,
            Self::I16(slot) => *slot = coerce::parse_signed(raw)?,
            Self::I32(slot) => *slot = coerce::parse_signed(raw)?,
            Self::I64(slot) => *slot = coerce::parse_signed(raw)?,
            Self::I128(slot) => *slot = coerce::parse_signed(raw)?,
            Self::Isize(slot) => *slot = coerce::parse_signed(raw)?,
            Self::U8(slot) => *slot = coerce::parse_unsigned(raw)?,
            Self::U16(slot) => *slot = coerce::parse_unsigned(raw)?,
            Self::U32(slot) => *slot = coerce::parse_unsigned(raw)?,
            Self::U64(slot) => *slot = coerce::parse_unsigned(raw)?,
            Self::U128(slot) => *slot = coerce::parse_unsigned(raw)?,
            Self::Usize(slot) => *slot = coerce::parse_unsigned(raw)?,
            Self::Bool(slot) => *slot = coerce::parse_bool(raw)?,
            Self::Unsupported(_) => {}
        }
        Ok(())
    }
}

/// Field types that may carry `#[ssm("...")]`.
pub trait AsFieldTarget {
    fn as_field_target(&mut self) -> FieldTarget<'_>;
}

macro_rules! supported_targets {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsFieldTarget for $ty {
                fn as_field_target(&mut self) -> FieldTarget<'_> {
                    FieldTarget::$variant(self)
                }
            }
        )*
    };
}

supported_targets! {
    String => Str,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    bool => Bool,
}

impl AsFieldTarget for f32 {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("f32")
    }
}

impl AsFieldTarget for f64 {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("f64")
    }
}

impl AsFieldTarget for char {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("char")
    }
}

impl<T> AsFieldTarget for Option<T> {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("Option")
    }
}

impl<T> AsFieldTarget for Vec<T> {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("Vec")
    }
}

impl<K, V, S> AsFieldTarget for HashMap<K, V, S> {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("HashMap")
    }
}

impl<K, V> AsFieldTarget for BTreeMap<K, V> {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("BTreeMap")
    }
}

impl<T, S> AsFieldTarget for HashSet<T, S> {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("HashSet")
    }
}

impl<T> AsFieldTarget for BTreeSet<T> {
    fn as_field_target(&mut self) -> FieldTarget<'_> {
        FieldTarget::Unsupported("BTreeSet")
    }
}

macro_rules! scalar_layouts {
    ($($ty:ty => $kind:literal),* $(,)?) => {
        $(
            impl SsmConfig for $ty {
                fn layout(&mut self) -> Layout<'_> {
                    Layout::other::<Self>($kind)
                }
            }
        )*
    };
}

scalar_layouts! {
    String => "string",
    str => "string",
    i8 => "integer",
    i16 => "integer",
    i32 => "integer",
    i64 => "integer",
    i128 => "integer",
    isize => "integer",
    u8 => "integer",
    u16 => "integer",
    u32 => "integer",
    u64 => "integer",
    u128 => "integer",
    usize => "integer",
    f32 => "float",
    f64 => "float",
    bool => "bool",
    char => "char",
    () => "unit",
}

impl<T: SsmConfig> SsmConfig for Option<T> {
    fn layout(&mut self) -> Layout<'_> {
        match self {
            Some(inner) => inner.layout(),
            None => Layout::other::<Self>("none"),
        }
    }
}

impl<T: SsmConfig + ?Sized> SsmConfig for Box<T> {
    fn layout(&mut self) -> Layout<'_> {
        (**self).layout()
    }
}

impl<T> SsmConfig for Vec<T> {
    fn layout(&mut self) -> Layout<'_> {
        Layout::other::<Self>("sequence")
    }
}

/// Support for `#[derive(SsmConfig)]`. Resolves a field to its
/// [`AsFieldTarget`] impl when there is one, and to
/// [`FieldTarget::Unsupported`] named after the type otherwise.
#[doc(hidden)]
pub mod __private {
    use super::{AsFieldTarget, FieldTarget};

    pub struct Wrap<'a, T: ?Sized>(pub &'a mut T);

    pub trait TargetViaTrait<'a> {
        fn __field_target(self) -> FieldTarget<'a>;
    }

    impl<'a, T: AsFieldTarget + ?Sized> TargetViaTrait<'a> for Wrap<'a, T> {
        fn __field_target(self) -> FieldTarget<'a> {
            self.0.as_field_target()
        }
    }

    // Picked only through autoref, after `TargetViaTrait` failed to apply.
    pub trait TargetFallback {
        fn __field_target(self) -> FieldTarget<'static>;
    }

    impl<T: ?Sized> TargetFallback for &Wrap<'_, T> {
        fn __field_target(self) -> FieldTarget<'static> {
            FieldTarget::Unsupported(std::any::type_name::<T>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Manual {
        host: String,
        port: u16,
        ratio: f64,
    }

    impl SsmConfig for Manual {
        fn layout(&mut self) -> Layout<'_> {
            Layout::Struct(vec![
                Field::new("host", "/manual/host", self.host.as_field_target()),
                Field::new("port", "/manual/port", self.port.as_field_target()),
                Field::new("ratio", "/manual/ratio", self.ratio.as_field_target()),
            ])
        }
    }

    #[test]
    fn test_manual_layout_lists_fields_in_order() {
        let mut manual = Manual::default();
        let Layout::Struct(fields) = manual.layout() else {
            panic!("expected a struct layout");
        };

        let described: Vec<_> = fields
            .iter()
            .map(|f| (f.name(), f.parameter(), f.kind()))
            .collect();
        assert_eq!(
            described,
            vec![
                ("host", "/manual/host", "String"),
                ("port", "/manual/port", "u16"),
                ("ratio", "/manual/ratio", "f64"),
            ]
        );
    }

    #[test]
    fn test_assign_writes_through_target() {
        let mut manual = Manual::default();
        {
            let Layout::Struct(fields) = manual.layout() else {
                panic!("expected a struct layout");
            };
            let mut fields = fields.into_iter();
            fields.next().unwrap().into_target().assign("localhost").unwrap();
            fields.next().unwrap().into_target().assign("0x1F90").unwrap();
        }
        assert_eq!(manual.host, "localhost");
        assert_eq!(manual.port, 8080);
    }

    #[test]
    fn test_failed_assign_leaves_field_untouched() {
        let mut port: u16 = 443;
        let result = port.as_field_target().assign("70000");
        assert!(matches!(result, Err(ParseError::OutOfRange(_))));
        assert_eq!(port, 443);

        let mut enabled = true;
        assert!(enabled.as_field_target().assign("test").is_err());
        assert!(enabled);
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(1.5f32.as_field_target().kind(), "f32");
        assert!(!2.5f64.as_field_target().is_supported());
        assert_eq!(Vec::<u8>::new().as_field_target().kind(), "Vec");
        assert_eq!(None::<String>.as_field_target().kind(), "Option");
        assert_eq!(HashMap::<String, String>::new().as_field_target().kind(), "HashMap");
    }

    #[test]
    fn test_wrap_prefers_as_field_target() {
        use super::__private::{TargetViaTrait as _, Wrap};

        let mut port = 0u16;
        let target = Wrap(&mut port).__field_target();
        assert_eq!(target.kind(), "u16");
        target.assign("8080").unwrap();
        assert_eq!(port, 8080);

        let mut ratio = 0.5f64;
        assert_eq!(Wrap(&mut ratio).__field_target().kind(), "f64");
    }

    #[test]
    fn test_wrap_falls_back_to_type_name() {
        use super::__private::{TargetFallback as _, TargetViaTrait as _, Wrap};
        use std::time::Duration;

        let mut pair = [1u8, 2];
        let target = (&Wrap(&mut pair)).__field_target();
        assert!(!target.is_supported());
        assert_eq!(target.kind(), std::any::type_name::<[u8; 2]>());

        let mut timeout = Duration::from_secs(1);
        assert_eq!(
            Wrap(&mut timeout).__field_target().kind(),
            std::any::type_name::<Duration>()
        );

        let mut manual = Manual::default();
        assert_eq!(
            Wrap(&mut manual).__field_target().kind(),
            std::any::type_name::<Manual>()
        );
    }

    #[test]
    fn test_non_struct_layouts() {
        assert!(matches!(1i32.layout(), Layout::Other { kind: "integer", .. }));
        assert!(matches!(
            None::<Manual>.layout(),
            Layout::Other { kind: "none", .. }
        ));
        assert!(matches!(Some(Manual::default()).layout(), Layout::Struct(_)));
        assert!(matches!(
            Box::new(Manual::default()).layout(),
            Layout::Struct(_)
        ));
    }
}
