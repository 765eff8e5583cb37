//! Declarative macros for reducing weight type boilerplate.
//!
//! These macros generate the repetitive impls shared by the single-value
//! scalar weight families: bare-numeric construction and comparison,
//! bit-pattern hashing, and atom-based Display.

/// Generates numeric interop for a single-value scalar weight type:
/// `From` both precisions, `PartialEq` against bare floats in both
/// directions, `Hash` by bit pattern, and `Display` as the scalar atom.
///
/// # Usage
/// ```ignore
/// impl_scalar_weight_interop!(TropicalWeight);
/// ```
macro_rules! impl_scalar_weight_interop {
    ($type:ident) => {
        impl<T: FloatT> From<T> for $type<T> {
            fn from(value: T) -> Self {
                $type::new(value)
            }
        }

        impl From<f64> for $type<f32> {
            fn from(value: f64) -> Self {
                $type::new(value as f32)
            }
        }

        impl From<f32> for $type<f64> {
            fn from(value: f32) -> Self {
                $type::new(value as f64)
            }
        }

        impl<T: FloatT> PartialEq<T> for $type<T> {
            fn eq(&self, other: &T) -> bool {
                self.value() == *other
            }
        }

        impl PartialEq<$type<f32>> for f32 {
            fn eq(&self, other: &$type<f32>) -> bool {
                *self == other.value()
            }
        }

        impl PartialEq<$type<f64>> for f64 {
            fn eq(&self, other: &$type<f64>) -> bool {
                *self == other.value()
            }
        }

        impl<T: FloatT> std::hash::Hash for $type<T> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64(self.value().to_bits64());
            }
        }

        impl<T: FloatT> std::fmt::Display for $type<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", crate::weight::float::float_to_atom(self.value()))
            }
        }
    };
}

/// Generates a `Display::fmt` body rendering the weight's default text
/// form. Intended for use *inside* an `impl Display for Type` block.
macro_rules! fmt_display_via_text {
    () => {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.text(&Default::default()))
        }
    };
}

/// Generates the atom-based `write_text`/`read_text` bodies for a
/// single-value scalar weight. Intended for use *inside* an
/// `impl Weight for Type` block.
macro_rules! impl_scalar_weight_text {
    ($type:ident) => {
        fn write_text(&self, w: &mut TextWriter) {
            w.atom(crate::weight::float::float_to_atom(self.value));
        }

        fn read_text(r: &mut TextReader<'_>) -> Result<Self, WeightError> {
            let pos = r.pos();
            let atom = r.atom()?;
            crate::weight::float::float_from_atom(atom)
                .map($type::new)
                .ok_or_else(|| {
                    WeightError::parse(pos, format!("invalid {} value '{atom}'", Self::type_name()))
                })
        }
    };
}
