//! Render argument values for input log lines.
//!
//! Primitives and common containers render as their literal value, so
//! `Calling add(2, 3)` reads like the call site. Types without an
//! [`ArgRepr`] impl can go through [`opaque_repr`], which prints the
//! type name and address instead of demanding `Debug` on user types.

/// Render one argument for an input log line.
pub trait ArgRepr {
    fn arg_repr(&self) -> String;
}

macro_rules! repr_via_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgRepr for $ty {
                fn arg_repr(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

repr_via_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool,
);

macro_rules! repr_via_debug {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ArgRepr for $ty {
                fn arg_repr(&self) -> String {
                    format!("{:?}", self)
                }
            }
        )*
    };
}

// Debug keeps the literal shape: floats keep a decimal point, chars and
// strings keep their quotes.
repr_via_debug!(f32, f64, char, str, String);

impl<T: ArgRepr + ?Sized> ArgRepr for &T {
    fn arg_repr(&self) -> String {
        (**self).arg_repr()
    }
}

impl<T: ArgRepr> ArgRepr for Option<T> {
    fn arg_repr(&self) -> String {
        match self {
            Some(value) => format!("Some({})", value.arg_repr()),
            None => "None".to_string(),
        }
    }
}

impl<T: ArgRepr> ArgRepr for [T] {
    fn arg_repr(&self) -> String {
        let mut out = String::from("[");
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&item.arg_repr());
        }
        out.push(']');
        out
    }
}

impl<T: ArgRepr> ArgRepr for Vec<T> {
    fn arg_repr(&self) -> String {
        self.as_slice().arg_repr()
    }
}

/// Fallback rendering for types without an [`ArgRepr`] impl: type name
/// plus value address, close to what a debugger would show.
pub fn opaque_repr<T: ?Sized>(value: &T) -> String {
    format!(
        "<{} at {:p}>",
        std::any::type_name::<T>(),
        value as *const T
    )
}

/// Render a whole argument tuple as a comma-separated list.
pub trait ReprArgs {
    fn repr_args(&self) -> String;
}

macro_rules! impl_repr_args {
    ($(($arg:ident, $idx:tt)),*) => {
        impl<$($arg: ArgRepr),*> ReprArgs for ($($arg,)*) {
            fn repr_args(&self) -> String {
                let parts: Vec<String> = vec![$(self.$idx.arg_repr()),*];
                parts.join(", ")
            }
        }
    };
}

impl_repr_args!();
impl_repr_args!((A1, 0));
impl_repr_args!((A1, 0), (A2, 1));
impl_repr_args!((A1, 0), (A2, 1), (A3, 2));
impl_repr_args!((A1, 0), (A2, 1), (A3, 2), (A4, 3));
impl_repr_args!((A1, 0), (A2, 1), (A3, 2), (A4, 3), (A5, 4));
impl_repr_args!((A1, 0), (A2, 1), (A3, 2), (A4, 3), (A5, 4), (A6, 5));
impl_repr_args!((A1, 0), (A2, 1), (A3, 2), (A4, 3), (A5, 4), (A6, 5), (A7, 6));
impl_repr_args!(
    (A1, 0),
    (A2, 1),
    (A3, 2),
    (A4, 3),
    (A5, 4),
    (A6, 5),
    (A7, 6),
    (A8, 7)
);
