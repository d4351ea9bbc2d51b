//! Helper macros

/// Declares a fieldless ENUMERATED type numbered from zero, together with its
/// `CONSTRAINT` and APER codec. `(extensible)` types carry an extension bit.
macro_rules! aper_enumerated {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($ext:ident) {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Values of the extension root, in code order
            pub const ROOT: &'static [$name] = &[$($name::$variant),+];
            pub const CONSTRAINT: $crate::per::Constraint =
                aper_enumerated!(@constraint $ext, Self::ROOT.len() as i64 - 1);
        }

        impl $crate::per::AperEncode for $name {
            fn encode_aper(&self, encoder: &mut $crate::per::AperEncoder) -> $crate::per::PerResult<()> {
                encoder.encode_enumerated(*self as i64, &Self::CONSTRAINT, stringify!($name))
            }
        }

        impl $crate::per::AperDecode for $name {
            fn decode_aper(decoder: &mut $crate::per::AperDecoder) -> $crate::per::PerResult<Self> {
                let value = decoder.decode_enumerated(&Self::CONSTRAINT, stringify!($name))?;
                Self::ROOT
                    .iter()
                    .copied()
                    .find(|v| *v as i64 == value)
                    .ok_or_else(|| {
                        $crate::per::PerError::DecodeFailure(format!(
                            "Invalid {} value: {value}",
                            stringify!($name)
                        ))
                    })
            }
        }
    };
    (@constraint extensible, $max:expr) => {
        $crate::per::Constraint::extensible(0, $max)
    };
    (@constraint fixed, $max:expr) => {
        $crate::per::Constraint::new(0, $max)
    };
}
