//! `define_port_error!` generates a `thiserror` enum for a port together with
//! one snake_case constructor per variant.
//!
//! Every variant carries named fields; string fields take `impl Into<String>`
//! in the generated constructor.

macro_rules! define_port_error {
    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*)) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant () () $($field : $ty,)*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoreProbeError {
            Unreachable { message: String } => "store unreachable: {message}",
            Rejected { code: i32 } => "store rejected command with code {code}",
            Partial { message: String, matched: u64 } => "{message} after {matched} match(es)",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StoreProbeError::unreachable("connection refused");
        assert_eq!(err.to_string(), "store unreachable: connection refused");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = StoreProbeError::rejected(11600_i32);
        assert_eq!(err, StoreProbeError::Rejected { code: 11600 });
    }

    #[test]
    fn mixed_fields_are_all_forwarded() {
        let err = StoreProbeError::partial("write interrupted", 2_u64);
        assert_eq!(err.to_string(), "write interrupted after 2 match(es)");
    }
}
