//! Utility macros.

/// Creates a [`StringHash64`](crate::StringHash64) for the given string.
///
/// Literals are hashed at compile time.
#[macro_export]
macro_rules! hash64 {
    ($string:literal) => {
        $crate::StringHash64::new_with_hash($string, $crate::compute_hash_str_64($string))
    };
    ($string:expr) => {
        $crate::StringHash64::new($string)
    };
}

/// Defines a new type with the given name that is a wrapper
/// around a [`StringHash64`](crate::StringHash64).
///
/// The new type formats into the hashed string.
#[macro_export]
macro_rules! stringhash64_newtype {
    (
        $(#[$attributes:meta])*
        $([$pub:ident])? $name:ident
    ) => {
        $(#[$attributes])*
        #[repr(transparent)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, bytemuck::Zeroable, bytemuck::Pod)]
        $($pub)? struct $name($($pub)? $crate::StringHash64);

        impl $name {
            /// Creates an identifier by hashing the given name.
            $($pub)? fn from_name(name: &str) -> Self {
                Self($crate::hash64!(name))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
