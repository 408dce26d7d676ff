//! Declarative macros that generate schema descriptions.

/// Declare a struct and describe it as a [`Record`](crate::Record).
///
/// The struct definition passes through unchanged. Fields keep their
/// visibility; private fields remain writable by the decoder because the
/// generated accessor lives next to the struct. The struct must implement
/// `Default`, which supplies its zero value.
///
/// ```
/// use std::time::Duration;
///
/// dotfig::record! {
///     #[derive(Debug, Default)]
///     pub struct Server {
///         pub host: String,
///         pub port: u16,
///         read_timeout: Duration,
///     }
/// }
///
/// let server: Server = dotfig::from_str("HOST=0.0.0.0\nPORT=8080\nREAD_TIMEOUT=5s").unwrap();
/// assert_eq!(server.port, 8080);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn type_name(&self) -> &'static str {
                ::core::stringify!($name)
            }

            fn fields(&self) -> &'static [$crate::FieldDef] {
                const FIELDS: &[$crate::FieldDef] = &[
                    $(
                        $crate::FieldDef {
                            name: ::core::stringify!($field),
                            type_name: <$ty as $crate::Shape>::TYPE_NAME,
                            kind: <$ty as $crate::Shape>::KIND,
                            exported: !::core::stringify!($field_vis).is_empty(),
                        },
                    )*
                ];
                FIELDS
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<$crate::Place<'_>> {
                $(
                    if name == ::core::stringify!($field) {
                        return ::core::option::Option::Some($crate::Decode::place(&mut self.$field));
                    }
                )*
                ::core::option::Option::None
            }
        }

        impl $crate::Decode for $name {
            fn place(&mut self) -> $crate::Place<'_> {
                $crate::Place::Record(self)
            }
        }

        impl $crate::Shape for $name {
            const TYPE_NAME: ::core::option::Option<&'static str> =
                ::core::option::Option::Some(::core::stringify!($name));
            const KIND: $crate::Kind = $crate::Kind::Record;

            fn zero() -> Self {
                ::core::default::Default::default()
            }
        }
    };
}

/// Declare a named scalar subtype wrapping another scalar.
///
/// The wrapper coerces exactly like its inner type but matches keys by its
/// own type name.
///
/// ```
/// dotfig::scalar_newtype! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Hostname(pub String);
/// }
///
/// dotfig::record! {
///     #[derive(Debug, Default)]
///     pub struct Edge {
///         pub primary: Hostname,
///     }
/// }
///
/// let edge: Edge = dotfig::from_str("HOSTNAME=edge-1").unwrap();
/// assert_eq!(edge.primary, Hostname("edge-1".into()));
/// ```
#[macro_export]
macro_rules! scalar_newtype {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($inner_vis:vis $inner:ty);
    ) => {
        $(#[$meta])*
        $vis struct $name($inner_vis $inner);

        impl $crate::Scalar for $name {
            fn kind(&self) -> $crate::ScalarKind {
                $crate::Scalar::kind(&self.0)
            }

            fn assign(&mut self, raw: &str) -> ::core::result::Result<(), $crate::CoerceError> {
                $crate::Scalar::assign(&mut self.0, raw)
            }
        }

        impl $crate::Decode for $name {
            fn place(&mut self) -> $crate::Place<'_> {
                $crate::Place::Scalar(self)
            }
        }

        impl $crate::Shape for $name {
            const TYPE_NAME: ::core::option::Option<&'static str> =
                ::core::option::Option::Some(::core::stringify!($name));
            const KIND: $crate::Kind = <$inner as $crate::Shape>::KIND;

            fn zero() -> Self {
                Self(<$inner as $crate::Shape>::zero())
            }
        }
    };
}
