//! Macros for declaring identifier enums.

/// Generate a field-less enum suitable as a state or event identifier.
///
/// The enum gets the full derive set the framework's capability aliases
/// expect (`Copy`, `Clone`, `Eq`, `Hash`, `Debug`) plus serde derives
/// and a `Display` impl that prints the variant name. The expansion
/// references `serde` by path, so the using crate needs serde with the
/// `derive` feature.
///
/// # Example
///
/// ```
/// use cogwheel::id_enum;
///
/// id_enum! {
///     pub enum PlayerState {
///         Idle,
///         Walking,
///         Running,
///     }
/// }
///
/// id_enum! {
///     pub enum PlayerEvent {
///         StartWalk,
///         StartRun,
///         Stop,
///     }
/// }
///
/// assert_eq!(PlayerState::Idle.to_string(), "Idle");
/// ```
#[macro_export]
macro_rules! id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Copy,
            Clone,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize,
        )]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str(stringify!($variant))),*
                }
            }
        }
    };
}
