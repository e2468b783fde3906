//! Cache Key Module
//!
//! Derives deterministic cache keys from a prefix plus call arguments.
//!
//! A key is `prefix:pos1:pos2:...:name1:value1:...` where keyword arguments
//! are sorted by name and absent keyword values are skipped. Keys longer than
//! [`MAX_KEY_CHARS`] collapse to `prefix:hash:<md5-hex>` so the prefix still
//! matches family patterns such as `posts:*`.

use std::collections::BTreeMap;
use std::fmt::Display;

use md5::{Digest, Md5};

// == Constants ==
/// Longest key (in characters) kept verbatim before hashing kicks in
pub const MAX_KEY_CHARS: usize = 200;

/// Separator between key segments
pub const KEY_SEPARATOR: &str = ":";

// == Has Identity ==
/// Arguments that carry an identity render as `<TypeName>:<id>`.
///
/// Implement this for domain records (posts, users, categories) passed to a
/// cached read so the key depends on the record's identity rather than its
/// full contents.
pub trait HasIdentity {
    /// Identity of the record as it should appear in the key
    fn id(&self) -> String;

    /// Short type name; defaults to the unqualified Rust type name
    fn type_name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// Strips the module path and generic parameters from a type name.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

// == Key Args ==
/// Rendered positional and keyword arguments of one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyArgs {
    positional: Vec<String>,
    // BTreeMap keeps keywords sorted by name
    keyword: BTreeMap<String, String>,
}

impl KeyArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a positional argument rendered with its `Display` form.
    pub fn arg(mut self, value: impl Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Adds a positional argument rendered as `<TypeName>:<id>`.
    pub fn entity<T: HasIdentity + ?Sized>(mut self, value: &T) -> Self {
        self.positional
            .push(format!("{}{}{}", value.type_name(), KEY_SEPARATOR, value.id()));
        self
    }

    /// Adds a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.keyword.insert(name.into(), value.to_string());
        self
    }

    /// Adds a keyword argument, skipping it entirely when absent.
    pub fn kwarg_opt<V: Display>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.kwarg(name, value),
            None => self,
        }
    }

    /// Appends another argument set (positional after ours, keywords merged).
    pub fn extend(mut self, other: KeyArgs) -> Self {
        self.positional.extend(other.positional);
        self.keyword.extend(other.keyword);
        self
    }
}

// == Generate Key ==
/// Builds the cache key for `prefix` and `args`.
///
/// Pure function of its inputs.
pub fn generate_key(prefix: &str, args: &KeyArgs) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(1 + args.positional.len() + args.keyword.len());
    parts.push(prefix.to_string());
    parts.extend(args.positional.iter().cloned());
    parts.extend(
        args.keyword
            .iter()
            .map(|(name, value)| format!("{}{}{}", name, KEY_SEPARATOR, value)),
    );

    let key = parts.join(KEY_SEPARATOR);
    if key.chars().count() > MAX_KEY_CHARS {
        let digest = hex::encode(Md5::digest(key.as_bytes()));
        return format!("{}{}hash{}{}", prefix, KEY_SEPARATOR, KEY_SEPARATOR, digest);
    }

    key
}

// == Cache Args ==
/// Call arguments that know how to contribute to a cache key.
///
/// Implemented for scalars, strings, tuples, and [`KeyArgs`]; argument
/// structs of cached reads implement it to pick what goes into the key.
pub trait CacheArgs {
    fn key_args(&self) -> KeyArgs;
}

impl CacheArgs for KeyArgs {
    fn key_args(&self) -> KeyArgs {
        self.clone()
    }
}

impl CacheArgs for () {
    fn key_args(&self) -> KeyArgs {
        KeyArgs::new()
    }
}

impl CacheArgs for str {
    fn key_args(&self) -> KeyArgs {
        KeyArgs::new().arg(self)
    }
}

impl<T: CacheArgs + ?Sized> CacheArgs for &T {
    fn key_args(&self) -> KeyArgs {
        (**self).key_args()
    }
}

macro_rules! positional_cache_args {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CacheArgs for $ty {
                fn key_args(&self) -> KeyArgs {
                    KeyArgs::new().arg(self)
                }
            }
        )*
    };
}

positional_cache_args!(String, bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

macro_rules! tuple_cache_args {
    ($($name:ident),+) => {
        impl<$($name: CacheArgs),+> CacheArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn key_args(&self) -> KeyArgs {
                let ($($name,)+) = self;
                KeyArgs::new()$(.extend($name.key_args()))+
            }
        }
    };
}

tuple_cache_args!(A);
tuple_cache_args!(A, B);
tuple_cache_args!(A, B, C);
tuple_cache_args!(A, B, C, D);
