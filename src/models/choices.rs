use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Error raised when a category code is not part of its enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("\"{code}\" is not a valid {kind} choice")]
    Unknown { kind: &'static str, code: String },
}

/// A closed set of short category codes (`"m"`, `"xl"`, ...)
pub trait Choice: Copy + Eq + FromStr<Err = ChoiceError> + 'static {
    /// Human readable name of the enumeration, used in error messages
    const KIND: &'static str;

    fn code(self) -> &'static str;
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];
        }

        impl Choice for $name {
            const KIND: &'static str = $kind;

            fn code(self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ChoiceError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $( $code => Ok($name::$variant), )+
                    other => Err(ChoiceError::Unknown {
                        kind: $kind,
                        code: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

choice_enum! {
    /// Dog gender
    Gender ("gender") {
        Male = "m",
        Female = "f",
        Unknown = "u",
    }
}

choice_enum! {
    /// Dog size
    Size ("size") {
        Small = "s",
        Medium = "m",
        Large = "l",
        ExtraLarge = "xl",
        Unknown = "u",
    }
}

choice_enum! {
    /// Whether a dog is spayed/neutered
    Sterilized ("sterilized") {
        Yes = "y",
        No = "n",
        Unknown = "u",
    }
}

choice_enum! {
    /// Coarse age category, see `core::age` for the month ranges
    AgeBucket ("age") {
        Baby = "b",
        Young = "y",
        Adult = "a",
        Senior = "s",
    }
}

choice_enum! {
    /// A user's decision about one dog
    DecisionStatus ("status") {
        Liked = "l",
        Disliked = "d",
        Undecided = "u",
    }
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Unknown
    }
}

impl Default for Size {
    fn default() -> Self {
        Size::Unknown
    }
}

impl Default for Sterilized {
    fn default() -> Self {
        Sterilized::Unknown
    }
}

/// Ordered, duplicate-free set of category codes
///
/// Persisted and serialized as a comma-joined string (`"b,y,a,s"`).
/// Deserialization also accepts a JSON array of codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet<T: Choice>(Vec<T>);

impl<T: Choice> ChoiceSet<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut set = Vec::new();
        for item in items {
            if !set.contains(&item) {
                set.push(item);
            }
        }
        Self(set)
    }

    /// Parse a comma-joined list of codes. Blank entries are skipped.
    pub fn parse(joined: &str) -> Result<Self, ChoiceError> {
        Self::from_codes(joined.split(','))
    }

    pub fn from_codes<I, S>(codes: I) -> Result<Self, ChoiceError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if code.is_empty() {
                continue;
            }
            items.push(code.parse::<T>()?);
        }
        Ok(Self::new(items))
    }

    pub fn contains(&self, item: &T) -> bool {
        self.0.contains(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Codes as owned strings, for binding to SQL array parameters
    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|item| item.code().to_string()).collect()
    }
}

impl<T: Choice> fmt::Display for ChoiceSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(item.code())?;
        }
        Ok(())
    }
}

impl<T: Choice> FromStr for ChoiceSet<T> {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<T: Choice> Serialize for ChoiceSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: Choice> Deserialize<'de> for ChoiceSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ChoiceSetVisitor<T>(PhantomData<T>);

        impl<'de, T: Choice> Visitor<'de> for ChoiceSetVisitor<T> {
            type Value = ChoiceSet<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a comma-joined string or a list of {} codes", T::KIND)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                ChoiceSet::parse(v).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut codes: Vec<String> = Vec::new();
                while let Some(code) = seq.next_element::<String>()? {
                    codes.push(code);
                }
                ChoiceSet::from_codes(codes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_any(ChoiceSetVisitor(PhantomData))
    }
}
