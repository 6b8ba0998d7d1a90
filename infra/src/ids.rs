use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use data_encoding::BASE64URL_NOPAD;
use err_derive::Error;
use rand::distributions::{Distribution, Standard};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Marker trait for anything that gets a typed identifier. The prefix names
/// the kind in display output and error messages.
pub trait Entity {
    const PREFIX: &'static str;
}

const DIVIDER: &str = "-";

/// Opaque, randomly generated identity for entities that only exist in
/// memory (order lines). Rendered as `<prefix>-<base64url>`.
pub struct Id<T> {
    val: [u8; 16],
    phantom: PhantomData<T>,
}

/// Catalog code as it appears in the data files, e.g. `B01`. Unlike [`Id`]
/// the raw string is the identity; display output carries no prefix.
pub struct Code<T> {
    val: String,
    phantom: PhantomData<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error(display = "invalid prefix")]
    InvalidPrefix,
    #[error(display = "unparseable id")]
    Unparseable,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(display = "empty code")]
pub struct EmptyCode;

/// Hands out fresh [`Id`]s.
#[derive(Debug, Default)]
pub struct IdGen;

impl IdGen {
    pub fn new() -> Self {
        IdGen
    }

    pub fn generate<T>(&self) -> Id<T> {
        rand::random()
    }
}

impl<T> Distribution<Id<T>> for Standard {
    fn sample<R: ?Sized + rand::Rng>(&self, rng: &mut R) -> Id<T> {
        let val = rng.gen();
        Id {
            val,
            phantom: PhantomData,
        }
    }
}

impl<T: Entity> fmt::Display for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(
            fmt,
            "{}{}{}",
            T::PREFIX,
            DIVIDER,
            BASE64URL_NOPAD.encode(&self.val)
        )
    }
}

impl<T: Entity> fmt::Debug for Id<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Id({})", self)
    }
}

impl<T: Entity> std::str::FromStr for Id<T> {
    type Err = IdParseError;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if T::PREFIX.len() > src.len() {
            return Err(IdParseError::InvalidPrefix);
        }
        let (start, remainder) = src.split_at(T::PREFIX.len());
        if start != T::PREFIX {
            return Err(IdParseError::InvalidPrefix);
        }
        if remainder.len() < 1 {
            return Err(IdParseError::Unparseable);
        }
        let (divider, b64) = remainder.split_at(1);
        if divider != DIVIDER {
            return Err(IdParseError::Unparseable);
        }

        let bytes = BASE64URL_NOPAD
            .decode(b64.as_bytes())
            .map_err(|_| IdParseError::Unparseable)?;
        if bytes.len() != 16 {
            return Err(IdParseError::Unparseable);
        }
        let mut val = [0u8; 16];
        val.copy_from_slice(&bytes);
        Ok(Id {
            val,
            phantom: PhantomData,
        })
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id {
            val: self.val,
            phantom: self.phantom,
        }
    }
}

impl<T> Copy for Id<T> {}

impl<T: Entity> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, T: Entity> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdStrVisitor<T>(PhantomData<T>);
        impl<'vi, T: Entity> de::Visitor<'vi> for IdStrVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "an Id string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Id<T>, E> {
                value.parse::<Id<T>>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdStrVisitor(PhantomData))
    }
}

impl<T> Code<T> {
    pub fn new<S: Into<String>>(val: S) -> Result<Self, EmptyCode> {
        let val = val.into();
        if val.trim().is_empty() {
            return Err(EmptyCode);
        }
        Ok(Code {
            val,
            phantom: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.val
    }
}

impl<T> fmt::Display for Code<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}", self.val)
    }
}

impl<T: Entity> fmt::Debug for Code<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Code({} {})", T::PREFIX, self.val)
    }
}

impl<T> std::str::FromStr for Code<T> {
    type Err = EmptyCode;
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Code::new(src)
    }
}

impl<T> PartialEq for Code<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T> Eq for Code<T> {}

impl<T> PartialOrd for Code<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Code<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.val.cmp(&other.val)
    }
}

impl<T> Hash for Code<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.val.hash(state)
    }
}

impl<T> Clone for Code<T> {
    fn clone(&self) -> Self {
        Code {
            val: self.val.clone(),
            phantom: self.phantom,
        }
    }
}

impl<T> Serialize for Code<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.val)
    }
}

impl<'de, T> Deserialize<'de> for Code<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeStrVisitor<T>(PhantomData<T>);
        impl<'vi, T> de::Visitor<'vi> for CodeStrVisitor<T> {
            type Value = Code<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a non-empty code string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Code<T>, E> {
                Code::new(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(CodeStrVisitor(PhantomData))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::prelude::*;

    #[derive(Debug)]
    struct Canary;

    impl Entity for Canary {
        const PREFIX: &'static str = "canary";
    }

    #[test]
    fn round_trips_via_to_from_str() {
        let id = rand::random::<Id<Canary>>();
        let s = id.to_string();
        println!("String: {}", s);
        let id2 = s.parse::<Id<Canary>>().expect("parse id");
        assert_eq!(id, id2);
    }

    #[test]
    fn round_trips_via_serde_json() {
        let id = rand::random::<Id<Canary>>();

        let json = serde_json::to_string(&id).expect("serde_json::to_string");
        println!("Json: {}", json);
        let id2 = serde_json::from_str(&json).expect("serde_json::from_str");
        assert_eq!(id, id2);
    }

    #[test]
    fn serializes_to_string_like() {
        let id = rand::random::<Id<Canary>>();

        let json = serde_json::to_string(&id).expect("serde_json::to_string");
        let s: String = serde_json::from_str(&json).expect("serde_json::from_str");
        assert_eq!(id.to_string(), s);
    }

    #[test]
    fn should_allow_random_generation() {
        let gen = IdGen::new();

        let id = gen.generate::<Canary>();
        let id2 = gen.generate::<Canary>();

        assert_ne!(id, id2);
    }

    #[test]
    fn should_allow_ordering() {
        let mut rng = rand::thread_rng();

        let id = rng.gen::<Id<Canary>>();
        let mut id2 = rng.gen::<Id<Canary>>();
        while id2 == id {
            id2 = rng.gen::<Id<Canary>>();
        }

        assert!(id < id2 || id > id2);
    }

    #[test]
    fn to_string_should_be_prefixed_with_type_name() {
        let id = rand::random::<Id<Canary>>();

        let s = id.to_string();

        assert!(
            s.starts_with("canary"),
            "string: {:?} starts with {:?}",
            s,
            "canary"
        )
    }

    #[test]
    fn should_verify_has_correct_entity_prefix() {
        let sample = rand::random::<Id<Canary>>().to_string();
        let s = sample.replacen("canary", "wrongy", 1);

        let result = s.parse::<Id<Canary>>();

        assert!(
            result.is_err(),
            "Parsing {:?} should return error; got {:?}",
            s,
            result,
        )
    }

    #[test]
    fn should_yield_useful_error_when_just_prefix() {
        let s = "canary";
        let result = s.parse::<Id<Canary>>();

        assert!(
            result.is_err(),
            "Parsing {:?} should return error; got {:?}",
            s,
            result,
        )
    }

    #[test]
    fn should_yield_useful_error_when_wrong_divider() {
        let sample = rand::random::<Id<Canary>>().to_string();
        let s = sample.replacen(DIVIDER, "#", 1);
        let result = s.parse::<Id<Canary>>();

        assert!(
            result.is_err(),
            "Parsing {:?} should return error; got {:?}",
            s,
            result,
        )
    }

    #[test]
    fn code_displays_the_raw_value() {
        let code = Code::<Canary>::new("B01").expect("code");

        assert_eq!(code.to_string(), "B01");
        assert_eq!(code.as_str(), "B01");
    }

    #[test]
    fn code_round_trips_via_from_str() {
        let code = "B01".parse::<Code<Canary>>().expect("parse code");
        let code2 = code.to_string().parse::<Code<Canary>>().expect("reparse");

        assert_eq!(code, code2);
    }

    #[test]
    fn code_rejects_empty_and_blank_input() {
        assert!(Code::<Canary>::new("").is_err());
        assert!(Code::<Canary>::new("   ").is_err());
    }

    #[test]
    fn code_serializes_as_a_plain_string() {
        let code = Code::<Canary>::new("A01").expect("code");

        let json = serde_json::to_string(&code).expect("serde_json::to_string");
        assert_eq!(json, "\"A01\"");
        let code2: Code<Canary> = serde_json::from_str(&json).expect("serde_json::from_str");
        assert_eq!(code, code2);
    }
}
