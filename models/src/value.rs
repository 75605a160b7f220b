//! The closed set of values the encoders accept.

use crate::{Color, ErrorLocation, IpNetwork, Model, ModelError, ObjectLike, Record, TypeKey};

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use secrecy::{SecretSlice, SecretString};
use serde::Serialize;
use serde_json::Value;
use url::Url;
use uuid::Uuid;

/// Flavour of an ordered or unordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    List,
    Tuple,
    Set,
    FrozenSet,
    Deque,
    /// Single-pass sequence, drained when the value was built.
    Generator,
}

impl SequenceKind {
    pub fn type_key(self) -> TypeKey {
        match self {
            SequenceKind::List => TypeKey::List,
            SequenceKind::Tuple => TypeKey::Tuple,
            SequenceKind::Set => TypeKey::Set,
            SequenceKind::FrozenSet => TypeKey::FrozenSet,
            SequenceKind::Deque => TypeKey::Deque,
            SequenceKind::Generator => TypeKey::Generator,
        }
    }
}

/// A member of a user enum: its type, its member name and its underlying value.
#[derive(Debug, Clone)]
pub struct EnumMember {
    pub type_name: String,
    pub name: String,
    pub value: Box<EncodableValue>,
}

impl EnumMember {
    pub fn new(
        type_name: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<EncodableValue>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            value: Box::new(value.into()),
        }
    }
}

/// Any value handed to the client for transmission.
#[derive(Debug, Clone)]
pub enum EncodableValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Decimal(Decimal),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeTz(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Uuid(Uuid),
    Path(PathBuf),
    Pattern(Regex),
    SecretStr(Arc<SecretString>),
    SecretBytes(Arc<SecretSlice<u8>>),
    IpAddr(IpAddr),
    IpNetwork(IpNetwork),
    Color(Color),
    Url(Url),
    Enum(EnumMember),
    Model(Arc<dyn Model>),
    Record(Record),
    /// Insertion-ordered mapping; keys may be any value.
    Mapping(Vec<(EncodableValue, EncodableValue)>),
    Sequence(SequenceKind, Vec<EncodableValue>),
    Object(Arc<dyn ObjectLike>),
}

impl EncodableValue {
    pub fn type_key(&self) -> TypeKey {
        match self {
            EncodableValue::Null => TypeKey::Null,
            EncodableValue::Bool(_) => TypeKey::Bool,
            EncodableValue::Int(_) => TypeKey::Int,
            EncodableValue::UInt(_) => TypeKey::UInt,
            EncodableValue::Float(_) => TypeKey::Float,
            EncodableValue::Str(_) => TypeKey::Str,
            EncodableValue::Bytes(_) => TypeKey::Bytes,
            EncodableValue::Decimal(_) => TypeKey::Decimal,
            EncodableValue::Date(_) => TypeKey::Date,
            EncodableValue::Time(_) => TypeKey::Time,
            EncodableValue::DateTime(_) => TypeKey::DateTime,
            EncodableValue::DateTimeTz(_) => TypeKey::DateTimeTz,
            EncodableValue::Duration(_) => TypeKey::Duration,
            EncodableValue::Uuid(_) => TypeKey::Uuid,
            EncodableValue::Path(_) => TypeKey::Path,
            EncodableValue::Pattern(_) => TypeKey::Pattern,
            EncodableValue::SecretStr(_) => TypeKey::SecretStr,
            EncodableValue::SecretBytes(_) => TypeKey::SecretBytes,
            EncodableValue::IpAddr(IpAddr::V4(_)) => TypeKey::Ipv4Addr,
            EncodableValue::IpAddr(IpAddr::V6(_)) => TypeKey::Ipv6Addr,
            EncodableValue::IpNetwork(_) => TypeKey::IpNetwork,
            EncodableValue::Color(_) => TypeKey::Color,
            EncodableValue::Url(_) => TypeKey::Url,
            EncodableValue::Enum(member) => TypeKey::Enum(member.type_name.clone()),
            EncodableValue::Model(model) => TypeKey::Model(model.type_name().to_string()),
            EncodableValue::Record(record) => TypeKey::Record(record.type_name().to_string()),
            EncodableValue::Mapping(_) => TypeKey::Mapping,
            EncodableValue::Sequence(kind, _) => kind.type_key(),
            EncodableValue::Object(object) => TypeKey::Object(object.type_name().to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, EncodableValue::Null)
    }

    /// Human-readable type name for error messages.
    pub fn type_name(&self) -> String {
        self.type_key().to_string()
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        EncodableValue::Bytes(bytes.into())
    }

    pub fn secret_bytes(bytes: Vec<u8>) -> Self {
        EncodableValue::SecretBytes(Arc::new(SecretSlice::from(bytes)))
    }

    pub fn model(model: impl Model + 'static) -> Self {
        EncodableValue::Model(Arc::new(model))
    }

    pub fn object(object: impl ObjectLike + 'static) -> Self {
        EncodableValue::Object(Arc::new(object))
    }

    /// Build a mapping from `(key, value)` pairs, keeping their order.
    pub fn mapping<K, V, I>(entries: I) -> Self
    where
        K: Into<EncodableValue>,
        V: Into<EncodableValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        EncodableValue::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn sequence<T, I>(kind: SequenceKind, items: I) -> Self
    where
        T: Into<EncodableValue>,
        I: IntoIterator<Item = T>,
    {
        EncodableValue::Sequence(kind, items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<T, I>(items: I) -> Self
    where
        T: Into<EncodableValue>,
        I: IntoIterator<Item = T>,
    {
        Self::sequence(SequenceKind::Tuple, items)
    }

    pub fn frozen_set<T, I>(items: I) -> Self
    where
        T: Into<EncodableValue>,
        I: IntoIterator<Item = T>,
    {
        Self::sequence(SequenceKind::FrozenSet, items)
    }

    /// Drain a single-pass iterator into a generator sequence.
    pub fn generator<T, I>(items: I) -> Self
    where
        T: Into<EncodableValue>,
        I: IntoIterator<Item = T>,
    {
        Self::sequence(SequenceKind::Generator, items)
    }

    /// Convert any `Serialize` type through its serde representation.
    ///
    /// Structs become string-keyed mappings, sequences become lists.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Serialization`] if serde refuses the value.
    #[track_caller]
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Result<Self, ModelError> {
        serde_json::to_value(value)
            .map(EncodableValue::from)
            .map_err(|e| ModelError::Serialization {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

// ============================================
// CONVERSIONS
// ============================================

macro_rules! from_via {
    ($variant:ident: $($ty:ty => $conv:expr),+ $(,)?) => {
        $(
            impl From<$ty> for EncodableValue {
                fn from(value: $ty) -> Self {
                    EncodableValue::$variant($conv(value))
                }
            }
        )+
    };
}

from_via!(Int: i8 => i64::from, i16 => i64::from, i32 => i64::from, i64 => std::convert::identity);
from_via!(UInt: u8 => u64::from, u16 => u64::from, u32 => u64::from, u64 => std::convert::identity);
from_via!(Float: f32 => f64::from, f64 => std::convert::identity);
from_via!(Str: String => std::convert::identity, &str => String::from, char => String::from);
from_via!(Path: PathBuf => std::convert::identity, &Path => Path::to_path_buf);
from_via!(IpAddr: IpAddr => std::convert::identity, Ipv4Addr => IpAddr::V4, Ipv6Addr => IpAddr::V6);
from_via!(DateTimeTz:
    DateTime<FixedOffset> => std::convert::identity,
    DateTime<Utc> => |dt: DateTime<Utc>| dt.fixed_offset(),
);

impl From<bool> for EncodableValue {
    fn from(value: bool) -> Self {
        EncodableValue::Bool(value)
    }
}

impl From<usize> for EncodableValue {
    fn from(value: usize) -> Self {
        EncodableValue::UInt(value as u64)
    }
}

impl From<&String> for EncodableValue {
    fn from(value: &String) -> Self {
        EncodableValue::Str(value.clone())
    }
}

impl From<Decimal> for EncodableValue {
    fn from(value: Decimal) -> Self {
        EncodableValue::Decimal(value)
    }
}

impl From<NaiveDate> for EncodableValue {
    fn from(value: NaiveDate) -> Self {
        EncodableValue::Date(value)
    }
}

impl From<NaiveTime> for EncodableValue {
    fn from(value: NaiveTime) -> Self {
        EncodableValue::Time(value)
    }
}

impl From<NaiveDateTime> for EncodableValue {
    fn from(value: NaiveDateTime) -> Self {
        EncodableValue::DateTime(value)
    }
}

impl From<TimeDelta> for EncodableValue {
    fn from(value: TimeDelta) -> Self {
        EncodableValue::Duration(value)
    }
}

impl From<Uuid> for EncodableValue {
    fn from(value: Uuid) -> Self {
        EncodableValue::Uuid(value)
    }
}

impl From<Regex> for EncodableValue {
    fn from(value: Regex) -> Self {
        EncodableValue::Pattern(value)
    }
}

impl From<SecretString> for EncodableValue {
    fn from(value: SecretString) -> Self {
        EncodableValue::SecretStr(Arc::new(value))
    }
}

impl From<IpNetwork> for EncodableValue {
    fn from(value: IpNetwork) -> Self {
        EncodableValue::IpNetwork(value)
    }
}

impl From<Color> for EncodableValue {
    fn from(value: Color) -> Self {
        EncodableValue::Color(value)
    }
}

impl From<Url> for EncodableValue {
    fn from(value: Url) -> Self {
        EncodableValue::Url(value)
    }
}

impl From<EnumMember> for EncodableValue {
    fn from(value: EnumMember) -> Self {
        EncodableValue::Enum(value)
    }
}

impl From<Record> for EncodableValue {
    fn from(value: Record) -> Self {
        EncodableValue::Record(value)
    }
}

impl From<Arc<dyn Model>> for EncodableValue {
    fn from(value: Arc<dyn Model>) -> Self {
        EncodableValue::Model(value)
    }
}

impl<T: Into<EncodableValue>> From<Option<T>> for EncodableValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(EncodableValue::Null, Into::into)
    }
}

impl<T: Into<EncodableValue>> From<Vec<T>> for EncodableValue {
    fn from(value: Vec<T>) -> Self {
        EncodableValue::sequence(SequenceKind::List, value)
    }
}

impl<T: Into<EncodableValue>> From<VecDeque<T>> for EncodableValue {
    fn from(value: VecDeque<T>) -> Self {
        EncodableValue::sequence(SequenceKind::Deque, value)
    }
}

impl<T: Into<EncodableValue>, S> From<HashSet<T, S>> for EncodableValue {
    fn from(value: HashSet<T, S>) -> Self {
        EncodableValue::sequence(SequenceKind::Set, value)
    }
}

impl<T: Into<EncodableValue>> From<BTreeSet<T>> for EncodableValue {
    fn from(value: BTreeSet<T>) -> Self {
        EncodableValue::sequence(SequenceKind::Set, value)
    }
}

impl<A: Into<EncodableValue>, B: Into<EncodableValue>> From<(A, B)> for EncodableValue {
    fn from((a, b): (A, B)) -> Self {
        EncodableValue::Sequence(SequenceKind::Tuple, vec![a.into(), b.into()])
    }
}

impl<K: Into<EncodableValue>, V: Into<EncodableValue>, S> From<HashMap<K, V, S>>
    for EncodableValue
{
    fn from(value: HashMap<K, V, S>) -> Self {
        EncodableValue::mapping(value)
    }
}

impl<K: Into<EncodableValue>, V: Into<EncodableValue>> From<BTreeMap<K, V>> for EncodableValue {
    fn from(value: BTreeMap<K, V>) -> Self {
        EncodableValue::mapping(value)
    }
}

impl From<Value> for EncodableValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => EncodableValue::Null,
            Value::Bool(b) => EncodableValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    EncodableValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    EncodableValue::UInt(u)
                } else {
                    EncodableValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => EncodableValue::Str(s),
            Value::Array(items) => EncodableValue::sequence(SequenceKind::List, items),
            Value::Object(map) => EncodableValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (EncodableValue::Str(k), EncodableValue::from(v)))
                    .collect(),
            ),
        }
    }
}
