//! Runtime type identity of an [`EncodableValue`](crate::EncodableValue).
//!
//! Custom encoders are registered against a [`TypeKey`]. Lookup first tries
//! the exact key of a value, then walks [`TypeKey::parent`] links, which model
//! the subtype relations callers expect (a bool is an int, an IPv4 address is
//! an IP address, a named enum is an enum).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    Str,
    Bytes,
    Decimal,
    Date,
    Time,
    DateTime,
    DateTimeTz,
    Duration,
    Uuid,
    Path,
    Pattern,
    SecretStr,
    SecretBytes,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
    IpNetwork,
    Color,
    Url,
    Mapping,
    List,
    Tuple,
    Set,
    FrozenSet,
    Deque,
    Generator,
    AnyEnum,
    Enum(String),
    AnyModel,
    Model(String),
    AnyRecord,
    Record(String),
    AnyObject,
    Object(String),
}

impl TypeKey {
    /// The next more general key, if any.
    pub fn parent(&self) -> Option<TypeKey> {
        match self {
            TypeKey::Bool | TypeKey::UInt => Some(TypeKey::Int),
            TypeKey::DateTimeTz => Some(TypeKey::DateTime),
            TypeKey::DateTime => Some(TypeKey::Date),
            TypeKey::Ipv4Addr | TypeKey::Ipv6Addr => Some(TypeKey::IpAddr),
            TypeKey::Enum(_) => Some(TypeKey::AnyEnum),
            TypeKey::Model(_) => Some(TypeKey::AnyModel),
            TypeKey::Record(_) => Some(TypeKey::AnyRecord),
            TypeKey::Object(_) => Some(TypeKey::AnyObject),
            _ => None,
        }
    }

    /// This key followed by each of its ancestors, most specific first.
    pub fn lineage(&self) -> impl Iterator<Item = TypeKey> {
        std::iter::successors(Some(self.clone()), TypeKey::parent)
    }

    pub fn enum_named(name: impl Into<String>) -> Self {
        TypeKey::Enum(name.into())
    }

    pub fn model_named(name: impl Into<String>) -> Self {
        TypeKey::Model(name.into())
    }

    pub fn record_named(name: impl Into<String>) -> Self {
        TypeKey::Record(name.into())
    }

    pub fn object_named(name: impl Into<String>) -> Self {
        TypeKey::Object(name.into())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Enum(name)
            | TypeKey::Model(name)
            | TypeKey::Record(name)
            | TypeKey::Object(name) => f.write_str(name),
            other => write!(f, "{other:?}"),
        }
    }
}
