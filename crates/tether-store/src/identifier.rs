use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use tether_core::Model;

/// Lookup key distinguishing independent stores.
///
/// Equality never crosses variants: `Name("1")` and `Number(1)` are
/// different keys. `Object` keys compare by allocation, so two equal values
/// in different `Rc`s are two different keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Identifier {
    None,
    Name(Cow<'static, str>),
    Number(i64),
    Object(ObjectKey),
    Model(ModelKey),
}

impl Identifier {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Identifier::Name(name.into())
    }

    /// Keys by the allocation behind `value`. The identifier keeps it alive,
    /// so the address cannot be reused while the key exists.
    pub fn object<T: Any>(value: &Rc<T>) -> Self {
        Identifier::Object(ObjectKey(value.clone()))
    }

    /// The default key of a model type.
    pub fn model<M: Model>() -> Self {
        Identifier::Model(ModelKey {
            id: TypeId::of::<M>(),
            name: M::name(),
        })
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::None => f.write_str("none"),
            Identifier::Name(name) => write!(f, "{name:?}"),
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Object(key) => write!(f, "object@{:#x}", key.addr()),
            Identifier::Model(key) => write!(f, "model `{}`", key.name),
        }
    }
}

impl From<&'static str> for Identifier {
    fn from(name: &'static str) -> Self {
        Identifier::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(Cow::Owned(name))
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Number(n)
    }
}

impl From<i32> for Identifier {
    fn from(n: i32) -> Self {
        Identifier::Number(n.into())
    }
}

impl From<u32> for Identifier {
    fn from(n: u32) -> Self {
        Identifier::Number(n.into())
    }
}

impl From<ObjectKey> for Identifier {
    fn from(key: ObjectKey) -> Self {
        Identifier::Object(key)
    }
}

/// Reference identity of a shared allocation.
#[derive(Clone)]
pub struct ObjectKey(Rc<dyn Any>);

impl ObjectKey {
    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for ObjectKey {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for ObjectKey {}

impl Hash for ObjectKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({:#x})", self.addr())
    }
}

/// A model type used as a key.
#[derive(Clone, Copy)]
pub struct ModelKey {
    id: TypeId,
    name: &'static str,
}

impl ModelKey {
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ModelKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelKey {}

impl Hash for ModelKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelKey({})", self.name)
    }
}
