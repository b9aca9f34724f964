use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ItemName(String);

crate::impl_string_newtype!(ItemName);

struct ItemInner {
    name: ItemName,
    callback: Box<dyn Fn()>,
}

/// One sector of the wheel.
///
/// Clones share identity: two handles are the [`same`](Self::same) item only if one
/// was cloned from the other, regardless of their names.
#[derive(Clone)]
pub struct SelectorItem(Rc<ItemInner>);

impl SelectorItem {
    pub fn new(name: impl Into<String>, callback: impl Fn() + 'static) -> Self {
        Self(Rc::new(ItemInner {
            name: ItemName::new(name),
            callback: Box::new(callback),
        }))
    }

    pub fn name(&self) -> &ItemName {
        &self.0.name
    }

    pub fn same(&self, other: &SelectorItem) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn trigger(&self) {
        (self.0.callback)()
    }
}

impl fmt::Debug for SelectorItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SelectorItem").field(&self.0.name).finish()
    }
}

/// Item entry as written in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItemConfig {
    pub name: ItemName,
    #[serde(default)]
    pub exec: Option<String>,
}
