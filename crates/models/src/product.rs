use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product record.
///
/// `id` is supplied by the caller and doubles as the storage key. Members
/// other than `id`/`name`/`price` are kept in `extra` and written back out
/// unchanged; nothing in the service interprets them.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The externally mutable subset of a [`Product`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            extra: Map::new(),
        }
    }

    /// Replace `name` and `price`; `id` and `extra` are left as stored.
    pub fn merge(&mut self, patch: ProductPatch) {
        self.name = patch.name;
        self.price = patch.price;
    }
}

impl From<Product> for ProductPatch {
    fn from(p: Product) -> Self {
        Self { name: p.name, price: p.price }
    }
}
