//! Typed GraphQL operations.
//!
//! An [`Operation`] pairs a GraphQL document with the shape of its variables
//! and result at compile time. Operations without variables use
//! [`NoVariables`], which is left out of the request body.
//!
//! # Example
//!
//! ```rust
//! use serde::Deserialize;
//! use storefront_client::operation::{NoVariables, Operation, TypedDocument};
//!
//! #[derive(Deserialize)]
//! struct ShopName {
//!     shop: Shop,
//! }
//!
//! #[derive(Deserialize)]
//! struct Shop {
//!     name: String,
//! }
//!
//! const SHOP_NAME: TypedDocument<ShopName> = TypedDocument::new("query ShopName { shop { name } }");
//! assert_eq!(SHOP_NAME.document(), "query ShopName { shop { name } }");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A GraphQL query or mutation with statically known variable and result shapes.
pub trait Operation: Send + Sync {
    /// The variables the operation takes.
    type Variables: Serialize + Send + Sync;
    /// The shape of the `data` field of a successful response.
    type Result: DeserializeOwned;

    /// Returns the GraphQL document text.
    fn document(&self) -> &str;
}

/// The empty variable shape. Serializes to `null` and is omitted from the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NoVariables;

/// An [`Operation`] built from a document string, typically generated code.
pub struct TypedDocument<R, V = NoVariables> {
    document: Cow<'static, str>,
    shape: PhantomData<fn() -> (R, V)>,
}

impl<R, V> TypedDocument<R, V> {
    /// Creates an operation from a static document.
    #[must_use]
    pub const fn new(document: &'static str) -> Self {
        Self {
            document: Cow::Borrowed(document),
            shape: PhantomData,
        }
    }

    /// Creates an operation from a document assembled at runtime.
    #[must_use]
    pub fn from_string(document: String) -> Self {
        Self {
            document: Cow::Owned(document),
            shape: PhantomData,
        }
    }
}

impl<R, V> Clone for TypedDocument<R, V> {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            shape: PhantomData,
        }
    }
}

impl<R, V> fmt::Debug for TypedDocument<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDocument")
            .field("document", &self.document)
            .finish()
    }
}

impl<R, V> Operation for TypedDocument<R, V>
where
    R: DeserializeOwned,
    V: Serialize + Send + Sync,
{
    type Variables = V;
    type Result = R;

    fn document(&self) -> &str {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Empty {}

    #[test]
    fn test_no_variables_serializes_to_null() {
        assert_eq!(
            serde_json::to_value(NoVariables).unwrap(),
            serde_json::Value::Null
        );
    }

    #[test]
    fn test_typed_document_exposes_text() {
        let op: TypedDocument<Empty> = TypedDocument::new("{ __typename }");
        assert_eq!(op.document(), "{ __typename }");

        let owned: TypedDocument<Empty> = TypedDocument::from_string(format!("{{ {} }}", "shop"));
        assert_eq!(owned.clone().document(), "{ shop }");
    }

    #[test]
    fn test_typed_document_is_send_sync_without_bounds_on_shapes() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypedDocument<std::rc::Rc<()>, std::cell::Cell<u8>>>();
    }

    #[test]
    fn test_debug_shows_document() {
        let op: TypedDocument<Empty> = TypedDocument::new("{ shop { name } }");
        assert!(format!("{op:?}").contains("shop { name }"));
    }
}
