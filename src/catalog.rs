//! Catalog queries used by storefront pages.
//!
//! [`ProductList`] is the query behind the storefront home page: the first
//! products of a channel with their price range, category and thumbnail.
//! [`fetch_product_list`] issues it the way the page does and flattens the
//! connection into a list.

use serde::{Deserialize, Serialize};

use crate::clients::{GraphqlClient, GraphqlError, RequestOptions};
use crate::operation::Operation;

/// Products shown on the home page.
pub const HOME_PAGE_PRODUCT_COUNT: i32 = 12;

/// Seconds the home page product list stays fresh.
pub const HOME_PAGE_REVALIDATE_SECS: u64 = 60;

const PRODUCT_LIST_DOCUMENT: &str = r"query ProductList($first: Int = 9, $channel: String!) {
  products(first: $first, channel: $channel) {
    edges {
      node {
        ...ProductListItem
      }
    }
  }
}

fragment ProductListItem on Product {
  id
  name
  slug
  pricing {
    priceRange {
      start {
        gross {
          amount
          currency
        }
      }
      stop {
        gross {
          amount
          currency
        }
      }
    }
  }
  category {
    id
    name
  }
  thumbnail(size: 1024, format: WEBP) {
    url
    alt
  }
}
";

/// The `ProductList` query.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProductList;

/// Variables of [`ProductList`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductListVariables {
    /// Number of products to return.
    pub first: i32,
    /// Channel slug.
    pub channel: String,
}

/// Result of [`ProductList`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductListData {
    /// `null` when the channel is unknown or inactive.
    pub products: Option<ProductConnection>,
}

/// A page of products.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductConnection {
    /// The products on this page.
    pub edges: Vec<ProductEdge>,
}

/// An edge of a [`ProductConnection`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductEdge {
    /// The product.
    pub node: ProductListItem,
}

/// The product fields a listing needs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProductListItem {
    /// Global object ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Channel pricing; `None` when the product is not priced in the channel.
    pub pricing: Option<ProductPricing>,
    /// Primary category.
    pub category: Option<Category>,
    /// 1024px WEBP thumbnail.
    pub thumbnail: Option<Image>,
}

/// Pricing of a product in a channel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPricing {
    /// Cheapest and most expensive variant prices.
    pub price_range: Option<TaxedMoneyRange>,
}

/// A price range.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TaxedMoneyRange {
    /// Lower bound.
    pub start: Option<TaxedMoney>,
    /// Upper bound.
    pub stop: Option<TaxedMoney>,
}

/// A price with taxes applied.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TaxedMoney {
    /// Amount including taxes.
    pub gross: Money,
}

/// An amount in a currency.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Money {
    /// Decimal amount.
    pub amount: f64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// The category a product belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Global object ID.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// A product image.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Image {
    /// Absolute image URL.
    pub url: String,
    /// Alternative text, if set.
    pub alt: Option<String>,
}

impl Operation for ProductList {
    type Variables = ProductListVariables;
    type Result = ProductListData;

    fn document(&self) -> &str {
        PRODUCT_LIST_DOCUMENT
    }
}

impl ProductListData {
    /// Flattens the connection into its product nodes.
    ///
    /// `products: null` yields an empty list.
    #[must_use]
    pub fn into_products(self) -> Vec<ProductListItem> {
        self.products
            .map(|connection| connection.edges.into_iter().map(|edge| edge.node).collect())
            .unwrap_or_default()
    }
}

/// Fetches the home page products of `channel`.
///
/// Requests the first [`HOME_PAGE_PRODUCT_COUNT`] products with a
/// [`HOME_PAGE_REVALIDATE_SECS`] freshness window over the authenticated
/// transport, as the home page does.
///
/// # Errors
///
/// Returns [`GraphqlError`] if the query fails.
pub async fn fetch_product_list(
    client: &GraphqlClient,
    channel: &str,
) -> Result<Vec<ProductListItem>, GraphqlError> {
    let variables = ProductListVariables {
        first: HOME_PAGE_PRODUCT_COUNT,
        channel: channel.to_string(),
    };
    let options = RequestOptions::builder()
        .revalidate(HOME_PAGE_REVALIDATE_SECS)
        .build();

    let data = client.execute(&ProductList, &variables, options).await?;
    Ok(data.into_products())
}
