//! Response payloads shared across HTTP handlers.
//!
//! Request bodies live with their handlers; these types are the JSON
//! projections of domain entities that several endpoints return.

use pagination::{Cursor, Page};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CustomerRecord;
use crate::domain::{Address, Category, Customer, LineItem, Order, OrderSummary, Payment, Product};

/// Category payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    /// Category identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Unique category name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl From<&Category> for CategoryBody {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id().to_string(),
            name: category.name().to_owned(),
            description: category.description().to_owned(),
        }
    }
}

/// Product payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    /// Product identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Unit price in minor currency units.
    pub price: u64,
    /// Units on hand, informational only.
    pub stock: u32,
    /// The owning category.
    pub category: CategoryBody,
}

impl From<&Product> for ProductBody {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().to_string(),
            name: product.name().to_owned(),
            description: product.description().to_owned(),
            price: product.price(),
            stock: product.stock(),
            category: CategoryBody::from(product.category()),
        }
    }
}

/// Postal address payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressBody {
    /// Street line.
    pub street: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal or ZIP code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

impl From<&Address> for AddressBody {
    fn from(address: &Address) -> Self {
        Self {
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }
}

impl From<AddressBody> for Address {
    fn from(body: AddressBody) -> Self {
        Self {
            street: body.street,
            city: body.city,
            state: body.state,
            postal_code: body.postal_code,
            country: body.country,
        }
    }
}

/// Payment payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBody {
    /// Payment method, e.g. `card`.
    pub method: String,
    /// Processor reference, when one exists.
    #[serde(default)]
    pub reference: Option<String>,
}

impl From<&Payment> for PaymentBody {
    fn from(payment: &Payment) -> Self {
        Self {
            method: payment.method().to_owned(),
            reference: payment.reference().map(str::to_owned),
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody {
    /// The product snapshot for this line.
    pub product: ProductBody,
    /// Units of the product.
    pub quantity: u32,
}

impl From<&LineItem> for OrderItemBody {
    fn from(item: &LineItem) -> Self {
        Self {
            product: ProductBody::from(item.product()),
            quantity: item.quantity().get(),
        }
    }
}

/// Customer as embedded in an order payload. Unlike [`CustomerBody`] there is
/// no `cart` field; the order itself tells the reader whether it is one.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomerBody {
    /// Customer identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Postal address.
    pub address: AddressBody,
}

impl From<&Customer> for OrderCustomerBody {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id().to_string(),
            name: customer.name().to_owned(),
            email: customer.email().to_owned(),
            address: AddressBody::from(customer.address()),
        }
    }
}

/// Full order payload.
///
/// `payment` is always present in the JSON, `null` while the order is still
/// a cart, so clients can distinguish "no payment yet" from a missing field.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderBody {
    /// Order identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Current lifecycle status.
    pub status: String,
    /// Line items.
    pub items: Vec<OrderItemBody>,
    /// Payment descriptor, `null` until the order is placed.
    pub payment: Option<PaymentBody>,
    /// Derived total in minor currency units.
    pub total: u64,
    /// The owning customer, fully nested.
    pub customer: OrderCustomerBody,
    /// Creation timestamp, RFC 3339.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&Order> for OrderBody {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            status: order.status().to_string(),
            items: order.items().iter().map(OrderItemBody::from).collect(),
            payment: order.payment().map(PaymentBody::from),
            total: order.total(),
            customer: OrderCustomerBody::from(order.customer()),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

/// Listing projection of an order.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryBody {
    /// Order identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Current lifecycle status.
    pub status: String,
    /// Creation timestamp, RFC 3339.
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<OrderSummary> for OrderSummaryBody {
    fn from(summary: OrderSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            status: summary.status.to_string(),
            created_at: summary.created_at.to_rfc3339(),
        }
    }
}

/// Customer payload, with the active cart identifier when one exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    /// Customer identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Postal address.
    pub address: AddressBody,
    /// Identifier of the active cart, `null` when none exists.
    pub cart: Option<String>,
}

impl From<CustomerRecord> for CustomerBody {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.customer.id().to_string(),
            name: record.customer.name().to_owned(),
            email: record.customer.email().to_owned(),
            address: AddressBody::from(record.customer.address()),
            cart: record.cart_id.map(|id| id.to_string()),
        }
    }
}

/// One page of a listing, with the continuation token for the next.
///
/// `next` is always present, `null` when the set is exhausted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageBody<T> {
    /// The items on this page.
    pub data: Vec<T>,
    /// Opaque token resuming the listing, or `null`.
    pub next: Option<String>,
}

impl<T> PageBody<T> {
    /// Project a domain page into its JSON envelope. The token is rendered
    /// URL-escaped so clients can paste it straight into an `after` query
    /// parameter.
    pub fn from_page<U>(page: Page<U>, f: impl FnMut(U) -> T) -> Self {
        let next = page.next.as_ref().map(Cursor::to_query_value);
        Self {
            data: page.items.into_iter().map(f).collect(),
            next,
        }
    }
}
