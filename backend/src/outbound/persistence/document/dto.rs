//! Wire payloads for the hosted document store.
//!
//! The store's functions exchange plain JSON documents; these types decode
//! them and rebuild domain entities, reporting any document that no longer
//! satisfies a domain invariant as a decode failure rather than panicking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    Address, Category, Customer, Order, OrderStatus, OrderSummary, Payment, Product, Quantity,
};

/// Response envelope wrapping every function call result.
#[derive(Debug, Deserialize)]
pub(super) struct EnvelopeDto {
    pub data: Option<Value>,
    pub error: Option<ApiErrorDto>,
}

/// Error payload returned by the store.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiErrorDto {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CategoryDto {
    pub(super) fn into_domain(self) -> Result<Category, String> {
        Category::from_parts(self.id, self.name, self.description).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub category: CategoryDto,
}

impl ProductDto {
    pub(super) fn into_domain(self) -> Result<Product, String> {
        let category = self.category.into_domain()?;
        Product::from_parts(
            self.id,
            self.name,
            self.description,
            self.price,
            self.stock,
            category,
        )
        .map_err(|err| err.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddressDto {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<AddressDto> for Address {
    fn from(dto: AddressDto) -> Self {
        Self {
            street: dto.street,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
            country: dto.country,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub address: AddressDto,
}

impl CustomerDto {
    pub(super) fn into_domain(self) -> Result<Customer, String> {
        Customer::from_parts(self.id, self.name, self.email, self.address.into())
            .map_err(|err| err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PaymentDto {
    pub method: String,
    #[serde(default)]
    pub reference: Option<String>,
}

impl PaymentDto {
    fn into_domain(self) -> Result<Payment, String> {
        Payment::new(self.method, self.reference).map_err(|err| err.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct LineItemDto {
    pub product: ProductDto,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderDto {
    pub id: Uuid,
    pub status: String,
    pub items: Vec<LineItemDto>,
    #[serde(default)]
    pub payment: Option<PaymentDto>,
    pub customer: CustomerDto,
    pub created_at: DateTime<Utc>,
}

impl OrderDto {
    pub(super) fn into_domain(self) -> Result<Order, String> {
        let status: OrderStatus = self.status.parse().map_err(
            |err: crate::domain::ParseOrderStatusError| err.to_string(),
        )?;
        let customer = self.customer.into_domain()?;
        let payment = self.payment.map(PaymentDto::into_domain).transpose()?;
        let items = self
            .items
            .into_iter()
            .map(|item| {
                let quantity = Quantity::new(item.quantity).map_err(|err| err.to_string())?;
                Ok((item.product.into_domain()?, quantity))
            })
            .collect::<Result<Vec<_>, String>>()?;
        Order::from_parts(self.id, status, items, payment, customer, self.created_at)
            .map_err(|err| err.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderSummaryDto {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl OrderSummaryDto {
    pub(super) fn into_domain(self) -> Result<OrderSummary, String> {
        let status: OrderStatus = self.status.parse().map_err(
            |err: crate::domain::ParseOrderStatusError| err.to_string(),
        )?;
        Ok(OrderSummary {
            id: self.id,
            status,
            created_at: self.created_at,
        })
    }
}

/// One page of documents plus the store's continuation token.
#[derive(Debug, Deserialize)]
pub(super) struct PageDto<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub after: Option<String>,
}

/// Outgoing payment payload.
#[derive(Debug, Serialize)]
pub(super) struct PaymentArgs<'a> {
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<&'a str>,
}

impl<'a> From<&'a Payment> for PaymentArgs<'a> {
    fn from(payment: &'a Payment) -> Self {
        Self {
            method: payment.method(),
            reference: payment.reference(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for wire decoding.
    use serde_json::json;

    use super::*;
    use crate::domain::OrderStatus;

    fn order_json() -> Value {
        json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "status": "processing",
            "items": [{
                "product": {
                    "id": "00000000-0000-0000-0000-000000000002",
                    "name": "Widget",
                    "description": "a widget",
                    "price": 250,
                    "stock": 10,
                    "category": {
                        "id": "00000000-0000-0000-0000-000000000003",
                        "name": "electronics"
                    }
                },
                "quantity": 3
            }],
            "payment": { "method": "card", "reference": "tok_123" },
            "customer": {
                "id": "00000000-0000-0000-0000-000000000004",
                "name": "Ada",
                "email": "ada@example.com",
                "address": {
                    "street": "1 High St",
                    "city": "Springfield",
                    "state": "IL",
                    "postalCode": "62701",
                    "country": "US"
                }
            },
            "createdAt": "2026-01-05T09:30:00Z"
        })
    }

    #[test]
    fn order_document_rebuilds_the_domain_order() {
        let dto: OrderDto = serde_json::from_value(order_json()).expect("decode");
        let order = dto.into_domain().expect("valid document");
        assert_eq!(order.status(), OrderStatus::Processing);
        assert_eq!(order.total(), 750);
        assert_eq!(order.payment().map(Payment::method), Some("card"));
    }

    #[test]
    fn unknown_status_fails_decoding() {
        let mut payload = order_json();
        payload["status"] = json!("returned");
        let dto: OrderDto = serde_json::from_value(payload).expect("decode");
        let err = dto.into_domain().expect_err("unknown status");
        assert!(err.contains("returned"));
    }

    #[test]
    fn non_positive_quantities_fail_decoding() {
        let mut payload = order_json();
        payload["items"][0]["quantity"] = json!(0);
        let dto: OrderDto = serde_json::from_value(payload).expect("decode");
        let err = dto.into_domain().expect_err("zero quantity");
        assert!(err.contains("positive"));
    }

    #[test]
    fn envelope_splits_data_and_error() {
        let envelope: EnvelopeDto = serde_json::from_value(json!({
            "error": { "code": "document_not_found", "message": "no such order" }
        }))
        .expect("decode");
        assert!(envelope.data.is_none());
        let error = envelope.error.expect("error present");
        assert_eq!(error.code, "document_not_found");
    }

    #[test]
    fn payment_args_skip_an_absent_reference() {
        let payment = Payment::new("card", None).expect("valid payment");
        let args = PaymentArgs::from(&payment);
        let json = serde_json::to_value(&args).expect("serialise");
        assert!(json.get("reference").is_none());
    }
}
