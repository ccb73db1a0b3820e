//! Order aggregate and cart/order lifecycle rules.
//!
//! The status state machine, the payment window and the total consistency
//! rule live here as pure functions so they are independent of how orders are
//! fetched or persisted. Store adapters re-apply [`Order::apply_update`]
//! inside their own transaction boundary, so validation always runs against
//! the truly current state rather than a stale read.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::{Customer, Product};

/// Order status, a closed forward-only enumeration.
///
/// `cart → processing → shipped → delivered`; `delivered` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Mutable pre-checkout state. Payment must be unset.
    Cart,
    /// Placed and paid, awaiting fulfilment.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Terminal state.
    Delivered,
}

impl OrderStatus {
    /// Wire representation, lowercase.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
        }
    }

    /// Whether this status admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Whether the forward-only state machine permits `self → next`.
    ///
    /// Self-transitions are not listed here; callers treat them as no-ops.
    #[must_use]
    pub fn permits(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Cart, Self::Processing)
                | (Self::Processing, Self::Shipped)
                | (Self::Shipped, Self::Delivered)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status '{0}'; expected cart, processing, shipped or delivered")]
pub struct ParseOrderStatusError(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(Self::Cart),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            other => Err(ParseOrderStatusError(other.to_owned())),
        }
    }
}

/// Error raised when constructing a [`Quantity`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    /// Zero or negative input.
    #[error("quantity must be a positive integer, got {value}")]
    NotPositive {
        /// The rejected value.
        value: i64,
    },
    /// Larger than any plausible line item.
    #[error("quantity {value} is out of range")]
    OutOfRange {
        /// The rejected value.
        value: i64,
    },
}

/// Positive line-item quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    /// Validate a raw integer as a quantity.
    ///
    /// # Examples
    /// ```
    /// use shopfront::domain::Quantity;
    ///
    /// assert_eq!(Quantity::new(3).map(Quantity::get), Ok(3));
    /// assert!(Quantity::new(0).is_err());
    /// assert!(Quantity::new(-1).is_err());
    /// ```
    pub const fn new(value: i64) -> Result<Self, QuantityError> {
        if value <= 0 {
            return Err(QuantityError::NotPositive { value });
        }
        if value > u32::MAX as i64 {
            return Err(QuantityError::OutOfRange { value });
        }
        #[expect(clippy::cast_possible_truncation, reason = "bounds checked above")]
        Ok(Self(value as u32))
    }

    /// The validated count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Validation errors raised when constructing a [`Payment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentValidationError {
    /// Method is empty after trimming whitespace.
    #[error("payment method must not be empty")]
    EmptyMethod,
}

/// Payment descriptor attached when an order leaves the cart stage.
///
/// Immutable once set; the lifecycle rules reject any later change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    method: String,
    reference: Option<String>,
}

impl Payment {
    /// Construct a payment descriptor.
    ///
    /// # Errors
    /// Returns [`PaymentValidationError::EmptyMethod`] for blank methods.
    pub fn new(
        method: impl Into<String>,
        reference: Option<String>,
    ) -> Result<Self, PaymentValidationError> {
        let method = method.into();
        if method.trim().is_empty() {
            return Err(PaymentValidationError::EmptyMethod);
        }
        Ok(Self { method, reference })
    }

    /// Payment method, e.g. `card`.
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.as_str()
    }

    /// Processor reference, when one exists.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

/// A `(product, quantity)` pair within an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    product: Product,
    quantity: Quantity,
}

impl LineItem {
    /// The product snapshot for this line.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Units of the product in this line.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// `price × quantity` in minor currency units, `None` when the product
    /// does not fit the 64-bit representation.
    #[must_use]
    pub fn line_total(&self) -> Option<u64> {
        self.product
            .price()
            .checked_mul(u64::from(self.quantity.get()))
    }
}

/// A requested change to an order: a status transition, a payment
/// attachment, or both. Both parts apply atomically or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderUpdate {
    /// Target status, validated against the state machine.
    pub new_status: Option<OrderStatus>,
    /// Payment to attach; only legal together with `cart → processing`.
    pub payment: Option<Payment>,
}

impl OrderUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_status.is_none() && self.payment.is_none()
    }
}

/// Lifecycle rule violations raised by [`Order::apply_update`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderRuleViolation {
    /// The requested status change is not a permitted forward step.
    #[error("cannot transition order from '{from}' to '{to}'")]
    InvalidTransition {
        /// Current status.
        from: OrderStatus,
        /// Requested status.
        to: OrderStatus,
    },
    /// Payment was supplied outside the `cart → processing` window.
    #[error("cannot update payment information after an order has been placed")]
    PaymentNotAllowed {
        /// Status the order held when payment was supplied.
        status: OrderStatus,
    },
    /// The order would leave the cart stage without payment attached.
    #[error("payment is required when placing an order")]
    MissingPayment,
    /// The derived total does not fit 64-bit minor currency units.
    #[error("order total exceeds the representable amount")]
    TotalOverflow,
}

/// A customer's in-progress cart or placed order.
///
/// ## Invariants
/// - While `status == cart`, `payment` is unset; once status leaves `cart`,
///   payment is set and immutable.
/// - Every line item quantity is positive ([`Quantity`] enforces this).
/// - `total` always equals the sum of `price × quantity` over `items`; every
///   mutation that touches items recomputes it in the same call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: Uuid,
    status: OrderStatus,
    items: Vec<LineItem>,
    payment: Option<Payment>,
    total: u64,
    customer: Customer,
    created_at: DateTime<Utc>,
}

impl Order {
    /// Create a fresh empty cart owned by `customer`.
    #[must_use]
    pub fn new_cart(customer: Customer) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: OrderStatus::Cart,
            items: Vec::new(),
            payment: None,
            total: 0,
            customer,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate an order from stored parts, recomputing the derived total.
    ///
    /// # Errors
    /// Returns [`OrderRuleViolation::TotalOverflow`] when the recomputed
    /// total does not fit 64-bit minor currency units.
    pub fn from_parts(
        id: Uuid,
        status: OrderStatus,
        items: Vec<(Product, Quantity)>,
        payment: Option<Payment>,
        customer: Customer,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderRuleViolation> {
        let items: Vec<_> = items
            .into_iter()
            .map(|(product, quantity)| LineItem { product, quantity })
            .collect();
        let total = Self::total_of(&items)?;
        Ok(Self {
            id,
            status,
            items,
            payment,
            total,
            customer,
            created_at,
        })
    }

    /// Stable identifier, assigned at creation.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Line items. Order within the set carries no meaning.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Payment descriptor, present once the order has left the cart stage.
    #[must_use]
    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    /// Derived total in minor currency units.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The owning customer.
    #[must_use]
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Creation timestamp, immutable.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the order is still a mutable cart.
    #[must_use]
    pub fn is_cart(&self) -> bool {
        self.status == OrderStatus::Cart
    }

    /// Replace-or-insert a line item and recompute the total.
    ///
    /// A line for the same product has its quantity replaced, not
    /// accumulated; otherwise a new line is appended. `self` is untouched
    /// on rejection.
    ///
    /// # Errors
    /// Returns [`OrderRuleViolation::TotalOverflow`] when the new total
    /// does not fit 64-bit minor currency units.
    pub fn put_item(
        &mut self,
        product: Product,
        quantity: Quantity,
    ) -> Result<(), OrderRuleViolation> {
        let mut items = self.items.clone();
        if let Some(existing) = items
            .iter_mut()
            .find(|item| item.product.id() == product.id())
        {
            existing.product = product;
            existing.quantity = quantity;
        } else {
            items.push(LineItem { product, quantity });
        }
        let total = Self::total_of(&items)?;
        self.items = items;
        self.total = total;
        Ok(())
    }

    fn total_of(items: &[LineItem]) -> Result<u64, OrderRuleViolation> {
        items
            .iter()
            .try_fold(0_u64, |sum, item| {
                item.line_total().and_then(|line| sum.checked_add(line))
            })
            .ok_or(OrderRuleViolation::TotalOverflow)
    }

    /// Validate `update` against the current state without applying it.
    ///
    /// Rules, in order:
    /// 1. A supplied status must be the current status (no-op) or a
    ///    permitted forward step.
    /// 2. Payment may only be supplied together with the `cart → processing`
    ///    step; anywhere else it is rejected, which also makes an attached
    ///    payment immutable.
    /// 3. Leaving the cart stage requires a payment to be attached.
    ///
    /// # Errors
    /// Returns the first violated rule.
    pub fn validate_update(&self, update: &OrderUpdate) -> Result<(), OrderRuleViolation> {
        if let Some(next) = update.new_status {
            if next != self.status && !self.status.permits(next) {
                return Err(OrderRuleViolation::InvalidTransition {
                    from: self.status,
                    to: next,
                });
            }
        }
        let leaving_cart =
            self.is_cart() && update.new_status.is_some_and(|next| next != OrderStatus::Cart);
        if update.payment.is_some() && !leaving_cart {
            return Err(OrderRuleViolation::PaymentNotAllowed {
                status: self.status,
            });
        }
        if leaving_cart && update.payment.is_none() && self.payment.is_none() {
            return Err(OrderRuleViolation::MissingPayment);
        }
        Ok(())
    }

    /// Apply `update`, yielding the new order state.
    ///
    /// `self` is untouched on rejection, so a failed update can never be
    /// partially observable: status and payment change together or not at
    /// all.
    ///
    /// # Errors
    /// Returns the first violated lifecycle rule.
    pub fn apply_update(&self, update: &OrderUpdate) -> Result<Self, OrderRuleViolation> {
        self.validate_update(update)?;
        let mut next = self.clone();
        if let Some(status) = update.new_status {
            next.status = status;
        }
        if let Some(payment) = &update.payment {
            next.payment = Some(payment.clone());
        }
        Ok(next)
    }
}

/// Listing projection of an order: identifier, status and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Order identifier.
    pub id: Uuid,
    /// Current status.
    pub status: OrderStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id(),
            status: order.status(),
            created_at: order.created_at(),
        }
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
