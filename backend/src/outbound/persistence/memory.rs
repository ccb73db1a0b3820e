//! In-memory store adapter.
//!
//! Implements every repository port over a single `RwLock`, which makes each
//! operation atomic the same way the hosted store's transactional functions
//! are: mutations re-read current state under the write lock and re-apply the
//! domain rules before committing. Continuation tokens are offset-based and
//! minted locally.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::{Cursor, Page, PageSize};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CustomerRepository, CustomerRepositoryError,
    OrderRepository, OrderRepositoryError, ProductPatch, ProductRepository,
    ProductRepositoryError,
};
use crate::domain::{Category, Customer, Order, OrderSummary, OrderUpdate, Product, Quantity};

#[derive(Debug, Serialize, Deserialize)]
struct OffsetToken {
    offset: usize,
}

#[derive(Default)]
struct StoreState {
    categories: HashMap<Uuid, Category>,
    products: HashMap<Uuid, Product>,
    customers: HashMap<Uuid, Customer>,
    orders: HashMap<Uuid, Order>,
}

/// All collections behind one lock, for development and tests.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

fn poisoned<G>(_: PoisonError<G>) -> String {
    "store lock poisoned".to_owned()
}

fn decode_offset(cursor: Option<&Cursor>) -> Result<usize, String> {
    match cursor {
        None => Ok(0),
        Some(cursor) => cursor
            .decode::<OffsetToken>()
            .map(|token| token.offset)
            .map_err(|err| err.to_string()),
    }
}

fn paginate<T>(items: Vec<T>, offset: usize, page_size: PageSize) -> Result<Page<T>, String> {
    let total = items.len();
    let start = offset.min(total);
    let end = (start + page_size.as_usize()).min(total);
    let next = if end < total {
        Some(Cursor::encode(&OffsetToken { offset: end }).map_err(|err| err.to_string())?)
    } else {
        None
    };
    Ok(Page::new(
        items.into_iter().skip(start).take(end - start).collect(),
        next,
    ))
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, String> {
        self.state.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, String> {
        self.state.write().map_err(poisoned)
    }
}

fn cart_of(state: &StoreState, customer_id: &Uuid) -> Option<Order> {
    state
        .orders
        .values()
        .find(|order| order.customer().id() == *customer_id && order.is_cart())
        .cloned()
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let state = self.read().map_err(CategoryRepositoryError::query)?;
        Ok(state
            .categories
            .values()
            .find(|category| category.name() == name)
            .cloned())
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        let mut state = self.write().map_err(CategoryRepositoryError::query)?;
        if state
            .categories
            .values()
            .any(|existing| existing.name() == category.name())
        {
            return Err(CategoryRepositoryError::duplicate_name(category.name()));
        }
        state.categories.insert(category.id(), category.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = self.read().map_err(CategoryRepositoryError::query)?;
        let mut categories: Vec<_> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(categories)
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        product_id: &Uuid,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let state = self.read().map_err(ProductRepositoryError::query)?;
        Ok(state.products.get(product_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductRepositoryError> {
        let state = self.read().map_err(ProductRepositoryError::query)?;
        // Names are not unique; pick the lowest id for a deterministic match.
        Ok(state
            .products
            .values()
            .filter(|product| product.name() == name)
            .min_by_key(|product| product.id())
            .cloned())
    }

    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let mut state = self.write().map_err(ProductRepositoryError::query)?;
        state.products.insert(product.id(), product.clone());
        Ok(())
    }

    async fn update(
        &self,
        product_id: &Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut state = self.write().map_err(ProductRepositoryError::query)?;
        let Some(product) = state.products.get_mut(product_id) else {
            return Ok(None);
        };
        product.apply_patch(patch);
        Ok(Some(product.clone()))
    }

    async fn list(
        &self,
        category: Option<String>,
        page_size: PageSize,
        cursor: Option<Cursor>,
    ) -> Result<Page<Product>, ProductRepositoryError> {
        let offset = decode_offset(cursor.as_ref()).map_err(ProductRepositoryError::query)?;
        let state = self.read().map_err(ProductRepositoryError::query)?;
        let category = category.as_deref();
        let mut products: Vec<_> = state
            .products
            .values()
            .filter(|product| category.is_none_or(|name| product.category().name() == name))
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name().cmp(b.name()).then(a.id().cmp(&b.id())));
        paginate(products, offset, page_size).map_err(ProductRepositoryError::query)
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let state = self.read().map_err(CustomerRepositoryError::query)?;
        Ok(state.customers.get(customer_id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let state = self.read().map_err(CustomerRepositoryError::query)?;
        Ok(state
            .customers
            .values()
            .find(|customer| customer.email() == email)
            .cloned())
    }

    async fn insert(&self, customer: &Customer) -> Result<(), CustomerRepositoryError> {
        let mut state = self.write().map_err(CustomerRepositoryError::query)?;
        if state
            .customers
            .values()
            .any(|existing| existing.email() == customer.email())
        {
            return Err(CustomerRepositoryError::duplicate_email(customer.email()));
        }
        state.customers.insert(customer.id(), customer.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn find_by_id(&self, order_id: &Uuid) -> Result<Option<Order>, OrderRepositoryError> {
        let state = self.read().map_err(OrderRepositoryError::query)?;
        Ok(state.orders.get(order_id).cloned())
    }

    async fn find_cart_for_customer(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let state = self.read().map_err(OrderRepositoryError::query)?;
        Ok(cart_of(&state, customer_id))
    }

    async fn get_or_create_cart(
        &self,
        customer: &Customer,
    ) -> Result<Order, OrderRepositoryError> {
        let mut state = self.write().map_err(OrderRepositoryError::query)?;
        if let Some(cart) = cart_of(&state, &customer.id()) {
            return Ok(cart);
        }
        let cart = Order::new_cart(customer.clone());
        state.orders.insert(cart.id(), cart.clone());
        Ok(cart)
    }

    async fn put_cart_item(
        &self,
        customer: &Customer,
        product: &Product,
        quantity: Quantity,
    ) -> Result<Order, OrderRepositoryError> {
        let mut state = self.write().map_err(OrderRepositoryError::query)?;
        let mut cart =
            cart_of(&state, &customer.id()).unwrap_or_else(|| Order::new_cart(customer.clone()));
        cart.put_item(product.clone(), quantity)
            .map_err(OrderRepositoryError::rejected)?;
        state.orders.insert(cart.id(), cart.clone());
        Ok(cart)
    }

    async fn apply_update(
        &self,
        order_id: &Uuid,
        update: &OrderUpdate,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut state = self.write().map_err(OrderRepositoryError::query)?;
        let Some(current) = state.orders.get(order_id) else {
            return Ok(None);
        };
        let updated = current
            .apply_update(update)
            .map_err(OrderRepositoryError::rejected)?;
        state.orders.insert(*order_id, updated.clone());
        Ok(Some(updated))
    }

    async fn list_for_customer(
        &self,
        customer_id: &Uuid,
        page_size: PageSize,
        cursor: Option<Cursor>,
    ) -> Result<Page<OrderSummary>, OrderRepositoryError> {
        let offset = decode_offset(cursor.as_ref()).map_err(OrderRepositoryError::query)?;
        let state = self.read().map_err(OrderRepositoryError::query)?;
        let mut summaries: Vec<_> = state
            .orders
            .values()
            .filter(|order| order.customer().id() == *customer_id)
            .map(OrderSummary::from)
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        paginate(summaries, offset, page_size).map_err(OrderRepositoryError::query)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
