//! Reqwest-backed adapter for the hosted document database.
//!
//! Every repository operation maps to one named store function invoked over
//! HTTP; the store runs each function transactionally, so lifecycle rules are
//! enforced against current state even when this service validated a stale
//! read. This adapter owns transport details only: request serialisation,
//! timeout and error-code mapping, and JSON decoding into domain entities.

use std::time::Duration;

use async_trait::async_trait;
use pagination::{Cursor, Page, PageSize};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use uuid::Uuid;

use super::dto::{
    ApiErrorDto, CategoryDto, CustomerDto, EnvelopeDto, OrderDto, OrderSummaryDto, PageDto,
    PaymentArgs, ProductDto,
};
use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CustomerRepository, CustomerRepositoryError,
    OrderRepository, OrderRepositoryError, ProductPatch, ProductRepository,
    ProductRepositoryError,
};
use crate::domain::{
    Category, Customer, Order, OrderRuleViolation, OrderStatus, OrderSummary, OrderUpdate,
    Product, Quantity,
};

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Store function names. The store rejects unknown names, so keeping them in
/// one place makes a rename a one-line change.
mod functions {
    pub const GET_CATEGORY_BY_NAME: &str = "getCategoryByName";
    pub const CREATE_CATEGORY: &str = "createCategory";
    pub const LIST_CATEGORIES: &str = "listCategories";
    pub const GET_PRODUCT: &str = "getProduct";
    pub const GET_PRODUCT_BY_NAME: &str = "getProductByName";
    pub const CREATE_PRODUCT: &str = "createProduct";
    pub const UPDATE_PRODUCT: &str = "updateProduct";
    pub const LIST_PRODUCTS: &str = "listProducts";
    pub const GET_CUSTOMER: &str = "getCustomer";
    pub const GET_CUSTOMER_BY_EMAIL: &str = "getCustomerByEmail";
    pub const CREATE_CUSTOMER: &str = "createCustomer";
    pub const GET_ORDER: &str = "getOrder";
    pub const GET_CART_FOR_CUSTOMER: &str = "getCartForCustomer";
    pub const GET_OR_CREATE_CART: &str = "getOrCreateCart";
    pub const CREATE_OR_UPDATE_CART_ITEM: &str = "createOrUpdateCartItem";
    pub const UPDATE_ORDER: &str = "updateOrder";
    pub const LIST_CUSTOMER_ORDERS: &str = "listCustomerOrders";
}

/// Error codes the store's functions return in their error envelope.
mod codes {
    pub const DOCUMENT_NOT_FOUND: &str = "document_not_found";
    pub const CONSTRAINT_FAILURE: &str = "constraint_failure";
    pub const INVALID_TRANSITION: &str = "invalid_transition";
    pub const PAYMENT_NOT_ALLOWED: &str = "payment_not_allowed";
    pub const MISSING_PAYMENT: &str = "missing_payment";
}

/// Connection settings for the hosted store.
pub struct DocumentStoreConfig {
    /// Base URL of the store's HTTP API.
    pub endpoint: Url,
    /// Bearer secret presented on every call.
    pub secret: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl DocumentStoreConfig {
    /// Settings with the default request timeout.
    #[must_use]
    pub fn new(endpoint: Url, secret: String) -> Self {
        Self {
            endpoint,
            secret,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

/// Repository adapter invoking the store's named functions over HTTP.
pub struct DocumentStore {
    client: Client,
    endpoint: Url,
    secret: String,
}

/// Intermediate failure shape shared by every call, before it is narrowed to
/// the calling port's error type.
#[derive(Debug, Clone, Error)]
enum StoreCallError {
    #[error("store unreachable: {message}")]
    Transport { message: String },
    #[error("store call timed out: {message}")]
    Timeout { message: String },
    #[error("store response could not be decoded: {message}")]
    Decode { message: String },
    #[error("{}", .0.message)]
    Api(ApiErrorDto),
}

impl DocumentStore {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: DocumentStoreConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            secret: config.secret,
        })
    }

    async fn call(&self, function: &str, args: Value) -> Result<Value, StoreCallError> {
        let url = self
            .endpoint
            .join(&format!("functions/{function}"))
            .map_err(|error| StoreCallError::Transport {
                message: format!("invalid store endpoint: {error}"),
            })?;
        let response = self
            .client
            .post(url)
            .bearer_auth(self.secret.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&args)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        let envelope: EnvelopeDto = serde_json::from_slice(body.as_ref()).map_err(|error| {
            StoreCallError::Decode {
                message: format!("status {}: {error}", status.as_u16()),
            }
        })?;
        if let Some(error) = envelope.error {
            return Err(StoreCallError::Api(error));
        }
        if !status.is_success() {
            return Err(StoreCallError::Transport {
                message: format!("status {}", status.as_u16()),
            });
        }
        envelope.data.ok_or_else(|| StoreCallError::Decode {
            message: "response envelope carried neither data nor error".to_owned(),
        })
    }

    /// Invoke a function whose missing subject surfaces as `Ok(None)`.
    async fn call_optional<T: DeserializeOwned>(
        &self,
        function: &str,
        args: Value,
    ) -> Result<Option<T>, StoreCallError> {
        match self.call(function, args).await {
            Ok(data) => decode(data).map(Some),
            Err(error) if is_not_found(&error) => Ok(None),
            Err(error) => Err(error),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> StoreCallError {
    if error.is_timeout() {
        StoreCallError::Timeout {
            message: error.to_string(),
        }
    } else {
        StoreCallError::Transport {
            message: error.to_string(),
        }
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, StoreCallError> {
    serde_json::from_value(data).map_err(|error| StoreCallError::Decode {
        message: error.to_string(),
    })
}

fn is_not_found(error: &StoreCallError) -> bool {
    matches!(error, StoreCallError::Api(api) if api.code == codes::DOCUMENT_NOT_FOUND)
}

fn is_constraint_failure(error: &StoreCallError) -> bool {
    matches!(error, StoreCallError::Api(api) if api.code == codes::CONSTRAINT_FAILURE)
}

fn map_category_error(error: StoreCallError) -> CategoryRepositoryError {
    match error {
        StoreCallError::Transport { message } | StoreCallError::Timeout { message } => {
            CategoryRepositoryError::connection(message)
        }
        other => CategoryRepositoryError::query(other.to_string()),
    }
}

fn map_product_error(error: StoreCallError) -> ProductRepositoryError {
    match error {
        StoreCallError::Transport { message } | StoreCallError::Timeout { message } => {
            ProductRepositoryError::connection(message)
        }
        other => ProductRepositoryError::query(other.to_string()),
    }
}

fn map_customer_error(error: StoreCallError) -> CustomerRepositoryError {
    match error {
        StoreCallError::Transport { message } | StoreCallError::Timeout { message } => {
            CustomerRepositoryError::connection(message)
        }
        other => CustomerRepositoryError::query(other.to_string()),
    }
}

/// Narrow a call failure to the order port, rebuilding lifecycle violations
/// from the store's error codes so handlers report them exactly as local
/// validation would.
fn map_order_error(error: StoreCallError) -> OrderRepositoryError {
    let api = match error {
        StoreCallError::Transport { message } | StoreCallError::Timeout { message } => {
            return OrderRepositoryError::connection(message);
        }
        StoreCallError::Decode { message } => return OrderRepositoryError::query(message),
        StoreCallError::Api(api) => api,
    };
    match api.code.as_str() {
        codes::INVALID_TRANSITION => transition_violation(&api)
            .map_or_else(|| OrderRepositoryError::query(api.message.clone()), |violation| {
                OrderRepositoryError::rejected(violation)
            }),
        codes::PAYMENT_NOT_ALLOWED => status_detail(&api).map_or_else(
            || OrderRepositoryError::query(api.message.clone()),
            |status| OrderRepositoryError::rejected(OrderRuleViolation::PaymentNotAllowed { status }),
        ),
        codes::MISSING_PAYMENT => {
            OrderRepositoryError::rejected(OrderRuleViolation::MissingPayment)
        }
        _ => OrderRepositoryError::query(api.message),
    }
}

fn detail_status(api: &ApiErrorDto, field: &str) -> Option<OrderStatus> {
    api.details
        .as_ref()?
        .get(field)?
        .as_str()?
        .parse()
        .ok()
}

fn transition_violation(api: &ApiErrorDto) -> Option<OrderRuleViolation> {
    Some(OrderRuleViolation::InvalidTransition {
        from: detail_status(api, "from")?,
        to: detail_status(api, "to")?,
    })
}

fn status_detail(api: &ApiErrorDto) -> Option<OrderStatus> {
    detail_status(api, "status")
}

fn category_args(category: &Category) -> Value {
    json!({
        "id": category.id(),
        "name": category.name(),
        "description": category.description(),
    })
}

fn product_args(product: &Product) -> Value {
    json!({
        "id": product.id(),
        "name": product.name(),
        "description": product.description(),
        "price": product.price(),
        "stock": product.stock(),
        "category": category_args(product.category()),
    })
}

fn customer_args(customer: &Customer) -> Value {
    let address = customer.address();
    json!({
        "id": customer.id(),
        "name": customer.name(),
        "email": customer.email(),
        "address": {
            "street": address.street,
            "city": address.city,
            "state": address.state,
            "postalCode": address.postal_code,
            "country": address.country,
        },
    })
}

fn page_args(page_size: PageSize, cursor: Option<&Cursor>) -> Value {
    json!({
        "pageSize": page_size.get(),
        "after": cursor.map(Cursor::as_str),
    })
}

/// Turn a decoded page of documents into a domain page, carrying the store's
/// continuation token through opaque.
fn into_page<D, T>(
    dto: PageDto<D>,
    mut rebuild: impl FnMut(D) -> Result<T, String>,
) -> Result<Page<T>, String> {
    let items = dto
        .data
        .into_iter()
        .map(&mut rebuild)
        .collect::<Result<Vec<_>, String>>()?;
    let next = dto
        .after
        .map(Cursor::from_token)
        .transpose()
        .map_err(|error| error.to_string())?;
    Ok(Page::new(items, next))
}

#[async_trait]
impl CategoryRepository for DocumentStore {
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let dto: Option<CategoryDto> = self
            .call_optional(functions::GET_CATEGORY_BY_NAME, json!({ "name": name }))
            .await
            .map_err(map_category_error)?;
        dto.map(CategoryDto::into_domain)
            .transpose()
            .map_err(CategoryRepositoryError::query)
    }

    async fn insert(&self, category: &Category) -> Result<(), CategoryRepositoryError> {
        match self
            .call(functions::CREATE_CATEGORY, category_args(category))
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if is_constraint_failure(&error) => {
                Err(CategoryRepositoryError::duplicate_name(category.name()))
            }
            Err(error) => Err(map_category_error(error)),
        }
    }

    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let data = self
            .call(functions::LIST_CATEGORIES, json!({}))
            .await
            .map_err(map_category_error)?;
        let dtos: Vec<CategoryDto> = decode(data).map_err(map_category_error)?;
        dtos.into_iter()
            .map(CategoryDto::into_domain)
            .collect::<Result<Vec<_>, String>>()
            .map_err(CategoryRepositoryError::query)
    }
}

#[async_trait]
impl ProductRepository for DocumentStore {
    async fn find_by_id(
        &self,
        product_id: &Uuid,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let dto: Option<ProductDto> = self
            .call_optional(functions::GET_PRODUCT, json!({ "id": product_id }))
            .await
            .map_err(map_product_error)?;
        dto.map(ProductDto::into_domain)
            .transpose()
            .map_err(ProductRepositoryError::query)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductRepositoryError> {
        let dto: Option<ProductDto> = self
            .call_optional(functions::GET_PRODUCT_BY_NAME, json!({ "name": name }))
            .await
            .map_err(map_product_error)?;
        dto.map(ProductDto::into_domain)
            .transpose()
            .map_err(ProductRepositoryError::query)
    }

    async fn insert(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        self.call(functions::CREATE_PRODUCT, product_args(product))
            .await
            .map_err(map_product_error)?;
        Ok(())
    }

    async fn update(
        &self,
        product_id: &Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut args = json!({ "id": product_id });
        if let Some(name) = &patch.name {
            args["name"] = json!(name);
        }
        if let Some(description) = &patch.description {
            args["description"] = json!(description);
        }
        if let Some(price) = patch.price {
            args["price"] = json!(price);
        }
        if let Some(stock) = patch.stock {
            args["stock"] = json!(stock);
        }
        if let Some(category) = &patch.category {
            args["category"] = category_args(category);
        }
        let dto: Option<ProductDto> = self
            .call_optional(functions::UPDATE_PRODUCT, args)
            .await
            .map_err(map_product_error)?;
        dto.map(ProductDto::into_domain)
            .transpose()
            .map_err(ProductRepositoryError::query)
    }

    async fn list(
        &self,
        category: Option<String>,
        page_size: PageSize,
        cursor: Option<Cursor>,
    ) -> Result<Page<Product>, ProductRepositoryError> {
        let mut args = page_args(page_size, cursor.as_ref());
        if let Some(category) = category {
            args["category"] = json!(category);
        }
        let data = self
            .call(functions::LIST_PRODUCTS, args)
            .await
            .map_err(map_product_error)?;
        let dto: PageDto<ProductDto> = decode(data).map_err(map_product_error)?;
        into_page(dto, ProductDto::into_domain).map_err(ProductRepositoryError::query)
    }
}

#[async_trait]
impl CustomerRepository for DocumentStore {
    async fn find_by_id(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let dto: Option<CustomerDto> = self
            .call_optional(functions::GET_CUSTOMER, json!({ "id": customer_id }))
            .await
            .map_err(map_customer_error)?;
        dto.map(CustomerDto::into_domain)
            .transpose()
            .map_err(CustomerRepositoryError::query)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let dto: Option<CustomerDto> = self
            .call_optional(functions::GET_CUSTOMER_BY_EMAIL, json!({ "email": email }))
            .await
            .map_err(map_customer_error)?;
        dto.map(CustomerDto::into_domain)
            .transpose()
            .map_err(CustomerRepositoryError::query)
    }

    async fn insert(&self, customer: &Customer) -> Result<(), CustomerRepositoryError> {
        match self
            .call(functions::CREATE_CUSTOMER, customer_args(customer))
            .await
        {
            Ok(_) => Ok(()),
            Err(error) if is_constraint_failure(&error) => {
                Err(CustomerRepositoryError::duplicate_email(customer.email()))
            }
            Err(error) => Err(map_customer_error(error)),
        }
    }
}

#[async_trait]
impl OrderRepository for DocumentStore {
    async fn find_by_id(&self, order_id: &Uuid) -> Result<Option<Order>, OrderRepositoryError> {
        let dto: Option<OrderDto> = self
            .call_optional(functions::GET_ORDER, json!({ "id": order_id }))
            .await
            .map_err(map_order_error)?;
        dto.map(OrderDto::into_domain)
            .transpose()
            .map_err(OrderRepositoryError::query)
    }

    async fn find_cart_for_customer(
        &self,
        customer_id: &Uuid,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let dto: Option<OrderDto> = self
            .call_optional(
                functions::GET_CART_FOR_CUSTOMER,
                json!({ "customerId": customer_id }),
            )
            .await
            .map_err(map_order_error)?;
        dto.map(OrderDto::into_domain)
            .transpose()
            .map_err(OrderRepositoryError::query)
    }

    async fn get_or_create_cart(
        &self,
        customer: &Customer,
    ) -> Result<Order, OrderRepositoryError> {
        let data = self
            .call(
                functions::GET_OR_CREATE_CART,
                json!({ "customer": customer_args(customer) }),
            )
            .await
            .map_err(map_order_error)?;
        let dto: OrderDto = decode(data).map_err(map_order_error)?;
        dto.into_domain().map_err(OrderRepositoryError::query)
    }

    async fn put_cart_item(
        &self,
        customer: &Customer,
        product: &Product,
        quantity: Quantity,
    ) -> Result<Order, OrderRepositoryError> {
        let data = self
            .call(
                functions::CREATE_OR_UPDATE_CART_ITEM,
                json!({
                    "customer": customer_args(customer),
                    "product": product_args(product),
                    "quantity": quantity.get(),
                }),
            )
            .await
            .map_err(map_order_error)?;
        let dto: OrderDto = decode(data).map_err(map_order_error)?;
        dto.into_domain().map_err(OrderRepositoryError::query)
    }

    async fn apply_update(
        &self,
        order_id: &Uuid,
        update: &OrderUpdate,
    ) -> Result<Option<Order>, OrderRepositoryError> {
        let mut args = json!({ "id": order_id });
        if let Some(status) = update.new_status {
            args["status"] = json!(status.as_str());
        }
        if let Some(payment) = &update.payment {
            args["payment"] = serde_json::to_value(PaymentArgs::from(payment))
                .map_err(|error| OrderRepositoryError::query(error.to_string()))?;
        }
        let dto: Option<OrderDto> = self
            .call_optional(functions::UPDATE_ORDER, args)
            .await
            .map_err(map_order_error)?;
        dto.map(OrderDto::into_domain)
            .transpose()
            .map_err(OrderRepositoryError::query)
    }

    async fn list_for_customer(
        &self,
        customer_id: &Uuid,
        page_size: PageSize,
        cursor: Option<Cursor>,
    ) -> Result<Page<OrderSummary>, OrderRepositoryError> {
        let mut args = page_args(page_size, cursor.as_ref());
        args["customerId"] = json!(customer_id);
        let data = self
            .call(functions::LIST_CUSTOMER_ORDERS, args)
            .await
            .map_err(map_order_error)?;
        let dto: PageDto<OrderSummaryDto> = decode(data).map_err(map_order_error)?;
        into_page(dto, OrderSummaryDto::into_domain).map_err(OrderRepositoryError::query)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn api_error(code: &str, message: &str, details: Option<Value>) -> StoreCallError {
        StoreCallError::Api(ApiErrorDto {
            code: code.to_owned(),
            message: message.to_owned(),
            details,
        })
    }

    #[test]
    fn transport_failures_map_to_connection_errors() {
        let error = map_order_error(StoreCallError::Transport {
            message: "connection refused".to_owned(),
        });
        assert_eq!(
            error,
            OrderRepositoryError::connection("connection refused")
        );
    }

    #[test]
    fn timeouts_map_to_connection_errors() {
        let error = map_order_error(StoreCallError::Timeout {
            message: "deadline exceeded".to_owned(),
        });
        assert_eq!(error, OrderRepositoryError::connection("deadline exceeded"));
    }

    #[test]
    fn transition_rejections_rebuild_the_violation_from_details() {
        let error = map_order_error(api_error(
            "invalid_transition",
            "transition refused",
            Some(json!({ "from": "processing", "to": "cart" })),
        ));
        assert_eq!(
            error,
            OrderRepositoryError::rejected(OrderRuleViolation::InvalidTransition {
                from: OrderStatus::Processing,
                to: OrderStatus::Cart,
            })
        );
    }

    #[test]
    fn transition_rejections_without_details_degrade_to_query_errors() {
        let error = map_order_error(api_error("invalid_transition", "transition refused", None));
        assert_eq!(error, OrderRepositoryError::query("transition refused"));
    }

    #[test]
    fn payment_rejections_carry_the_order_status() {
        let error = map_order_error(api_error(
            "payment_not_allowed",
            "payment locked",
            Some(json!({ "status": "shipped" })),
        ));
        assert_eq!(
            error,
            OrderRepositoryError::rejected(OrderRuleViolation::PaymentNotAllowed {
                status: OrderStatus::Shipped,
            })
        );
    }

    #[test]
    fn missing_payment_rejections_need_no_details() {
        let error = map_order_error(api_error("missing_payment", "payment required", None));
        assert_eq!(
            error,
            OrderRepositoryError::rejected(OrderRuleViolation::MissingPayment)
        );
    }

    #[rstest]
    #[case::unknown_code("index_missing", "index 'orders_by_customer' is missing")]
    #[case::internal("internal", "function aborted")]
    fn other_api_errors_keep_the_store_message_verbatim(
        #[case] code: &str,
        #[case] message: &str,
    ) {
        let error = map_order_error(api_error(code, message, None));
        assert_eq!(error, OrderRepositoryError::query(message));
    }

    #[test]
    fn not_found_is_detected_by_code_not_message() {
        assert!(is_not_found(&api_error(
            "document_not_found",
            "anything at all",
            None
        )));
        assert!(!is_not_found(&api_error(
            "internal",
            "document_not_found mentioned in prose",
            None
        )));
    }

    #[test]
    fn pages_carry_the_continuation_token_through_opaque() {
        let summary: OrderSummaryDto = serde_json::from_value(json!({
            "id": "00000000-0000-0000-0000-000000000001",
            "status": "delivered",
            "createdAt": "2026-01-05T09:30:00Z"
        }))
        .expect("decode");
        let dto = PageDto {
            data: vec![summary],
            after: Some("opaque-token".to_owned()),
        };
        let page = into_page(dto, OrderSummaryDto::into_domain).expect("valid page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(
            page.next.map(Cursor::into_token),
            Some("opaque-token".to_owned())
        );
    }

    #[test]
    fn blank_continuation_tokens_are_refused() {
        let dto: PageDto<OrderSummaryDto> = PageDto {
            data: Vec::new(),
            after: Some(String::new()),
        };
        into_page(dto, OrderSummaryDto::into_domain).expect_err("blank token");
    }

    #[test]
    fn page_args_include_the_cursor_when_present() {
        let cursor = Cursor::from_token("abc123").expect("valid token");
        let args = page_args(PageSize::default(), Some(&cursor));
        assert_eq!(args["pageSize"], json!(10));
        assert_eq!(args["after"], json!("abc123"));
    }
}
