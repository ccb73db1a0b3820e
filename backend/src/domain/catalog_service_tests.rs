//! Regression coverage for the catalogue service.
use std::sync::Arc;

use rstest::rstest;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockCategoryRepository, MockProductRepository};

fn electronics() -> Category {
    Category::new("electronics", "gadgets").expect("valid category")
}

fn widget() -> Product {
    Product::new("Widget", "a widget", 250, 10, electronics()).expect("valid product")
}

fn service(
    products: MockProductRepository,
    categories: MockCategoryRepository,
) -> CatalogService<MockProductRepository, MockCategoryRepository> {
    CatalogService::new(Arc::new(products), Arc::new(categories))
}

#[rstest]
#[tokio::test]
async fn creating_a_product_in_an_unknown_category_is_invalid() {
    let mut categories = MockCategoryRepository::new();
    categories.expect_find_by_name().returning(|_| Ok(None));
    let mut products = MockProductRepository::new();
    products.expect_insert().never();

    let svc = service(products, categories);
    let err = svc
        .create_product(CreateProductRequest {
            name: "Widget".into(),
            description: "a widget".into(),
            price: 250,
            stock: 10,
            category: "nonexistent".into(),
        })
        .await
        .expect_err("unknown category");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
    assert_eq!(err.message, "Category does not exist.");
}

#[rstest]
#[tokio::test]
async fn creating_a_product_resolves_and_stores_the_category() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_find_by_name()
        .withf(|name| name == "electronics")
        .returning(|_| Ok(Some(electronics())));
    let mut products = MockProductRepository::new();
    products.expect_insert().returning(|_| Ok(()));

    let svc = service(products, categories);
    let product = svc
        .create_product(CreateProductRequest {
            name: "Widget".into(),
            description: "a widget".into(),
            price: 250,
            stock: 10,
            category: "electronics".into(),
        })
        .await
        .expect("product created");

    assert_eq!(product.name(), "Widget");
    assert_eq!(product.category().name(), "electronics");
}

#[rstest]
#[tokio::test]
async fn empty_product_update_is_rejected() {
    let mut products = MockProductRepository::new();
    products.expect_update().never();

    let svc = service(products, MockCategoryRepository::new());
    let err = svc
        .update_product(&Uuid::new_v4(), UpdateProductRequest::default())
        .await
        .expect_err("nothing to update");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
    assert_eq!(err.message, "At least one field must be updated.");
}

#[rstest]
#[tokio::test]
async fn product_update_rejects_blank_names() {
    let svc = service(MockProductRepository::new(), MockCategoryRepository::new());
    let err = svc
        .update_product(
            &Uuid::new_v4(),
            UpdateProductRequest {
                name: Some("   ".into()),
                ..UpdateProductRequest::default()
            },
        )
        .await
        .expect_err("blank name");

    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn product_update_moves_to_a_resolved_category() {
    let books = Category::new("books", "printed matter").expect("valid category");
    let mut categories = MockCategoryRepository::new();
    let resolved = books.clone();
    categories
        .expect_find_by_name()
        .withf(|name| name == "books")
        .returning(move |_| Ok(Some(resolved.clone())));

    let expected_category = books.clone();
    let mut updated = widget();
    updated.apply_patch(&ProductPatch {
        category: Some(books.clone()),
        ..ProductPatch::default()
    });
    let stored = updated.clone();
    let mut products = MockProductRepository::new();
    products
        .expect_update()
        .withf(move |_, patch| patch.category.as_ref() == Some(&expected_category))
        .returning(move |_, _| Ok(Some(stored.clone())));

    let svc = service(products, categories);
    let result = svc
        .update_product(
            &updated.id(),
            UpdateProductRequest {
                category: Some("books".into()),
                ..UpdateProductRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(result.category().name(), "books");
}

#[rstest]
#[tokio::test]
async fn updating_an_unknown_product_is_not_found() {
    let product_id = Uuid::new_v4();
    let mut products = MockProductRepository::new();
    products.expect_update().returning(|_, _| Ok(None));

    let svc = service(products, MockCategoryRepository::new());
    let err = svc
        .update_product(
            &product_id,
            UpdateProductRequest {
                price: Some(300),
                ..UpdateProductRequest::default()
            },
        )
        .await
        .expect_err("unknown product");

    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(
        err.message,
        format!("No product with id '{product_id}' exists.")
    );
}

#[rstest]
#[tokio::test]
async fn duplicate_category_names_conflict() {
    let mut categories = MockCategoryRepository::new();
    categories
        .expect_insert()
        .returning(|_| Err(CategoryRepositoryError::duplicate_name("books")));

    let svc = service(MockProductRepository::new(), categories);
    let err = svc
        .create_category(CreateCategoryRequest {
            name: "books".into(),
            description: "printed matter".into(),
        })
        .await
        .expect_err("duplicate name");

    assert_eq!(err.code, ErrorCode::Conflict);
    assert_eq!(err.message, "A category named 'books' already exists.");
}

#[rstest]
#[tokio::test]
async fn listing_products_passes_the_category_filter_through() {
    let mut products = MockProductRepository::new();
    products
        .expect_list()
        .withf(|category, _, _| category.as_deref() == Some("electronics"))
        .returning(|_, _, _| Ok(Page::new(vec![widget()], None)));

    let svc = service(products, MockCategoryRepository::new());
    let page = svc
        .list_products(ListProductsRequest {
            category: Some("electronics".into()),
            ..ListProductsRequest::default()
        })
        .await
        .expect("list succeeds");

    assert_eq!(page.items.len(), 1);
    assert!(page.next.is_none());
}
