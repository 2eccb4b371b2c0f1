mod common;

use commerce::db::product_repo;
use commerce::errors::AppError;

#[tokio::test]
#[ignore = "needs Postgres at TEST_DATABASE_URL"]
async fn test_product_by_id_with_and_without_category() {
    let pool = common::setup_test_db().await;
    common::clear_products(&pool, "byid-").await;

    let category = common::seed_category(&pool, "byid-Programming").await;
    let with_category = common::seed_product(&pool, "byid-Rust", Some(category.id)).await;
    let without_category = common::seed_product(&pool, "byid-Loose", None).await;
    let dangling = common::seed_product(&pool, "byid-Dangling", Some(-1)).await;

    let product = product_repo::get_product_by_id(&pool, with_category).await.unwrap();
    assert_eq!(product.title, "byid-Rust");
    assert_eq!(product.category, Some(category));

    let product = product_repo::get_product_by_id(&pool, without_category).await.unwrap();
    assert!(product.category.is_none());

    let product = product_repo::get_product_by_id(&pool, dangling).await.unwrap();
    assert!(product.category.is_none());
}

#[tokio::test]
#[ignore = "needs Postgres at TEST_DATABASE_URL"]
async fn test_missing_product_is_not_found() {
    let pool = common::setup_test_db().await;

    let err = product_repo::get_product_by_id(&pool, -42).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore = "needs Postgres at TEST_DATABASE_URL"]
async fn test_products_by_ids_skips_unknown() {
    let pool = common::setup_test_db().await;
    common::clear_products(&pool, "byids-").await;

    let a = common::seed_product(&pool, "byids-A", None).await;
    let b = common::seed_product(&pool, "byids-B", None).await;

    let products = product_repo::get_products_by_ids(&pool, &[b, -7, a]).await.unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![a, b]);

    assert!(product_repo::get_products_by_ids(&pool, &[]).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs Postgres at TEST_DATABASE_URL"]
async fn test_products_by_category_pages() {
    let pool = common::setup_test_db().await;
    common::clear_products(&pool, "bycat-").await;

    let category = common::seed_category(&pool, "bycat-Novels").await;
    for i in 0..5 {
        common::seed_product(&pool, &format!("bycat-{i}"), Some(category.id)).await;
    }

    let first = product_repo::get_products_by_category(&pool, category.id, 0, 3)
        .await
        .unwrap();
    let second = product_repo::get_products_by_category(&pool, category.id, 1, 3)
        .await
        .unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 2);
    assert!(first
        .iter()
        .chain(second.iter())
        .all(|p| p.category.as_ref().map(|c| c.id) == Some(category.id)));

    let err = product_repo::get_products_by_category(&pool, category.id, 0, 0)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
#[ignore = "needs Postgres at TEST_DATABASE_URL"]
async fn test_search_by_keyword_and_category() {
    let pool = common::setup_test_db().await;
    common::clear_products(&pool, "search-").await;

    let category = common::seed_category(&pool, "search-Essays").await;
    common::seed_product(&pool, "search-Zqxw Ownership", Some(category.id)).await;
    common::seed_product(&pool, "search-zqxw borrowing", None).await;
    common::seed_product(&pool, "search-Lifetimes", Some(category.id)).await;

    let by_keyword = product_repo::search_products(&pool, Some("ZQXW"), None, 0, 10)
        .await
        .unwrap();
    assert_eq!(by_keyword.len(), 2);

    let by_both = product_repo::search_products(&pool, Some("zqxw"), Some(category.id), 0, 10)
        .await
        .unwrap();
    assert_eq!(by_both.len(), 1);
    assert_eq!(by_both[0].title, "search-Zqxw Ownership");

    let by_category = product_repo::search_products(&pool, None, Some(category.id), 0, 10)
        .await
        .unwrap();
    assert_eq!(by_category.len(), 2);
}
