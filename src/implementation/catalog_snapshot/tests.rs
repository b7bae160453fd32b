//! # Catalog Snapshot Tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::*;
use crate::types::catalog_item::{CatalogItem, Category, CategoryId, ItemId, ItemKind};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid date") + Duration::days(n)
}

fn scoped(id: &'static str, category: &'static str, created: i64) -> CatalogItem {
    CatalogItem::product(
        ItemId::from_static(id),
        id.to_uppercase(),
        CategoryId::from_static(category),
        10.0,
        day(created),
    )
    .with_tag("scope:global")
}

fn ids(snapshot: &CatalogSnapshot) -> Vec<String> {
    snapshot.items().iter().map(|i| i.id.to_string()).collect()
}

#[test]
fn test_assemble_applies_visibility_policy() {
    let items = vec![
        scoped("a", "cat-1", 0),
        scoped("b", "cat-1", 1).with_tag("Oculto"),
        scoped("c", "cat-1", 2).inactive(),
        CatalogItem::product(ItemId::from_static("d"), "D", CategoryId::from_static("cat-1"), 5.0, day(3)),
        scoped("e", "cat-1", 4).with_tag("SCOPE:GLOBAL"),
    ];
    let snapshot = CatalogSnapshot::assemble(items, Vec::new(), &VisibilityPolicy::default())
        .expect("assemble");
    assert_eq!(ids(&snapshot), vec!["e", "a"]);
}

#[test]
fn test_assemble_everything_policy() {
    let items = vec![
        CatalogItem::product(ItemId::from_static("d"), "D", CategoryId::from_static("c"), 5.0, day(0)),
        scoped("c", "c", 1).inactive(),
    ];
    let snapshot = CatalogSnapshot::assemble(items, Vec::new(), &VisibilityPolicy::everything())
        .expect("assemble");
    assert_eq!(ids(&snapshot), vec!["d"]);
}

#[test]
fn test_assemble_orders_by_sort_date() {
    let mut relisted = scoped("old", "cat-1", 0);
    relisted.listed_at = Some(day(20));
    let items = vec![scoped("mid", "cat-1", 5), relisted, scoped("new", "cat-1", 10)];
    let snapshot = CatalogSnapshot::assemble(items, Vec::new(), &VisibilityPolicy::default())
        .expect("assemble");
    assert_eq!(ids(&snapshot), vec!["old", "new", "mid"]);
}

#[test]
fn test_assemble_recounts_categories() {
    let items = vec![scoped("a", "cat-1", 0), scoped("b", "cat-1", 1), scoped("c", "cat-2", 2)];
    let categories = vec![
        Category::new(CategoryId::from_static("cat-1"), "Figuras").with_product_count(40),
        Category::new(CategoryId::from_static("cat-2"), "Repuestos"),
        Category::new(CategoryId::from_static("cat-3"), "Vacía").with_product_count(7),
    ];
    let snapshot = CatalogSnapshot::assemble(items, categories, &VisibilityPolicy::default())
        .expect("assemble");
    let counts: Vec<u32> = snapshot.categories().iter().map(|c| c.product_count).collect();
    assert_eq!(counts, vec![2, 1, 0]);
}

#[test]
fn test_assemble_rejects_duplicate_ids() {
    let items = vec![scoped("a", "cat-1", 0), scoped("a", "cat-2", 1)];
    let err = CatalogSnapshot::assemble(items, Vec::new(), &VisibilityPolicy::default())
        .expect_err("duplicate");
    assert_eq!(err, CatalogError::DuplicateItem("a".to_string()));
}

#[test]
fn test_assemble_rejects_invalid_prices() {
    let negative = CatalogItem::product(
        ItemId::from_static("n"),
        "N",
        CategoryId::from_static("c"),
        -1.0,
        day(0),
    );
    let err = CatalogSnapshot::assemble(vec![negative], Vec::new(), &VisibilityPolicy::everything())
        .expect_err("negative price");
    assert!(matches!(err, CatalogError::InvalidCatalogData(_)));

    let nan = CatalogItem::product(
        ItemId::from_static("x"),
        "X",
        CategoryId::from_static("c"),
        f64::NAN,
        day(0),
    );
    assert!(CatalogSnapshot::assemble(vec![nan], Vec::new(), &VisibilityPolicy::everything()).is_err());
}

#[test]
fn test_load_from_memory_repository() {
    let repo = InMemoryRepository::default();
    repo.insert_item(scoped("a", "cat-1", 0)).expect("insert");
    repo.insert_category(Category::new(CategoryId::from_static("cat-1"), "Figuras"))
        .expect("insert");

    let snapshot = CatalogSnapshot::load(&repo, &VisibilityPolicy::default()).expect("load");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.categories()[0].product_count, 1);
}

#[test]
fn test_load_or_empty_on_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = JsonFileRepository::new(dir.path().join("missing.json"));

    assert!(matches!(
        CatalogSnapshot::load(&repo, &VisibilityPolicy::default()),
        Err(CatalogError::RepositoryUnavailable(_))
    ));
    let snapshot = CatalogSnapshot::load_or_empty(&repo, &VisibilityPolicy::default());
    assert!(snapshot.is_empty());
    assert!(snapshot.categories().is_empty());
}

#[test]
fn test_json_file_repository_reads_document() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("catalog.json");
    let json = r#"{
        "items": [
            {
                "id": "p1",
                "name": "Figura Dragón",
                "categoryId": "cat-1",
                "createdAt": "2024-01-01T00:00:00Z",
                "tags": ["scope:global"],
                "kind": "product",
                "price": 25.5,
                "stock": 3
            },
            {
                "id": "s1",
                "name": "Modelado 3D",
                "categoryId": "cat-services",
                "createdAt": "2024-01-02T00:00:00Z",
                "tags": ["scope:global"],
                "kind": "service",
                "customPriceDisplay": "Desde 50"
            }
        ],
        "categories": [{ "id": "cat-1", "name": "Figuras" }]
    }"#;
    std::fs::write(&path, json).expect("write");

    let repo = JsonFileRepository::new(&path);
    let snapshot = CatalogSnapshot::load(&repo, &VisibilityPolicy::default()).expect("load");
    let items = snapshot.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind(), ItemKind::Service);
    assert_eq!(items[1].price(), Some(25.5));
    assert!(items[1].is_in_stock());
    assert_eq!(snapshot.categories()[0].product_count, 1);
}

#[test]
fn test_json_file_repository_save_then_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = JsonFileRepository::new(dir.path().join("catalog.json"));
    let document = CatalogDocument {
        items:      vec![scoped("a", "cat-1", 0)],
        categories: vec![Category::new(CategoryId::from_static("cat-1"), "Figuras")],
    };
    repo.save(&document).expect("save");

    assert_eq!(repo.load_items().expect("items"), document.items);
    assert_eq!(repo.load_categories().expect("categories"), document.categories);
}

#[test]
fn test_malformed_json_is_serialization_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = JsonFileRepository::new(&path).load_items().expect_err("malformed");
    assert!(matches!(err, CatalogError::Serialization(_)));
}
