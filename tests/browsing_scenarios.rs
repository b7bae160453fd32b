//! End-to-end browsing sessions: repository records in, query strings and
//! visible lists out.

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use storefront_catalog::{
    CatalogConfig, CatalogController, CatalogItem, CatalogSnapshot, Category, CategoryId,
    FilterPatch, InMemoryRepository, ItemId, MemoryNavigation, NavigationHost, NavigationOutcome,
    SortField, SortOrder, TypeFilter, VisibilityPolicy,
};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single().expect("valid date") + Duration::days(n)
}

fn product(id: &'static str, name: &str, price: f64, created: i64) -> CatalogItem {
    CatalogItem::product(ItemId::from_static(id), name, CategoryId::from_static("cat-1"), price, day(created))
        .with_tag("scope:global")
}

fn three_products() -> Vec<CatalogItem> {
    vec![product("p10", "Llavero", 10.0, 0), product("p50", "Maqueta", 50.0, 1), product("p90", "Busto", 90.0, 2)]
}

fn session(items: Vec<CatalogItem>, query: &str) -> CatalogController<MemoryNavigation> {
    let config = CatalogConfig::default();
    let snapshot = CatalogSnapshot::assemble(items, Vec::new(), &config.visibility).expect("assemble");
    CatalogController::new(snapshot, config, MemoryNavigation::new("/catalog").with_query(query))
}

fn visible_ids<H: NavigationHost>(ctl: &CatalogController<H>) -> Vec<String> {
    ctl.visible_items().iter().map(|i| i.id.to_string()).collect()
}

#[test]
fn scenario_default_state_lists_everything_newest_first() {
    let ctl = session(three_products(), "");
    assert_eq!(ctl.dynamic_max_price(), 90.0);
    assert_eq!(ctl.filter_state().max_price, 90.0);
    assert_eq!(visible_ids(&ctl), vec!["p90", "p50", "p10"]);
}

#[test]
fn scenario_price_range_omits_default_max() {
    let mut ctl = session(three_products(), "");
    let outcome = ctl.apply_filters(FilterPatch::new().price_range(20.0, 90.0)).expect("apply");

    assert_eq!(outcome, NavigationOutcome::Replaced("minPrice=20".to_string()));
    assert_eq!(ctl.host().location(), "/catalog?minPrice=20");
    assert_eq!(visible_ids(&ctl), vec!["p90", "p50"]);
}

#[test]
fn scenario_search_is_case_insensitive_substring() {
    let items = vec![product("proto", "Prototipo Mecánico", 30.0, 0), product("maq", "Maqueta", 20.0, 1)];
    let mut ctl = session(items, "");
    ctl.set_search_query("proto").expect("search");

    assert_eq!(ctl.host().location(), "/catalog?q=proto");
    assert_eq!(visible_ids(&ctl), vec!["proto"]);
}

#[test]
fn scenario_toggle_category_twice_drops_parameter() {
    let mut ctl = session(three_products(), "");
    let cat = CategoryId::from_static("cat-1");

    ctl.toggle_category(&cat).expect("toggle");
    assert_eq!(ctl.host().location(), "/catalog?category=cat-1");

    ctl.toggle_category(&cat).expect("toggle");
    assert!(ctl.filter_state().category_ids.is_empty());
    assert_eq!(ctl.host().location(), "/catalog");
}

#[test]
fn scenario_service_without_price_sorts_as_zero() {
    let mut items = three_products();
    items.push(
        CatalogItem::service(ItemId::from_static("svc"), "Diseño a medida", CategoryId::from_static("cat-1"), day(3))
            .with_tag("scope:global"),
    );
    let mut ctl = session(items, "type=all&minPrice=20");
    assert_eq!(visible_ids(&ctl), vec!["svc", "p90", "p50"]);

    ctl.apply_filters(FilterPatch::new().sort(SortField::Price, SortOrder::Asc)).expect("apply");
    assert_eq!(visible_ids(&ctl), vec!["svc", "p50", "p90"]);

    ctl.apply_filters(FilterPatch::new().sort(SortField::Price, SortOrder::Desc)).expect("apply");
    assert_eq!(visible_ids(&ctl), vec!["p90", "p50", "svc"]);
}

#[test]
fn scenario_malformed_number_falls_back_to_default() {
    let ctl = session(three_products(), "?minPrice=abc");
    assert_eq!(ctl.filter_state().min_price, 0.0);
    assert_eq!(ctl.query_string(), "");
    assert_eq!(visible_ids(&ctl).len(), 3);
}

#[test]
fn scenario_shared_link_round_trips_through_a_new_session() {
    let mut first = session(three_products(), "utm_source=mail");
    first
        .apply_filters(
            FilterPatch::new()
                .item_type(TypeFilter::All)
                .sort(SortField::Name, SortOrder::Asc)
                .max_price(60.0),
        )
        .expect("apply");
    first.set_search_query("a").expect("search");

    let shared = first.host().current_query();
    assert_eq!(shared, "type=all&sort=name&order=asc&maxPrice=60&q=a&utm_source=mail");

    let second = session(three_products(), &shared);
    assert_eq!(second.filter_state(), first.filter_state());
    assert_eq!(second.search_text(), first.search_text());
    assert_eq!(visible_ids(&second), vec!["p10", "p50"]);
}

#[test]
fn scenario_repository_to_view() {
    let repo = InMemoryRepository::new(
        vec![
            product("visible", "Figura", 15.0, 0).featured(),
            product("hidden", "Borrador", 5.0, 1).with_tag("scope:hidden"),
            CatalogItem::product(ItemId::from_static("local"), "Local", CategoryId::from_static("cat-1"), 99.0, day(2)),
        ],
        vec![Category::new(CategoryId::from_static("cat-1"), "Figuras").with_product_count(12)],
    );
    let config = CatalogConfig::default();
    let snapshot = CatalogSnapshot::load(&repo, &VisibilityPolicy::default()).expect("load");
    let ctl = CatalogController::new(snapshot, config, MemoryNavigation::new("/catalog"));

    let view = ctl.view();
    assert_eq!(view.dynamic_max_price, 15.0);
    assert_eq!(view.visible_items.len(), 1);
    assert_eq!(view.featured_items.len(), 1);
    assert_eq!(view.categories[0].product_count, 1);
}
