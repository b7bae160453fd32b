use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use super::*;

fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("valid date")
        + Duration::minutes(minutes)
}

fn line(id: &'static str, quantity: u32, minutes: i64) -> CartLine {
    CartLine::new(ItemId::from_static(id), quantity, at(minutes))
}

#[test]
fn test_upsert_overwrites_same_item() {
    let store = ScratchCartStore::new();
    store.upsert(line("a", 1, 0)).expect("upsert");
    store.upsert(line("b", 2, 1)).expect("upsert");
    store.upsert(line("a", 5, 2)).expect("upsert");

    let lines = store.lines().expect("lines");
    assert_eq!(lines, vec![line("a", 5, 2), line("b", 2, 1)]);
}

#[test]
fn test_upsert_rejects_zero_quantity() {
    let store = ScratchCartStore::new();
    assert_eq!(store.upsert(line("a", 0, 0)), Err(CartError::InvalidQuantity));
    assert!(store.lines().expect("lines").is_empty());
}

#[test]
fn test_remove_and_clear() {
    let store = ScratchCartStore::new();
    store.upsert(line("a", 1, 0)).expect("upsert");
    store.upsert(line("b", 1, 0)).expect("upsert");

    store.remove(&ItemId::from_static("a")).expect("remove");
    assert_eq!(
        store.remove(&ItemId::from_static("a")),
        Err(CartError::ItemNotInCart("a".to_string()))
    );
    assert_eq!(store.lines().expect("lines").len(), 1);

    store.clear().expect("clear");
    assert!(store.lines().expect("lines").is_empty());
}

#[test]
fn test_merge_last_write_wins() {
    let local = vec![line("a", 3, 10), line("b", 1, 0), line("c", 4, 5)];
    let remote = vec![line("b", 2, 5), line("a", 1, 0), line("d", 1, 1)];

    let merged = merge_cart_lines(&local, &remote);
    assert_eq!(merged, vec![line("b", 2, 5), line("a", 3, 10), line("d", 1, 1), line("c", 4, 5)]);
}

#[test]
fn test_merge_tie_keeps_remote() {
    let merged = merge_cart_lines(&[line("a", 9, 0)], &[line("a", 1, 0)]);
    assert_eq!(merged, vec![line("a", 1, 0)]);
}

#[test]
fn test_promote_into_remote() {
    let scratch = ScratchCartStore::new();
    scratch.upsert(line("a", 2, 3)).expect("upsert");
    scratch.upsert(line("new", 1, 0)).expect("upsert");

    let remote = ScratchCartStore::new();
    remote.upsert(line("a", 7, 1)).expect("upsert");

    let merged = scratch.promote_into(&remote).expect("promote");
    assert_eq!(merged, vec![line("a", 2, 3), line("new", 1, 0)]);
    assert_eq!(remote.lines().expect("lines"), merged);
    assert!(scratch.lines().expect("lines").is_empty());
}

/// Remote store that accepts a limited number of writes.
#[derive(Debug, Default)]
struct FlakyStore {
    inner:          ScratchCartStore,
    writes_allowed: AtomicUsize,
}

impl FlakyStore {
    fn allow(&self, writes: usize) {
        self.writes_allowed.store(writes, Ordering::SeqCst);
    }
}

impl CartStore for FlakyStore {
    fn lines(&self) -> CartResult<Vec<CartLine>> {
        self.inner.lines()
    }

    fn upsert(&self, line: CartLine) -> CartResult<()> {
        let left = self.writes_allowed.load(Ordering::SeqCst);
        if left == 0 {
            return Err(CartError::StoreUnavailable("offline".to_string()));
        }
        self.writes_allowed.store(left - 1, Ordering::SeqCst);
        self.inner.upsert(line)
    }

    fn remove(&self, item_id: &ItemId) -> CartResult<()> {
        self.inner.remove(item_id)
    }

    fn clear(&self) -> CartResult<()> {
        self.inner.clear()
    }
}

#[test]
fn test_failed_promotion_loses_nothing() {
    let remote = FlakyStore::default();
    remote.inner.upsert(line("a", 7, 1)).expect("seed");
    remote.inner.upsert(line("b", 1, 0)).expect("seed");

    let scratch = ScratchCartStore::new();
    scratch.upsert(line("a", 2, 3)).expect("upsert");
    scratch.upsert(line("c", 1, 0)).expect("upsert");
    scratch.upsert(line("d", 4, 0)).expect("upsert");

    remote.allow(1);
    let err = scratch.promote_into(&remote).expect_err("second write fails");
    assert_eq!(err, CartError::StoreUnavailable("offline".to_string()));
    assert_eq!(remote.lines().expect("lines"), vec![line("a", 2, 3), line("b", 1, 0)]);
    assert_eq!(scratch.lines().expect("lines").len(), 3);

    remote.allow(10);
    let merged = scratch.promote_into(&remote).expect("retry");
    assert_eq!(merged, vec![line("a", 2, 3), line("b", 1, 0), line("c", 1, 0), line("d", 4, 0)]);
    assert_eq!(remote.lines().expect("lines"), merged);
    assert!(scratch.lines().expect("lines").is_empty());
}
