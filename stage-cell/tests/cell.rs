use stage0::test_utils::ScriptedScreen;
use stage0::{OrderedCollection, ScreenRef, same_screen};
use stage_cell::{ReactiveCell, ScreenList};
use std::sync::Arc;

fn screen(name: &str) -> ScreenRef {
    Arc::new(ScriptedScreen::new(name))
}

fn names(list: &ScreenList) -> Vec<String> {
    list.snapshot().iter().map(|s| s.name().to_owned()).collect()
}

// --- ReactiveCell ---

#[tokio::test]
async fn set_then_get() {
    let cell = ReactiveCell::new(1);
    cell.set(2);
    assert_eq!(cell.get(), 2);
}

#[tokio::test]
async fn set_notifies_subscribers() {
    let cell = ReactiveCell::new("home");
    let mut rx = cell.subscribe();
    assert!(!rx.has_changed().unwrap());

    cell.set("settings");
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), "settings");
}

#[tokio::test]
async fn reannounce_notifies_without_changing_value() {
    let cell = ReactiveCell::new(5);
    let mut rx = cell.subscribe();

    cell.reannounce();
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), 5);
    assert_eq!(cell.get(), 5);
}

#[tokio::test]
async fn set_without_subscribers_is_fine() {
    let cell: ReactiveCell<Option<u8>> = ReactiveCell::default();
    assert_eq!(cell.subscriber_count(), 0);
    cell.set(Some(3));
    cell.reannounce();
    assert_eq!(cell.get(), Some(3));
}

// --- ScreenList ---

#[tokio::test]
async fn append_keeps_insertion_order() {
    let list = ScreenList::new();
    list.append(screen("a"));
    list.append(screen("b"));
    list.append(screen("c"));
    assert_eq!(names(&list), vec!["a", "b", "c"]);
    assert_eq!(list.len(), 3);
}

#[tokio::test]
async fn remove_is_by_identity() {
    let a = screen("a");
    let impostor = screen("a");
    let list = ScreenList::from_screens([a.clone(), screen("b")]);

    list.remove(&impostor);
    assert_eq!(list.len(), 2);

    list.remove(&a);
    assert_eq!(names(&list), vec!["b"]);
    assert!(!list.contains(&a));
}

#[tokio::test]
async fn index_of_finds_stored_reference() {
    let b = screen("b");
    let list = ScreenList::from_screens([screen("a"), b.clone()]);
    assert_eq!(list.index_of(&b), Some(1));
    assert_eq!(list.index_of(&screen("b")), None);

    let stored = &list.snapshot()[1];
    assert!(same_screen(Some(stored), Some(&b)));
}

#[tokio::test]
async fn snapshot_is_detached_from_later_mutation() {
    let a = screen("a");
    let list = ScreenList::from_screens([a.clone(), screen("b")]);
    let before = list.snapshot();
    list.remove(&a);
    assert_eq!(before.len(), 2);
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn structural_changes_bump_version() {
    let a = screen("a");
    let list = ScreenList::new();
    let mut rx = list.subscribe();

    list.append(a.clone());
    assert_eq!(*rx.borrow_and_update(), 1);

    list.remove(&screen("missing"));
    assert!(!rx.has_changed().unwrap());

    list.remove(&a);
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), 2);
    assert!(list.is_empty());
}
