use stage0::test_utils::{ScriptedScreen, new_journal};
use stage0::{Capability, OrderedCollection, ScreenRef, same_screen};
use stage_activator::{Activator, Settings, determine_next_item};
use stage_cell::ScreenList;
use std::sync::Arc;
use std::time::Duration;

fn screen_ref(screen: &Arc<ScriptedScreen>) -> ScreenRef {
    screen.clone()
}

fn names(list: &ScreenList) -> Vec<String> {
    list.snapshot().iter().map(|s| s.name().to_owned()).collect()
}

fn active_name(activator: &Activator) -> Option<String> {
    activator.active().map(|s| s.name().to_owned())
}

fn tabs(screens: &[&Arc<ScriptedScreen>]) -> (Arc<ScreenList>, Arc<Activator>) {
    let list = Arc::new(ScreenList::from_screens(screens.iter().map(|s| screen_ref(s))));
    let activator = Activator::builder().collection(list.clone()).build();
    (list, activator)
}

// --- Neighbour policy ---

#[test]
fn leaving_first_picks_right_neighbour() {
    let list: Vec<ScreenRef> = ["a", "b", "c"]
        .into_iter()
        .map(|n| Arc::new(ScriptedScreen::new(n)) as ScreenRef)
        .collect();
    assert_eq!(determine_next_item(&list, 0).unwrap().name(), "b");
}

#[test]
fn leaving_later_screen_picks_left_neighbour() {
    let list: Vec<ScreenRef> = ["a", "b", "c"]
        .into_iter()
        .map(|n| Arc::new(ScriptedScreen::new(n)) as ScreenRef)
        .collect();
    assert_eq!(determine_next_item(&list, 2).unwrap().name(), "b");
    assert_eq!(determine_next_item(&list, 1).unwrap().name(), "a");
}

#[test]
fn leaving_sole_screen_picks_nothing() {
    let list: Vec<ScreenRef> = vec![Arc::new(ScriptedScreen::new("a"))];
    assert!(determine_next_item(&list, 0).is_none());
    assert!(determine_next_item(&[], 0).is_none());
}

#[test]
fn index_past_the_end_picks_nothing() {
    let list: Vec<ScreenRef> = ["a", "b", "c"]
        .into_iter()
        .map(|n| Arc::new(ScriptedScreen::new(n)) as ScreenRef)
        .collect();
    assert!(determine_next_item(&list, 3).is_none());
}

// --- Candidate resolution ---

#[tokio::test]
async fn collection_mode_never_closes_on_switch() {
    let a = Arc::new(ScriptedScreen::full("a"));
    let b = Arc::new(ScriptedScreen::full("b"));
    let (list, activator) = tabs(&[&a, &b]);
    assert!(!activator.settings().close_on_deactivate);

    activator.activate_item(Some(screen_ref(&a))).await.unwrap();
    activator.activate_item(Some(screen_ref(&b))).await.unwrap();

    assert_eq!(names(&list), vec!["a", "b"]);
    assert!(a.calls().iter().any(|c| c.capability == Capability::Deactivate && c.close == Some(false)));
}

#[tokio::test]
async fn unknown_candidate_is_appended() {
    let a = Arc::new(ScriptedScreen::new("a"));
    let fresh = Arc::new(ScriptedScreen::full("fresh"));
    let (list, activator) = tabs(&[&a]);

    assert!(activator.activate_item(Some(screen_ref(&fresh))).await.unwrap());
    assert_eq!(names(&list), vec!["a", "fresh"]);
    assert_eq!(active_name(&activator).as_deref(), Some("fresh"));
}

#[tokio::test]
async fn known_candidate_is_not_duplicated() {
    let a = Arc::new(ScriptedScreen::new("a"));
    let b = Arc::new(ScriptedScreen::new("b"));
    let (list, activator) = tabs(&[&a, &b]);

    activator.activate_item(Some(screen_ref(&b))).await.unwrap();
    activator.activate_item(Some(screen_ref(&a))).await.unwrap();
    activator.activate_item(Some(screen_ref(&b))).await.unwrap();

    assert_eq!(list.len(), 2);
    let stored = list.snapshot()[1].clone();
    assert!(same_screen(activator.active().as_ref(), Some(&stored)));
}

#[tokio::test]
async fn absent_candidate_picks_neighbour_of_active() {
    let a = Arc::new(ScriptedScreen::new("a"));
    let b = Arc::new(ScriptedScreen::new("b"));
    let c = Arc::new(ScriptedScreen::new("c"));
    let (_list, activator) = tabs(&[&a, &b, &c]);

    activator.activate_item(Some(screen_ref(&a))).await.unwrap();
    activator.activate_item(None).await.unwrap();
    assert_eq!(active_name(&activator).as_deref(), Some("b"));

    activator.activate_item(Some(screen_ref(&c))).await.unwrap();
    activator.activate_item(None).await.unwrap();
    assert_eq!(active_name(&activator).as_deref(), Some("b"));
}

#[tokio::test]
async fn absent_candidate_with_sole_screen_clears_slot() {
    let a = Arc::new(ScriptedScreen::new("a"));
    let (list, activator) = tabs(&[&a]);

    activator.activate_item(Some(screen_ref(&a))).await.unwrap();
    assert!(activator.activate_item(None).await.unwrap());
    assert!(activator.active().is_none());
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn closing_the_active_tab_leaves_no_neighbour() {
    let a = Arc::new(ScriptedScreen::full("a"));
    let b = Arc::new(ScriptedScreen::full("b"));
    let c = Arc::new(ScriptedScreen::full("c"));
    let (list, activator) = tabs(&[&a, &b, &c]);
    activator.activate_item(Some(screen_ref(&b))).await.unwrap();

    assert!(activator.deactivate_item(Some(&screen_ref(&b)), true).await.unwrap());
    assert_eq!(names(&list), vec!["a", "c"]);
    // The slot still points at the closed tab until the next transition.
    assert!(same_screen(activator.active().as_ref(), Some(&screen_ref(&b))));

    assert!(activator.activate_item(None).await.unwrap());
    assert!(activator.active().is_none());
    assert_eq!(names(&list), vec!["a", "c"]);
    assert_eq!(a.count(Capability::Activate), 0);
    assert_eq!(c.count(Capability::Activate), 0);
}

#[tokio::test]
async fn custom_neighbour_policy_is_used() {
    let a = Arc::new(ScriptedScreen::new("a"));
    let b = Arc::new(ScriptedScreen::new("b"));
    let c = Arc::new(ScriptedScreen::new("c"));
    let list = Arc::new(ScreenList::from_screens([
        screen_ref(&a),
        screen_ref(&b),
        screen_ref(&c),
    ]));
    let settings = Settings::default().with_next_item_policy(|list, _| list.last().cloned());
    let activator = Activator::builder()
        .settings(settings)
        .collection(list)
        .build();

    activator.activate_item(Some(screen_ref(&a))).await.unwrap();
    activator.activate_item(None).await.unwrap();
    assert_eq!(active_name(&activator).as_deref(), Some("c"));
}

#[tokio::test]
async fn closing_deactivation_removes_from_collection() {
    let a = Arc::new(ScriptedScreen::full("a"));
    let b = Arc::new(ScriptedScreen::full("b"));
    let (list, activator) = tabs(&[&a, &b]);

    assert!(activator.deactivate_item(Some(&screen_ref(&b)), true).await.unwrap());
    assert_eq!(names(&list), vec!["a"]);

    assert!(activator.deactivate_item(Some(&screen_ref(&a)), false).await.unwrap());
    assert_eq!(names(&list), vec!["a"]);
}

// --- Bulk close ---

#[tokio::test]
async fn can_close_all_is_conjunctive_regardless_of_completion_order() {
    let journal = new_journal();
    let a = Arc::new(
        ScriptedScreen::full("a")
            .with_journal(journal.clone())
            .with_delay(Capability::CanDeactivate, Duration::from_millis(30)),
    );
    let b = Arc::new(
        ScriptedScreen::full("b")
            .with_journal(journal.clone())
            .with_can_deactivate("No")
            .with_delay(Capability::CanDeactivate, Duration::from_millis(5)),
    );
    let c = Arc::new(
        ScriptedScreen::full("c")
            .with_journal(journal.clone())
            .with_delay(Capability::CanDeactivate, Duration::from_millis(15)),
    );
    let (list, activator) = tabs(&[&a, &b, &c]);

    assert!(!activator.can_deactivate(true).await.unwrap());
    // Every guard ran even though b refused first.
    for screen in [&a, &b, &c] {
        assert_eq!(screen.count(Capability::CanDeactivate), 1);
    }
    assert_eq!(list.len(), 3);

    b.set_can_deactivate("Yes");
    assert!(activator.can_deactivate(true).await.unwrap());
}

#[tokio::test]
async fn can_close_all_refuses_when_last_to_finish_refuses() {
    let a = Arc::new(ScriptedScreen::full("a").with_delay(Capability::CanDeactivate, Duration::from_millis(5)));
    let b = Arc::new(ScriptedScreen::full("b").with_delay(Capability::CanDeactivate, Duration::from_millis(10)));
    let c = Arc::new(
        ScriptedScreen::full("c")
            .with_can_deactivate(false)
            .with_delay(Capability::CanDeactivate, Duration::from_millis(40)),
    );
    let (_list, activator) = tabs(&[&a, &b, &c]);

    assert!(!activator.can_deactivate(true).await.unwrap());
}

#[tokio::test]
async fn close_all_empties_collection_after_every_deactivation() {
    let a = Arc::new(ScriptedScreen::full("a").with_delay(Capability::Deactivate, Duration::from_millis(30)));
    let b = Arc::new(ScriptedScreen::full("b").with_delay(Capability::Deactivate, Duration::from_millis(5)));
    let c = Arc::new(ScriptedScreen::full("c").with_delay(Capability::Deactivate, Duration::from_millis(15)));
    let (list, activator) = tabs(&[&a, &b, &c]);
    activator.activate_item(Some(screen_ref(&b))).await.unwrap();

    assert!(activator.deactivate(true).await.unwrap());

    assert!(list.is_empty());
    for screen in [&a, &b, &c] {
        assert_eq!(screen.count(Capability::Deactivate), 1);
        assert!(screen.calls().iter().any(|c| c.capability == Capability::Deactivate && c.close == Some(true)));
    }
}

#[tokio::test]
async fn close_all_removes_screens_that_refuse() {
    let a = Arc::new(ScriptedScreen::full("a"));
    let stubborn = Arc::new(ScriptedScreen::full("stubborn").with_can_deactivate(false));
    let (list, activator) = tabs(&[&a, &stubborn]);

    assert!(activator.deactivate(true).await.unwrap());
    assert!(list.is_empty());
    assert_eq!(stubborn.count(Capability::Deactivate), 0);
}

#[tokio::test]
async fn bulk_close_of_empty_collection_resolves() {
    let (list, activator) = tabs(&[]);
    assert!(activator.can_deactivate(true).await.unwrap());
    assert!(activator.deactivate(true).await.unwrap());
    assert!(list.is_empty());
}

#[tokio::test]
async fn non_closing_queries_target_only_the_active_screen() {
    let a = Arc::new(ScriptedScreen::full("a"));
    let b = Arc::new(ScriptedScreen::full("b").with_can_deactivate(false));
    let (list, activator) = tabs(&[&a, &b]);
    activator.activate_item(Some(screen_ref(&a))).await.unwrap();

    assert!(activator.can_deactivate(false).await.unwrap());
    assert_eq!(b.count(Capability::CanDeactivate), 0);

    assert!(activator.deactivate(false).await.unwrap());
    assert_eq!(a.count(Capability::Deactivate), 1);
    assert_eq!(list.len(), 2);
}
