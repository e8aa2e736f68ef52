mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{ids, page, start, widget, NewWidget};
use heavy_model::RecordId;
use heavy_sync::gateway::mock::MockGateway;
use heavy_sync::{ListQuery, Status};

#[tokio::test(start_paused = true)]
async fn reads_without_record_changes_are_reference_equal() {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_records(vec![widget(1, "a"), widget(2, "b")]);
    gateway.push_delete(Duration::ZERO, Ok(()));
    let (widgets, _) = start(gateway);
    widgets.load_list(ListQuery::page(1)).settled().await.unwrap();

    let view = widgets.view();
    let first = view.all();
    assert!(Arc::ptr_eq(&first, &view.all()));

    // A delete of an unknown id only touches metadata.
    widgets.delete(RecordId::new(9)).settled().await.unwrap();
    assert!(Arc::ptr_eq(&first, &view.all()));
}

#[tokio::test(start_paused = true)]
async fn by_id_and_ids_follow_the_collection() {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_records(vec![widget(3, "c"), widget(1, "a")]);
    let (widgets, _) = start(gateway);
    widgets.load_list(ListQuery::page(1)).settled().await.unwrap();

    let view = widgets.view();
    assert_eq!(ids(&widgets), vec![3, 1]);
    assert_eq!(view.by_id(&RecordId::new(1)).unwrap().name, "a");
    assert!(view.by_id(&RecordId::new(2)).is_none());
    assert_eq!(view.status(), Status::Ready);
    assert_eq!(view.snapshot().records().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn memo_recomputes_only_on_record_change() {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_records(vec![widget(1, "alpha"), widget(2, "beta")]);
    gateway.push_item(Duration::ZERO, Ok(widget(3, "gamma")));
    let (widgets, _) = start(gateway);
    widgets.load_list(ListQuery::page(1)).settled().await.unwrap();

    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    let names = widgets.view().memoize(move |records| {
        counter.fetch_add(1, Ordering::SeqCst);
        records
            .all()
            .iter()
            .map(|w| w.name.clone())
            .collect::<Vec<_>>()
    });

    let first = names.get();
    let again = names.get();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    widgets
        .create(NewWidget {
            name: "gamma".to_string(),
        })
        .settled()
        .await
        .unwrap();

    let updated = names.get();
    assert_eq!(*updated, vec!["alpha", "beta", "gamma"]);
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn wait_until_observes_a_later_commit() {
    let gateway = Arc::new(MockGateway::new());
    gateway.push_list(Duration::from_millis(250), Ok(page(vec![widget(1, "a")], 1, 1, 1)));
    let (widgets, _) = start(gateway);
    let mut view = widgets.view();

    let _ticket = widgets.load_list(ListQuery::page(1));
    let state = view
        .wait_until(|state| state.records().len() == 1)
        .await
        .unwrap();

    assert!(!state.loading());
    assert_eq!(state.pagination().total, 1);
}

#[tokio::test]
async fn changed_fails_once_engine_and_handles_are_gone() {
    let gateway = Arc::new(MockGateway::<common::Widget>::new());
    let (engine, widgets) = heavy_sync::SyncEngine::new(gateway, heavy_sync::Notices::new(1), 15);
    let mut view = widgets.view();
    drop(engine);
    drop(widgets);

    assert!(view.changed().await.is_err());
}
