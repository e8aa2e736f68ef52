mod common;

use std::time::Duration;

use common::{widget, Widget};
use heavy_sync::gateway::mock::MockGateway;
use heavy_sync::{ListQuery, Severity, SyncConfig, SyncHub};

fn hub() -> SyncHub<MockGateway<Widget>> {
    SyncHub::with_gateway(MockGateway::new(), &SyncConfig::default())
}

#[tokio::test(start_paused = true)]
async fn resource_handles_share_one_engine() {
    let hub = hub();
    hub.gateway().push_records(vec![widget(1, "a"), widget(2, "b")]);

    let writer = hub.resource::<Widget>();
    let reader = hub.resource::<Widget>();
    writer.load_list(ListQuery::page(1)).settled().await.unwrap();

    assert_eq!(reader.view().len(), 2);
    assert_eq!(hub.gateway().calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn hub_uses_configured_page_size() {
    let config = SyncConfig {
        default_per_page: 50,
        ..Default::default()
    };
    let hub = SyncHub::with_gateway(MockGateway::<Widget>::new(), &config);
    hub.gateway().push_records(vec![]);

    hub.resource::<Widget>()
        .load_list(ListQuery::page(1))
        .settled()
        .await
        .unwrap();

    let calls = hub.gateway().calls();
    assert_eq!(
        calls,
        vec![heavy_sync::gateway::mock::Call::List(
            ListQuery::page(1).with_per_page(50)
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn notices_reach_hub_subscribers() {
    let hub = hub();
    hub.gateway()
        .push_item(Duration::from_millis(10), Ok(widget(5, "new")));
    let mut notices = hub.notices();

    hub.resource::<Widget>()
        .create(common::NewWidget {
            name: "new".to_string(),
        })
        .settled()
        .await
        .unwrap();

    let notice = notices.recv().await.unwrap();
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(notice.message, "widget created");
    assert_eq!(notice.lifetime(), Duration::from_secs(3));
}

#[test]
fn hub_debug_reports_started_engines() {
    let hub = hub();
    let debug = format!("{hub:?}");
    assert!(debug.contains("SyncHub"));
    assert!(debug.contains("resources: 0"));
}
