use std::time::Duration;

use chrono::NaiveDate;

use hoflow::{
    config::RegistryConfig,
    officer::OfficerForm,
    registration::{Field, FixedClock},
    runtime::{
        events::RegistryEvent,
        handle::{RuntimeError, spawn_registry},
    },
    session::{RegisterError, Session},
    types::Unit,
    view::{UnitFilter, ViewQuery},
};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
}

fn form(name: &str, unit: &str) -> OfficerForm {
    OfficerForm {
        full_name: name.to_string(),
        gender: Some("Male".to_string()),
        date_signed_in: Some(d(2025, 1, 15)),
        unit_assigned: Some(unit.to_string()),
        clinical_presentation_topic: "Community Acquired Pneumonia".to_string(),
        clinical_presentation_date: Some(d(2025, 2, 1)),
    }
}

fn session() -> Session<FixedClock> {
    Session::new(RegistryConfig::default(), FixedClock(d(2025, 3, 1)))
}

#[tokio::test]
async fn runtime_register_view_remove_and_events_ordered() {
    let handle = spawn_registry(session());
    let mut sub = handle.subscribe();

    let a = handle.register(form("Kelechi Orji", "Pulmonology")).await.expect("a");
    let b = handle.register(form("Musa Bello", "Neurology")).await.expect("b");

    let pulmonology = handle
        .view(ViewQuery {
            unit: UnitFilter::Only(Unit::Pulmonology),
            ..ViewQuery::default()
        })
        .await
        .expect("view");
    assert_eq!(pulmonology, vec![a.clone()]);

    let removed = handle.remove(a.id).await.expect("remove");
    assert_eq!(removed.map(|r| r.id), Some(a.id));
    assert!(handle.remove(a.id).await.expect("remove again").is_none());
    assert_eq!(handle.get(b.id).await.expect("get"), Some(b.clone()));
    assert_eq!(handle.list().await.expect("list"), vec![b.clone()]);

    let agg = handle.aggregates().await.expect("aggregates");
    assert_eq!(agg.units.len(), 1);
    assert_eq!(agg.units[0].unit, Unit::Neurology);

    let mut seen = Vec::new();
    while seen.len() < 3 {
        let evt = tokio::time::timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("event")
            .expect("recv");
        seen.push(evt);
    }
    assert_eq!(
        seen,
        vec![
            RegistryEvent::Registered { id: a.id },
            RegistryEvent::Registered { id: b.id },
            RegistryEvent::Removed { id: a.id },
        ]
    );

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn runtime_reports_validation_errors_without_events() {
    let handle = spawn_registry(session());
    let mut sub = handle.subscribe();

    let err = handle
        .register(form("Musa Bello", "Cardiology 3"))
        .await
        .unwrap_err();
    match err {
        RuntimeError::Register(RegisterError::Validation(errs)) => {
            assert_eq!(errs.fields(), vec![Field::UnitAssigned]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(handle.list().await.expect("list").is_empty());
    assert!(sub.try_recv().is_err());

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn requests_after_shutdown_report_channel_closed() {
    let handle = spawn_registry(session());
    handle.shutdown().await.expect("shutdown");

    let err = handle.list().await.unwrap_err();
    assert!(matches!(err, RuntimeError::ChannelClosed));
}
