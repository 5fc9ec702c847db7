use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use chrono::{Days, NaiveDate};
use hoflow::{
    aggregate::Aggregates,
    config::RegistryConfig,
    officer::OfficerForm,
    registration::FixedClock,
    session::Session,
    types::Unit,
    view::{SortKey, UnitFilter, ViewQuery},
};

fn form(i: u64) -> OfficerForm {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).expect("date");
    let signed = base + Days::new(i % 1500);
    OfficerForm {
        full_name: format!("Officer {i}"),
        gender: Some(if i % 2 == 0 { "Male" } else { "Female" }.to_string()),
        date_signed_in: Some(signed),
        unit_assigned: Some(Unit::ALL[(i % 9) as usize].as_str().to_string()),
        clinical_presentation_topic: format!("Case review {i}"),
        clinical_presentation_date: Some(signed + Days::new(i % 60)),
    }
}

fn session_with(n: u64) -> Session<FixedClock> {
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
    let mut session = Session::new(RegistryConfig::default(), FixedClock(today));
    for i in 0..n {
        let _ = session.register(&form(i)).expect("register");
    }
    session
}

fn bench_register(c: &mut Criterion) {
    c.bench_function("session_register_10k", |b| {
        b.iter(|| session_with(10_000));
    });
}

fn bench_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_derivation");
    for n in [100u64, 1_000, 10_000] {
        let session = session_with(n);
        let query = ViewQuery {
            search: "7".to_string(),
            unit: UnitFilter::Only(Unit::Nephrology),
            sort: SortKey::Name,
            ..ViewQuery::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| query.apply(session.store().iter()).len());
        });
    }
    group.finish();
}

fn bench_aggregates(c: &mut Criterion) {
    let session = session_with(10_000);
    c.bench_function("aggregates_10k", |b| {
        b.iter(|| Aggregates::compute(session.store().iter(), 12));
    });
}

criterion_group!(benches, bench_register, bench_view, bench_aggregates);
criterion_main!(benches);
