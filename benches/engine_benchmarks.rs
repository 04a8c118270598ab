use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use futures::FutureExt;
use stockmark_core::collaborator::{CollaboratorError, FnGenerator, GeneratedAttribute};
use stockmark_core::config::EngineConfig;
use stockmark_core::{
    AttributeKind, BatchExecutor, BatchJob, Record, RecordCatalog, RecordId, ResultLedger,
};

fn sample_records(count: i64) -> Vec<Record> {
    (1..=count)
        .map(|id| {
            let record = Record::new(id, format!("Product {id}"));
            if id % 3 == 0 {
                record.with_barcode(format!("BC-{id}"))
            } else {
                record
            }
        })
        .collect()
}

fn benchmark_catalog_filter(c: &mut Criterion) {
    let catalog = RecordCatalog::with_records(AttributeKind::Barcode, sample_records(5_000));

    c.bench_function("catalog_filter_missing", |b| {
        b.iter(|| catalog.filter(black_box(""), true).count())
    });
    c.bench_function("catalog_filter_search", |b| {
        b.iter(|| catalog.filter(black_box("product 42"), false).count())
    });
}

fn benchmark_batch_run(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("benchmark runtime");
    let executor = BatchExecutor::new(&EngineConfig::default());
    let generator = FnGenerator(|kind: AttributeKind, id: RecordId| {
        async move { Ok::<_, CollaboratorError>(GeneratedAttribute::new(format!("{kind}-{id}"))) }
            .boxed()
    });

    c.bench_function("batch_run_500_items", |b| {
        b.iter_batched(
            || {
                let catalog =
                    RecordCatalog::with_records(AttributeKind::Barcode, sample_records(500));
                let job = BatchJob::new(AttributeKind::Barcode, catalog.ids());
                (catalog, job, ResultLedger::new())
            },
            |(catalog, job, ledger)| {
                runtime
                    .block_on(executor.run(&job, &generator, &catalog, &ledger))
                    .map(|report| report.summary)
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, benchmark_catalog_filter, benchmark_batch_run);
criterion_main!(benches);
