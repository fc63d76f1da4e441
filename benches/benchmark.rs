//! Benchmarks for the storyboard project manager.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use storyboard_flow::storage::{project_from_doc_bytes, project_to_doc_bytes};
use storyboard_flow::{PanelUpdate, ProjectManager, StoryboardConfig};

fn manager_with_panels(count: usize) -> ProjectManager {
    let manager =
        ProjectManager::with_config(StoryboardConfig::new().with_default_panel_count(count));
    manager.new_project("Bench");
    manager
}

fn bench_new_project(c: &mut Criterion) {
    c.bench_function("new_project", |b| {
        let manager = ProjectManager::new();
        b.iter(|| manager.new_project(black_box("Bench")))
    });
}

fn bench_add_panel(c: &mut Criterion) {
    c.bench_function("add_panel", |b| {
        let manager = manager_with_panels(0);
        b.iter(|| black_box(manager.add_panel().unwrap()))
    });
}

fn bench_update_panel(c: &mut Criterion) {
    c.bench_function("update_panel_dialogue", |b| {
        let manager = manager_with_panels(100);
        let id = manager.panels()[50].id.clone();
        b.iter(|| {
            manager
                .update_panel(&id, PanelUpdate::Dialogue("Line".into()))
                .unwrap()
        })
    });
}

fn bench_reorder(c: &mut Criterion) {
    let mut group = c.benchmark_group("reorder_panel");

    for num_panels in [10, 50, 200].iter() {
        let manager = manager_with_panels(*num_panels);
        let id = manager.panels()[num_panels / 2].id.clone();

        group.bench_with_input(BenchmarkId::from_parameter(num_panels), num_panels, |b, &n| {
            let mut target = 0;
            b.iter(|| {
                manager.reorder_panel(&id, target).unwrap();
                target = (target + 7) % n;
            })
        });
    }

    group.finish();
}

fn bench_get_panels(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_panels");

    for num_panels in [6, 50, 200].iter() {
        let manager = manager_with_panels(*num_panels);
        group.bench_with_input(BenchmarkId::from_parameter(num_panels), num_panels, |b, _| {
            b.iter(|| black_box(manager.panels()))
        });
    }

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let manager = manager_with_panels(100);
    let project = manager.project().unwrap();

    c.bench_function("to_json_100", |b| {
        b.iter(|| black_box(serde_json::to_vec(&project).unwrap()))
    });

    c.bench_function("to_automerge_100", |b| {
        b.iter(|| black_box(project_to_doc_bytes(&project).unwrap()))
    });

    let bytes = project_to_doc_bytes(&project).unwrap();
    c.bench_function("from_automerge_100", |b| {
        b.iter(|| black_box(project_from_doc_bytes(&bytes).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_new_project,
    bench_add_panel,
    bench_update_panel,
    bench_reorder,
    bench_get_panels,
    bench_serialization,
);

criterion_main!(benches);
