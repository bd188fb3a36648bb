//! Benchmarks for scroll dispatch over pages with many animated elements

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use vitrine::{Config, MemoryPage, Page, PageEvent, Site};

const FADE_CLASSES: [&str; 3] = ["fade-in", "fade-in-left", "fade-in-right"];

fn build_site(elements: usize) -> Site<MemoryPage> {
    let mut page = MemoryPage::new().with_viewport(1280.0, 800.0);
    let body = page.body().unwrap();
    page.spawn(body, "header").class("header").layout(0.0, 80.0);
    for i in 0..elements {
        let top = 100.0 + i as f64 * 120.0;
        page.spawn(body, "div")
            .class(FADE_CLASSES[i % FADE_CLASSES.len()])
            .layout(top, 100.0);
        if i % 10 == 0 {
            page.spawn(body, "span")
                .attr("data-counter", "2500")
                .layout(top + 20.0, 40.0);
        }
    }
    let mut site = Site::new(page, Config::default());
    site.dispatch(PageEvent::Ready);
    site
}

fn bench_scroll_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("scroll_dispatch");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sweep", size), &size, |b, &size| {
            let mut site = build_site(size);
            let max = site.page().document_height();
            let mut y = 0.0;
            b.iter(|| {
                y = (y + 37.0) % max;
                site.page_mut().set_scroll_y(black_box(y));
                site.dispatch(PageEvent::Scroll)
            });
        });
    }

    group.finish();
}

fn bench_frame_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_advance");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("counters", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let mut site = build_site(size);
                    let bottom = site.page().document_height();
                    site.page_mut().set_scroll_y(bottom);
                    site.dispatch(PageEvent::Scroll);
                    site
                },
                |mut site| {
                    for _ in 0..60 {
                        site.advance(black_box(Duration::from_millis(16)));
                    }
                    site
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scroll_dispatch, bench_frame_advance);
criterion_main!(benches);
