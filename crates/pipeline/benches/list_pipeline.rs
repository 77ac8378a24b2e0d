//! Benchmarks for the list pipeline
//!
//! Run with: cargo bench --package pipeline
//!
//! Measures filter, sort and a full page view over a synthetic watchlist,
//! on both sides of the parallel filter threshold.

use catalog::{Priority, WatchStatus, WatchlistEntry};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pipeline::filters::{EqualityFilter, RangeFilter, SearchFilter};
use pipeline::sort::{Direction, by_rank, by_text};
use pipeline::{
    Bounds, FilterPipeline, ListState, PageConfig, SortKey, TextAccessor, sort_items,
};
use std::cmp::Ordering;

struct BenchPage;

#[derive(Debug, Clone, Copy, Default)]
enum BenchSort {
    #[default]
    Priority,
    Title,
}

impl SortKey<WatchlistEntry> for BenchSort {
    fn compare(&self, a: &WatchlistEntry, b: &WatchlistEntry) -> Ordering {
        match self {
            BenchSort::Priority => by_rank(a.priority.map(Priority::rank), b.priority.map(Priority::rank)),
            BenchSort::Title => by_text(
                a.movie_title.as_deref(),
                b.movie_title.as_deref(),
                Direction::Ascending,
            ),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BenchSort::Priority => "priority",
            BenchSort::Title => "title",
        }
    }
}

fn status(entry: &WatchlistEntry) -> Option<WatchStatus> {
    entry.status
}

fn year(entry: &WatchlistEntry) -> Option<i32> {
    entry.release_year
}

fn title(entry: &WatchlistEntry) -> Option<&str> {
    entry.movie_title.as_deref()
}

fn notes(entry: &WatchlistEntry) -> Option<&str> {
    entry.notes.as_deref()
}

impl PageConfig for BenchPage {
    type Item = WatchlistEntry;
    type Criteria = Bounds<i32>;
    type Sort = BenchSort;

    const NAME: &'static str = "bench";

    fn filters(years: &Bounds<i32>) -> FilterPipeline<WatchlistEntry> {
        FilterPipeline::new()
            .add_filter(EqualityFilter::new(
                "status",
                status,
                Some(WatchStatus::PlanToWatch).into(),
            ))
            .add_filter(RangeFilter::new("year", year, *years))
    }

    fn search_fields() -> Vec<TextAccessor<WatchlistEntry>> {
        vec![title as TextAccessor<WatchlistEntry>, notes]
    }
}

fn watchlist(n: u64) -> Vec<WatchlistEntry> {
    let priorities = [Priority::High, Priority::Medium, Priority::Low];
    let statuses = [WatchStatus::PlanToWatch, WatchStatus::Watching, WatchStatus::Watched];
    (0..n)
        .map(|id| WatchlistEntry {
            id,
            movie_title: Some(format!("Movie {:05}", (id * 7919) % n)),
            priority: Some(priorities[(id % 3) as usize]),
            status: Some(statuses[(id % 3) as usize]),
            release_year: Some(1950 + (id % 75) as i32),
            notes: Some(format!("recommended by friend {}", id % 40)),
            ..Default::default()
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for size in [1_000u64, 20_000] {
        let items = watchlist(size);
        let pipeline = BenchPage::filters(&Bounds::new(Some(1980), None));

        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| black_box(pipeline.apply(items.clone())))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let items = watchlist(20_000);
    let pipeline = FilterPipeline::new().add_filter(SearchFilter::new("friend 7", BenchPage::search_fields()));

    c.bench_function("search_20000", |b| {
        b.iter(|| black_box(pipeline.apply(items.clone())))
    });
}

fn bench_sort(c: &mut Criterion) {
    let items = watchlist(20_000);

    c.bench_function("sort_priority_20000", |b| {
        b.iter(|| black_box(sort_items(black_box(&items), BenchSort::Priority)))
    });
    c.bench_function("sort_title_20000", |b| {
        b.iter(|| black_box(sort_items(black_box(&items), BenchSort::Title)))
    });
}

fn bench_view(c: &mut Criterion) {
    let mut state = ListState::<BenchPage>::new();
    state.replace_source(watchlist(20_000));
    state.set_criteria(Bounds::new(Some(1970), Some(2010)));
    state.set_sort(BenchSort::Title);

    c.bench_function("view_20000", |b| b.iter(|| black_box(state.view())));
}

criterion_group!(benches, bench_filter, bench_search, bench_sort, bench_view);
criterion_main!(benches);
