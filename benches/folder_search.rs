use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ctxsearch::catalog::ExtensionSet;
use ctxsearch::search::{highlight, FolderWalker, MatchMode, SearchConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const WORDS: [&str; 12] = [
    "report", "quarterly", "budget", "meeting", "notes", "draft", "invoice", "summary",
    "review", "project", "schedule", "minutes",
];
const EXTENSIONS: [&str; 5] = ["txt", "md", "csv", "json", "log"];

fn random_text(rng: &mut ChaCha8Rng, words: usize) -> String {
    let mut text = String::with_capacity(words * 8);
    for i in 0..words {
        text.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        text.push(if i % 12 == 11 { '\n' } else { ' ' });
    }
    text
}

/// Create a folder tree of `file_count` files spread over ten subfolders.
///
/// Roughly one file in `needle_frequency` contains the word "needle".
fn create_folder(file_count: usize, words_per_file: usize, needle_frequency: usize) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    for i in 0..file_count {
        let sub = dir.path().join(format!("dir{:02}", i % 10));
        fs::create_dir_all(&sub).expect("Failed to create subfolder");

        let mut text = random_text(&mut rng, words_per_file);
        if i % needle_frequency == 0 {
            text.push_str(" needle 2024-09-02");
        }

        let ext = EXTENSIONS[i % EXTENSIONS.len()];
        fs::write(sub.join(format!("file{:05}.{}", i, ext)), text).expect("Failed to write file");
    }

    dir
}

fn bench_folder_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("folder_search");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));

    let walker = FolderWalker::default();
    let file_counts = [100, 1000, 5000];

    for &file_count in &file_counts {
        let dir = create_folder(file_count, 400, 20);

        let literal = SearchConfig::new(
            dir.path(),
            "needle",
            MatchMode::Literal,
            ExtensionSet::from_iter(["txt", "md", "csv"]),
        );
        group.bench_with_input(
            BenchmarkId::new("literal_search", file_count),
            &literal,
            |b, config| {
                b.iter(|| {
                    let result = walker.search(config);
                    let _ = black_box(result);
                });
            },
        );

        let regex = SearchConfig::new(
            dir.path(),
            r"\d{4}-\d{2}-\d{2}",
            MatchMode::Regex,
            ExtensionSet::from_iter(["txt", "md", "csv"]),
        );
        group.bench_with_input(
            BenchmarkId::new("regex_search", file_count),
            &regex,
            |b, config| {
                b.iter(|| {
                    let result = walker.search(config);
                    let _ = black_box(result);
                });
            },
        );

        // Everything filtered out: measures the walk alone
        let filtered = SearchConfig::new(
            dir.path(),
            "needle",
            MatchMode::Literal,
            ExtensionSet::from_iter(["pdf"]),
        );
        group.bench_with_input(
            BenchmarkId::new("walk_only", file_count),
            &filtered,
            |b, config| {
                b.iter(|| {
                    let result = walker.search(config);
                    let _ = black_box(result);
                });
            },
        );
    }

    group.finish();
}

fn bench_highlight(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight");
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let content = random_text(&mut rng, 50_000);

    group.bench_function("literal_many_matches", |b| {
        b.iter(|| black_box(highlight(&content, "report", MatchMode::Literal)));
    });

    group.bench_function("regex_many_matches", |b| {
        b.iter(|| black_box(highlight(&content, r"re(port|view)", MatchMode::Regex)));
    });

    group.finish();
}

criterion_group!(benches, bench_folder_search, bench_highlight);
criterion_main!(benches);
