//! Benchmarks for the rule-table highlighter.
//!
//! Run with: cargo bench

use chora_syntax::{Highlighter, Language, LineState};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

const CPP_SAMPLE: &str = r#"#include <vector>
// Sum the squares of a vector.
class Accumulator {
public:
    int sum(const std::vector<int>& values) const {
        int total = 0; /* running total */
        for (int v : values) { total += v * v; }
        return total;
    }
};
/* A block comment
   spanning lines */
const char* greeting = "hello, // not a comment";
"#;

const RUST_SAMPLE: &str = r#"#[derive(Debug)]
struct Point { x: f64, y: f64 }
impl Point {
    fn norm(&self) -> f64 { (self.x * self.x + self.y * self.y).sqrt() }
}
/* block
   comment */
fn main() { println!("{:?}", Point { x: 3.0, y: 4.0 }.norm()); }
"#;

fn repeat(sample: &str, lines: usize) -> String {
    let per_copy = sample.lines().count();
    sample.repeat(lines / per_copy + 1)
}

/// Whole documents of growing size.
fn bench_highlight_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("highlight_text");

    for (language, sample) in [(Language::Cpp, CPP_SAMPLE), (Language::Rust, RUST_SAMPLE)] {
        let highlighter = Highlighter::new(language);
        for size in [100, 1000, 10000] {
            let text = repeat(sample, size);
            group.bench_with_input(
                BenchmarkId::new(language.name(), size),
                &text,
                |b, text| b.iter(|| black_box(highlighter.highlight_text(black_box(text)))),
            );
        }
    }

    group.finish();
}

/// A single long line, the worst case for the per-rule match cache.
fn bench_long_line(c: &mut Criterion) {
    let highlighter = Highlighter::new(Language::Cpp);
    let line = "int x = 42; foo(\"bar\"); // tail ".repeat(200);

    c.bench_function("highlight_long_line", |b| {
        b.iter(|| black_box(highlighter.highlight_line(black_box(&line), LineState::Normal)))
    });
}

criterion_group!(benches, bench_highlight_text, bench_long_line);

criterion_main!(benches);
