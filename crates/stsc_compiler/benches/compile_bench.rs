//! Benchmarks for the per-file pipeline.
//!
//! Run with: cargo bench -p stsc_compiler

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rayon::prelude::*;
use stsc_emitter::{CompileRequest, Emitter};

const SMALL_SOURCE: &str = "\
* import dice from './dice'
hero: base <brave> = { hp: 10 }
  name = 'Ayla'
  Ayla walks into the *place.
";

/// A story with `chapters` nested sections mixing text, objects and code.
fn generate_story(chapters: usize) -> String {
    let mut source = String::from("* let @total = 0\n");
    for i in 0..chapters {
        source.push_str(&format!("chapter{}\n", i));
        source.push_str(&format!("  title = 'Chapter {}'\n", i));
        source.push_str("  The wind rose over the *place and the *hero.name ran.\n");
        source.push_str("  * for (let @j = 0; @j < 3; @j++) {\n");
        source.push_str("    Step *@j of the journey.\n");
        source.push_str("  * }\n");
        source.push_str("  * @total += title.length\n");
    }
    source
}

fn request(name: &str) -> CompileRequest {
    CompileRequest {
        source_file_name: format!("/bench/src/{}.st", name),
        source_root: "/bench/src".to_string(),
        output_root: "/bench/out".to_string(),
        ..CompileRequest::default()
    }
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let emitter = Emitter::default();

    group.bench_function("small", |b| {
        b.iter(|| emitter.compile(black_box(SMALL_SOURCE), &request("small")));
    });

    for chapters in [10, 100, 500] {
        let source = generate_story(chapters);
        group.bench_with_input(BenchmarkId::new("chapters", chapters), &source, |b, source| {
            b.iter(|| emitter.compile(black_box(source), &request("story")));
        });
    }

    group.finish();
}

fn bench_parallel_files(c: &mut Criterion) {
    let emitter = Emitter::default();
    let sources: Vec<String> = (0..32).map(|_| generate_story(20)).collect();

    c.bench_function("parallel_32_files", |b| {
        b.iter(|| {
            let results: Vec<_> = sources
                .par_iter()
                .enumerate()
                .map(|(i, source)| emitter.compile(source, &request(&format!("file{}", i))))
                .collect();
            black_box(results)
        });
    });
}

criterion_group!(benches, bench_compile, bench_parallel_files);
criterion_main!(benches);
