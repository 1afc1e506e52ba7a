use std::fs;
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use prompt_history::load_sessions;
use tempfile::TempDir;

/// Directory with `num_files` sessions of `lines_per_file` alternating user/assistant lines
fn generate_session_dir(num_files: usize, lines_per_file: usize) -> TempDir {
    let dir = TempDir::new().unwrap();

    for f in 0..num_files {
        let content: Vec<String> = (0..lines_per_file)
            .map(|i| {
                if i % 2 == 0 {
                    format!(
                        r#"{{"type":"user","message":{{"role":"user","content":"Prompt {} of session {}"}},"timestamp":"2024-03-01T10:00:00Z"}}"#,
                        i, f
                    )
                } else {
                    format!(
                        r#"{{"type":"assistant","message":{{"role":"assistant","content":[{{"type":"text","text":"Answer {}"}}]}}}}"#,
                        i
                    )
                }
            })
            .collect();
        fs::write(dir.path().join(format!("session-{:04}.jsonl", f)), content.join("\n")).unwrap();
    }

    dir
}

fn bench_load_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_sessions");

    for num_files in [10, 100, 500].iter() {
        let dir = generate_session_dir(*num_files, 100);

        group.throughput(Throughput::Elements((*num_files * 100) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(num_files), num_files, |b, _| {
            b.iter(|| load_sessions(black_box(dir.path())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_load_sessions);
criterion_main!(benches);
