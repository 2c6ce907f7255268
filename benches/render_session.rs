use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use notebook_chat::core::classify::{classify, classify_turn};
use notebook_chat::core::message::Turn;
use notebook_chat::core::session::Session;
use notebook_chat::ui::render_session;

const TEXT_ANSWER: &str = "Revenue grew **12%** year over year.\n\n- east: 4.1M\n- west: 3.8M";
const IMAGE_ANSWER: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn table_answer(rows: usize) -> String {
    let records: Vec<String> = (0..rows)
        .map(|i| format!(r#"{{"region":"r{i}","total":{i},"share":0.{i}}}"#))
        .collect();
    format!("[{}]", records.join(","))
}

fn make_session(exchanges: usize) -> Session {
    let table = table_answer(20);
    let answers = [TEXT_ANSWER, IMAGE_ANSWER, table.as_str(), r#"{"status":"done","rows":3}"#];

    let mut session = Session::new();
    for i in 0..exchanges {
        session.append_turn(Turn::user(format!("question {i}")));
        let (_, turn) = classify_turn(answers[i % answers.len()]).expect("bench answers classify");
        session.append_turn(turn);
    }
    session
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for &rows in &[10usize, 1000usize] {
        let raw = table_answer(rows);
        group.throughput(Throughput::Bytes(raw.len() as u64));
        group.bench_function(BenchmarkId::new("table", rows), |b| b.iter(|| classify(&raw)));
    }
    group.bench_function("image", |b| b.iter(|| classify(IMAGE_ANSWER)));
    group.bench_function("text", |b| b.iter(|| classify(TEXT_ANSWER)));
    group.finish();
}

fn bench_render_session(c: &mut Criterion) {
    for &exchanges in &[10usize, 200usize] {
        let session = make_session(exchanges);

        let mut group = c.benchmark_group(format!("render_session_exchanges{exchanges}"));
        group.throughput(Throughput::Elements((exchanges * 2) as u64));
        group.bench_function("full_page", |b| b.iter(|| render_session(&session, None)));
        group.finish();
    }
}

criterion_group!(benches, bench_classify, bench_render_session);
criterion_main!(benches);
