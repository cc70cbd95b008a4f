use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use overview_core::{CriteriaSet, Document, PromptTemplate, extract_paragraphs};

fn bench_parse(c: &mut Criterion) {
    let small = std::fs::read_to_string("../../tests/fixtures/article.html").unwrap();
    let large = small.repeat(200);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "2KB"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "400KB"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_extract_paragraphs(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/article.html").unwrap().repeat(50);

    c.bench_function("extract_paragraphs", |b| b.iter(|| extract_paragraphs(black_box(&html))));
}

fn bench_prompt(c: &mut Criterion) {
    let content = "Sourdough bread relies on a wild yeast starter. ".repeat(2000);
    let criteria = CriteriaSet::builtin();

    c.bench_function("template_validation", |b| {
        b.iter(|| PromptTemplate::new(black_box("Analyze:\n---\n{user_content}\n---\nReply as {\"a\": 1}")))
    });

    c.bench_function("render_clarity_prompt", |b| {
        b.iter(|| criteria.get("clarity").map(|c| c.template.render(black_box(&content))))
    });
}

criterion_group!(benches, bench_parse, bench_extract_paragraphs, bench_prompt);
criterion_main!(benches);
