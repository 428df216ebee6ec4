use chompy::prelude::*;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn identifiers(count: usize) -> String {
    (0..count)
        .map(|i| format!("name_{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_variable(c: &mut Criterion) {
    let src = identifiers(2_000);
    let inner = |c: char| c.is_alphanumeric() || c == '_';
    let fused = many(variable(TokenSpec::new(char::is_alphabetic, inner)).skip(spaces()));
    let two_pass = many(
        get_chomped_string(chomp_if(char::is_alphabetic).skip(chomp_while(inner))).skip(spaces()),
    );

    let mut group = c.benchmark_group("variable");
    group.bench_function("fused", |b| b.iter(|| run(&fused, black_box(&src))));
    group.bench_function("two_pass", |b| b.iter(|| run(&two_pass, black_box(&src))));
    group.finish();
}

fn bench_one_of(c: &mut Criterion) {
    let src = "(x)".repeat(2_000);
    let inner = || symbol("x").ignore_then(symbol(")"));
    let nested = many(one_of(vec![
        symbol("(")
            .ignore_then(one_of(vec![symbol(")").boxed(), inner().boxed()]))
            .boxed(),
    ]));
    let flattened = many(one_of(vec![
        symbol("()").boxed(),
        symbol("(").ignore_then(inner()).boxed(),
    ]));

    let mut group = c.benchmark_group("one_of");
    group.bench_function("nested", |b| b.iter(|| run(&nested, black_box(&src))));
    group.bench_function("flattened", |b| b.iter(|| run(&flattened, black_box(&src))));
    group.finish();
}

fn bench_sequence(c: &mut Criterion) {
    let src = format!("[{}]", vec!["12"; 10_000].join(", "));
    let list = sequence(SequenceSpec {
        start: "[".into(),
        separator: ",".into(),
        end: "]".into(),
        spaces: spaces(),
        item: int(),
        trailing: Trailing::Forbidden,
    });
    c.bench_function("sequence 10k ints", |b| b.iter(|| run(&list, black_box(&src))));
}

// ベンチマークグループの定義
criterion_group!(benches, bench_variable, bench_one_of, bench_sequence);
criterion_main!(benches);
