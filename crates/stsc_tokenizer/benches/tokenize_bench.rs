use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stsc_tokenizer::{expand_comments, tokenize};

const STORY_SOURCE: &str = r#"
import in dice from 'dice'
// characters
hero : person <brave> = { name: 'Aria', strength: 12 }
	greeting
		Well met, traveller. I am *hero.name.
	* if (hero.strength > 10) {
		She lifts the gate with ease.
	* } else {
		The gate does not move.
	* }
villain
	Nobody remembers the name of *villain.title anymore.
	* for (let @i = 0; @i < 3; @i++) {
		Round *(@i + 1) begins.
	* }
*{
	function @roll(sides) {
		return Math.floor(Math.random() * sides) + 1;
	}
}
"#;

fn bench_tokenize(c: &mut Criterion) {
    let source = STORY_SOURCE.repeat(50);
    c.bench_function("tokenize", |b| b.iter(|| tokenize(black_box(&source))));
    c.bench_function("tokenize_and_expand_comments", |b| {
        b.iter(|| expand_comments(&tokenize(black_box(&source))))
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
