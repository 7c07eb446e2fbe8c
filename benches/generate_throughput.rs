use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion};
use pipegen_core::SearchMode;
use pipegen_exp::{GeneratorOptions, PipelineGenerator};
use serde_json::{json, Value};

fn make_template() -> Value {
    json!({
        "chainer": {
            "in": ["x"],
            "out": ["y"],
            "pipe": [
                [{"name": "tokenizer"}, {"name": "lemmatizer"}, null],
                [{"name": "embedder", "dim": [50, 100, 200, 300], "window": [3, 5, 7], "search": true}],
                [
                    {"name": "svm", "c": [0.01, 0.1, 1.0, 10.0], "search": ["c"]},
                    {"name": "mlp", "units": {"range": [16, 512], "discrete": true}, "lr": {"range": [0.0001, 0.1], "scale": "log"}, "search": true}
                ]
            ]
        }
    })
}

fn drain(template: &Value, options: &GeneratorOptions) -> usize {
    PipelineGenerator::new(template.clone(), options)
        .expect("generator")
        .map(|generated| generated.expect("config"))
        .count()
}

fn bench_generate(c: &mut Criterion) {
    let template = make_template();
    let random = GeneratorOptions {
        mode: SearchMode::Random,
        samples: 20,
        save_path: PathBuf::from("bench"),
        seed: 4242,
    };
    c.bench_function("random_generate_throughput", |b| {
        b.iter(|| drain(&template, &random));
    });

    // the mlp range parameters cannot be walked as a grid
    let mut grid_template = template.clone();
    grid_template["chainer"]["pipe"][2]
        .as_array_mut()
        .expect("slot")
        .pop();
    let grid = GeneratorOptions {
        mode: SearchMode::Grid,
        ..random.clone()
    };
    c.bench_function("grid_generate_throughput", |b| {
        b.iter(|| drain(&grid_template, &grid));
    });
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
