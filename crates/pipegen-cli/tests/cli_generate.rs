use std::fs;
use std::path::Path;

use pipegen_cli::commands::{
    count::{self, CountArgs},
    generate::{self, GenerateArgs},
    OptionArgs,
};
use pipegen_core::SearchMode;
use serde_json::{json, Value};

const TEMPLATE: &str = "\
dataset_reader:
  name: faq_reader
chainer:
  in: [q]
  out: [a]
  pipe:
    - - name: tfidf
        scratch_init: true
        save_path: models/tfidf.pkl
        ngram: [1, 2]
        search: [ngram]
      - null
    - - name: logreg
        c: [0.1, 1.0, 10.0]
        search: true
";

fn write_template(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("template.yaml");
    fs::write(&path, TEMPLATE).expect("write template");
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).expect("read")).expect("json")
}

#[test]
fn generate_writes_configs_and_manifest() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write_template(dir.path());
    let out = dir.path().join("out");
    let args = GenerateArgs {
        template,
        out: out.clone(),
        generator: OptionArgs {
            mode: Some("grid".into()),
            save_path: Some("exp".into()),
            ..OptionArgs::default()
        },
    };
    let manifest = generate::run(&args).expect("generate");
    // (2 ngram + absent) x 3 c values
    assert_eq!(manifest.total, 9);
    assert_eq!(manifest.entries.len(), 9);

    let first = read_json(&out.join("pipe_0").join("config.json"));
    assert_eq!(
        first["chainer"]["pipe"][0]["save_path"],
        json!("exp/pipe_0/tfidf.pkl")
    );
    assert_eq!(first["dataset_reader"], json!({"name": "faq_reader"}));
    assert!(out.join("pipe_8").join("config.json").exists());
    assert!(!out.join("pipe_9").exists());

    let written = read_json(&out.join("manifest.json"));
    assert_eq!(written["total"], json!(9));
    assert_eq!(written["mode"], json!("grid"));
    assert_eq!(written["entries"][3]["out_dir"], json!("pipe_3"));
}

#[test]
fn options_file_is_overridden_by_flags() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = write_template(dir.path());
    let options = dir.path().join("options.yaml");
    fs::write(&options, "mode: random\nsamples: 2\nseed: 9\n").expect("write options");

    let from_file = OptionArgs {
        options: Some(options.clone()),
        ..OptionArgs::default()
    };
    let resolved = from_file.resolve().expect("resolve");
    assert_eq!(resolved.mode, SearchMode::Random);
    assert_eq!(resolved.samples, 2);
    assert_eq!(resolved.seed, 9);
    assert_eq!(resolved.save_path, Path::new("pipelines"));

    let summary = count::run(&CountArgs {
        template,
        generator: OptionArgs {
            options: Some(options),
            samples: Some(5),
            ..OptionArgs::default()
        },
    })
    .expect("count");
    // tfidf|absent, both carry the logreg search
    assert_eq!(summary.search_combinations, 2);
    assert_eq!(summary.plain_combinations, 0);
    assert_eq!(summary.total, 10);
}

#[test]
fn unknown_mode_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args = GenerateArgs {
        template: write_template(dir.path()),
        out: dir.path().join("out"),
        generator: OptionArgs {
            mode: Some("bayesian".into()),
            ..OptionArgs::default()
        },
    };
    let err = generate::run(&args).unwrap_err();
    assert!(err.to_string().contains("unsupported-mode"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn count_rejects_a_zero_budget_like_generate() {
    let dir = tempfile::tempdir().expect("tempdir");
    let template = dir.path().join("template.json");
    fs::write(
        &template,
        r#"{"chainer": {"pipe": [[{"name": "a"}, {"name": "s", "p": [1, 2], "search": true}]]}}"#,
    )
    .expect("write template");
    let zero_budget = OptionArgs {
        mode: Some("random".into()),
        samples: Some(0),
        ..OptionArgs::default()
    };

    let err = count::run(&CountArgs {
        template: template.clone(),
        generator: zero_budget.clone(),
    })
    .unwrap_err();
    assert!(err.to_string().contains("invalid-sample-budget"));

    let err = generate::run(&GenerateArgs {
        template: template.clone(),
        out: dir.path().join("out"),
        generator: zero_budget,
    })
    .unwrap_err();
    assert!(err.to_string().contains("invalid-sample-budget"));

    let grid = count::run(&CountArgs {
        template,
        generator: OptionArgs {
            mode: Some("grid".into()),
            samples: Some(0),
            ..OptionArgs::default()
        },
    })
    .expect("grid ignores the budget");
    assert_eq!(grid.total, 3);
}
