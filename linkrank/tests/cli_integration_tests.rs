// linkrank/tests/cli_integration_tests.rs
//! Command-line integration tests for the `linkrank` binary.
//!
//! Every test writes its own knowledge base, documents and configuration into
//! a temporary directory, runs the binary through `assert_cmd`, and checks
//! stdout, stderr, exit status and the files left behind.

use anyhow::Result;
use assert_cmd::Command;
#[allow(unused_imports)] // Used for `predicate::str::contains`
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FOAF_NAME: &str = "http://xmlns.com/foaf/0.1/name";

fn knowledge_base() -> Value {
    json!({
        "sites": {
            "dbpedia": [
                {
                    "id": "urn:marley",
                    "http://xmlns.com/foaf/0.1/name": [{ "type": "text", "value": "Bob Marley@en" }],
                    "urn:genre": [
                        { "type": "reference", "value": "urn:reggae" },
                        { "type": "reference", "value": "urn:jamaica" }
                    ]
                },
                {
                    "id": "urn:dylan",
                    "http://xmlns.com/foaf/0.1/name": [{ "type": "text", "value": "Bob Dylan@en" }],
                    "urn:genre": [{ "type": "reference", "value": "urn:reggae" }]
                }
            ]
        }
    })
}

fn document(uri: &str) -> Value {
    json!({
        "uri": uri,
        "text": "Bob Marley was a singer.",
        "metadata": {
            "text_annotations": [{ "id": "urn:ta:bob", "selected_texts": ["Bob Marley"] }],
            "entity_annotations": [
                {
                    "id": "urn:ea:dylan",
                    "relations": ["urn:ta:bob"],
                    "entity_reference": "urn:dylan",
                    "confidence": 0.5,
                    "site": "dbpedia",
                    "entity_label": "Bob Dylan@en"
                },
                {
                    "id": "urn:ea:marley",
                    "relations": ["urn:ta:bob"],
                    "entity_reference": "urn:marley",
                    "confidence": 0.8,
                    "site": "dbpedia",
                    "entity_label": "Bob Marley@en"
                },
                {
                    "id": "urn:ea:ghost",
                    "relations": ["urn:ta:bob"],
                    "entity_reference": "urn:ghost",
                    "confidence": 0.9,
                    "site": "dbpedia"
                }
            ]
        }
    })
}

struct Fixture {
    dir: TempDir,
    kb: PathBuf,
}

impl Fixture {
    fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let kb = dir.path().join("kb.json");
        fs::write(&kb, serde_json::to_string_pretty(&knowledge_base())?)?;
        Ok(Self { dir, kb })
    }

    fn write_document(&self, name: &str) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(&document(&format!("urn:doc:{}", name)))?)?;
        Ok(path)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn linkrank() -> Command {
    let mut cmd = Command::cargo_bin("linkrank").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("LINKRANK_ENTITYHUB_URL");
    cmd
}

fn read_json(path: &Path) -> Result<Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}

fn annotation<'a>(doc: &'a Value, id: &str) -> &'a Value {
    doc["metadata"]["entity_annotations"]
        .as_array()
        .unwrap()
        .iter()
        .find(|ea| ea["id"] == id)
        .unwrap()
}

#[test]
fn test_config_prints_defaults() {
    linkrank()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("engine_name: disambiguation-foaf"))
        .stdout(predicate::str::contains("ordering: -190"))
        .stdout(predicate::str::contains(FOAF_NAME));
}

#[test]
fn test_config_merges_user_file() -> Result<()> {
    let fixture = Fixture::new()?;
    let config = fixture.path("config.yaml");
    fs::write(&config, "engine_name: my-engine\nweights:\n  confidence_ratio: 2.0\n")?;

    linkrank()
        .args(["config", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("engine_name: my-engine"))
        .stdout(predicate::str::contains("confidence_ratio: 2"))
        .stdout(predicate::str::contains("disambiguation_ratio: 2"));
    Ok(())
}

#[test]
fn test_disambiguate_json_ranks_and_reports_failures() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("bob.json")?;

    let output = linkrank()
        .args(["disambiguate", "--json", "--kb"])
        .arg(&fixture.kb)
        .arg("--document")
        .arg(&doc)
        .output()?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let reports: Value = serde_json::from_slice(&output.stdout)?;
    let report = &reports[0];
    assert_eq!(report["content_uri"], "urn:doc:bob.json");
    assert_eq!(report["engine"], "disambiguation-foaf");
    assert_eq!(report["mention_count"], 1);
    assert_eq!(report["links_written"], 2);
    assert_eq!(report["candidates"][0]["entity_id"], "urn:marley");
    assert_eq!(report["candidates"][1]["entity_id"], "urn:dylan");
    assert_eq!(report["mentions"][0]["entity_ids"], json!(["urn:marley", "urn:dylan"]));
    assert_eq!(report["failures"][0]["link_id"], "urn:ea:ghost");

    // Without an output option the document stays untouched.
    let untouched = read_json(&doc)?;
    assert_eq!(annotation(&untouched, "urn:ea:marley")["confidence"], 0.8);
    Ok(())
}

#[test]
fn test_disambiguate_table_output() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("table.json")?;

    linkrank()
        .args(["disambiguate", "--kb"])
        .arg(&fixture.kb)
        .arg("-i")
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("urn:doc:table.json"))
        .stdout(predicate::str::contains("urn:marley"))
        .stdout(predicate::str::contains("Final"))
        .stdout(predicate::str::contains("dropped urn:ea:ghost"));
    Ok(())
}

#[test]
fn test_disambiguate_in_place_writes_confidences() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("inplace.json")?;

    linkrank()
        .args(["disambiguate", "--in-place", "--kb"])
        .arg(&fixture.kb)
        .arg("--document")
        .arg(&doc)
        .assert()
        .success();

    let updated = read_json(&doc)?;
    let marley = annotation(&updated, "urn:ea:marley");
    let dylan = annotation(&updated, "urn:ea:dylan");
    let ghost = annotation(&updated, "urn:ea:ghost");
    assert!(marley["confidence"].as_f64().unwrap() > dylan["confidence"].as_f64().unwrap());
    assert!((marley["confidence"].as_f64().unwrap() - (0.8 / 3.0 + 4.0 / 3.0)).abs() < 1e-9);
    assert_eq!(marley["contributors"], json!(["disambiguation-foaf"]));
    assert_eq!(ghost["confidence"], 0.9);
    assert_eq!(ghost["contributors"], json!([]));
    Ok(())
}

#[test]
fn test_disambiguate_many_documents_into_output_dir() -> Result<()> {
    let fixture = Fixture::new()?;
    let first = fixture.write_document("one.json")?;
    let second = fixture.write_document("two.json")?;
    let out = fixture.path("out");

    linkrank()
        .args(["--quiet", "disambiguate", "--json", "--kb"])
        .arg(&fixture.kb)
        .arg("--output-dir")
        .arg(&out)
        .arg("--document")
        .arg(&first)
        .arg(&second)
        .assert()
        .success();

    for name in ["one.json", "two.json"] {
        let written = read_json(&out.join(name))?;
        assert_eq!(annotation(&written, "urn:ea:dylan")["contributors"], json!(["disambiguation-foaf"]));
    }
    let original = read_json(&first)?;
    assert_eq!(annotation(&original, "urn:ea:dylan")["confidence"], 0.5);
    Ok(())
}

#[test]
fn test_output_dir_refuses_documents_with_the_same_file_name() -> Result<()> {
    let fixture = Fixture::new()?;
    fs::create_dir(fixture.path("x"))?;
    fs::create_dir(fixture.path("y"))?;
    let first = fixture.write_document("x/doc.json")?;
    let second = fixture.write_document("y/doc.json")?;
    let out = fixture.path("out");

    linkrank()
        .args(["disambiguate", "--kb"])
        .arg(&fixture.kb)
        .arg("--output-dir")
        .arg(&out)
        .arg("--document")
        .arg(&first)
        .arg(&second)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would both be written to"));

    assert!(!out.join("doc.json").exists());
    Ok(())
}

#[test]
fn test_disambiguate_requires_a_knowledge_base() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("nokb.json")?;

    linkrank()
        .args(["disambiguate", "--document"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--kb"));
    Ok(())
}

#[test]
fn test_in_place_conflicts_with_output_dir() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("conflict.json")?;

    linkrank()
        .args(["disambiguate", "--in-place", "--output-dir", "somewhere", "--kb"])
        .arg(&fixture.kb)
        .arg("--document")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
    Ok(())
}

#[test]
fn test_missing_document_fails_but_others_are_processed() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("present.json")?;
    let missing = fixture.path("missing.json");

    linkrank()
        .args(["disambiguate", "--in-place", "--kb"])
        .arg(&fixture.kb)
        .arg("--document")
        .arg(&missing)
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.json"))
        .stderr(predicate::str::contains("1 of 2 document(s) failed"));

    let updated = read_json(&doc)?;
    assert_eq!(annotation(&updated, "urn:ea:marley")["contributors"], json!(["disambiguation-foaf"]));
    Ok(())
}

#[test]
fn test_invalid_config_is_rejected() -> Result<()> {
    let fixture = Fixture::new()?;
    let doc = fixture.write_document("badcfg.json")?;
    let config = fixture.path("bad.yaml");
    fs::write(&config, "weights:\n  disambiguation_ratio: -1.0\n")?;

    linkrank()
        .args(["disambiguate", "--kb"])
        .arg(&fixture.kb)
        .arg("--config")
        .arg(&config)
        .arg("--document")
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
    Ok(())
}
