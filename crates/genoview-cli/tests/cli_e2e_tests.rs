//! End-to-end tests for the genoview binary
//!
//! Tests cover:
//! - Gene search (table and JSON output)
//! - Chromosome listing
//! - Sequence range validation
//! - Variant analysis input validation and prediction
//! - Configuration display and the Markdown reference

use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Command with every upstream pointed at the mock server
fn genoview(server: &MockServer) -> Command {
    let uri = server.uri();
    let mut cmd = Command::cargo_bin("genoview").unwrap();
    cmd.env("GENOVIEW_UCSC_API_URL", &uri)
        .env("GENOVIEW_CLINICAL_TABLES_URL", &uri)
        .env("GENOVIEW_EUTILS_URL", &uri)
        .env("ANALYZE_SINGLE_VARIANT_BASE_URL", format!("{}/analyze", uri))
        .env_remove("GENOVIEW_GENOME")
        .env("NO_COLOR", "1");
    cmd
}

fn search_payload() -> serde_json::Value {
    serde_json::json!([
        1,
        ["672"],
        { "GeneID": ["672"] },
        [["17", "BRCA1", "BRCA1 DNA repair associated", "17q21.31", "protein-coding"]]
    ])
}

#[tokio::test]
async fn test_search_table_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ncbi_genes/v3/search"))
        .and(query_param("terms", "BRCA1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_payload()))
        .mount(&mock_server)
        .await;

    let mut cmd = genoview(&mock_server);
    cmd.arg("search").arg("BRCA1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BRCA1"))
        .stdout(predicate::str::contains("chr17"))
        .stdout(predicate::str::contains("672"));
}

#[tokio::test]
async fn test_search_json_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ncbi_genes/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_payload()))
        .mount(&mock_server)
        .await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["search", "BRCA1", "--format", "json", "--genome", "hg19"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"gene_id\": \"672\""))
        .stdout(predicate::str::contains("\"genome\": \"hg19\""));
}

#[tokio::test]
async fn test_search_upstream_failure_exits_with_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ncbi_genes/v3/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["search", "BRCA1"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Upstream error"));
}

#[tokio::test]
async fn test_chromosomes_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list/chromosomes"))
        .and(query_param("genome", "hg38"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "chromosomes": { "chr1": 248956422, "chr2": 242193529, "chr1_KI270706v1_random": 175055 }
        })))
        .mount(&mock_server)
        .await;

    let mut cmd = genoview(&mock_server);
    cmd.arg("chromosomes");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("248,956,422"))
        .stdout(predicate::str::contains("KI270706").not());
}

#[tokio::test]
async fn test_sequence_rejects_reversed_range() {
    let mock_server = MockServer::start().await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["sequence", "chr17", "2000", "1000"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Start position must be less than end position",
        ));
}

#[tokio::test]
async fn test_sequence_rejects_oversized_range() {
    let mock_server = MockServer::start().await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["sequence", "chr17", "1", "20001"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("maximum view range"));
}

#[tokio::test]
async fn test_sequence_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/getData/sequence"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "dna": "acgtacgtac" })),
        )
        .mount(&mock_server)
        .await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["sequence", "17", "1,001", "1,010"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ACGTACGTAC"));
}

#[tokio::test]
async fn test_analyze_rejects_invalid_nucleotide() {
    let mock_server = MockServer::start().await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["analyze", "43057063", "N", "--chrom", "chr17"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Nucleotides must be A, C, G or T"));
}

#[tokio::test]
async fn test_analyze_prediction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "position": 43057063,
            "reference": "T",
            "alternative": "C",
            "delta_score": -0.0042,
            "prediction": "Likely pathogenic",
            "classification_confidence": 0.91
        })))
        .mount(&mock_server)
        .await;

    let mut cmd = genoview(&mock_server);
    cmd.args(["analyze", "43,057,063", "c", "--chrom", "17", "--format", "json"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Likely pathogenic"));
}

#[test]
fn test_config_show() {
    let mut cmd = Command::cargo_bin("genoview").unwrap();
    cmd.args(["config", "show"])
        .env("ANALYZE_SINGLE_VARIANT_BASE_URL", "http://predict.test/analyze")
        .env("NO_COLOR", "1");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("http://predict.test/analyze"))
        .stdout(predicate::str::contains("ANALYZE_SINGLE_VARIANT_BASE_URL"));
}

#[test]
fn test_markdown_help() {
    let mut cmd = Command::cargo_bin("genoview").unwrap();
    cmd.arg("--markdown-help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("genoview"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_missing_subcommand() {
    let mut cmd = Command::cargo_bin("genoview").unwrap();

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("A subcommand is required"));
}
