//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: listing pages → records → CSV file

use clap::Parser;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tender_scraper::cli::{Cli, Runner};
use tender_scraper::output::{write_csv, UTF8_BOM};
use tender_scraper::{RunConfig, ScraperConfig, StopReason, TenderCollector};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTING_PAGE: &str = include_str!("fixtures/listing_page.html");

const EMPTY_PAGE: &str = "<html><body><div class=\"no-results\">Ничего не найдено</div></body></html>";

// ============================================================================
// Helpers
// ============================================================================

async fn mount_page(server: &MockServer, page: u32, body: &str) {
    Mock::given(method("GET"))
        .and(path("/extsearch"))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

fn config_for(server: &MockServer) -> ScraperConfig {
    ScraperConfig::default()
        .with_base_url(format!("{}/extsearch", server.uri()))
        .with_site_url("https://rostender.info/")
}

/// Read a CSV file back without its BOM
fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(UTF8_BOM));

    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(&bytes[UTF8_BOM.len()..])
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect()
}

// ============================================================================
// Collection
// ============================================================================

#[tokio::test]
async fn test_collect_until_source_exhausted() {
    let server = MockServer::start().await;
    mount_page(&server, 1, LISTING_PAGE).await;
    mount_page(&server, 2, EMPTY_PAGE).await;

    let collector = TenderCollector::from_config(&config_for(&server)).unwrap();
    let report = collector.collect(100).await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.stats.stop_reason, StopReason::SourceExhausted);
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.stats.fragments_seen, 3);
    assert_eq!(report.records[0].id, "84512977");
    assert_eq!(
        report.records[0].link.url,
        "https://rostender.info/region/moskva/84512977-postavka-bumagi"
    );
    assert_eq!(report.records[2].id, "");
}

#[tokio::test]
async fn test_collect_across_pages_truncates_to_target() {
    let server = MockServer::start().await;
    mount_page(&server, 1, LISTING_PAGE).await;
    mount_page(&server, 2, LISTING_PAGE).await;

    let collector = TenderCollector::from_config(&config_for(&server)).unwrap();
    let report = collector.collect(5).await;

    assert_eq!(report.records.len(), 5);
    assert_eq!(report.stats.stop_reason, StopReason::TargetReached);
    assert_eq!(report.stats.pages_fetched, 2);
    assert_eq!(report.records[3].id, "84512977");
}

#[tokio::test]
async fn test_collect_stops_at_page_ceiling() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/extsearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .expect(4)
        .mount(&server)
        .await;

    let collector = TenderCollector::from_config(&config_for(&server))
        .unwrap()
        .with_run_config(RunConfig::new().with_max_pages(4));
    let report = collector.collect(1000).await;

    assert_eq!(report.records.len(), 12);
    assert_eq!(report.stats.stop_reason, StopReason::PageLimit);
}

#[tokio::test]
async fn test_transport_failure_keeps_partial_result() {
    let server = MockServer::start().await;
    mount_page(&server, 1, LISTING_PAGE).await;
    Mock::given(method("GET"))
        .and(path("/extsearch"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let collector = TenderCollector::from_config(&config_for(&server)).unwrap();
    let report = collector.collect(100).await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.stats.stop_reason, StopReason::TransportError);
}

#[tokio::test]
async fn test_requests_carry_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "TenderBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(EMPTY_PAGE))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server).with_user_agent("TenderBot/1.0");
    let report = TenderCollector::from_config(&config)
        .unwrap()
        .collect(10)
        .await;

    assert!(report.records.is_empty());
    assert_eq!(report.stats.stop_reason, StopReason::SourceExhausted);
}

// ============================================================================
// CSV Output
// ============================================================================

#[tokio::test]
async fn test_collect_and_write_csv() {
    let server = MockServer::start().await;
    mount_page(&server, 1, LISTING_PAGE).await;
    mount_page(&server, 2, EMPTY_PAGE).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("tenders.csv");

    let report = TenderCollector::from_config(&config_for(&server))
        .unwrap()
        .collect(100)
        .await;
    let written = write_csv(&report.records, &output).unwrap();
    assert_eq!(written, 3);

    let rows = read_csv(&output);
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0][0], "tender_id");
    assert_eq!(rows[0][8], "categories");
    assert_eq!(
        rows[1],
        vec![
            "84512977",
            "Поставка офисной бумаги",
            "https://rostender.info/region/moskva/84512977-postavka-bumagi",
            "г. Москва, ул. Тверская, д. 1",
            "Москва",
            "1234567",
            "03.03.25",
            "05.03.2025 18:30",
            "IT; Construction",
        ]
    );
    assert_eq!(rows[2][5], "-");
    assert_eq!(rows[3], vec!["", "-", "-", "-", "-", "-", "-", "10:15", ""]);
}

#[tokio::test]
async fn test_runner_scrape_writes_output() {
    let server = MockServer::start().await;
    mount_page(&server, 1, LISTING_PAGE).await;
    mount_page(&server, 2, EMPTY_PAGE).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("out").join("tenders.csv");

    let runner = Runner::new(Cli::parse_from(["tender-scraper", "--max", "2"]));
    let config = config_for(&server)
        .with_count(2)
        .with_output_file(&output);

    let written = runner.scrape(&config).await.unwrap();

    assert_eq!(written, 2);
    assert_eq!(read_csv(&output).len(), 3);
}

#[tokio::test]
async fn test_runner_scrape_with_nothing_collected_writes_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("tenders.csv");

    let runner = Runner::new(Cli::parse_from(["tender-scraper"]));
    let config = config_for(&server).with_output_file(&output);

    let written = runner.scrape(&config).await.unwrap();

    assert_eq!(written, 0);
    assert!(!output.exists());
}
