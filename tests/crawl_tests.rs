//! Integration tests for the crawl driver
//!
//! These use wiremock to stand up a small site and run the coordinator
//! against it end-to-end, checking the report that comes out the other
//! side.

use page_sieve::config::{AllowEntry, Config};
use page_sieve::crawler::Coordinator;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Distinct alphabetic filler words so pages don't fingerprint alike
fn words(prefix: &str, n: usize) -> String {
    (0..n)
        .map(|i| {
            let first = (b'a' + (i / 26) as u8) as char;
            let second = (b'a' + (i % 26) as u8) as char;
            format!("{}{}{}", prefix, first, second)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn html_page(text: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!("<a href=\"{}\"></a>", href))
        .collect();
    format!("<html><body><p>{}</p>{}</body></html>", text, anchors)
}

fn html_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

/// Config scoped to the mock server's host, reporting into a temp dir
fn test_config(host: &str, seed: String, report_path: String, workers: u32) -> Config {
    let mut config = Config::default();
    config.crawl.seeds = vec![seed];
    config.crawl.max_concurrent_fetches = workers;
    config.crawl.fetch_delay_ms = 100;
    config.crawl.max_pages = 50;
    config.scope.allow = vec![AllowEntry {
        suffix: host.to_string(),
        path_prefix: None,
    }];
    config.stats.domain_suffix = host.to_string();
    config.output.report_path = report_path;
    config
}

#[tokio::test]
async fn test_full_crawl_produces_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = url::Url::parse(&base_url)
        .expect("mock server URI parses")
        .host_str()
        .expect("mock server URI has a host")
        .to_string();

    // Index links to two real pages, one missing page, one out-of-scope
    // site and one blocked extension; only the first three are fetched
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page(
            &words("idx", 150),
            &[
                "/one",
                "/two",
                "/missing",
                "https://example.com/elsewhere",
                "/slides.pdf",
            ],
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(html_response(html_page(&words("one", 160), &[])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(html_response(html_page(&words("two", 250), &[])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.txt");
    let config = test_config(
        &host,
        format!("{}/", base_url),
        report_path.to_string_lossy().to_string(),
        2,
    );

    let coordinator = Coordinator::new(config).expect("coordinator builds");
    coordinator.run().await.expect("crawl completes");

    let report = std::fs::read_to_string(&report_path).expect("report written");
    let lines: Vec<&str> = report.lines().collect();

    // Index, /one, /two and the 404 all count as sighted pages
    assert_eq!(lines[0], "Unique pages: 4");
    assert_eq!(
        lines[1],
        format!("Longest page: {}/two (250 words)", base_url)
    );
    // Single host, all four sightings on it, listed after the word lines
    assert_eq!(*lines.last().unwrap(), format!("{}: 4", host));
    assert!(report.contains("Subdomains: 1\n"));
}

#[tokio::test]
async fn test_duplicate_page_contributes_no_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let host = url::Url::parse(&base_url)
        .unwrap()
        .host_str()
        .unwrap()
        .to_string();

    let shared_text = words("dup", 150);

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(html_page(
            &words("idx", 150),
            &["/copy1", "/copy2"],
        )))
        .mount(&mock_server)
        .await;

    // Same text on both copies; only the link target differs, which the
    // text fingerprint never sees
    Mock::given(method("GET"))
        .and(path("/copy1"))
        .respond_with(html_response(html_page(&shared_text, &["/from-first"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/copy2"))
        .respond_with(html_response(html_page(&shared_text, &["/from-second"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/from-first"))
        .respond_with(html_response(html_page(&words("fst", 120), &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The duplicate's outbound link must never be followed
    Mock::given(method("GET"))
        .and(path("/from-second"))
        .respond_with(html_response(html_page(&words("snd", 120), &[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.txt");
    // Single worker keeps the copy1-before-copy2 order deterministic
    let config = test_config(
        &host,
        format!("{}/", base_url),
        report_path.to_string_lossy().to_string(),
        1,
    );

    let coordinator = Coordinator::new(config).expect("coordinator builds");
    coordinator.run().await.expect("crawl completes");

    mock_server.verify().await;

    let report = std::fs::read_to_string(&report_path).unwrap();
    // index, copy1, copy2, from-first
    assert!(report.starts_with("Unique pages: 4\n"));
}
