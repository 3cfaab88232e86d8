//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use sitewalk::config::{Config, CrawlerConfig, HttpConfig};
use sitewalk::crawler::{
    build_http_client, crawl, extract_links, ExtractError, Frontier, PageOutcome,
};
use sitewalk::output::{FileSink, LinkSink, MemorySink};
use sitewalk::robots;
use sitewalk::url::{Origin, LINE_SEPARATOR};
use sitewalk::CrawlError;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> reqwest::Client {
    build_http_client(&HttpConfig {
        timeout_secs: 5,
        user_agent: None,
    })
    .expect("Failed to build client")
}

fn new_frontier<S: LinkSink>(
    seeds: &[String],
    ignore: &[String],
    sink: S,
    options: CrawlerConfig,
) -> Frontier<S> {
    Frontier::new(
        test_client(),
        seeds.to_vec(),
        ignore.to_vec(),
        sink,
        options,
    )
    .expect("Failed to create frontier")
}

fn html_page(hrefs: &[&str]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", anchors))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, page: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html_page(hrefs))
        .mount(server)
        .await;
}

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_first_page_filters_and_queues() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /private/page").await;
    mount_page(
        &server,
        "/",
        &["/private/page", "/about", "#top", "mailto:x@y.com"],
    )
    .await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );

    let outcome = frontier.step().await.expect("Step failed");

    assert_eq!(outcome, Some(PageOutcome::Crawled { found: 2, new: 2 }));
    assert_eq!(
        frontier.discovered(),
        &[format!("{}/about", base), "mailto:x@y.com".to_string()]
    );
    assert_eq!(
        frontier.queue(),
        &[format!("{}/about", base), "mailto:x@y.com".to_string()]
    );
    assert!(frontier.is_crawled(&format!("{}/", base)));
}

#[tokio::test]
async fn test_first_page_http_only_queue() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "Disallow: /private/page").await;
    mount_page(
        &server,
        "/",
        &["/private/page", "/about", "#top", "mailto:x@y.com"],
    )
    .await;

    let options = CrawlerConfig {
        http_only: true,
        max_pages: 0,
    };
    let mut frontier = new_frontier(&[format!("{}/", base)], &[], MemorySink::new(), options);

    frontier.step().await.expect("Step failed");

    assert_eq!(frontier.discovered().len(), 2);
    assert_eq!(frontier.queue(), &[format!("{}/about", base)]);
}

#[tokio::test]
async fn test_disallow_sub_path_is_not_filtered() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "Disallow: /private").await;
    mount_page(&server, "/", &["/private", "/private/page"]).await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );

    frontier.step().await.expect("Step failed");

    assert_eq!(frontier.discovered(), &[format!("{}/private/page", base)]);
}

#[tokio::test]
async fn test_full_crawl_writes_output_file() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "Disallow: /private/page").await;
    mount_page(
        &server,
        "/",
        &["/private/page", "/about", "#top", "mailto:x@y.com"],
    )
    .await;
    mount_page(&server, "/about", &[]).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        FileSink::new(&output),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(stats.urls_skipped, 1); // mailto has no origin
    assert_eq!(stats.origins_resolved, 1);
    assert_eq!(stats.links_disallowed, 1);
    assert_eq!(stats.links_discovered, 2);
    assert!(frontier.queue().is_empty());

    let content = std::fs::read_to_string(&output).expect("Output missing");
    assert_eq!(
        content,
        format!("{}/about{}mailto:x@y.com", base, LINE_SEPARATOR)
    );
}

#[tokio::test]
async fn test_ignored_url_triggers_no_fetch() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .respond_with(html_page(&["/elsewhere"]))
        .expect(0)
        .mount(&server)
        .await;

    let seed = format!("{}/", base);
    let mut frontier = new_frontier(
        &[seed.clone()],
        &[seed.clone()],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_ignored, 1);
    assert_eq!(stats.pages_crawled, 0);
    assert!(!frontier.is_crawled(&seed));
    assert!(frontier.sink().snapshots().is_empty());
}

#[tokio::test]
async fn test_ignored_link_is_discovered_but_not_fetched() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/skip", "/keep"]).await;
    mount_page(&server, "/keep", &[]).await;
    Mock::given(method("GET"))
        .and(path("/skip"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[format!("{}/skip", base)],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    frontier.run().await.expect("Crawl failed");

    assert!(frontier
        .discovered()
        .contains(&format!("{}/skip", base)));
    assert!(frontier.is_crawled(&format!("{}/keep", base)));
}

#[tokio::test]
async fn test_robots_fetched_once_per_origin() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Allow: /"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/", &["/a", "/b"]).await;
    mount_page(&server, "/a", &["/b"]).await;
    mount_page(&server, "/b", &[]).await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 3);
    assert_eq!(stats.origins_resolved, 1);
    assert_eq!(frontier.origins_resolved(), 1);
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    let base = server.uri();

    // No robots.txt mock: wiremock answers 404
    mount_page(&server, "/", &["/a"]).await;
    mount_page(&server, "/a", &[]).await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(stats.origins_resolved, 1);
}

#[tokio::test]
async fn test_cycle_is_crawled_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&["/a", "/"]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(&["/", "/a"]))
        .expect(1)
        .mount(&server)
        .await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(
        frontier.discovered(),
        &[format!("{}/a", base), format!("{}/", base)]
    );
}

#[tokio::test]
async fn test_failed_page_is_not_marked_crawled() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/broken", "/a"]).await;
    mount_page(&server, "/a", &["/broken"]).await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(stats.pages_failed, 2);
    assert!(!frontier.is_crawled(&format!("{}/broken", base)));
    assert!(frontier
        .discovered()
        .contains(&format!("{}/broken", base)));
}

#[tokio::test]
async fn test_persistence_reflects_cumulative_state() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/a", "/b"]).await;
    mount_page(&server, "/b", &["/c", "/a"]).await;
    mount_page(&server, "/c", &[]).await;
    mount_page(&server, "/a", &[]).await;

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    frontier.run().await.expect("Crawl failed");

    let a = format!("{}/a", base);
    let b = format!("{}/b", base);
    let c = format!("{}/c", base);

    // "/a" is queued twice (by "/" and by "/b") before it is crawled, and
    // both entries are processed
    let snapshots = frontier.sink().snapshots();
    assert_eq!(snapshots.len(), 5);
    assert_eq!(snapshots[0], vec![a.clone(), b.clone()]);
    assert_eq!(snapshots[1], vec![a.clone(), b.clone(), c.clone()]);
    assert_eq!(snapshots[4], vec![a, b, c]);
}

#[tokio::test]
async fn test_failed_seed_writes_no_output() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.txt");

    let mut frontier = new_frontier(
        &[format!("{}/", base)],
        &[],
        FileSink::new(&output),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_failed, 1);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_seeds_crawled_last_first() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/first", &[]).await;
    mount_page(&server, "/second", &[]).await;

    let mut frontier = new_frontier(
        &[format!("{}/first", base), format!("{}/second", base)],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );

    frontier.step().await.expect("Step failed");

    assert!(frontier.is_crawled(&format!("{}/second", base)));
    assert!(!frontier.is_crawled(&format!("{}/first", base)));
}

#[tokio::test]
async fn test_max_pages_stops_early() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/a", "/b"]).await;
    mount_page(&server, "/a", &[]).await;
    mount_page(&server, "/b", &[]).await;

    let options = CrawlerConfig {
        http_only: false,
        max_pages: 2,
    };
    let mut frontier = new_frontier(&[format!("{}/", base)], &[], MemorySink::new(), options);
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(frontier.queue(), &[format!("{}/a", base)]);
}

#[tokio::test]
async fn test_extract_links_distinguishes_empty_from_failure() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/empty", &[]).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let client = test_client();

    let empty = extract_links(&client, &format!("{}/empty", base)).await;
    assert!(matches!(empty, Ok(ref links) if links.is_empty()));

    let gone = extract_links(&client, &format!("{}/gone", base)).await;
    assert!(matches!(gone, Err(ExtractError::Http { status_code: 410, .. })));
}

#[tokio::test]
async fn test_extract_links_network_failure() {
    // Bind and drop a listener so nothing is listening on its port
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = extract_links(&test_client(), &format!("http://127.0.0.1:{}/", port)).await;
    assert!(matches!(result, Err(ExtractError::Network { .. })));
}

#[tokio::test]
async fn test_resolve_robots_server_error_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Disallow: /x"))
        .mount(&server)
        .await;

    let origin = Origin::parse(&server.uri()).unwrap();
    let policy = robots::resolve(&test_client(), &origin).await;

    assert!(policy.is_empty());
}

#[tokio::test]
async fn test_resolve_robots_prefixes_origin() {
    let server = MockServer::start().await;

    mount_robots(&server, "User-agent: *\nAllow: /docs\nDisallow: /admin").await;

    let origin = Origin::parse(&server.uri()).unwrap();
    let policy = robots::resolve(&test_client(), &origin).await;

    assert_eq!(policy.allow, vec![format!("{}/docs", server.uri())]);
    assert_eq!(policy.disallow, vec![format!("{}/admin", server.uri())]);
}

#[tokio::test]
async fn test_crawl_from_config_files() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", &["/a", "/secret"]).await;
    mount_page(&server, "/a", &[]).await;
    Mock::given(method("GET"))
        .and(path("/secret"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let seeds = dir.path().join("input.txt");
    let ignore = dir.path().join("ignore.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&seeds, format!("{}/{}", base, LINE_SEPARATOR)).unwrap();
    std::fs::write(&ignore, format!("{}/secret", base)).unwrap();

    let mut config = Config::default();
    config.input.seeds_path = seeds.display().to_string();
    config.input.ignore_path = ignore.display().to_string();
    config.output.links_path = output.display().to_string();
    config.http.timeout_secs = 5;

    let stats = crawl(&config).await.expect("Crawl failed");

    assert_eq!(stats.pages_crawled, 2);
    assert_eq!(stats.pages_ignored, 1);

    let content = std::fs::read_to_string(&output).expect("Output missing");
    assert_eq!(
        content,
        format!("{}/a{}{}/secret", base, LINE_SEPARATOR, base)
    );
}

#[tokio::test]
async fn test_crawl_with_empty_seed_file() {
    let dir = TempDir::new().unwrap();
    let seeds = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    std::fs::write(&seeds, "").unwrap();

    let mut config = Config::default();
    config.input.seeds_path = seeds.display().to_string();
    config.input.ignore_path = dir.path().join("ignore.txt").display().to_string();
    config.output.links_path = output.display().to_string();

    let result = crawl(&config).await;

    assert!(matches!(result, Err(CrawlError::NoSeeds)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_cross_origin_crawl_uses_crawled_page_policy() {
    let site_a = MockServer::start().await;
    let site_b = MockServer::start().await;
    let a = site_a.uri();
    let b = site_b.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /x"))
        .expect(1)
        .mount(&site_a)
        .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Disallow: /y"))
        .expect(1)
        .mount(&site_b)
        .await;

    let b_root = format!("{}/", b);
    let b_y = format!("{}/y", b);
    let a_root = format!("{}/", a);
    let a_x = format!("{}/x", a);

    // Each site links to its own disallowed page and to the other site's
    mount_page(&site_a, "/", &["/x", b_root.as_str(), b_y.as_str()]).await;
    mount_page(&site_b, "/", &["/y", a_x.as_str(), a_root.as_str()]).await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&site_a)
        .await;
    Mock::given(method("GET"))
        .and(path("/y"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&site_b)
        .await;

    let mut frontier = new_frontier(
        &[a_root.clone()],
        &[],
        MemorySink::new(),
        CrawlerConfig::default(),
    );
    let stats = frontier.run().await.expect("Crawl failed");

    // A's rule drops its own /x but not B's /y, and the other way round
    assert_eq!(frontier.discovered(), &[b_root, b_y, a_x.clone(), a_root]);
    assert_eq!(stats.origins_resolved, 2);
    assert_eq!(frontier.origins_resolved(), 2);
    assert_eq!(stats.links_disallowed, 2);
    assert_eq!(stats.pages_crawled, 4);
    assert!(frontier.is_crawled(&a_x));
}

#[tokio::test]
async fn test_max_pages_ignores_failed_pages() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", &["/next"]).await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .respond_with(html_page(&[]))
        .expect(0)
        .mount(&server)
        .await;

    // "/broken" is popped first; its failure does not use up the limit
    let options = CrawlerConfig {
        http_only: false,
        max_pages: 1,
    };
    let mut frontier = new_frontier(
        &[format!("{}/ok", base), format!("{}/broken", base)],
        &[],
        MemorySink::new(),
        options,
    );
    let stats = frontier.run().await.expect("Crawl failed");

    assert_eq!(stats.pages_failed, 1);
    assert_eq!(stats.pages_crawled, 1);
    assert!(frontier.is_crawled(&format!("{}/ok", base)));
    assert_eq!(frontier.queue(), &[format!("{}/next", base)]);
}
