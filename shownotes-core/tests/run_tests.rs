// Tests for whole runs against a mock podcast site

use shownotes_core::Category;
use shownotes_core::directory::{PathRule, SiteDirectory};
use shownotes_core::run::{EpisodeSelection, RunOptions, execute_run};
use shownotes_scanner::HttpFetcher;
use std::time::{Duration, Instant};
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

async fn mount_html(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_bytes(html.into_bytes()),
        )
        .mount(server)
        .await;
}

/// A site with episodes 1 and 3 carrying show notes and episode 2 without any.
async fn podcast_site() -> MockServer {
    let server = MockServer::start().await;
    let uri = server.uri();

    mount_html(
        &server,
        "/podcast/ep1",
        format!(
            r#"<html><body>
                <h3>Show notes</h3>
                <ul>
                    <li><a href="{uri}/m/departed/">The Departed</a></li>
                    <li><a href="{uri}/go/veep">Veep</a></li>
                    <li><a href="{uri}/scales">Kitchen scales</a></li>
                    <li><a href="/relative">Relative</a></li>
                </ul>
            </body></html>"#
        ),
    )
    .await;
    mount_html(
        &server,
        "/podcast/ep2",
        "<html><body><p>Show notes coming soon</p></body></html>".to_string(),
    )
    .await;
    mount_html(
        &server,
        "/podcast/ep3",
        format!(
            r#"<html><body>
                <p style="white-space:pre-wrap;"><a href="{uri}/m/alien/">Alien</a></p>
            </body></html>"#
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/go/veep"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", format!("{}/tv/veep/", uri)))
        .mount(&server)
        .await;

    for route in ["/m/departed/", "/m/alien/", "/tv/veep/", "/scales"] {
        mount_html(&server, route, "<html><body>landing</body></html>".to_string()).await;
    }

    server
}

fn directory_for(server: &MockServer) -> SiteDirectory {
    let url = Url::parse(&server.uri()).unwrap();
    let netloc = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());
    SiteDirectory::empty()
        .with_path_rule(PathRule::new(&netloc, "/m/", Category::Film))
        .with_path_rule(PathRule::new(&netloc, "/tv/", Category::TvShow))
}

fn options_for(server: &MockServer, selection: EpisodeSelection) -> RunOptions {
    RunOptions {
        selection,
        base_episodes_url: format!("{}/podcast", server.uri()),
        feed_url: format!("{}/feed", server.uri()),
        pause: Duration::ZERO,
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn test_run_continues_past_structure_errors() {
    let server = podcast_site().await;
    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();

    let outcome = execute_run(
        options_for(&server, EpisodeSelection::Numbers(vec![1, 2, 3])),
        directory_for(&server),
        &fetcher,
        None,
    )
    .await
    .unwrap();

    assert_eq!(outcome.episodes.len(), 2);
    assert_eq!(outcome.episodes[0].label, "1");
    assert_eq!(outcome.episodes[1].label, "3");

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].label, "2");
    assert!(outcome.failures[0].error.contains("/podcast/ep2"));

    let first = &outcome.episodes[0].result;
    assert_eq!(first.total(), 3);
    assert_eq!(first.get(Category::Film)[0].text, "The Departed");
    assert_eq!(first.get(Category::TvShow)[0].url, format!("{}/tv/veep/", server.uri()));
    assert_eq!(first.get(Category::Misc)[0].text, "Kitchen scales");

    let all = outcome.aggregate();
    assert_eq!(all.get(Category::Film).len(), 2);
    assert_eq!(all.total(), 4);
}

#[tokio::test]
async fn test_run_over_whole_feed() {
    let server = podcast_site().await;
    let uri = server.uri();

    let feed = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel>
  <title>Test podcast</title>
  <link>{uri}/podcast</link>
  <description>Test</description>
  <item><title>Episode three</title><link>{uri}/podcast/ep3</link></item>
  <item><title>Episode one</title><link>{uri}/podcast/ep1</link></item>
</channel></rss>"#
    );
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_bytes(feed.into_bytes()),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();
    let outcome = execute_run(
        options_for(&server, EpisodeSelection::WholeFeed),
        directory_for(&server),
        &fetcher,
        None,
    )
    .await
    .unwrap();

    let labels: Vec<&str> = outcome.episodes.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["3", "1"]);
    assert!(outcome.failures.is_empty());
}

#[tokio::test]
async fn test_unreadable_feed_fails_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<html>not a feed</html>"))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();
    let result = execute_run(
        options_for(&server, EpisodeSelection::WholeFeed),
        SiteDirectory::default(),
        &fetcher,
        None,
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_pause_between_episodes() {
    let server = podcast_site().await;
    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();

    let mut options = options_for(&server, EpisodeSelection::Numbers(vec![3, 3]));
    options.pause = Duration::from_millis(150);

    let start = Instant::now();
    let outcome = execute_run(options, directory_for(&server), &fetcher, None)
        .await
        .unwrap();

    assert_eq!(outcome.episodes.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_progress_callback_reports_each_episode() {
    use std::sync::{Arc, Mutex};

    let server = podcast_site().await;
    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();
    let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let messages_clone = messages.clone();

    execute_run(
        options_for(&server, EpisodeSelection::Numbers(vec![1, 2])),
        directory_for(&server),
        &fetcher,
        Some(Arc::new(move |msg: String| {
            messages_clone.lock().unwrap().push(msg);
        })),
    )
    .await
    .unwrap();

    let messages = messages.lock().unwrap();
    assert!(messages.iter().any(|m| m.starts_with("Episode 1 (1/2)")));
    assert!(messages.iter().any(|m| m.starts_with("Episode 2 (2/2)")));
    assert!(messages.iter().any(|m| m.contains("Failed to process episode 2")));
}

#[tokio::test]
async fn test_missing_episode_is_a_failure() {
    let server = podcast_site().await;
    let uri = server.uri();

    Mock::given(method("GET"))
        .and(path("/podcast/ep999"))
        .respond_with(ResponseTemplate::new(404).set_body_bytes(
            format!(
                r#"<html><body>
                    <ul>
                        <li><a href="{uri}/about">About us</a></li>
                        <li><a href="{uri}/podcast">Podcast</a></li>
                    </ul>
                    <p>Page not found</p>
                </body></html>"#
            )
            .into_bytes(),
        ))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_timeout(Duration::from_secs(2)).unwrap();
    let outcome = execute_run(
        options_for(&server, EpisodeSelection::Numbers(vec![999, 1])),
        directory_for(&server),
        &fetcher,
        None,
    )
    .await
    .unwrap();

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].label, "999");
    assert!(outcome.failures[0].error.contains("404"));

    assert_eq!(outcome.episodes.len(), 1);
    assert_eq!(outcome.episodes[0].label, "1");
}
