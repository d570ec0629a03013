use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ABS_PAGE: &str = r#"
<!DOCTYPE html>
<html>
<head><title>[2101.00001] A Paper About Things</title></head>
<body>
  <div id="content-inner">
    <h1 class="title">A Paper About Things</h1>
    <div class="authors">A. Author, B. Author</div>
    <blockquote class="abstract mathjax">
      <span class="descriptor">Abstract:</span>
      We study things and
      find   that they are interesting.
    </blockquote>
  </div>
</body>
</html>
"#;

#[test]
fn extracts_and_normalizes_abstract_text() {
    let text = extract_abstract(ABS_PAGE).expect("extraction failed");
    assert_eq!(
        text,
        "Abstract: We study things and find that they are interesting."
    );
}

#[test]
fn missing_content_section_is_an_error() {
    let html = "<html><body><p>nothing here</p></body></html>";
    assert!(matches!(
        extract_abstract(html),
        Err(SearchError::Fetch(_))
    ));
}

#[test]
fn missing_abstract_is_an_error() {
    let html = r#"<html><body><div id="content-inner"><p>no abstract</p></div></body></html>"#;
    assert!(matches!(
        extract_abstract(html),
        Err(SearchError::Fetch(_))
    ));
}

#[test]
fn abstract_outside_content_section_is_ignored() {
    let html = r#"
        <html><body>
          <blockquote class="abstract">stray abstract</blockquote>
          <div id="content-inner"><p>text</p></div>
        </body></html>
    "#;
    assert!(matches!(
        extract_abstract(html),
        Err(SearchError::Fetch(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_abstract_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abs/2101.00001"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ABS_PAGE, "text/html"))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/abs/2101.00001", server.uri())).expect("url should parse");
    let fetcher = ArxivAbstractFetcher::new(std::time::Duration::from_secs(5));

    let text = tokio::task::spawn_blocking(move || fetcher.fetch(&url))
        .await
        .expect("task panicked")
        .expect("fetch failed");

    assert!(text.starts_with("Abstract:"));
    assert!(text.contains("interesting"));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_maps_to_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = Url::parse(&format!("{}/abs/gone", server.uri())).expect("url should parse");
    let fetcher = ArxivAbstractFetcher::new(std::time::Duration::from_secs(5));

    let result = tokio::task::spawn_blocking(move || fetcher.fetch(&url))
        .await
        .expect("task panicked");

    assert!(matches!(result, Err(SearchError::Fetch(_))));
}
