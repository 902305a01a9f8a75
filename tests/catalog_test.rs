use getcomics_cli::clients::CatalogClient;
use getcomics_cli::{AppError, Config, ResolutionMode, SearchFlow};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.uri(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_and_resolve_over_http() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/page/1/"))
        .and(query_param("s", "spider-man vol 2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<html><head><title>Search</title></head><body>
                 <a href="{base}/marvel/spider-man-vol-2-2019/">Spider-Man Vol. 2 (2019)</a>
                 <a href="https://elsewhere.example/marvel/spider-man-vol-2-2019/">Spider-Man elsewhere</a>
               </body></html>"#
        )))
        .mount(&server)
        .await;

    mount_html(
        &server,
        "/marvel/spider-man-vol-2-2019/",
        format!(
            r#"<ul>
                 <li>Spider-Man Vol 1 (180 MB) <a href="{base}/dlds/v1">Main Server</a></li>
                 <li>Spider-Man Vol 2 (150 MB) <a href="{base}/dlds/v2">Main Server</a>
                     <a href="{base}/mirror/v2">Mirror</a></li>
               </ul>"#
        ),
    )
    .await;

    let config = config_for(&server);
    let client = Arc::new(CatalogClient::new(&config).unwrap());
    let flow = SearchFlow::new(client, &config).unwrap();

    let ctx = flow.context("Spider Man Vol 2", 1);
    assert_eq!(ctx.mode, ResolutionMode::VolumeSeries);

    let buckets = flow.search(&ctx).await.unwrap();
    let results = buckets.flatten();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].year, "2019");
    // 居中段落不存在时从 <li> 中读取大小
    assert_eq!(results[0].size_label, "150 MB");

    let links = flow.resolve(&ctx, results[0]).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, format!("{}/dlds/v2", base));
    assert_eq!(links[0].volume_index, 1);
}

#[tokio::test]
async fn test_server_error_degrades_to_no_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let client = Arc::new(CatalogClient::new(&config).unwrap());
    let flow = SearchFlow::new(client, &config).unwrap();

    let ctx = flow.context("saga", 1);
    assert!(flow.fetch_and_classify(&ctx).await.is_empty());
    assert!(matches!(
        flow.search(&ctx).await,
        Err(AppError::NoResultsFound { .. })
    ));
}

#[tokio::test]
async fn test_single_edition_over_http() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .and(query_param("s", "saga"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<a href="{base}/other-comics/saga-compendium-one-2019/">Saga Compendium One</a>"#
        )))
        .mount(&server)
        .await;

    mount_html(
        &server,
        "/other-comics/saga-compendium-one-2019/",
        format!(
            r#"<p style="text-align: center;">Size : 1.2 MB</p>
               <a title="DOWNLOAD NOW" href="{base}/dlds/compendium">Download</a>
               <a title="DOWNLOAD NOW" href="https://mirror.example/file.cbr">Mirror</a>"#
        ),
    )
    .await;

    let config = config_for(&server);
    let client = Arc::new(CatalogClient::new(&config).unwrap());
    let flow = SearchFlow::new(client, &config).unwrap();

    let ctx = flow.context("Saga", 2);
    let buckets = flow.search(&ctx).await.unwrap();
    let selected = buckets.flatten()[0].clone();
    assert_eq!(selected.size_label, "1.2 MB");

    let links = flow.resolve(&ctx, &selected).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, format!("{}/dlds/compendium", base));
}
