use mockito::Matcher;
use remtpl_core::{Credentials, Password};
use remtpl_fetch::{FetchError, HttpFetcher, TemplateSource};
use std::time::Duration;
use url::Url;

fn url_for(server: &mockito::Server, path: &str) -> Url {
    Url::parse(&format!("{}{}", server.url(), path)).unwrap()
}

#[test]
fn anonymous_fetch_sends_no_authorization() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/test.tmpl")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("Hello {{ name }}")
        .expect(1)
        .create();

    let fetched = HttpFetcher::default()
        .fetch(&url_for(&server, "/test.tmpl"), None)
        .expect("fetch");

    assert_eq!(fetched.body, "Hello {{ name }}");
    assert_eq!(fetched.status, 200);
    mock.assert();
}

#[test]
fn credentials_become_basic_auth_header() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/test.tmpl")
        .match_header("authorization", "Basic YWRtaW46MTIzNDU2")
        .with_status(200)
        .with_body("secret template")
        .expect(1)
        .create();

    let creds = Credentials {
        username: "admin".to_string(),
        password: Password::from("123456"),
    };
    let fetched = HttpFetcher::new(Some(Duration::from_secs(5)))
        .fetch(&url_for(&server, "/test.tmpl"), Some(&creds))
        .expect("fetch");

    assert_eq!(fetched.body, "secret template");
    mock.assert();
}

#[test]
fn non_success_status_body_is_returned_as_template() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/missing.tmpl")
        .with_status(404)
        .with_body("Not Found")
        .expect(1)
        .create();

    let fetched = HttpFetcher::default()
        .fetch(&url_for(&server, "/missing.tmpl"), None)
        .expect("non-2xx is not a fetch failure");

    assert_eq!(fetched.status, 404);
    assert_eq!(fetched.body, "Not Found");
    mock.assert();
}

#[test]
fn server_error_is_fetched_exactly_once() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/flaky.tmpl")
        .with_status(503)
        .with_body("")
        .expect(1)
        .create();

    let fetched = HttpFetcher::default()
        .fetch(&url_for(&server, "/flaky.tmpl"), None)
        .expect("fetch");
    assert_eq!(fetched.status, 503);
    assert!(fetched.body.is_empty());
    mock.assert();
}

#[test]
fn refused_connection_is_transport_error() {
    // Port 1 (tcpmux) is essentially never listening on test hosts.
    let url = Url::parse("http://127.0.0.1:1/test.tmpl").unwrap();
    let err = HttpFetcher::new(Some(Duration::from_secs(5)))
        .fetch(&url, None)
        .unwrap_err();
    match err {
        FetchError::Transport { url, message } => {
            assert_eq!(url, "http://127.0.0.1:1/test.tmpl");
            assert!(!message.is_empty());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
