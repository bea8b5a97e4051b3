//! Remote sources over HTTP, mocked end to end.

use figtree::load_config;
use serde_json::json;

const YAML_BODY: &str = "parent_a:\n  child_aa: 1\n  child_ab: 2\n";
const JSON_BODY: &str = r#"{"parent_a": {"child_aa": 1, "child_ab": 2}}"#;
const INI_BODY: &str = "[parent_a]\nchild_aa = 1\nchild_ab = 2\n";

fn parsed() -> serde_json::Value {
    json!({"parent_a": {"child_aa": 1, "child_ab": 2}})
}

#[test]
fn content_type_header_selects_the_parser() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/yaml")
        .with_body(YAML_BODY)
        .create();

    let conf = load_config([server.url()]).expect("load");
    mock.assert();
    assert_eq!(conf, parsed());
}

#[test]
fn text_plain_responses_parse_as_ini() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(INI_BODY)
        .create();

    let conf = load_config([server.url()]).expect("load");
    mock.assert();
    assert_eq!(conf, parsed());
}

#[test]
fn url_path_extension_overrides_an_unknown_content_type() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/config.json")
        .with_status(200)
        .with_header("content-type", "application/x-testtestest")
        .with_body(JSON_BODY)
        .create();

    let conf = load_config([format!("{}/config.json", server.url())]).expect("load");
    mock.assert();
    assert_eq!(conf, parsed());
}

#[test]
fn hintless_responses_fall_back_to_sniffing() {
    let mut server = mockito::Server::new();
    // No usable media type and no usable extension on the path.
    let mock = server
        .mock("GET", "/data")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body(JSON_BODY)
        .create();

    let conf = load_config([format!("{}/data", server.url())]).expect("load");
    mock.assert();
    assert_eq!(conf, parsed());
}

#[test]
fn http_error_statuses_are_absence() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/config.yaml").with_status(404).create();

    let conf = load_config([format!("{}/config.yaml", server.url())]).expect("load");
    mock.assert();
    assert!(conf.is_empty());
}

#[test]
fn unreachable_servers_are_absence() {
    let conf = load_config(["http://127.0.0.1:9/config.yaml"]).expect("load");
    assert!(conf.is_empty());
}

#[test]
fn remote_failure_falls_through_to_the_next_source() {
    let mut server = mockito::Server::new();
    let missing = server.mock("GET", "/missing.json").with_status(404).create();
    let good = server
        .mock("GET", "/present.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(JSON_BODY)
        .create();

    let conf = load_config([
        format!("{}/missing.json", server.url()),
        format!("{}/present.json", server.url()),
    ])
    .expect("load");
    missing.assert();
    good.assert();
    assert_eq!(conf, parsed());
}
