#![allow(clippy::unwrap_used)]
// DNS host-override service against a mock appliance.

mod common;

use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opnweb_core::{CoreError, HostOverride, OverrideId};

use common::{connect, edit_form_page, override_page, SECRET_NAME, SECRET_VALUE};

fn fixture_override() -> HostOverride {
    HostOverride {
        record_type: "A".into(),
        host: "www".into(),
        domain: "example.org".into(),
        ip: "10.0.0.5".into(),
    }
}

#[tokio::test]
async fn lists_overrides_in_table_order() {
    let server = MockServer::start().await;
    let provider = connect(&server).await;

    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[
            ("A", "www", "example.org", "10.0.0.5"),
            ("AAAA", "www", "example.org", "fd00::5"),
        ])))
        .mount(&server)
        .await;

    let overrides = provider.list_host_overrides().await.unwrap();

    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides[0].record_type, "A");
    assert_eq!(overrides[0].fqdn(), "www.example.org");
    assert_eq!(overrides[1].ip, "fd00::5");
}

#[tokio::test]
async fn resolve_requires_every_tuple_field_to_match() {
    let server = MockServer::start().await;
    let provider = connect(&server).await;

    // Same host and domain, different address: must not match.
    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[(
            "A",
            "www",
            "example.org",
            "10.0.0.6",
        )])))
        .mount(&server)
        .await;

    let id = OverrideId::new(&fixture_override(), 0);
    let result = provider.read_host_override(&id).await;

    assert!(
        matches!(result, Err(CoreError::NotFound { .. })),
        "expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn create_returns_a_handle_with_the_landed_row() {
    let server = MockServer::start().await;
    let provider = connect(&server).await;

    // First snapshot: only an unrelated entry. After submit+apply the
    // new override shows up at row 1.
    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[(
            "A",
            "mail",
            "example.org",
            "10.0.0.9",
        )])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services_unbound_host_edit.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(edit_form_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services_unbound_host_edit.php"))
        .and(body_string_contains(format!("{SECRET_NAME}={SECRET_VALUE}")))
        .and(body_string_contains("host=www"))
        .and(body_string_contains("domain=example.org"))
        .and(body_string_contains("rr=A"))
        .and(body_string_contains("ip=10.0.0.5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services_unbound_overrides.php"))
        .and(body_string_contains("apply=Apply+changes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[
            ("A", "mail", "example.org", "10.0.0.9"),
            ("A", "www", "example.org", "10.0.0.5"),
        ])))
        .mount(&server)
        .await;

    let id = provider.create_host_override(&fixture_override()).await.unwrap();

    assert_eq!(id.row, 1);
    assert_eq!(id.to_string(), "A/www/example.org/10.0.0.5/1");
}

#[tokio::test]
async fn create_of_existing_tuple_is_already_exists() {
    let server = MockServer::start().await;
    let provider = connect(&server).await;

    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[(
            "A",
            "www",
            "example.org",
            "10.0.0.5",
        )])))
        .mount(&server)
        .await;

    let result = provider.create_host_override(&fixture_override()).await;

    assert!(
        matches!(result, Err(CoreError::AlreadyExists { .. })),
        "expected AlreadyExists, got: {result:?}"
    );
}

#[tokio::test]
async fn update_edits_through_the_handle_row() {
    let server = MockServer::start().await;
    let provider = connect(&server).await;

    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[
            ("A", "mail", "example.org", "10.0.0.9"),
            ("A", "www", "example.org", "10.0.0.5"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services_unbound_host_edit.php"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(edit_form_page()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services_unbound_host_edit.php"))
        .and(body_string_contains("ip=10.0.0.7"))
        .and(body_string_contains("id=1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services_unbound_overrides.php"))
        .and(body_string_contains("apply=Apply+changes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let id = OverrideId::new(&fixture_override(), 1);
    let updated = HostOverride {
        ip: "10.0.0.7".into(),
        ..fixture_override()
    };
    provider.update_host_override(&id, &updated).await.unwrap();
}

#[tokio::test]
async fn delete_applies_without_a_secret_pair() {
    let server = MockServer::start().await;
    let provider = connect(&server).await;

    Mock::given(method("GET"))
        .and(path("/services_unbound_overrides.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string(override_page(&[(
            "A",
            "www",
            "example.org",
            "10.0.0.5",
        )])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services_unbound_overrides.php"))
        .and(body_string_contains("act=del"))
        .and(body_string_contains("id=0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    // Deletion never rendered a form, so the apply carries exactly the
    // commit field and nothing else.
    Mock::given(method("POST"))
        .and(path("/services_unbound_overrides.php"))
        .and(body_string("apply=Apply+changes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let id = OverrideId::new(&fixture_override(), 0);
    provider.delete_host_override(&id).await.unwrap();
}
