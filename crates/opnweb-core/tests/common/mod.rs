// Shared fixtures: an appliance mock that serves the login flow plus
// HTML pages shaped like the admin UI's tables and edit forms.
// Not every test binary uses every helper.
#![allow(dead_code)]

use std::time::Duration;

use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use opnweb_core::{Provider, ProviderConfig, TlsMode};

pub const CSRF_TOKEN: &str = "tok-0badc0de";
pub const SECRET_NAME: &str = "MgUxWQ4zf";
pub const SECRET_VALUE: &str = "c2VjcmV0";

pub fn root_page() -> String {
    format!(
        r#"<html><head><script>
             $.ajaxSetup({{ beforeSend: function(xhr) {{
               xhr.setRequestHeader( "X-CSRFToken", "{CSRF_TOKEN}" );
             }} }});
           </script></head><body>login</body></html>"#
    )
}

/// An edit form page carrying the one-shot anti-forgery input.
pub fn edit_form_page() -> String {
    format!(
        r#"<html><body><div class="content-box">
             <form method="post">
               <input type="hidden" name="{SECRET_NAME}" value="{SECRET_VALUE}" autocomplete="new-password"/>
               <input type="text" name="mac" value=""/>
             </form>
           </div></body></html>"#
    )
}

/// The per-interface static-mapping table: caption row, header row, then
/// one data row per `(mac, ip, hostname)`.
pub fn static_map_page(rows: &[(&str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<table class="table table-striped">
             <tr><td colspan="5">DHCP Static Mappings for this interface</td></tr>
             <tr><th>Static ARP</th><th>MAC address</th><th>IP address</th><th>Hostname</th><th>Description</th></tr>"#,
    );
    for (mac, ip, hostname) in rows {
        body.push_str(&format!(
            r#"<tr><td></td><td><i class="fa fa-pencil"></i> {mac}</td><td>{ip}</td><td>{hostname}</td><td>{hostname}</td></tr>"#
        ));
    }
    body.push_str("</table>");
    format!("<html><body>{body}</body></html>")
}

/// The global lease status table: header row first, data directly after.
pub fn lease_page(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<table class="table table-striped">
             <tr><th>Interface</th><th>IP address</th><th>MAC address</th><th>Hostname</th><th>Start</th><th>End</th><th>Status</th><th>Lease type</th></tr>"#,
    );
    for (interface, ip, mac, hostname) in rows {
        body.push_str(&format!(
            r#"<tr><td>{interface}</td><td>{ip}</td><td>{mac}</td><td>{hostname}</td><td></td><td></td><td>online</td><td>static</td></tr>"#
        ));
    }
    body.push_str("</table>");
    format!("<html><body>{body}</body></html>")
}

/// The global host-override table: caption row, header row, then one data
/// row per `(type, host, domain, ip)`.
pub fn override_page(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut body = String::from(
        r#"<table class="table table-striped">
             <tr><td colspan="5">Unbound host overrides</td></tr>
             <tr><th>Host</th><th>Domain</th><th>Type</th><th>Value</th><th>Description</th></tr>"#,
    );
    for (record_type, host, domain, ip) in rows {
        body.push_str(&format!(
            r#"<tr><td>{host}</td><td>{domain}</td><td>{record_type}</td><td>{ip}</td><td></td></tr>"#
        ));
    }
    body.push_str("</table>");
    format!("<html><body>{body}</body></html>")
}

/// Mount the login flow and open an authenticated provider against the
/// mock appliance.
pub async fn connect(server: &MockServer) -> Provider {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(root_page()))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;

    let config = ProviderConfig {
        url: Url::parse(&server.uri()).expect("mock server URL"),
        username: "root".into(),
        password: "opnsense".to_string().into(),
        tls: TlsMode::VerifyFull,
        timeout: Duration::from_secs(5),
    };
    Provider::connect(config).await.expect("provider connect")
}
