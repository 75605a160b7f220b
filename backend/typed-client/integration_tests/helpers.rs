use typed_client::{Client, ClientBuilder};

use wiremock::MockServer;
use wiremock::Request;

/// Builder pointed at the mock server root.
pub fn builder_for(server: &MockServer) -> ClientBuilder {
    Client::builder().base_url(format!("{}/", server.uri()))
}

pub fn client_for(server: &MockServer) -> Client {
    builder_for(server).build().expect("client should build")
}

/// Every value the server saw for `name`, in order.
pub fn header_values(request: &Request, name: &str) -> Vec<String> {
    request
        .headers
        .get_all(name)
        .iter()
        .map(|value| value.to_str().expect("ascii header").to_string())
        .collect()
}

pub async fn only_request(server: &MockServer) -> Request {
    let mut requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests.remove(0)
}
