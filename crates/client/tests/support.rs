use std::sync::Once;
use std::time::Duration;

use pluralkit_client::{PkClient, PkClientBuilder};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token-0123456789";

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary; `RUST_LOG` controls output.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Builder pointed at the mock server, with short waits so rate-limit tests
/// finish quickly.
pub fn builder_for(server: &MockServer) -> PkClientBuilder {
    init_tracing();
    PkClient::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .default_rate_limit_wait(Duration::from_millis(100))
        .no_proxy()
}

/// Authenticated client for the mock server.
pub fn client_for(server: &MockServer) -> PkClient {
    builder_for(server).token(TEST_TOKEN).build().expect("client should build")
}

/// Client without a token.
pub fn anonymous_client_for(server: &MockServer) -> PkClient {
    builder_for(server).build().expect("client should build")
}
