//! Proxied message lookup

use pluralkit_domain::{Message, Result};
use tracing::instrument;

use crate::api::{ApiRequest, PkClient};

impl PkClient {
    /// Metadata of a proxied message, looked up by either the proxied
    /// message id or the id of the message that triggered it.
    #[instrument(skip(self))]
    pub async fn get_message(&self, message_id: u64) -> Result<Message> {
        self.execute(ApiRequest::get(format!("messages/{message_id}"))).await
    }
}
