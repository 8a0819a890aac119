//! Gmail API client implementing `MailSource`

use crate::error::MailError;
use async_trait::async_trait;
use google_gmail1::api::{Message, MessagePart};
use google_gmail1::hyper_rustls::HttpsConnector;
use google_gmail1::Gmail;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use ledgermail_domain::{MailSource, Query, RawMessage};
use std::path::Path;
use tracing::{debug, info, warn};

/// `MailSource` backed by the Gmail API
///
/// Authenticates with the installed-application OAuth flow: a client-secret
/// JSON file plus an on-disk token cache that is created on first run and
/// refreshed silently afterwards.
pub struct GmailSource {
    hub: Gmail<HttpsConnector<HttpConnector>>,
}

impl GmailSource {
    /// Connect using a client-secret file and a token cache path
    pub async fn connect(
        client_secret: impl AsRef<Path>,
        token_cache: impl AsRef<Path>,
    ) -> Result<Self, MailError> {
        let secret = google_gmail1::yup_oauth2::read_application_secret(client_secret.as_ref())
            .await
            .map_err(|e| MailError::Auth(format!("Failed to read client secret: {}", e)))?;

        // Use the yup_oauth2 re-exported by google_gmail1 to avoid version mismatch
        let auth = google_gmail1::yup_oauth2::InstalledFlowAuthenticator::builder(
            secret,
            google_gmail1::yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
        )
        .persist_tokens_to_disk(token_cache.as_ref())
        .build()
        .await
        .map_err(|e| MailError::Auth(format!("Failed to build authenticator: {}", e)))?;

        let connector = google_gmail1::hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| MailError::Auth(format!("Failed to load native TLS roots: {}", e)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            hub: Gmail::new(client, auth),
        })
    }
}

#[async_trait]
impl MailSource for GmailSource {
    type Error = MailError;

    async fn search(&self, query: &Query) -> Result<Vec<RawMessage>, Self::Error> {
        debug!("Mail search query: {}", query);

        let (_, list_response) = self
            .hub
            .users()
            .messages_list("me")
            .q(query.as_str())
            .doit()
            .await
            .map_err(|e| MailError::Api(format!("Failed to list messages: {}", e)))?;

        let ids = list_response.messages.unwrap_or_default();
        let mut messages = Vec::new();

        for msg in ids {
            let Some(id) = msg.id else { continue };

            let (_, message) = self
                .hub
                .users()
                .messages_get("me", &id)
                .format("full")
                .doit()
                .await
                .map_err(|e| MailError::Api(format!("Failed to get message {}: {}", id, e)))?;

            match extract_text_body(&message) {
                Some(body) => messages.push(RawMessage::new(body)),
                None => warn!("Message {} has no text body, skipping", id),
            }
        }

        if messages.is_empty() {
            info!("No new emails found");
        } else {
            info!("{} new email(s) found", messages.len());
        }

        Ok(messages)
    }
}

/// Pull the plain-text body out of a message payload.
///
/// A single-part message's body is taken as-is; multipart messages are
/// searched (recursively) for the first `text/plain` part.
fn extract_text_body(message: &Message) -> Option<String> {
    let payload = message.payload.as_ref()?;

    if let Some(data) = payload.body.as_ref().and_then(|b| b.data.as_ref()) {
        if let Some(decoded) = bytes_to_string(data) {
            return Some(decoded);
        }
    }

    payload.parts.as_deref().and_then(find_text_part)
}

fn find_text_part(parts: &[MessagePart]) -> Option<String> {
    for part in parts {
        match part.mime_type.as_deref() {
            Some("text/plain") => {
                if let Some(data) = part.body.as_ref().and_then(|b| b.data.as_ref()) {
                    if let Some(decoded) = bytes_to_string(data) {
                        return Some(decoded);
                    }
                }
            }
            Some(mime) if mime.starts_with("multipart/") => {
                if let Some(nested) = part.parts.as_deref() {
                    if let Some(found) = find_text_part(nested) {
                        return Some(found);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

fn bytes_to_string(data: &[u8]) -> Option<String> {
    String::from_utf8(data.to_vec()).ok()
}
