//! Google Sheets client implementing `RowSink`

use crate::error::SheetError;
use async_trait::async_trait;
use google_sheets4::api::ValueRange;
use google_sheets4::hyper_rustls::HttpsConnector;
use google_sheets4::Sheets;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use ledgermail_domain::{RowSink, TransactionRecord};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// `RowSink` backed by the Google Sheets API
///
/// Authenticates with a service-account key. The target spreadsheet is
/// addressed by ID; `range` names the sheet (and anchor cell) the append
/// searches from, e.g. `Sheet1!A1`.
pub struct SheetSink {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    spreadsheet_id: String,
    range: String,
}

impl SheetSink {
    /// Connect using a service-account key file
    pub async fn connect(
        service_account_key: impl AsRef<Path>,
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
    ) -> Result<Self, SheetError> {
        let key = google_sheets4::yup_oauth2::read_service_account_key(
            service_account_key.as_ref(),
        )
        .await
        .map_err(|e| SheetError::Auth(format!("Failed to read service account key: {}", e)))?;

        // Use the yup_oauth2 re-exported by google_sheets4 to avoid version mismatch
        let auth = google_sheets4::yup_oauth2::ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| SheetError::Auth(format!("Failed to build authenticator: {}", e)))?;

        let connector = google_sheets4::hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| SheetError::Auth(format!("Failed to load native TLS roots: {}", e)))?
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            hub: Sheets::new(client, auth),
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
        })
    }
}

#[async_trait]
impl RowSink for SheetSink {
    type Error = SheetError;

    async fn append(&self, rows: &[TransactionRecord]) -> Result<(), Self::Error> {
        let values: Vec<Vec<Value>> = rows
            .iter()
            .map(|record| record.to_row().into_iter().map(Value::String).collect())
            .collect();

        debug!(
            "Appending {} row(s) to spreadsheet {}",
            values.len(),
            self.spreadsheet_id
        );

        let request = ValueRange {
            values: Some(values),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .values_append(request, &self.spreadsheet_id, &self.range)
            .value_input_option("USER_ENTERED")
            .doit()
            .await
            .map_err(|e| SheetError::Upload(format!("Failed to append rows: {}", e)))?;

        info!("Appended {} row(s)", rows.len());
        Ok(())
    }
}
