use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use sf_exchange_client::Result;

use crate::sobject::CreateResult;

impl super::RestClient {
    /// Fetch one record. An empty `fields` slice returns all fields.
    #[instrument(skip(self))]
    pub async fn get_sobject<T: DeserializeOwned>(
        &self,
        sobject: &str,
        id: &str,
        fields: &[&str],
    ) -> Result<T> {
        let url = self.base.data_url(&super::record_path(sobject, id));
        let mut exchange = self.base.get(&url);
        if !fields.is_empty() {
            exchange = exchange.query("fields", fields.join(","));
        }
        self.fetch_json(exchange).await
    }

    /// Create a record.
    #[instrument(skip(self, record))]
    pub async fn create_sobject<T: Serialize>(
        &self,
        sobject: &str,
        record: &T,
    ) -> Result<CreateResult> {
        let url = self.base.data_url(&super::sobject_path(sobject));
        let exchange = self.base.post(&url).json(record)?;
        self.fetch_json(exchange).await
    }

    /// Update fields of a record. Salesforce answers 204 with no body.
    #[instrument(skip(self, fields))]
    pub async fn update_sobject<T: Serialize>(
        &self,
        sobject: &str,
        id: &str,
        fields: &T,
    ) -> Result<()> {
        let url = self.base.data_url(&super::record_path(sobject, id));
        let exchange = self.base.patch(&url).json(fields)?;
        self.fetch_empty(exchange).await
    }

    /// Delete a record.
    #[instrument(skip(self))]
    pub async fn delete_sobject(&self, sobject: &str, id: &str) -> Result<()> {
        let url = self.base.data_url(&super::record_path(sobject, id));
        self.fetch_empty(self.base.delete(&url)).await
    }
}
