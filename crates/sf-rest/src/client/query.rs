use serde::de::DeserializeOwned;
use tracing::instrument;

use sf_exchange_client::Result;

use crate::sobject::QueryResult;

impl super::RestClient {
    /// Run a SOQL query and return the first page.
    ///
    /// The query text is sent as-is; escape user-supplied literals before
    /// building it.
    #[instrument(skip(self))]
    pub async fn query<T: DeserializeOwned>(&self, soql: &str) -> Result<QueryResult<T>> {
        let exchange = self.base.get(&self.base.data_url("query/")).query("q", soql);
        self.fetch_json(exchange).await
    }

    /// Fetch the next page from a previous result's `nextRecordsUrl`.
    #[instrument(skip(self))]
    pub async fn query_more<T: DeserializeOwned>(
        &self,
        next_records_url: &str,
    ) -> Result<QueryResult<T>> {
        self.fetch_json(self.base.get(next_records_url)).await
    }
}
