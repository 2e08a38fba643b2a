use tracing::instrument;

use sf_exchange_client::Result;

use crate::describe::{ApiVersion, DescribeGlobalResult, DescribeSObjectResult, SObjectSummary};

impl super::RestClient {
    /// List the API versions the instance serves.
    #[instrument(skip(self))]
    pub async fn versions(&self) -> Result<Vec<ApiVersion>> {
        self.fetch_json(self.base.get("/services/data/")).await
    }

    /// List the resources available for this API version.
    #[instrument(skip(self))]
    pub async fn resources(&self) -> Result<serde_json::Value> {
        self.fetch_json(self.base.get(&self.base.data_url(""))).await
    }

    /// Describe all sObjects visible to the user (describeGlobal).
    #[instrument(skip(self))]
    pub async fn global_objects(&self) -> Result<DescribeGlobalResult> {
        self.fetch_json(self.base.get(&self.base.data_url("sobjects/")))
            .await
    }

    /// Basic info and recent items for one sObject type.
    #[instrument(skip(self))]
    pub async fn sobject_basic_info(&self, sobject: &str) -> Result<SObjectSummary> {
        let url = self.base.data_url(&super::sobject_path(sobject));
        self.fetch_json(self.base.get(&url)).await
    }

    /// Full describe of one sObject type.
    #[instrument(skip(self))]
    pub async fn describe_sobject(&self, sobject: &str) -> Result<DescribeSObjectResult> {
        let url = self
            .base
            .data_url(&format!("{}describe/", super::sobject_path(sobject)));
        self.fetch_json(self.base.get(&url)).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::test_support::{rest_client, TOKEN};

    #[tokio::test]
    async fn test_versions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"version": "61.0", "label": "Summer '24", "url": "/services/data/v61.0"},
                {"version": "62.0", "label": "Winter '25", "url": "/services/data/v62.0"}
            ])))
            .mount(&server)
            .await;

        let client = rest_client(&server).await;
        let versions = client.versions().await.unwrap();

        assert_eq!(versions.len(), 2);
        assert_eq!(versions[1].version, "62.0");
    }

    #[tokio::test]
    async fn test_global_objects_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/"))
            .and(header("Authorization", format!("Bearer {}", TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "encoding": "UTF-8",
                "maxBatchSize": 200,
                "sobjects": [
                    {"name": "Account", "label": "Account", "keyPrefix": "001",
                     "custom": false, "queryable": true}
                ]
            })))
            .mount(&server)
            .await;

        let client = rest_client(&server).await;
        let global = client.global_objects().await.unwrap();

        assert_eq!(global.max_batch_size, 200);
        assert_eq!(global.sobjects[0].key_prefix.as_deref(), Some("001"));
    }

    #[tokio::test]
    async fn test_sobject_basic_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Contact/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objectDescribe": {"name": "Contact", "label": "Contact"},
                "recentItems": [{"Id": "003xx"}]
            })))
            .mount(&server)
            .await;

        let client = rest_client(&server).await;
        let summary = client.sobject_basic_info("Contact").await.unwrap();

        assert_eq!(summary.object_describe.name, "Contact");
        assert_eq!(summary.recent_items.len(), 1);
    }

    #[tokio::test]
    async fn test_describe_sobject() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Account/describe/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Account",
                "label": "Account",
                "fields": [
                    {"name": "Name", "label": "Account Name", "type": "string", "length": 255}
                ]
            })))
            .mount(&server)
            .await;

        let client = rest_client(&server).await;
        let describe = client.describe_sobject("Account").await.unwrap();

        let field = describe.field("name").unwrap();
        assert_eq!(field.field_type, "string");
        assert_eq!(field.length, 255);
    }

    #[tokio::test]
    async fn test_unknown_sobject_is_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/services/data/v62.0/sobjects/Nope/describe/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!([
                {"errorCode": "NOT_FOUND", "message": "The requested resource does not exist"}
            ])))
            .mount(&server)
            .await;

        let client = rest_client(&server).await;
        let err = client.describe_sobject("Nope").await.unwrap_err();

        assert_eq!(err.status_code(), Some(404));
        assert_eq!(err.api_error().unwrap().error_code, "NOT_FOUND");
    }
}
