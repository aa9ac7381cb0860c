use reqwest::multipart;
use sales_service::config::SalesConfig;
use sales_service::services::SummaryStore;
use sales_service::startup::Application;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

pub const SALES_HEADER: &str = "product_name,quantity,price_per_unit";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn SummaryStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let mut config = SalesConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.common.host = IpAddr::V4(Ipv4Addr::LOCALHOST);

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            client,
        }
    }

    pub async fn upload_csv(&self, file_name: &str, contents: &str) -> reqwest::Response {
        self.upload_bytes(file_name, contents.as_bytes().to_vec())
            .await
    }

    pub async fn upload_bytes(&self, file_name: &str, contents: Vec<u8>) -> reqwest::Response {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(contents)
                .file_name(file_name.to_string())
                .mime_str("text/csv")
                .unwrap(),
        );

        self.client
            .post(format!("{}/api/upload-sales-data", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn list_summaries(&self) -> Vec<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/api/sales-summaries", self.address))
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Failed to parse JSON")
    }
}
