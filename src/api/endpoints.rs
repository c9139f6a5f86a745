// Monitoring API endpoint functions.
// Provides typed methods for fetching instance state from the server.

use reqwest::Url;

use crate::error::Result;

use super::client::MonitorClient;
use super::types::Snapshot;

const INSTANCE_STATE_PATH: [&str; 4] = ["api", "monitoring", "instance", "state"];

impl MonitorClient {
    /// URL of the state document for an instance.
    pub fn instance_state_url(&self, instance_name: &str) -> Result<Url> {
        let mut segments = INSTANCE_STATE_PATH.to_vec();
        segments.push(instance_name);
        self.endpoint_url(&segments)
    }

    /// Get the current state of an instance.
    pub async fn get_instance_state(&self, instance_name: &str) -> Result<Snapshot> {
        let url = self.instance_state_url(instance_name)?;
        let response = self.get(url).await?;
        let body = response.text().await?;
        Snapshot::from_json(&body)
    }
}
