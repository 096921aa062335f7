//! HTTP client for the remote event store.

use dayplan_core::error::{PlanError, PlanResult};
use dayplan_core::remote::{RemoteEvent, RemoteStore};

pub struct HttpRemote {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemote {
    pub fn new(base_url: &str) -> Self {
        HttpRemote {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn event_url(&self, id: &str) -> String {
        format!("{}/events/{}", self.base_url, id)
    }
}

fn remote_err(e: reqwest::Error) -> PlanError {
    PlanError::Remote(e.to_string())
}

fn check_status(method: &str, response: &reqwest::Response) -> PlanResult<()> {
    if !response.status().is_success() {
        return Err(PlanError::Remote(format!(
            "{} {} returned {}",
            method,
            response.url().path(),
            response.status()
        )));
    }
    Ok(())
}

impl RemoteStore for HttpRemote {
    async fn list_events(&self) -> PlanResult<Vec<RemoteEvent>> {
        let response = self
            .client
            .get(self.events_url())
            .send()
            .await
            .map_err(remote_err)?;
        check_status("GET", &response)?;
        response.json().await.map_err(remote_err)
    }

    async fn create_event(&self, event: &RemoteEvent) -> PlanResult<()> {
        let response = self
            .client
            .post(self.events_url())
            .json(event)
            .send()
            .await
            .map_err(remote_err)?;
        check_status("POST", &response)
    }

    async fn update_event(&self, event: &RemoteEvent) -> PlanResult<()> {
        let response = self
            .client
            .put(self.event_url(&event.id))
            .json(event)
            .send()
            .await
            .map_err(remote_err)?;
        check_status("PUT", &response)
    }

    async fn delete_event(&self, id: &str) -> PlanResult<()> {
        let response = self
            .client
            .delete(self.event_url(id))
            .send()
            .await
            .map_err(remote_err)?;
        check_status("DELETE", &response)
    }
}
