//! HTTP implementation of the Codeforces API

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tokio::{sync::Mutex, time::Instant};

use crate::{
    config::CodeforcesConfig,
    constants::api_methods,
    error::{AppError, AppResult},
};

use super::{
    types::{CfContest, CfContestStandings, CfProblemSet, CfResponse, CfSubmission, CfUser},
    CodeforcesApi,
};

/// Codeforces API client over `reqwest`
///
/// Calls made through one client are spaced at least `call_delay` apart.
/// There is no retry: a failed call surfaces as a single error.
pub struct HttpCodeforcesClient {
    http: reqwest::Client,
    base_url: String,
    call_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl HttpCodeforcesClient {
    pub fn new(config: &CodeforcesConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
            call_delay: config.call_delay,
            last_call: Mutex::new(None),
        })
    }

    /// Wait until `call_delay` has passed since the previous call
    async fn pace(&self) {
        let mut last_call = self.last_call.lock().await;
        if let Some(previous) = *last_call {
            tokio::time::sleep_until(previous + self.call_delay).await;
        }
        *last_call = Some(Instant::now());
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        self.pace().await;

        tracing::debug!(method, ?params, "Calling Codeforces API");

        let response = self
            .http
            .get(format!("{}/{}", self.base_url, method))
            .query(params)
            .send()
            .await?;

        // Failed calls come back as 4xx with a FAILED envelope, so the body
        // is parsed regardless of the HTTP status.
        let status = response.status();
        let envelope: CfResponse<T> = response.json().await.map_err(|e| {
            AppError::Upstream(format!(
                "{} returned HTTP {} with an unreadable body: {}",
                method, status, e
            ))
        })?;

        envelope
            .into_result()
            .map_err(|e| match e {
                AppError::Upstream(comment) => {
                    AppError::Upstream(format!("{}: {}", method, comment))
                }
                other => other,
            })
    }
}

#[async_trait]
impl CodeforcesApi for HttpCodeforcesClient {
    async fn user_info(&self, handle: &str) -> AppResult<CfUser> {
        let users: Vec<CfUser> = self
            .call(api_methods::USER_INFO, &[("handles", handle.to_string())])
            .await?;

        users
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("User {}", handle)))
    }

    async fn user_status(&self, handle: &str) -> AppResult<Vec<CfSubmission>> {
        self.call(api_methods::USER_STATUS, &[("handle", handle.to_string())])
            .await
    }

    async fn rated_list(&self, active_only: bool, include_retired: bool) -> AppResult<Vec<CfUser>> {
        self.call(
            api_methods::USER_RATED_LIST,
            &[
                ("activeOnly", active_only.to_string()),
                ("includeRetired", include_retired.to_string()),
            ],
        )
        .await
    }

    async fn problemset_problems(&self) -> AppResult<CfProblemSet> {
        self.call(api_methods::PROBLEMSET_PROBLEMS, &[]).await
    }

    async fn contest_list(&self, gym: bool) -> AppResult<Vec<CfContest>> {
        self.call(api_methods::CONTEST_LIST, &[("gym", gym.to_string())])
            .await
    }

    async fn contest_standings(
        &self,
        contest_id: i64,
        from: u32,
        count: u32,
    ) -> AppResult<CfContestStandings> {
        self.call(
            api_methods::CONTEST_STANDINGS,
            &[
                ("contestId", contest_id.to_string()),
                ("from", from.to_string()),
                ("count", count.to_string()),
            ],
        )
        .await
    }
}
