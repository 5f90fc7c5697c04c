use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::{
    ApiError, ConfigResponse, DailyCountsResponse, FailureKind, JobsPage, JobsQuery,
    ScheduleRequest, ScheduleSaved, ScheduleStatus, ScrapeRequest, ScrapeStarted,
    ScrapeStatusResponse, SourcesResponse, StatsResponse,
};

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// The dashboard's HTTP API, one method per endpoint.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn stats(&self) -> Result<StatsResponse, ApiError>;
    async fn daily_counts(&self) -> Result<DailyCountsResponse, ApiError>;
    async fn jobs(&self, query: &JobsQuery) -> Result<JobsPage, ApiError>;
    async fn sources(&self) -> Result<SourcesResponse, ApiError>;
    async fn config(&self) -> Result<ConfigResponse, ApiError>;
    async fn start_scrape(&self, request: &ScrapeRequest) -> Result<ScrapeStarted, ApiError>;
    async fn scrape_status(&self) -> Result<ScrapeStatusResponse, ApiError>;
    async fn schedule_status(&self) -> Result<ScheduleStatus, ApiError>;
    async fn save_schedule(&self, request: &ScheduleRequest) -> Result<ScheduleSaved, ApiError>;
    async fn pause_schedule(&self) -> Result<ScheduleStatus, ApiError>;
    async fn resume_schedule(&self) -> Result<ScheduleStatus, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let base = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends `path` to the base URL, keeping any prefix the base carries.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|()| ApiError::new(FailureKind::InvalidUrl, self.base.to_string()))?
            .pop_if_empty()
            .extend(path.split('/'));
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_response(response).await
    }

    async fn post<B, T>(&self, url: Url, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json");
        if let Some(body) = body {
            let payload = serde_json::to_vec(body)
                .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(payload);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        read_response(response).await
    }
}

#[async_trait::async_trait]
impl DashboardApi for ReqwestApi {
    async fn stats(&self) -> Result<StatsResponse, ApiError> {
        self.get(self.endpoint("api/stats")?).await
    }

    async fn daily_counts(&self) -> Result<DailyCountsResponse, ApiError> {
        self.get(self.endpoint("api/jobs/daily")?).await
    }

    async fn jobs(&self, query: &JobsQuery) -> Result<JobsPage, ApiError> {
        let mut url = self.endpoint("api/jobs")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &query.page.to_string());
            pairs.append_pair("per_page", &query.per_page.to_string());
            if !query.search.is_empty() {
                pairs.append_pair("search", &query.search);
            }
            if !query.source.is_empty() {
                pairs.append_pair("source", &query.source);
            }
        }
        self.get(url).await
    }

    async fn sources(&self) -> Result<SourcesResponse, ApiError> {
        self.get(self.endpoint("api/sources")?).await
    }

    async fn config(&self) -> Result<ConfigResponse, ApiError> {
        self.get(self.endpoint("api/config")?).await
    }

    async fn start_scrape(&self, request: &ScrapeRequest) -> Result<ScrapeStarted, ApiError> {
        self.post(self.endpoint("api/scrape")?, Some(request)).await
    }

    async fn scrape_status(&self) -> Result<ScrapeStatusResponse, ApiError> {
        self.get(self.endpoint("api/scrape/status")?).await
    }

    async fn schedule_status(&self) -> Result<ScheduleStatus, ApiError> {
        self.get(self.endpoint("api/scheduler/status")?).await
    }

    async fn save_schedule(&self, request: &ScheduleRequest) -> Result<ScheduleSaved, ApiError> {
        self.post(self.endpoint("api/scheduler/save")?, Some(request))
            .await
    }

    async fn pause_schedule(&self) -> Result<ScheduleStatus, ApiError> {
        self.post::<(), _>(self.endpoint("api/scheduler/pause")?, None)
            .await
    }

    async fn resume_schedule(&self) -> Result<ScheduleStatus, ApiError> {
        self.post::<(), _>(self.endpoint("api/scheduler/resume")?, None)
            .await
    }
}

async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;
    decode_body(status, &bytes)
}

/// An `error` field wins over the status code; otherwise non-2xx is a
/// status failure and the rest must deserialize into `T`.
pub(crate) fn decode_body<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ApiError> {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();

    if let Some(message) = parsed.as_ref().and_then(server_error) {
        return Err(ApiError::new(
            FailureKind::Rejected {
                status: status.as_u16(),
            },
            message,
        ));
    }
    if !status.is_success() {
        return Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            status.to_string(),
        ));
    }

    let value = parsed
        .ok_or_else(|| ApiError::new(FailureKind::Decode, "response body is not JSON"))?;
    serde_json::from_value(value).map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
}

fn server_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
