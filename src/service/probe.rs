use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use utoipa::ToSchema;

// (name, description, url, dashboard path)
const SERVICE_CATALOG: &[(&str, &str, &str, &str)] = &[
    (
        "Eden Worker",
        "Distributed task processing and job orchestration",
        "http://localhost:3000",
        "/worker",
    ),
    (
        "Eden Prophet",
        "AI model training and prediction services",
        "https://prophet.nwiss.net",
        "/prophet",
    ),
    (
        "Eden Teams",
        "Collaboration and team management",
        "https://teams.kellskreations.com",
        "/teams",
    ),
    (
        "Eden Market",
        "Data marketplace and asset exchange",
        "http://localhost:4000",
        "/market",
    ),
    (
        "Eden Shepard",
        "Service orchestration and monitoring",
        "https://shep.nwis.co.in",
        "/shepard",
    ),
    (
        "Eden Exodus",
        "Data migration and transformation",
        "http://localhost:5173",
        "/exodus",
    ),
    (
        "Eden Genesis",
        "IFTTT-style workflow automation platform",
        "https://genesis.kellzkreations.com",
        "/genesis",
    ),
    (
        "Eden Scroll Reader",
        "Document processing and analysis",
        "http://localhost:8080/ui",
        "/scroll-reader",
    ),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeTarget {
    pub name: String,
    pub description: String,
    pub url: String,
    pub path: String,
}

impl ProbeTarget {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            url: url.to_string(),
            path: String::new(),
        }
    }
}

pub fn service_catalog() -> Vec<ProbeTarget> {
    SERVICE_CATALOG
        .iter()
        .map(|(name, description, url, path)| ProbeTarget {
            name: name.to_string(),
            description: description.to_string(),
            url: url.to_string(),
            path: path.to_string(),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Reachability {
    Reachable,
    Unreachable,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub name: String,
    pub description: String,
    pub url: String,
    pub path: String,
    pub status: Reachability,
    pub http_status: Option<u16>,
    pub latency_ms: Option<u64>,
    pub checked_at: DateTime<Utc>,
}

/// Reachability checks against the Eden service catalog.
///
/// A probe never fails: timeouts and transport errors are reported as
/// [`Reachability::Unreachable`].
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
    targets: Vec<ProbeTarget>,
}

impl Prober {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            timeout,
            targets: service_catalog(),
        })
    }

    pub fn with_targets(mut self, targets: Vec<ProbeTarget>) -> Self {
        self.targets = targets;
        self
    }

    pub async fn probe(&self, target: &ProbeTarget) -> ProbeResult {
        probe_target(&self.client, self.timeout, target).await
    }

    /// Probes every target concurrently; results keep catalog order.
    pub async fn probe_all(&self) -> Vec<ProbeResult> {
        let mut set = JoinSet::new();
        for (idx, target) in self.targets.iter().cloned().enumerate() {
            let client = self.client.clone();
            let timeout = self.timeout;
            set.spawn(async move { (idx, probe_target(&client, timeout, &target).await) });
        }

        let mut results = Vec::with_capacity(self.targets.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(err) => tracing::warn!(error = %err, "probe task failed"),
            }
        }
        results.sort_by_key(|(idx, _)| *idx);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

async fn probe_target(
    client: &reqwest::Client,
    timeout: Duration,
    target: &ProbeTarget,
) -> ProbeResult {
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, client.get(&target.url).send()).await;

    let (status, http_status, latency_ms) = match outcome {
        Ok(Ok(resp)) => (
            Reachability::Reachable,
            Some(resp.status().as_u16()),
            Some(started.elapsed().as_millis() as u64),
        ),
        Ok(Err(err)) => {
            tracing::debug!(service = %target.name, error = %err, "probe failed");
            (Reachability::Unreachable, None, None)
        }
        Err(_) => {
            tracing::debug!(service = %target.name, ?timeout, "probe timed out");
            (Reachability::Unreachable, None, None)
        }
    };

    ProbeResult {
        name: target.name.clone(),
        description: target.description.clone(),
        url: target.url.clone(),
        path: target.path.clone(),
        status,
        http_status,
        latency_ms,
        checked_at: Utc::now(),
    }
}
