use async_trait::async_trait;
use fiscal_core::{AnnexKind, EntityId, FiscalError, StatementLine, StatementSource, StatementTable};
use reqwest::Client;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub mod config;
pub use config::{SiconfiConfig, DEFAULT_BASE_URL};

/// Budget-execution statements are taken from the 6th bimester, i.e. the closed year.
const FINAL_BIMESTER: u8 = 6;

/// Sliding-window rate limiter: at most `max_requests` per `window` duration.
#[derive(Clone)]
struct RateLimiter {
    timestamps: Arc<Mutex<VecDeque<Instant>>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            timestamps: Arc::new(Mutex::new(VecDeque::new())),
            max_requests: max_requests.max(1),
            window,
        }
    }

    async fn acquire(&self) {
        loop {
            let mut ts = self.timestamps.lock().await;
            let now = Instant::now();

            // Remove timestamps outside the window
            while let Some(&front) = ts.front() {
                if now.duration_since(front) >= self.window {
                    ts.pop_front();
                } else {
                    break;
                }
            }

            if ts.len() < self.max_requests {
                ts.push_back(now);
                return;
            }
            let oldest = ts.front().copied().unwrap_or(now);

            // Wait until the oldest request falls out of the window
            let sleep_dur = (oldest + self.window).saturating_duration_since(now);
            drop(ts);
            tracing::debug!("Rate limiter: waiting {}ms for SICONFI slot", sleep_dur.as_millis());
            tokio::time::sleep(sleep_dur).await;
        }
    }
}

/// Client for the SICONFI statement endpoints (`/rreo` and `/dca`).
#[derive(Clone)]
pub struct SiconfiClient {
    base_url: String,
    client: Client,
    rate_limiter: RateLimiter,
}

impl SiconfiClient {
    pub fn new(config: SiconfiConfig) -> Result<Self, FiscalError> {
        if config.accept_invalid_certs {
            tracing::warn!(
                "TLS certificate verification is DISABLED for {}; only use this against a trusted network",
                config.base_url
            );
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| FiscalError::Config(format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.base_url,
            client,
            rate_limiter: RateLimiter::new(1, config.min_interval),
        })
    }

    pub fn from_env() -> Result<Self, FiscalError> {
        Self::new(SiconfiConfig::from_env()?)
    }

    /// Build the request URL for one annex of one entity and year.
    pub fn statement_url(&self, entity: EntityId, year: i32, annex: AnnexKind) -> String {
        statement_url(&self.base_url, entity, year, annex)
    }

    /// Fetch one statement annex. Transport errors, non-success statuses and
    /// bodies without an `items` array are all reported as errors; an empty
    /// `items` array is a valid empty table.
    pub async fn get_statement(
        &self,
        entity: EntityId,
        year: i32,
        annex: AnnexKind,
    ) -> Result<StatementTable, FiscalError> {
        let url = self.statement_url(entity, year, annex);

        self.rate_limiter.acquire().await;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FiscalError::ApiError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FiscalError::ApiError(format!(
                "HTTP {} for {} ({} {})",
                response.status(),
                annex,
                entity,
                year
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FiscalError::ApiError(e.to_string()))?;

        let table = parse_statement(annex, &body)?;
        tracing::debug!("{} {} {}: {} lines", annex, entity, year, table.len());
        Ok(table)
    }
}

#[async_trait]
impl StatementSource for SiconfiClient {
    async fn fetch_statement(
        &self,
        entity: EntityId,
        year: i32,
        annex: AnnexKind,
    ) -> Result<StatementTable, FiscalError> {
        self.get_statement(entity, year, annex).await
    }
}

fn statement_url(base_url: &str, entity: EntityId, year: i32, annex: AnnexKind) -> String {
    let annex_param = annex.identifier().replace(' ', "%20");
    if annex.is_budget_execution() {
        format!(
            "{}/rreo?an_exercicio={}&nr_periodo={}&co_tipo_demonstrativo=RREO&no_anexo={}&id_ente={}",
            base_url, year, FINAL_BIMESTER, annex_param, entity
        )
    } else {
        format!(
            "{}/dca?an_exercicio={}&no_anexo={}&id_ente={}",
            base_url, year, annex_param, entity
        )
    }
}

fn parse_statement(annex: AnnexKind, body: &str) -> Result<StatementTable, FiscalError> {
    let response: StatementResponse = serde_json::from_str(body)
        .map_err(|e| FiscalError::MalformedResponse(format!("{}: {}", annex, e)))?;

    Ok(StatementTable::new(
        annex,
        response.items.into_iter().map(StatementLine::from).collect(),
    ))
}

// Response structures
#[derive(Debug, Deserialize)]
struct StatementResponse {
    items: Vec<StatementItem>,
}

#[derive(Debug, Deserialize)]
struct StatementItem {
    #[serde(default)]
    conta: Option<String>,
    #[serde(default)]
    cod_conta: Option<String>,
    #[serde(default)]
    coluna: Option<String>,
    #[serde(default)]
    valor: Option<f64>,
}

impl From<StatementItem> for StatementLine {
    fn from(item: StatementItem) -> Self {
        StatementLine {
            label: item.conta,
            code: item.cod_conta,
            column: item.coluna,
            value: item.valor,
        }
    }
}
