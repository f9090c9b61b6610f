//! DKG node client
//!
//! Wraps an OriginTrail edge-node HTTP API. The connection is an explicit
//! value held by the client: construction with incomplete credentials yields a
//! disconnected client rather than a process-wide failure flag, and every
//! operation on a disconnected client takes the fallback path.

use crate::keywords::extract_keywords;
use async_trait::async_trait;
use mirror_domain::traits::FactSource;
use mirror_domain::{now_rfc3339, Fact};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default request timeout against the node (15 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Maximum facts returned per query
pub const MAX_FACTS_PER_QUERY: usize = 5;

/// Blockchain the verification assets are anchored to
const BLOCKCHAIN_NAME: &str = "otp:20430";

/// Retention parameter for published assets
const PUBLISH_EPOCHS: u32 = 2;

/// Connection parameters for a DKG edge node
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Node endpoint (e.g., "http://localhost")
    pub endpoint: String,

    /// Node port (e.g., 8900)
    pub port: u16,

    /// Wallet public key for publishing
    pub public_key: String,

    /// Wallet private key for publishing
    pub private_key: String,
}

impl NodeConfig {
    /// Whether the config carries everything needed to open a connection
    pub fn is_complete(&self) -> bool {
        !self.endpoint.is_empty() && !self.public_key.is_empty() && !self.private_key.is_empty()
    }
}

/// Internal error taxonomy for node operations
///
/// Never crosses the crate boundary; used to classify operator-log diagnostics
/// before the operation degrades to its fallback value.
#[derive(Debug, Error)]
enum NodeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("insufficient token balance: {0}")]
    InsufficientBalance(String),

    #[error("node API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("malformed node response: {0}")]
    MalformedResponse(String),
}

struct NodeConnection {
    base_url: String,
    public_key: String,
    client: reqwest::Client,
}

/// Client for the OriginTrail DKG
///
/// Holds an `Option<NodeConnection>`; `None` means every retrieval returns the
/// synthetic fallback facts and every publication reports "not published".
pub struct DkgClient {
    connection: Option<NodeConnection>,
}

/// A query-result row from the node; either SPARQL-binding shaped
/// (`{"s": {"value": ...}, ...}`) or flat (`{"subject": ..., ...}`)
#[derive(Deserialize)]
struct QueryRow {
    #[serde(default)]
    s: Option<Binding>,
    #[serde(default)]
    p: Option<Binding>,
    #[serde(default)]
    o: Option<Binding>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    predicate: Option<String>,
    #[serde(default)]
    object: Option<String>,
}

#[derive(Deserialize)]
struct Binding {
    value: String,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    rows: Vec<QueryRow>,
}

impl DkgClient {
    /// Open a client for the given node
    ///
    /// A config missing its endpoint or either wallet key yields a
    /// disconnected client; the caller gets a usable fallback-only value
    /// either way.
    pub fn connect(config: NodeConfig) -> Self {
        if !config.is_complete() {
            warn!("DKG config incomplete, running without a node connection");
            return Self::disconnected();
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap();

        info!(
            "DKG client connected to {}:{} (blockchain {})",
            config.endpoint, config.port, BLOCKCHAIN_NAME
        );

        Self {
            connection: Some(NodeConnection {
                base_url: format!("{}:{}", config.endpoint.trim_end_matches('/'), config.port),
                public_key: config.public_key,
                client,
            }),
        }
    }

    /// A client with no node connection; all operations use their fallbacks
    pub fn disconnected() -> Self {
        Self { connection: None }
    }

    /// Whether a node connection is held
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Deterministic synthetic facts derived from the claim text alone
    ///
    /// Subject and object content depend only on the claim text, so repeated
    /// calls agree on everything except the retrieval timestamps.
    fn synthetic_facts(claim_text: &str) -> Vec<Fact> {
        let keywords = extract_keywords(claim_text);
        let snippet: String = claim_text.chars().take(60).collect();

        vec![
            Fact {
                subject: format!(
                    "dkg:asset:{}",
                    keywords.first().map(String::as_str).unwrap_or("verification")
                ),
                predicate: "schema:about".to_string(),
                object: snippet,
                source: "OriginTrail DKG (Demo Data)".to_string(),
                timestamp: Some(now_rfc3339()),
            },
            Fact {
                subject: "dkg:knowledge".to_string(),
                predicate: "schema:relatedTo".to_string(),
                object: keywords.join(", "),
                source: "DKG Knowledge Graph".to_string(),
                timestamp: Some(now_rfc3339()),
            },
        ]
    }

    async fn live_query(
        connection: &NodeConnection,
        keywords: &[String],
    ) -> Result<Vec<Fact>, NodeError> {
        let url = format!("{}/query", connection.base_url);
        let body = json!({
            "keywords": keywords,
            "limit": MAX_FACTS_PER_QUERY,
        });

        let response = connection
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NodeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NodeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| NodeError::MalformedResponse(e.to_string()))?;

        let retrieved_at = now_rfc3339();
        Ok(parsed
            .rows
            .into_iter()
            .take(MAX_FACTS_PER_QUERY)
            .map(|row| Fact {
                subject: row
                    .s
                    .map(|b| b.value)
                    .or(row.subject)
                    .unwrap_or_else(|| "DKG_Asset".to_string()),
                predicate: row
                    .p
                    .map(|b| b.value)
                    .or(row.predicate)
                    .unwrap_or_else(|| "relatesTo".to_string()),
                object: row
                    .o
                    .map(|b| b.value)
                    .or(row.object)
                    .unwrap_or_else(|| "Knowledge".to_string()),
                source: "OriginTrail DKG Testnet".to_string(),
                timestamp: Some(retrieved_at.clone()),
            })
            .collect())
    }

    async fn publish(
        connection: &NodeConnection,
        hash: &str,
        truth_score: u8,
        post_text: &str,
    ) -> Result<String, NodeError> {
        let description: String = post_text.chars().take(200).collect();
        let asset = json!({
            "public": {
                "@context": "https://schema.org",
                "@type": "FactCheck",
                "name": "Mirror Verification",
                "description": description,
                "hash": hash,
                "score": truth_score,
                "timestamp": now_rfc3339(),
            },
        });

        debug!("Publishing verification asset: {}", asset);

        let url = format!("{}/assets", connection.base_url);
        let body = json!({
            "asset": asset,
            "blockchain": {
                "name": BLOCKCHAIN_NAME,
                "publicKey": connection.public_key,
            },
            "epochsNum": PUBLISH_EPOCHS,
        });

        let response = connection
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NodeError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| NodeError::Network(e.to_string()))?;

        if !status.is_success() {
            let lowered = text.to_lowercase();
            if lowered.contains("insufficient") || lowered.contains("balance") {
                return Err(NodeError::InsufficientBalance(text));
            }
            return Err(NodeError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| NodeError::MalformedResponse(e.to_string()))?;

        parsed
            .get("UAL")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| NodeError::MalformedResponse("no UAL in response".to_string()))
    }

    /// Operator-log hint for a failed publication, classified by cause
    fn publish_hint(error: &NodeError) -> &'static str {
        match error {
            NodeError::Network(_) => "Network issue: check connectivity to the DKG node",
            NodeError::InsufficientBalance(_) => "Insufficient tokens: check TRAC/NEURO balance",
            NodeError::Api { .. } => "Node API rejected the asset",
            NodeError::MalformedResponse(_) => {
                "Node response was malformed; publication state unknown"
            }
        }
    }
}

#[async_trait]
impl FactSource for DkgClient {
    /// Retrieve facts related to the claim, falling back to synthetic facts
    ///
    /// Never fails: a missing connection or any live-query error degrades to
    /// the deterministic synthetic set.
    async fn related_facts(&self, claim_text: &str) -> Vec<Fact> {
        let keywords = extract_keywords(claim_text);
        debug!("Querying DKG for: {}", keywords.join(", "));

        let Some(connection) = &self.connection else {
            debug!("DKG not connected, using synthetic facts");
            return Self::synthetic_facts(claim_text);
        };

        match Self::live_query(connection, &keywords).await {
            Ok(facts) if !facts.is_empty() => facts,
            Ok(_) => {
                debug!("DKG returned no rows, using synthetic facts");
                Self::synthetic_facts(claim_text)
            }
            Err(e) => {
                warn!("DKG query failed ({}), using synthetic facts", e);
                Self::synthetic_facts(claim_text)
            }
        }
    }

    /// Best-effort publication; `None` on any failure
    async fn publish_verification(
        &self,
        hash: &str,
        truth_score: u8,
        post_text: &str,
    ) -> Option<String> {
        let Some(connection) = &self.connection else {
            info!("Cannot publish, DKG not connected");
            return None;
        };

        match Self::publish(connection, hash, truth_score, post_text).await {
            Ok(ual) => {
                info!("Published verification to DKG: {}", ual);
                Some(ual)
            }
            Err(e) => {
                warn!("DKG publish failed: {}. {}", e, Self::publish_hint(&e));
                None
            }
        }
    }
}
