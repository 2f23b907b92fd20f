//! `clawbrain`: CLI over the memory engine.
//!
//! Every invocation writes exactly one JSON object to stdout and exits 0 on
//! success, 1 on failure. Logs go to stderr so stdout stays machine-readable.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use clawbrain_core::config::{EmbeddingConfig, IndexConfig, SyncStateConfig};
use clawbrain_core::constants::{
    DEFAULT_MIN_SCORE, DEFAULT_RECENCY_SCALE_SECS, DEFAULT_SEARCH_LIMIT, HEALTHCHECK_COLLECTION,
    POINT_OP_TIMEOUT_SECS, SYNC_TIMEOUT_SECS,
};
use clawbrain_core::payload::Payload;
use clawbrain_core::traits::IEmbeddingProvider;
use clawbrain_embeddings::OllamaProvider;
use clawbrain_index::QdrantIndex;
use clawbrain_ingest::{run_sync, SyncOptions};
use clawbrain_memory::{check, AddInput, AddRequest, MemoryEngine, SearchInput, SearchRequest};
use clawbrain_sync::RespClient;

#[derive(Debug, Parser)]
#[command(name = "clawbrain", version)]
#[command(about = "Persistent semantic memory for autonomous agents")]
struct Cli {
    /// Vector-index host
    #[arg(long, global = true, env = "CLAWBRAIN_HOST", default_value = "localhost")]
    host: String,

    /// Vector-index port
    #[arg(long, global = true, env = "CLAWBRAIN_PORT", default_value_t = 6334)]
    port: u16,

    /// Embedding service base URL
    #[arg(
        long,
        global = true,
        env = "CLAWBRAIN_OLLAMA_URL",
        default_value = "http://localhost:11434"
    )]
    ollama_url: String,

    /// Embedding model name
    #[arg(long, global = true, env = "CLAWBRAIN_MODEL", default_value = "all-minilm")]
    model: String,

    /// Sync-state host
    #[arg(
        long,
        global = true,
        env = "CLAWBRAIN_REDIS_HOST",
        default_value = "localhost"
    )]
    redis_host: String,

    /// Sync-state port
    #[arg(long, global = true, env = "CLAWBRAIN_REDIS_PORT", default_value_t = 6379)]
    redis_port: u16,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store a memory from text or from an externally generated vector
    Add {
        #[arg(long)]
        text: Option<String>,
        /// JSON array of floats
        #[arg(long)]
        vector: Option<String>,
        /// JSON object of extra metadata
        #[arg(long)]
        payload: Option<String>,
        /// Caller-supplied identity (upserts)
        #[arg(long)]
        id: Option<String>,
        /// Immune to decay and dedup-merge
        #[arg(long)]
        pinned: bool,
        /// Skip near-duplicate merging
        #[arg(long)]
        no_merge: bool,
    },
    /// Fetch one memory by id
    Get {
        #[arg(long)]
        id: String,
    },
    /// Recall memories by similarity
    Search {
        #[arg(long)]
        query: Option<String>,
        /// JSON array of floats
        #[arg(long)]
        vector: Option<String>,
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
        min_score: f32,
        /// Recency boost weight; 0 disables the boost
        #[arg(long, default_value_t = 0.0)]
        recency_boost: f64,
        /// Recency half-life in seconds
        #[arg(long, default_value_t = DEFAULT_RECENCY_SCALE_SECS)]
        recency_scale: f64,
    },
    /// Decay memories not accessed within the TTL
    Forget {
        /// Duration literal such as 720h or 0s
        #[arg(long, default_value = "720h")]
        ttl: String,
    },
    /// Ingest markdown sources into memory
    Sync {
        #[arg(long = "file")]
        files: Vec<PathBuf>,
        #[arg(long = "dir")]
        dirs: Vec<PathBuf>,
        #[arg(long = "exclude")]
        excludes: Vec<String>,
        #[arg(long, default_value = ".")]
        base: PathBuf,
    },
    /// Verify connectivity to the index, embedder, and sync-state store
    Check,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(value) => {
            println!("{value}");
            0
        }
        Err(e) => {
            println!("{}", json!({ "status": "error", "message": e.to_string() }));
            1
        }
    };
    std::process::exit(code);
}

async fn with_deadline<T>(secs: u64, fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(Duration::from_secs(secs), fut)
        .await
        .map_err(|_| anyhow!("operation timed out after {secs}s"))?
}

async fn run(cli: Cli) -> Result<Value> {
    let index_config = IndexConfig {
        host: cli.host.clone(),
        port: cli.port,
        ..IndexConfig::default()
    };
    let embedding_config = EmbeddingConfig {
        base_url: cli.ollama_url.clone(),
        model: cli.model.clone(),
    };
    let sync_config = SyncStateConfig {
        host: cli.redis_host.clone(),
        port: cli.redis_port,
    };
    let engine = MemoryEngine::new(
        QdrantIndex::new(&index_config),
        OllamaProvider::new(&embedding_config),
    );

    match cli.command {
        Command::Add {
            text,
            vector,
            payload,
            id,
            pinned,
            no_merge,
        } => {
            let input = match (text, vector) {
                (Some(_), Some(_)) => {
                    return Err(anyhow!("--text and --vector are mutually exclusive"))
                }
                (Some(text), None) => AddInput::Text(text),
                (None, Some(raw)) => AddInput::Vector(parse_vector(&raw)?),
                (None, None) => return Err(anyhow!("either --text or --vector is required")),
            };
            let request = AddRequest {
                id,
                input,
                metadata: parse_payload(payload.as_deref())?,
                pinned,
                no_merge,
            };
            let outcome =
                with_deadline(POINT_OP_TIMEOUT_SECS, async { Ok(engine.add(request).await?) })
                    .await?;
            let mut out = json!({ "status": "ok", "id": outcome.id });
            if let Some(first) = outcome.merged_id() {
                out["merged_id"] = json!(first);
                out["merged_ids"] = json!(outcome.merged_ids);
            }
            Ok(out)
        }

        Command::Get { id } => {
            let point =
                with_deadline(POINT_OP_TIMEOUT_SECS, async { Ok(engine.get(&id).await?) }).await?;
            Ok(json!({ "status": "ok", "result": point }))
        }

        Command::Search {
            query,
            vector,
            limit,
            min_score,
            recency_boost,
            recency_scale,
        } => {
            if recency_scale <= 0.0 {
                return Err(anyhow!("--recency-scale must be positive"));
            }
            let input = match (query, vector) {
                (Some(_), Some(_)) => {
                    return Err(anyhow!("--query and --vector are mutually exclusive"))
                }
                (Some(query), None) => SearchInput::Query(query),
                (None, Some(raw)) => SearchInput::Vector(parse_vector(&raw)?),
                (None, None) => return Err(anyhow!("either --query or --vector is required")),
            };
            let request = SearchRequest {
                input,
                limit,
                min_score,
                recency_boost,
                recency_scale,
            };
            let outcome = with_deadline(POINT_OP_TIMEOUT_SECS, async {
                Ok(engine.search(request).await?)
            })
            .await?;
            let returned = outcome.results.len();
            Ok(json!({
                "status": "ok",
                "results": outcome.results,
                "returned": returned,
                "confidence": outcome.confidence,
            }))
        }

        Command::Forget { ttl } => {
            let duration = humantime::parse_duration(&ttl)
                .map_err(|e| anyhow!("invalid duration {ttl:?}: {e}"))?;
            let outcome = with_deadline(POINT_OP_TIMEOUT_SECS, async {
                Ok(engine.forget(duration.as_secs_f64()).await?)
            })
            .await?;
            Ok(json!({ "status": "ok", "deleted": outcome.deleted, "ttl": ttl }))
        }

        Command::Sync {
            files,
            dirs,
            excludes,
            base,
        } => {
            let mut options = SyncOptions::new(base);
            options.files = files;
            options.dirs = dirs;
            options.excludes = excludes;
            let report = with_deadline(SYNC_TIMEOUT_SECS, async {
                let mut state = RespClient::connect(&sync_config).await?;
                Ok(run_sync(&engine, &mut state, &options).await?)
            })
            .await?;
            Ok(json!({
                "status": "ok",
                "files": report.files,
                "added": report.added,
                "skipped": report.skipped,
                "results": report.results,
            }))
        }

        Command::Check => {
            with_deadline(POINT_OP_TIMEOUT_SECS, async {
                let embedder = OllamaProvider::new(&embedding_config);
                embedder.health().await?;

                let healthcheck =
                    QdrantIndex::new(&index_config.with_collection(HEALTHCHECK_COLLECTION));
                check::roundtrip(&healthcheck).await?;

                let mut state = RespClient::connect(&sync_config).await?;
                state.ping().await?;
                Ok(())
            })
            .await?;
            Ok(json!({ "status": "ok" }))
        }
    }
}

/// Parse a `--vector` flag: a JSON array of floats.
fn parse_vector(raw: &str) -> Result<Vec<f32>> {
    serde_json::from_str(raw).map_err(|e| anyhow!("invalid vector JSON: {e}"))
}

/// Parse a `--payload` flag: a JSON object of metadata.
fn parse_payload(raw: Option<&str>) -> Result<Payload> {
    match raw {
        None => Ok(Payload::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| anyhow!("invalid payload JSON: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vector_flag() {
        assert_eq!(
            parse_vector("[0.5,0.5,0.5,0.5]").unwrap(),
            vec![0.5, 0.5, 0.5, 0.5]
        );
        assert!(parse_vector("not json").is_err());
        assert!(parse_vector("{\"a\":1}").is_err());
    }

    #[test]
    fn parses_payload_flag() {
        let payload = parse_payload(Some(r#"{"text":"exact match","pinned":true}"#)).unwrap();
        assert_eq!(payload.get("text").unwrap(), "exact match");
        assert!(parse_payload(None).unwrap().is_empty());
        assert!(parse_payload(Some("[1,2]")).is_err());
    }

    #[test]
    fn duration_literals_parse() {
        assert_eq!(
            humantime::parse_duration("720h").unwrap(),
            Duration::from_secs(720 * 3600)
        );
        assert_eq!(humantime::parse_duration("0s").unwrap(), Duration::ZERO);
        assert!(humantime::parse_duration("soon").is_err());
    }

    #[test]
    fn cli_parses_global_flags_before_subcommand() {
        let cli = Cli::parse_from([
            "clawbrain",
            "--port",
            "7000",
            "search",
            "--query",
            "dark mode",
            "--limit",
            "3",
        ]);
        assert_eq!(cli.port, 7000);
        match cli.command {
            Command::Search { query, limit, .. } => {
                assert_eq!(query.as_deref(), Some("dark mode"));
                assert_eq!(limit, 3);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
