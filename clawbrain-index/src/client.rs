//! HTTP client for the index, bound to one collection.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use clawbrain_core::config::IndexConfig;
use clawbrain_core::constants::SCROLL_PAGE_SIZE;
use clawbrain_core::errors::{ClawbrainResult, IndexError};
use clawbrain_core::models::{MemoryPoint, PointFilter};
use clawbrain_core::payload::Payload;
use clawbrain_core::traits::IVectorIndex;

use crate::filter::to_index_filter;
use crate::wire::{
    id_string, CollectionInfo, CreateCollection, DeletePoints, Envelope, PointStruct,
    RetrievePoints, RetrievedPoint, ScoredPoint, ScrollPoints, ScrollResult, SearchPoints,
    SetPayload, UpsertPoints, VectorParams,
};

/// Qdrant REST adapter. A handle is owned by the calling session and
/// released with it.
pub struct QdrantIndex {
    http: Client,
    base_url: String,
    collection: String,
}

impl QdrantIndex {
    pub fn new(config: &IndexConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url(),
            collection: config.collection.clone(),
        }
    }

    /// The collection this handle operates on.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    fn collection_url(&self) -> String {
        format!("{}/collections/{}", self.base_url, self.collection)
    }

    fn points_url(&self, suffix: &str) -> String {
        format!("{}/points{}", self.collection_url(), suffix)
    }

    fn transport(e: reqwest::Error) -> IndexError {
        IndexError::Transport {
            reason: e.to_string(),
        }
    }

    async fn bad_status(resp: Response) -> IndexError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        IndexError::BadStatus { status, body }
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, IndexError> {
        let body = resp.text().await.map_err(Self::transport)?;
        let env: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| IndexError::BadResponse {
                reason: format!("{e}: {body}"),
            })?;
        Ok(env.result)
    }

    /// POST a JSON body; a 404 (absent collection) is surfaced as `None`.
    async fn post_optional<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Option<T>, IndexError> {
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Self::transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::bad_status(resp).await);
        }
        Ok(Some(Self::parse(resp).await?))
    }

    fn to_point(p: RetrievedPoint) -> MemoryPoint {
        MemoryPoint::new(id_string(&p.id), 0.0, p.payload.unwrap_or_default())
    }
}

impl IVectorIndex for QdrantIndex {
    async fn ensure_collection(&self, width: usize) -> ClawbrainResult<()> {
        let resp = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(Self::transport)?;
        if resp.status().is_success() {
            return Ok(());
        }
        if resp.status() != StatusCode::NOT_FOUND {
            return Err(Self::bad_status(resp).await.into());
        }

        debug!(collection = %self.collection, width, "creating collection");
        let body = CreateCollection {
            vectors: VectorParams {
                size: width,
                distance: "Cosine",
            },
        };
        let resp = self
            .http
            .put(self.collection_url())
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;
        // A concurrent creator winning the race is still success.
        if resp.status().is_success() || resp.status() == StatusCode::CONFLICT {
            return Ok(());
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(IndexError::CollectionCreateFailed {
            collection: self.collection.clone(),
            reason: format!("{status}: {body}"),
        }
        .into())
    }

    async fn upsert(&self, id: &str, vector: &[f32], payload: Payload) -> ClawbrainResult<()> {
        let body = UpsertPoints {
            points: vec![PointStruct {
                id: id.to_string(),
                vector: vector.to_vec(),
                payload,
            }],
        };
        let resp = self
            .http
            .put(self.points_url("?wait=true"))
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;
        if !resp.status().is_success() {
            return Err(Self::bad_status(resp).await.into());
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> ClawbrainResult<Option<MemoryPoint>> {
        let body = RetrievePoints {
            ids: vec![id.to_string()],
            with_payload: true,
            with_vector: false,
        };
        let found: Option<Vec<RetrievedPoint>> =
            self.post_optional(&self.points_url(""), &body).await?;
        Ok(found
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(Self::to_point))
    }

    async fn query(
        &self,
        vector: &[f32],
        min_score: f32,
        limit: usize,
    ) -> ClawbrainResult<Vec<MemoryPoint>> {
        let body = SearchPoints {
            vector: vector.to_vec(),
            limit,
            score_threshold: min_score,
            with_payload: true,
        };
        let hits: Option<Vec<ScoredPoint>> = self
            .post_optional(&self.points_url("/search"), &body)
            .await?;
        Ok(hits
            .unwrap_or_default()
            .into_iter()
            .map(|p| MemoryPoint::new(id_string(&p.id), p.score, p.payload.unwrap_or_default()))
            .collect())
    }

    async fn scroll_ids(&self, filter: &PointFilter) -> ClawbrainResult<Vec<String>> {
        let filter_doc = to_index_filter(filter);
        let mut ids = Vec::new();
        let mut offset = None;

        loop {
            let body = ScrollPoints {
                filter: filter_doc.clone(),
                limit: SCROLL_PAGE_SIZE,
                offset: offset.take(),
                with_payload: false,
            };
            let page: Option<ScrollResult> = self
                .post_optional(&self.points_url("/scroll"), &body)
                .await?;
            let Some(page) = page else {
                return Ok(ids);
            };
            ids.extend(page.points.iter().map(|p| id_string(&p.id)));
            match page.next_page_offset {
                Some(next) => offset = Some(next),
                None => return Ok(ids),
            }
        }
    }

    async fn delete(&self, ids: &[String]) -> ClawbrainResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let body = DeletePoints {
            points: ids.to_vec(),
        };
        let deleted: Option<serde_json::Value> = self
            .post_optional(&self.points_url("/delete?wait=true"), &body)
            .await?;
        if deleted.is_none() {
            debug!(collection = %self.collection, "delete against absent collection");
        }
        Ok(())
    }

    async fn patch_payload(&self, id: &str, partial: Payload) -> ClawbrainResult<()> {
        let body = SetPayload {
            payload: partial,
            points: vec![id.to_string()],
        };
        let resp = self
            .http
            .post(self.points_url("/payload?wait=true"))
            .json(&body)
            .send()
            .await
            .map_err(Self::transport)?;
        if !resp.status().is_success() {
            return Err(Self::bad_status(resp).await.into());
        }
        Ok(())
    }

    async fn delete_collection(&self) -> ClawbrainResult<()> {
        let resp = self
            .http
            .delete(self.collection_url())
            .send()
            .await
            .map_err(Self::transport)?;
        if resp.status().is_success() || resp.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Err(Self::bad_status(resp).await.into())
    }

    async fn count(&self) -> ClawbrainResult<u64> {
        let resp = self
            .http
            .get(self.collection_url())
            .send()
            .await
            .map_err(Self::transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(0);
        }
        if !resp.status().is_success() {
            return Err(Self::bad_status(resp).await.into());
        }
        let info: CollectionInfo = Self::parse(resp).await?;
        Ok(info.points_count.unwrap_or(0))
    }
}
