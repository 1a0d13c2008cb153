use std::sync::Arc;

use crate::{
    models::{RawId, TitleRecommendations},
    services::{catalog::Catalog, neighbors::NeighborModel},
};

use super::neighbors::InternalId;

/// Composes the catalog and the neighbor model to answer recommendation
/// queries by title or by raw id.
///
/// Every failure mode degrades to an empty or partial result: the resolver
/// never returns an error for a per-request condition.
pub struct Recommender {
    catalog: Arc<Catalog>,
    model: Arc<dyn NeighborModel>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, model: Arc<dyn NeighborModel>) -> Self {
        Self { catalog, model }
    }

    /// Returns the raw ids of the `k` nearest neighbors of `raw`.
    ///
    /// The id is tried exactly as given first. Ids arrive as strings over
    /// HTTP even when the model was trained on integers, so a failed text
    /// lookup is retried once with the parsed integer. If neither form is in
    /// the trained vocabulary the result is empty, never an error.
    pub fn recommend_by_external_id(&self, raw: &RawId, k: usize) -> Vec<RawId> {
        let Some(internal) = self.translate_with_retry(raw) else {
            tracing::warn!(id = %raw, "id not in the trained vocabulary");
            return Vec::new();
        };

        self.model
            .k_nearest(internal, k)
            .into_iter()
            .filter_map(|neighbor| self.model.to_external_id(neighbor))
            .collect()
    }

    /// Recommendation lookup by title or id; exactly one must be supplied.
    ///
    /// The title is resolved through the catalog (substring, first match);
    /// the resolved id is then translated directly — no string/int retry on
    /// this path, ids from the catalog are already integers. Neighbor ids
    /// the catalog cannot resolve to a title are dropped from the output.
    pub fn recommend(
        &self,
        title: Option<&str>,
        id: Option<i64>,
        k: usize,
    ) -> TitleRecommendations {
        let raw_id = match (title, id) {
            (None, None) => {
                tracing::debug!("recommendation query needs a title or an id");
                return TitleRecommendations::default();
            }
            (Some(query), _) => match self.catalog.resolve_id_by_title(query) {
                Some(id) => id,
                None => {
                    tracing::warn!(query, "title not found in the catalog");
                    return TitleRecommendations::default();
                }
            },
            (None, Some(id)) => id,
        };

        let resolved_title = self
            .catalog
            .resolve_title_by_id(raw_id)
            .map(str::to_owned);

        let Some(internal) = self.model.to_internal_id(&RawId::Int(raw_id)) else {
            tracing::warn!(id = raw_id, "id not in the trained vocabulary");
            return TitleRecommendations {
                resolved_title,
                recommendations: Vec::new(),
            };
        };

        let recommendations = self
            .neighbor_titles(internal, k);

        TitleRecommendations {
            resolved_title,
            recommendations,
        }
    }

    /// Recommendation lookup by title.
    pub fn recommend_by_title(&self, query: &str, k: usize) -> TitleRecommendations {
        self.recommend(Some(query), None, k)
    }

    fn neighbor_titles(&self, internal: InternalId, k: usize) -> Vec<String> {
        self.model
            .k_nearest(internal, k)
            .into_iter()
            .filter_map(|neighbor| self.model.to_external_id(neighbor))
            .filter_map(|raw| raw.as_int())
            .filter_map(|id| self.catalog.resolve_title_by_id(id))
            .map(str::to_owned)
            .collect()
    }

    fn translate_with_retry(&self, raw: &RawId) -> Option<InternalId> {
        if let Some(internal) = self.model.to_internal_id(raw) {
            return Some(internal);
        }
        if let RawId::Text(text) = raw {
            if let Ok(parsed) = text.parse::<i64>() {
                return self.model.to_internal_id(&RawId::Int(parsed));
            }
        }
        None
    }
}
