use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::LoadError, models::RawId};

/// Dense index space used by the trained neighbor structure, distinct from
/// the raw ids exposed to API callers.
pub type InternalId = u32;

/// Capability interface over the pre-trained neighbor model
///
/// The service never looks inside the model: it only translates between raw
/// and internal id spaces and asks for nearest neighbors. Anything able to
/// answer those three questions can back the resolver.
///
/// Lookups never error. An id outside the trained vocabulary yields `None`
/// or an empty neighbor list, and callers check for emptiness.
#[cfg_attr(test, mockall::automock)]
pub trait NeighborModel: Send + Sync {
    /// Translates a raw id, exactly as given, into the internal id space.
    fn to_internal_id(&self, raw: &RawId) -> Option<InternalId>;

    /// Returns up to `k` nearest neighbors, ordered by increasing distance
    /// under the model's trained similarity metric.
    fn k_nearest(&self, id: InternalId, k: usize) -> Vec<InternalId>;

    /// Inverse translation back into the raw id space.
    fn to_external_id(&self, id: InternalId) -> Option<RawId>;
}

/// On-disk layout of the trained model
///
/// Two parallel arrays indexed by internal id: the raw id each internal id
/// was trained from, and the ordered neighbor list (nearest first) the
/// trainer precomputed. Encoded with bincode.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Artifact {
    pub ids: Vec<i64>,
    pub neighbors: Vec<Vec<InternalId>>,
}

/// Pre-trained k-NN model loaded from a serialized artifact
///
/// Read-only after construction. The raw→internal index is rebuilt at load
/// time rather than stored in the artifact.
pub struct KnnModel {
    ids: Vec<i64>,
    neighbors: Vec<Vec<InternalId>>,
    index: HashMap<i64, InternalId>,
}

impl KnnModel {
    /// Loads and validates a bincode model artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path.as_ref())?;
        let artifact: Artifact = bincode::deserialize(&bytes)?;
        let model = Self::from_parts(artifact.ids, artifact.neighbors)?;

        tracing::debug!(vocabulary = model.len(), "model artifact loaded");
        Ok(model)
    }

    /// Builds a model from its raw parts, validating internal consistency.
    pub fn from_parts(
        ids: Vec<i64>,
        neighbors: Vec<Vec<InternalId>>,
    ) -> Result<Self, LoadError> {
        if ids.len() != neighbors.len() {
            return Err(LoadError::MalformedArtifact(format!(
                "{} ids but {} neighbor lists",
                ids.len(),
                neighbors.len()
            )));
        }

        let bound = ids.len() as InternalId;
        for (id, list) in neighbors.iter().enumerate() {
            if let Some(&out_of_range) = list.iter().find(|&&n| n >= bound) {
                return Err(LoadError::MalformedArtifact(format!(
                    "neighbor {} of internal id {} is outside the id space",
                    out_of_range, id
                )));
            }
        }

        let index = ids
            .iter()
            .enumerate()
            .map(|(internal, &raw)| (raw, internal as InternalId))
            .collect();

        Ok(Self {
            ids,
            neighbors,
            index,
        })
    }

    /// Number of ids in the trained vocabulary.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl NeighborModel for KnnModel {
    fn to_internal_id(&self, raw: &RawId) -> Option<InternalId> {
        // Text ids never match directly: the vocabulary is integer-keyed.
        let id = raw.as_int()?;
        self.index.get(&id).copied()
    }

    fn k_nearest(&self, id: InternalId, k: usize) -> Vec<InternalId> {
        self.neighbors
            .get(id as usize)
            .map(|list| list.iter().take(k).copied().collect())
            .unwrap_or_default()
    }

    fn to_external_id(&self, id: InternalId) -> Option<RawId> {
        self.ids.get(id as usize).map(|&raw| RawId::Int(raw))
    }
}
