//! Catalogue of recommender models offered to callers.
//!
//! Only course similarity is implemented; the rest are named so callers can
//! list and select them, and dispatching to them yields no recommendations.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A recommender model known by name to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommenderModel {
    CourseSimilarity,
    UserProfile,
    Clustering,
    ClusteringWithPca,
    Knn,
    Nmf,
    NeuralNetwork,
    RegressionWithEmbeddingFeatures,
    ClassificationWithEmbeddingFeatures,
}

/// Returned when parsing a name that is not in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown recommender model: {0}")]
pub struct UnknownModel(pub String);

impl RecommenderModel {
    /// Every model, in catalogue order
    pub const ALL: [RecommenderModel; 9] = [
        RecommenderModel::CourseSimilarity,
        RecommenderModel::UserProfile,
        RecommenderModel::Clustering,
        RecommenderModel::ClusteringWithPca,
        RecommenderModel::Knn,
        RecommenderModel::Nmf,
        RecommenderModel::NeuralNetwork,
        RecommenderModel::RegressionWithEmbeddingFeatures,
        RecommenderModel::ClassificationWithEmbeddingFeatures,
    ];

    /// Display name, as selected by callers
    pub fn name(&self) -> &'static str {
        match self {
            RecommenderModel::CourseSimilarity => "Course Similarity",
            RecommenderModel::UserProfile => "User Profile",
            RecommenderModel::Clustering => "Clustering",
            RecommenderModel::ClusteringWithPca => "Clustering with PCA",
            RecommenderModel::Knn => "KNN",
            RecommenderModel::Nmf => "NMF",
            RecommenderModel::NeuralNetwork => "Neural Network",
            RecommenderModel::RegressionWithEmbeddingFeatures => {
                "Regression with Embedding Features"
            }
            RecommenderModel::ClassificationWithEmbeddingFeatures => {
                "Classification with Embedding Features"
            }
        }
    }

    /// Look a model up by its exact display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|model| model.name() == name)
    }

    /// Whether predicting with this model produces recommendations
    pub fn is_implemented(&self) -> bool {
        matches!(self, RecommenderModel::CourseSimilarity)
    }
}

impl fmt::Display for RecommenderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecommenderModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownModel(s.to_string()))
    }
}
