#[cfg(test)]
#[path = "../../tests/unit/models/vector_test.rs"]
mod vector_test;

use crate::utils::{Float, Random, SomError, SomResult, ensure_dimension};
use std::fmt::{Display, Formatter};

/// Specifies which columns of a tokenized record hold features and which one holds a label.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnMapping {
    features: Vec<usize>,
    label: Option<usize>,
}

impl ColumnMapping {
    /// Creates a new instance of `ColumnMapping`.
    pub fn new(features: Vec<usize>, label: Option<usize>) -> SomResult<Self> {
        if features.is_empty() {
            return Err(SomError::invalid_argument("feature indices cannot be empty"));
        }

        Ok(Self { features, label })
    }

    /// Creates a mapping from header columns: the first column is an identifier, the last one is
    /// a label and everything in between are features.
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> SomResult<Self> {
        if header.len() < 3 {
            return Err(SomError::invalid_argument(format!(
                "header should have id, at least one feature and label columns, got {} columns",
                header.len()
            )));
        }

        Self::new((1..header.len() - 1).collect(), Some(header.len() - 1))
    }

    /// Returns feature column indices.
    pub fn features(&self) -> &[usize] {
        self.features.as_slice()
    }

    /// Returns label column index, if any.
    pub fn label(&self) -> Option<usize> {
        self.label
    }
}

/// An immutable feature vector with an optional (possibly empty) label.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    features: Vec<Float>,
    label: String,
}

impl Vector {
    /// Creates a new vector from feature values and a label.
    pub fn new(features: Vec<Float>, label: impl Into<String>) -> SomResult<Self> {
        if features.is_empty() {
            return Err(SomError::invalid_argument("vector should have at least one feature"));
        }

        Ok(Self { features, label: label.into() })
    }

    /// Creates a vector from tokens using flexible column mapping. Tokens which cannot be parsed
    /// are replaced with `default_value` instead of failing the whole record.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], mapping: &ColumnMapping, default_value: Float) -> SomResult<Self> {
        if tokens.is_empty() {
            return Err(SomError::invalid_argument("input tokens cannot be empty"));
        }

        if let Some(&index) = mapping.features().iter().find(|&&index| index >= tokens.len()) {
            return Err(SomError::invalid_argument(format!("feature index out of bounds: {index}")));
        }

        let label = match mapping.label() {
            Some(index) if index >= tokens.len() => {
                return Err(SomError::invalid_argument(format!("label index out of bounds: {index}")));
            }
            Some(index) => tokens[index].as_ref().trim().to_string(),
            None => String::new(),
        };

        let features = mapping
            .features()
            .iter()
            .map(|&index| parse_feature(index, tokens[index].as_ref()).unwrap_or(default_value))
            .collect();

        Self::new(features, label)
    }

    /// Creates a vector from tokens where all but the last token are features and the last one
    /// is a label. Fails on the first feature which cannot be parsed.
    pub fn from_labeled_tokens<S: AsRef<str>>(tokens: &[S]) -> SomResult<Self> {
        let (label, features) =
            tokens.split_last().ok_or_else(|| SomError::invalid_argument("input tokens cannot be empty"))?;

        let features = features
            .iter()
            .enumerate()
            .map(|(index, token)| parse_feature(index, token.as_ref()))
            .collect::<SomResult<Vec<_>>>()?;

        Self::new(features, label.as_ref().trim())
    }

    /// Creates a vector with values sampled uniformly from per-dimension `[min, max]` bounds.
    pub fn random(min: &[Float], max: &[Float], random: &(dyn Random + Send + Sync)) -> SomResult<Self> {
        ensure_dimension(min.len(), max.len())?;

        let features = min
            .iter()
            .zip(max.iter())
            .enumerate()
            .map(|(index, (&min, &max))| {
                if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
                    Err(SomError::invalid_argument(format!("invalid bounds [{min}, {max}] for dimension {index}")))
                } else {
                    Ok(random.uniform_real(min, max))
                }
            })
            .collect::<SomResult<Vec<_>>>()?;

        Self::new(features, "")
    }

    /// Returns amount of dimensions.
    pub fn dimension(&self) -> usize {
        self.features.len()
    }

    /// Returns feature values.
    pub fn features(&self) -> &[Float] {
        self.features.as_slice()
    }

    /// Returns an owned copy of feature values.
    pub fn to_features(&self) -> Vec<Float> {
        self.features.clone()
    }

    /// Returns the label, empty if not set.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Returns a copy of the vector with another label.
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        Self { features: self.features.clone(), label: label.into() }
    }

    /// Calculates euclidean distance to another vector.
    pub fn distance(&self, other: &Vector) -> SomResult<Float> {
        euclidean_distance(self.features(), other.features())
    }

    /// Returns the euclidean length of the vector.
    pub fn magnitude(&self) -> Float {
        self.features.iter().map(|value| value * value).sum::<Float>().sqrt()
    }

    /// Returns a new vector scaled to the unit length. The zero vector is returned as is.
    pub fn normalize(&self) -> Self {
        let magnitude = self.magnitude();

        if magnitude == 0. {
            return self.clone();
        }

        Self { features: self.features.iter().map(|value| value / magnitude).collect(), label: self.label.clone() }
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let features = self.features.iter().map(|value| value.to_string()).collect::<Vec<_>>().join(", ");
        write!(f, "[{features}] {}", self.label)
    }
}

/// Calculates euclidean distance between two slices of the same length.
pub fn euclidean_distance(a: &[Float], b: &[Float]) -> SomResult<Float> {
    ensure_dimension(a.len(), b.len())?;

    Ok(a.iter().zip(b.iter()).map(|(a, b)| (a - b) * (a - b)).sum::<Float>().sqrt())
}

/// Parses a single feature value.
pub fn parse_feature(index: usize, token: &str) -> SomResult<Float> {
    token
        .trim()
        .parse::<Float>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SomError::NumericParse { index, value: token.to_string() })
}
