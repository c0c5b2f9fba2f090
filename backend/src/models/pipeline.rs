//! Serialized regression pipeline
//!
//! A pipeline is a fitted preprocessor followed by a regressor. The
//! preprocessor lays features out as:
//!
//! | Columns | Source |
//! |---------|--------|
//! | 0..4 | Year, rainfall, pesticide, avg temp (standard scaled) |
//! | 4..4+A | One-hot `Area` |
//! | 4+A..4+A+I | One-hot `Item` |
//!
//! Unknown categories encode as all zeros.

use serde::{Deserialize, Serialize};
use shared::FeatureRecord;

use crate::services::predictor::{PredictorError, YieldPredictor};

/// Number of scaled numeric columns
pub const NUMERIC_COLUMNS: usize = 4;

/// Fitted preprocessing step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessor {
    pub area_categories: Vec<String>,
    pub item_categories: Vec<String>,
    pub numeric_mean: [f64; NUMERIC_COLUMNS],
    pub numeric_scale: [f64; NUMERIC_COLUMNS],
}

impl Preprocessor {
    /// Width of the encoded feature vector
    pub fn width(&self) -> usize {
        NUMERIC_COLUMNS + self.area_categories.len() + self.item_categories.len()
    }

    pub fn transform(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut encoded = Vec::with_capacity(self.width());

        for (i, value) in record.numeric_features().iter().enumerate() {
            // A constant column was fitted with zero variance
            let scale = if self.numeric_scale[i] == 0.0 {
                1.0
            } else {
                self.numeric_scale[i]
            };
            encoded.push((value - self.numeric_mean[i]) / scale);
        }

        one_hot_into(&mut encoded, &self.area_categories, record.area());
        one_hot_into(&mut encoded, &self.item_categories, record.item().name());

        encoded
    }
}

fn one_hot_into(out: &mut Vec<f64>, categories: &[String], value: &str) {
    out.extend(
        categories
            .iter()
            .map(|category| if category == value { 1.0 } else { 0.0 }),
    );
}

/// One fitted regression tree in flattened array form.
///
/// Node `i` is a leaf when `children_left[i] == -1`; otherwise samples with
/// `x[feature[i]] <= threshold[i]` go left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<f64>,
}

impl RegressionTree {
    fn check(&self, width: usize) -> Result<(), String> {
        let nodes = self.value.len();
        if nodes == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_left.len() != nodes
            || self.children_right.len() != nodes
            || self.feature.len() != nodes
            || self.threshold.len() != nodes
        {
            return Err("tree arrays differ in length".to_string());
        }

        for node in 0..nodes {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == -1 && right == -1 {
                continue;
            }
            // Children always come after their parent, which rules out cycles
            for child in [left, right] {
                if child <= node as i64 || child >= nodes as i64 {
                    return Err(format!("node {} has invalid child {}", node, child));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= width {
                return Err(format!(
                    "node {} splits on feature {} but only {} features exist",
                    node, feature, width
                ));
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left < 0 {
                return self.value[node];
            }
            node = if x[self.feature[node] as usize] <= self.threshold[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

/// Fitted regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Mean of the member trees
    TreeEnsemble { trees: Vec<RegressionTree> },
}

/// Preprocessor + regressor, as stored in the pipeline artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionPipeline {
    pub preprocessor: Preprocessor,
    pub model: Regressor,
}

impl RegressionPipeline {
    /// Verify the regressor agrees with the preprocessor's output width
    pub fn check(&self) -> Result<(), String> {
        let width = self.preprocessor.width();
        match &self.model {
            Regressor::Linear { coefficients, .. } => {
                if coefficients.len() != width {
                    return Err(format!(
                        "linear model has {} coefficients but the preprocessor yields {} features",
                        coefficients.len(),
                        width
                    ));
                }
            }
            Regressor::TreeEnsemble { trees } => {
                if trees.is_empty() {
                    return Err("tree ensemble has no trees".to_string());
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.check(width).map_err(|e| format!("tree {}: {}", i, e))?;
                }
            }
        }
        Ok(())
    }

    fn score(&self, x: &[f64]) -> f64 {
        match &self.model {
            Regressor::Linear {
                coefficients,
                intercept,
            } => intercept + coefficients.iter().zip(x).map(|(c, v)| c * v).sum::<f64>(),
            Regressor::TreeEnsemble { trees } => {
                trees.iter().map(|tree| tree.predict(x)).sum::<f64>() / trees.len() as f64
            }
        }
    }
}

impl YieldPredictor for RegressionPipeline {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, PredictorError> {
        let x = self.preprocessor.transform(record);
        let expected = self.preprocessor.width();
        if x.len() != expected {
            return Err(PredictorError::FeatureMismatch {
                expected,
                got: x.len(),
            });
        }

        let y = self.score(&x);
        if !y.is_finite() {
            return Err(PredictorError::NonFinite(y));
        }
        Ok(y)
    }

    fn describe(&self) -> String {
        match &self.model {
            Regressor::Linear { coefficients, .. } => {
                format!("linear regression ({} features)", coefficients.len())
            }
            Regressor::TreeEnsemble { trees } => {
                format!("tree ensemble ({} trees)", trees.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Crop, NumericInputs};

    fn record(area: &str, item: Crop) -> FeatureRecord {
        FeatureRecord::new(
            area,
            item,
            2000,
            NumericInputs {
                rainfall_mm: 1000.0,
                pesticide_usage: 100.0,
                avg_temp: 20.0,
            },
        )
        .unwrap()
    }

    fn preprocessor() -> Preprocessor {
        Preprocessor {
            area_categories: vec!["Albania".into(), "India".into()],
            item_categories: vec!["Maize".into(), "Rice".into()],
            numeric_mean: [2000.0, 1000.0, 100.0, 20.0],
            numeric_scale: [10.0, 100.0, 0.0, 5.0],
        }
    }

    #[test]
    fn test_transform_layout() {
        let x = preprocessor().transform(&record("India", Crop::Maize));
        assert_eq!(x, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_categories_encode_as_zeros() {
        let x = preprocessor().transform(&record("Peru", Crop::Banana));
        assert_eq!(&x[4..], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_linear_prediction() {
        let pipeline = RegressionPipeline {
            preprocessor: preprocessor(),
            model: Regressor::Linear {
                coefficients: vec![0.0, 0.0, 0.0, 0.0, 500.0, 1500.0, 2000.0, 4000.0],
                intercept: 30000.0,
            },
        };
        assert!(pipeline.check().is_ok());
        let y = pipeline.predict(&record("India", Crop::Rice)).unwrap();
        assert_eq!(y, 35500.0);
    }

    #[test]
    fn test_coefficient_count_mismatch_fails_check() {
        let pipeline = RegressionPipeline {
            preprocessor: preprocessor(),
            model: Regressor::Linear {
                coefficients: vec![1.0; 3],
                intercept: 0.0,
            },
        };
        assert!(pipeline.check().is_err());
    }

    #[test]
    fn test_tree_rejects_backward_child() {
        let tree = RegressionTree {
            children_left: vec![0, -1],
            children_right: vec![1, -1],
            feature: vec![0, -2],
            threshold: vec![0.0, -2.0],
            value: vec![0.0, 1.0],
        };
        assert!(tree.check(8).is_err());
    }
}
