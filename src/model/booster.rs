//! Gradient-boosted tree ensemble read from XGBoost's JSON model format.
//!
//! Only the subset a binary logistic `gbtree` classifier produces is
//! accepted: numerical splits, one output group, logistic objective.
//! Evaluation follows XGBoost: f32 split comparisons, NaN routed through
//! `default_left`, leaf values summed onto the base margin, then a sigmoid.

use serde::Deserialize;

use crate::input::artifact::LoadError;
use crate::input::patient::MODEL_COLUMNS;
use crate::pipeline::stage1_score::{Classifier, InferenceError};

const LEAF: i32 = -1;

#[derive(Debug, Deserialize)]
struct ModelDoc {
    learner: LearnerDoc,
}

#[derive(Debug, Deserialize)]
struct LearnerDoc {
    #[serde(default)]
    attributes: AttributesDoc,
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: BoosterDoc,
    learner_model_param: LearnerParamDoc,
    objective: ObjectiveDoc,
}

// Set by early stopping; prediction then uses rounds [0, best_iteration].
#[derive(Debug, Default, Deserialize)]
struct AttributesDoc {
    #[serde(default)]
    best_iteration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoosterDoc {
    name: String,
    #[serde(default)]
    model: Option<GbtreeDoc>,
}

#[derive(Debug, Deserialize)]
struct GbtreeDoc {
    trees: Vec<TreeDoc>,
    #[serde(default)]
    tree_info: Vec<i32>,
    #[serde(default)]
    iteration_indptr: Vec<usize>,
    #[serde(default)]
    gbtree_model_param: Option<GbtreeParamDoc>,
}

#[derive(Debug, Deserialize)]
struct GbtreeParamDoc {
    #[serde(default)]
    num_parallel_tree: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TreeDoc {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    split_conditions: Vec<f32>,
    default_left: Vec<FlagDoc>,
    #[serde(default)]
    split_type: Vec<u8>,
}

// Older exports write 0/1, newer ones may write booleans.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FlagDoc {
    Bool(bool),
    Int(u8),
}

impl FlagDoc {
    fn is_set(&self) -> bool {
        match self {
            FlagDoc::Bool(b) => *b,
            FlagDoc::Int(v) => *v != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LearnerParamDoc {
    base_score: String,
    #[serde(default)]
    num_class: Option<String>,
    num_feature: String,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDoc {
    name: String,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    left: i32,
    right: i32,
    feature: u32,
    condition: f32,
    default_left: bool,
}

#[derive(Debug, Clone)]
pub struct RegTree {
    nodes: Vec<Node>,
}

impl RegTree {
    fn leaf_value(&self, row: &[f32]) -> f32 {
        let mut nid = 0usize;
        loop {
            let node = self.nodes[nid];
            if node.left == LEAF {
                return node.condition;
            }
            let value = row[node.feature as usize];
            let go_left = if value.is_nan() {
                node.default_left
            } else {
                value < node.condition
            };
            let next = if go_left { node.left } else { node.right };
            nid = next as usize;
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }
}

#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    objective: String,
    base_score: f32,
    base_margin: f32,
    n_features: usize,
    trees: Vec<RegTree>,
}

impl TreeEnsemble {
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LoadError> {
        let doc: ModelDoc =
            serde_json::from_slice(bytes).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::from_doc(doc.learner)
    }

    fn from_doc(learner: LearnerDoc) -> Result<Self, LoadError> {
        let objective = learner.objective.name;
        if objective != "binary:logistic" && objective != "reg:logistic" {
            return Err(LoadError::Unsupported(format!(
                "objective {objective} (expected binary:logistic)"
            )));
        }
        if learner.gradient_booster.name != "gbtree" {
            return Err(LoadError::Unsupported(format!(
                "booster {} (expected gbtree)",
                learner.gradient_booster.name
            )));
        }

        let params = learner.learner_model_param;
        if let Some(num_class) = params.num_class.as_deref() {
            let n = parse_int(num_class, "num_class")?;
            if n > 1 {
                return Err(LoadError::Unsupported(format!(
                    "{n}-class model (expected binary)"
                )));
            }
        }
        let n_features = parse_int(&params.num_feature, "num_feature")?;
        if n_features != MODEL_COLUMNS.len() {
            return Err(LoadError::Schema(format!(
                "model expects {n_features} features, calculator supplies {}",
                MODEL_COLUMNS.len()
            )));
        }
        if !learner.feature_names.is_empty() && learner.feature_names != MODEL_COLUMNS {
            return Err(LoadError::Schema(format!(
                "feature order [{}] differs from [{}]",
                learner.feature_names.join(", "),
                MODEL_COLUMNS.join(", ")
            )));
        }

        let base_score = parse_base_score(&params.base_score)?;
        let base_margin = (base_score / (1.0 - base_score)).ln();

        let model = learner
            .gradient_booster
            .model
            .ok_or_else(|| LoadError::Parse("gradient_booster.model missing".to_string()))?;
        if model.tree_info.iter().any(|&group| group != 0) {
            return Err(LoadError::Unsupported(
                "trees assigned to more than one output group".to_string(),
            ));
        }
        if model.trees.is_empty() {
            return Err(LoadError::InvalidTree("model has no trees".to_string()));
        }

        let round_ends = round_boundaries(&model)?;
        let n_used = match learner.attributes.best_iteration.as_deref() {
            Some(raw) => {
                let best = parse_int(raw, "best_iteration")?;
                if best >= round_ends.len() {
                    return Err(LoadError::InvalidTree(format!(
                        "best_iteration {best} but model has {} boosting rounds",
                        round_ends.len()
                    )));
                }
                round_ends[best]
            }
            None => model.trees.len(),
        };

        let mut trees = Vec::with_capacity(n_used);
        for (idx, tree) in model.trees.into_iter().take(n_used).enumerate() {
            trees.push(build_tree(idx, tree, n_features)?);
        }

        Ok(Self {
            objective,
            base_score,
            base_margin,
            n_features,
            trees,
        })
    }

    pub fn margin(&self, row: &[f32]) -> f32 {
        let mut margin = self.base_margin;
        for tree in &self.trees {
            margin += tree.leaf_value(row);
        }
        margin
    }

    pub fn trees(&self) -> &[RegTree] {
        &self.trees
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn base_score(&self) -> f32 {
        self.base_score
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }
}

impl Classifier for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> Result<f64, InferenceError> {
        if row.len() != self.n_features {
            return Err(InferenceError::FeatureCount {
                expected: self.n_features,
                got: row.len(),
            });
        }
        let row32: Vec<f32> = row.iter().map(|&v| v as f32).collect();
        Ok(sigmoid(self.margin(&row32)) as f64)
    }
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Exclusive end tree index of every boosting round.
fn round_boundaries(model: &GbtreeDoc) -> Result<Vec<usize>, LoadError> {
    let n_trees = model.trees.len();
    if !model.iteration_indptr.is_empty() {
        let indptr = &model.iteration_indptr;
        let consistent = indptr[0] == 0
            && indptr.windows(2).all(|w| w[0] <= w[1])
            && indptr[indptr.len() - 1] == n_trees;
        if !consistent {
            return Err(LoadError::InvalidTree(format!(
                "iteration_indptr does not partition {n_trees} trees"
            )));
        }
        return Ok(indptr[1..].to_vec());
    }

    let per_round = match model
        .gbtree_model_param
        .as_ref()
        .and_then(|p| p.num_parallel_tree.as_deref())
    {
        Some(raw) => parse_int(raw, "num_parallel_tree")?,
        None => 1,
    };
    if per_round == 0 || n_trees % per_round != 0 {
        return Err(LoadError::InvalidTree(format!(
            "{n_trees} trees do not split into rounds of {per_round}"
        )));
    }
    Ok((1..=n_trees / per_round).map(|r| r * per_round).collect())
}

fn build_tree(idx: usize, doc: TreeDoc, n_features: usize) -> Result<RegTree, LoadError> {
    let n = doc.left_children.len();
    if n == 0 {
        return Err(LoadError::InvalidTree(format!("tree {idx} has no nodes")));
    }
    if doc.right_children.len() != n
        || doc.split_indices.len() != n
        || doc.split_conditions.len() != n
        || doc.default_left.len() != n
    {
        return Err(LoadError::InvalidTree(format!(
            "tree {idx} node arrays have inconsistent lengths"
        )));
    }
    if doc.split_type.iter().any(|&t| t != 0) {
        return Err(LoadError::Unsupported(format!(
            "tree {idx} uses categorical splits"
        )));
    }

    let mut nodes = Vec::with_capacity(n);
    for nid in 0..n {
        let left = doc.left_children[nid];
        let right = doc.right_children[nid];
        let feature = doc.split_indices[nid];
        if left != LEAF {
            // children are always allocated after their parent
            for child in [left, right] {
                if child <= nid as i32 || child as usize >= n {
                    return Err(LoadError::InvalidTree(format!(
                        "tree {idx} node {nid} has invalid child {child}"
                    )));
                }
            }
            if feature as usize >= n_features {
                return Err(LoadError::InvalidTree(format!(
                    "tree {idx} node {nid} splits on feature {feature}"
                )));
            }
        }
        nodes.push(Node {
            left,
            right,
            feature,
            condition: doc.split_conditions[nid],
            default_left: doc.default_left[nid].is_set(),
        });
    }

    Ok(RegTree { nodes })
}

fn parse_int(raw: &str, field: &str) -> Result<usize, LoadError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| LoadError::Parse(format!("{field} is not an integer: {raw}")))
}

fn parse_base_score(raw: &str) -> Result<f32, LoadError> {
    let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
    let value = trimmed
        .trim()
        .parse::<f32>()
        .map_err(|_| LoadError::Parse(format!("base_score is not a number: {raw}")))?;
    if !(value > 0.0 && value < 1.0) {
        return Err(LoadError::Unsupported(format!(
            "base_score {value} outside (0, 1)"
        )));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/booster.rs"]
mod tests;
