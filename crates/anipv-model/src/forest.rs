//! Random forest regressor evaluated from the flattened tree layout in
//! [`crate::artifact::TreeSpec`].

use anipv_core::FEATURE_COUNT;

use crate::artifact::TreeSpec;
use crate::error::LoadError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// A validated regression tree.
///
/// Children always sit at higher indices than their parent, so a walk from
/// the root terminates in at most `nodes.len()` steps.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Validate one tree of the artifact.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Corrupt`] naming the tree and node that breaks
    /// the layout rules.
    pub fn from_spec(tree_index: usize, spec: &TreeSpec) -> Result<Self, LoadError> {
        let corrupt = |msg: String| LoadError::Corrupt(format!("tree {tree_index}: {msg}"));

        let n = spec.children_left.len();
        if n == 0 {
            return Err(corrupt("tree has no nodes".to_string()));
        }
        let lengths = [
            spec.children_right.len(),
            spec.feature.len(),
            spec.threshold.len(),
            spec.value.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(corrupt(format!(
                "node arrays differ in length (children_left={n}, children_right={}, feature={}, threshold={}, value={})",
                lengths[0], lengths[1], lengths[2], lengths[3]
            )));
        }

        let child = |node: usize, raw: i64| -> Result<usize, LoadError> {
            usize::try_from(raw)
                .ok()
                .filter(|&c| c > node && c < n)
                .ok_or_else(|| {
                    corrupt(format!(
                        "node {node}: child index {raw} must point past the node and below {n}"
                    ))
                })
        };

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let left = spec.children_left[i];
            let right = spec.children_right[i];

            if left == TreeSpec::LEAF {
                if right != TreeSpec::LEAF {
                    return Err(corrupt(format!(
                        "node {i}: leaf has a right child ({right})"
                    )));
                }
                let value = spec.value[i];
                if !value.is_finite() {
                    return Err(corrupt(format!("node {i}: leaf value is not finite")));
                }
                nodes.push(Node::Leaf(value));
                continue;
            }

            let feature = usize::try_from(spec.feature[i])
                .ok()
                .filter(|&f| f < FEATURE_COUNT)
                .ok_or_else(|| {
                    corrupt(format!(
                        "node {i}: split feature {} is outside 0..{FEATURE_COUNT}",
                        spec.feature[i]
                    ))
                })?;
            let threshold = spec.threshold[i];
            if !threshold.is_finite() {
                return Err(corrupt(format!("node {i}: threshold is not finite")));
            }

            nodes.push(Node::Split {
                feature,
                threshold,
                left: child(i, left)?,
                right: child(i, right)?,
            });
        }

        Ok(Self { nodes })
    }

    /// Walk from the root to a leaf.
    ///
    /// Feature values are rounded to `f32` before comparison; split
    /// thresholds were chosen against single-precision inputs.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn evaluate(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let v = f64::from(x[feature] as f32);
                    idx = if v <= threshold { left } else { right };
                }
            }
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Mean of its trees' outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<Tree>,
}

impl RandomForest {
    /// # Errors
    ///
    /// Returns [`LoadError::Corrupt`] for an empty forest or any invalid tree.
    pub fn from_specs(specs: &[TreeSpec]) -> Result<Self, LoadError> {
        if specs.is_empty() {
            return Err(LoadError::Corrupt(
                "random forest has no trees".to_string(),
            ));
        }
        let trees = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Tree::from_spec(i, spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { trees })
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(x)).sum();
        sum / self.trees.len() as f64
    }

    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.trees.iter().map(Tree::node_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Root splits on `likes` (column 6) at 40 000.
    fn likes_stump(low: f64, high: f64) -> TreeSpec {
        TreeSpec {
            children_left: vec![1, -1, -1],
            children_right: vec![2, -1, -1],
            feature: vec![6, -2, -2],
            threshold: vec![40_000.0, -2.0, -2.0],
            value: vec![(low + high) / 2.0, low, high],
        }
    }

    fn row_with(column: usize, value: f64) -> [f64; FEATURE_COUNT] {
        let mut x = [0.0; FEATURE_COUNT];
        x[column] = value;
        x
    }

    #[test]
    fn single_leaf_tree_returns_leaf_value() {
        let spec = TreeSpec {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![7.5],
        };
        let tree = Tree::from_spec(0, &spec).expect("valid tree");
        assert!((tree.evaluate(&[0.0; FEATURE_COUNT]) - 7.5).abs() < f64::EPSILON);
    }

    #[test]
    fn split_sends_equal_values_left() {
        let tree = Tree::from_spec(0, &likes_stump(100.0, 200.0)).expect("valid tree");
        assert!((tree.evaluate(&row_with(6, 40_000.0)) - 100.0).abs() < f64::EPSILON);
        assert!((tree.evaluate(&row_with(6, 40_001.0)) - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn forest_averages_tree_outputs() {
        let forest = RandomForest::from_specs(&[
            likes_stump(100.0, 200.0),
            likes_stump(300.0, 600.0),
        ])
        .expect("valid forest");
        assert_eq!(forest.tree_count(), 2);
        assert_eq!(forest.node_count(), 6);
        assert!((forest.evaluate(&row_with(6, 1.0)) - 200.0).abs() < 1e-9);
        assert!((forest.evaluate(&row_with(6, 90_000.0)) - 400.0).abs() < 1e-9);
    }

    #[test]
    fn empty_forest_is_corrupt() {
        let err = RandomForest::from_specs(&[]).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(ref m) if m.contains("no trees")));
    }

    #[test]
    fn mismatched_array_lengths_are_corrupt() {
        let mut spec = likes_stump(1.0, 2.0);
        spec.threshold.pop();
        let err = Tree::from_spec(3, &spec).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(ref m) if m.starts_with("tree 3:")));
    }

    #[test]
    fn backward_child_pointer_is_corrupt() {
        let mut spec = likes_stump(1.0, 2.0);
        spec.children_right[0] = 0;
        let err = Tree::from_spec(0, &spec).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(ref m) if m.contains("node 0")));
    }

    #[test]
    fn out_of_range_child_is_corrupt() {
        let mut spec = likes_stump(1.0, 2.0);
        spec.children_left[0] = 9;
        assert!(Tree::from_spec(0, &spec).is_err());
    }

    #[test]
    fn split_feature_beyond_schema_is_corrupt() {
        let mut spec = likes_stump(1.0, 2.0);
        spec.feature[0] = 15;
        let err = Tree::from_spec(0, &spec).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(ref m) if m.contains("split feature 15")));
    }

    #[test]
    fn non_finite_leaf_is_corrupt() {
        let mut spec = likes_stump(1.0, 2.0);
        spec.value[2] = f64::NAN;
        assert!(Tree::from_spec(0, &spec).is_err());
    }

    #[test]
    fn leaf_with_right_child_is_corrupt() {
        let mut spec = likes_stump(1.0, 2.0);
        spec.children_right[1] = 2;
        assert!(Tree::from_spec(0, &spec).is_err());
    }
}
