use crate::classifiers::Classifier;
use crate::classifiers::sprint::instance_conditional_test::InstanceConditionalTest;
use crate::classifiers::sprint::nodes::{LeafNode, Node, NodeId};
use crate::core::attribute_schema::AttributeSchema;
use crate::core::instances::Row;
use crate::error::{Result, SprintError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROOT: NodeId = 0;

/// A binary decision tree stored as a flat arena. Never modified once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeParts")]
pub struct DecisionTree {
    nodes: Vec<Node>,
    n_classes: usize,
}

#[derive(Deserialize)]
struct TreeParts {
    nodes: Vec<Node>,
    n_classes: usize,
}

impl TryFrom<TreeParts> for DecisionTree {
    type Error = SprintError;

    fn try_from(parts: TreeParts) -> Result<Self> {
        let tree = Self::from_nodes(parts.nodes, parts.n_classes);
        tree.check_structure()?;
        Ok(tree)
    }
}

impl DecisionTree {
    pub(crate) fn from_nodes(nodes: Vec<Node>, n_classes: usize) -> Self {
        Self { nodes, n_classes }
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(ROOT)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_leaves(&self) -> usize {
        self.leaves().count()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn leaves(&self) -> impl Iterator<Item = &LeafNode> {
        self.nodes.iter().filter_map(Node::as_leaf)
    }

    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.nodes.get(id) {
                Some(Node::Split(split)) => {
                    stack.push((split.left(), depth + 1));
                    stack.push((split.right(), depth + 1));
                }
                Some(Node::Leaf(_)) => max_depth = max_depth.max(depth),
                None => {}
            }
        }
        max_depth
    }

    pub fn leaf_for_row(&self, row: &Row) -> Option<&LeafNode> {
        let mut current = self.nodes.get(ROOT)?;
        loop {
            match current {
                Node::Leaf(leaf) => return Some(leaf),
                Node::Split(split) => {
                    let child = split.child_for_row(row)?;
                    current = self.nodes.get(child)?;
                }
            }
        }
    }

    /// Children follow their parent in the arena and every node but the root
    /// has exactly one parent.
    pub fn check_structure(&self) -> Result<()> {
        let malformed = |msg: String| Err(SprintError::InvalidSchema(msg));
        if self.nodes.is_empty() {
            return malformed("tree has no nodes".into());
        }
        let mut parents = vec![0usize; self.nodes.len()];
        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split(split) => {
                    for child in [split.left(), split.right()] {
                        if child <= id || child >= self.nodes.len() {
                            return malformed(format!(
                                "node {id} points at child {child} outside ({id}, {})",
                                self.nodes.len()
                            ));
                        }
                        parents[child] += 1;
                    }
                }
                Node::Leaf(leaf) if leaf.predicted_class() >= self.n_classes => {
                    return malformed(format!(
                        "leaf {id} predicts class {} of {}",
                        leaf.predicted_class(),
                        self.n_classes
                    ));
                }
                Node::Leaf(_) => {}
            }
        }
        match parents.iter().skip(1).position(|&p| p != 1) {
            Some(i) => malformed(format!("node {} has {} parents", i + 1, parents[i + 1])),
            None => Ok(()),
        }
    }

    pub fn check_schema(&self, schema: &AttributeSchema) -> Result<()> {
        if schema.n_classes() != self.n_classes {
            return Err(SprintError::InvalidSchema(format!(
                "tree predicts {} classes but the schema declares {}",
                self.n_classes,
                schema.n_classes()
            )));
        }
        for split in self.nodes.iter().filter_map(Node::as_split) {
            let test = split.split_test();
            let column = test.column();
            match schema.kind_of(column) {
                Some(kind) if kind == test.kind() => {}
                Some(kind) => {
                    return Err(SprintError::InvalidSchema(format!(
                        "tree splits column {column} as {} but the schema declares {kind}",
                        test.kind()
                    )));
                }
                None => {
                    return Err(SprintError::InvalidSchema(format!(
                        "tree splits column {column} which the schema does not declare"
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Classifier for DecisionTree {
    fn predict(&self, row: &Row) -> Option<usize> {
        self.leaf_for_row(row).map(LeafNode::predicted_class)
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }
}

enum Visit {
    Expand(NodeId, usize),
    Emit(NodeId, usize),
}

// Right subtree above, left below, four spaces per level.
impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Visit::Expand(ROOT, 0)];
        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Expand(id, indent) => match self.nodes.get(id) {
                    Some(Node::Split(split)) => {
                        stack.push(Visit::Expand(split.left(), indent + 4));
                        stack.push(Visit::Emit(id, indent));
                        stack.push(Visit::Expand(split.right(), indent + 4));
                    }
                    Some(Node::Leaf(_)) => stack.push(Visit::Emit(id, indent)),
                    None => {}
                },
                Visit::Emit(id, indent) => {
                    let pad = " ".repeat(indent);
                    match self.nodes.get(id) {
                        Some(Node::Split(split)) => {
                            writeln!(f, "{pad}n /")?;
                            writeln!(f, "{pad}{}", split.split_test())?;
                            writeln!(f, "{pad}y \\")?;
                        }
                        Some(Node::Leaf(leaf)) => {
                            writeln!(f, "{pad}Class: {}", leaf.predicted_class())?;
                        }
                        None => {}
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::sprint::instance_conditional_test::{
        NominalAttributeBinaryTest, NumericAttributeBinaryTest, SplitTest,
    };
    use crate::classifiers::sprint::nodes::SplitNode;
    use crate::core::attributes::AttributeKind;
    use crate::core::instances::Field;

    fn stump() -> DecisionTree {
        DecisionTree::from_nodes(
            vec![
                Node::Split(SplitNode::new(
                    SplitTest::Numeric(NumericAttributeBinaryTest::new(1, 3.5)),
                    0.0,
                    vec![2, 2],
                    1,
                    2,
                )),
                Node::Leaf(LeafNode::from_class_counts(vec![2, 0])),
                Node::Leaf(LeafNode::from_class_counts(vec![0, 2])),
            ],
            2,
        )
    }

    #[test]
    fn counts_nodes_leaves_and_depth() {
        let tree = stump();
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
        assert!(tree.root().unwrap().as_split().is_some());
    }

    #[test]
    fn routes_rows_to_leaves() {
        let tree = stump();
        let low = Row::new(0, vec![Field::Numeric(1.0)]);
        let high = Row::new(1, vec![Field::Numeric(9.0)]);
        assert_eq!(tree.predict(&low), Some(0));
        assert_eq!(tree.predict(&high), Some(1));
    }

    #[test]
    fn display_renders_sideways_dump() {
        let expected = "    Class: 1\nn /\nCol: 1 <= 3.5\ny \\\n    Class: 0\n";
        assert_eq!(stump().to_string(), expected);
    }

    #[test]
    fn check_schema_rejects_kind_mismatch() {
        let tree = stump();
        let ok = AttributeSchema::from_kinds(2, &[AttributeKind::Numeric]);
        assert!(tree.check_schema(&ok).is_ok());

        let wrong_kind = AttributeSchema::from_kinds(2, &[AttributeKind::Categorical]);
        assert!(matches!(
            tree.check_schema(&wrong_kind),
            Err(SprintError::InvalidSchema(_))
        ));

        let wrong_classes = AttributeSchema::from_kinds(3, &[AttributeKind::Numeric]);
        assert!(matches!(
            tree.check_schema(&wrong_classes),
            Err(SprintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn check_schema_rejects_undeclared_column() {
        let tree = DecisionTree::from_nodes(
            vec![
                Node::Split(SplitNode::new(
                    SplitTest::Nominal(NominalAttributeBinaryTest::new(2, "A".into())),
                    0.0,
                    vec![1, 1],
                    1,
                    2,
                )),
                Node::Leaf(LeafNode::from_class_counts(vec![1, 0])),
                Node::Leaf(LeafNode::from_class_counts(vec![0, 1])),
            ],
            2,
        );
        let schema = AttributeSchema::from_kinds(2, &[AttributeKind::Categorical]);
        assert!(matches!(
            tree.check_schema(&schema),
            Err(SprintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn serde_roundtrip_preserves_structure() {
        let tree = stump();
        let json = serde_json::to_string(&tree).unwrap();
        let back: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }

    fn from_json(value: serde_json::Value) -> serde_json::Result<DecisionTree> {
        serde_json::from_value(value)
    }

    #[test]
    fn deserialize_rejects_cycles() {
        let mut json = serde_json::to_value(stump()).unwrap();
        json["nodes"][0]["split"]["left"] = 0.into();
        json["nodes"][0]["split"]["right"] = 0.into();
        assert!(from_json(json).is_err());
    }

    #[test]
    fn deserialize_rejects_dangling_and_shared_children() {
        let mut dangling = serde_json::to_value(stump()).unwrap();
        dangling["nodes"][0]["split"]["right"] = 7.into();
        assert!(from_json(dangling).is_err());

        let mut shared = serde_json::to_value(stump()).unwrap();
        shared["nodes"][0]["split"]["right"] = 1.into();
        assert!(from_json(shared).is_err());
    }

    #[test]
    fn deserialize_rejects_leaf_class_outside_the_grid() {
        let mut json = serde_json::to_value(stump()).unwrap();
        json["nodes"][2]["leaf"]["predicted_class"] = 5.into();
        let err = from_json(json).unwrap_err();
        assert!(err.to_string().contains("leaf 2 predicts class 5"));
    }

    #[test]
    fn deserialize_rejects_empty_tree() {
        let json = serde_json::json!({ "nodes": [], "n_classes": 2 });
        assert!(from_json(json).is_err());
    }

    #[test]
    fn built_trees_pass_the_structure_check() {
        assert!(stump().check_structure().is_ok());
    }
}
