use crate::classifiers::sprint::best_split_search::BestSplitSearch;
use crate::classifiers::sprint::decision_tree::{DecisionTree, ROOT};
use crate::classifiers::sprint::instance_conditional_test::SplitTest;
use crate::classifiers::sprint::nodes::{LeafNode, Node, NodeId, SplitNode};
use crate::classifiers::sprint::split_criteria::{GiniSplitCriterion, SplitCriterion};
use crate::classifiers::sprint::split_evaluator::SplitEvaluator;
use crate::core::attribute_schema::AttributeSchema;
use crate::core::instances::{Dataset, Row};
use crate::error::{Result, SprintError};
use tracing::{debug, info};

/// Splitting stops once the best split's impurity falls below this value.
pub const DEFAULT_IMPURITY_THRESHOLD: f64 = 0.4;

/// Grows a SPRINT decision tree from `dataset`, splitting while the best
/// split's impurity is at least `impurity_threshold`.
pub fn build_tree(
    dataset: Dataset,
    schema: &AttributeSchema,
    impurity_threshold: f64,
) -> Result<DecisionTree> {
    SprintTreeBuilder::new(schema.n_classes(), impurity_threshold)?.build(dataset, schema)
}

struct WorkItem {
    rows: Vec<Row>,
    slot: NodeId,
}

// Slots are reserved in pairs so a split names both children at creation.
struct NodeArena {
    slots: Vec<Option<Node>>,
}

impl NodeArena {
    fn with_root() -> Self {
        Self { slots: vec![None] }
    }

    fn reserve_pair(&mut self) -> (NodeId, NodeId) {
        let left = self.slots.len();
        self.slots.push(None);
        self.slots.push(None);
        (left, left + 1)
    }

    fn fill(&mut self, slot: NodeId, node: Node) {
        debug_assert!(self.slots[slot].is_none(), "slot {slot} filled twice");
        self.slots[slot] = Some(node);
    }

    fn into_tree(self, n_classes: usize) -> DecisionTree {
        let reserved = self.slots.len();
        let nodes: Vec<Node> = self.slots.into_iter().flatten().collect();
        debug_assert_eq!(nodes.len(), reserved, "unfilled slot left in the tree");
        DecisionTree::from_nodes(nodes, n_classes)
    }
}

pub struct SprintTreeBuilder<C: SplitCriterion = GiniSplitCriterion> {
    evaluator: SplitEvaluator<C>,
    impurity_threshold: f64,
}

impl SprintTreeBuilder<GiniSplitCriterion> {
    pub fn new(n_classes: usize, impurity_threshold: f64) -> Result<Self> {
        Self::with_criterion(GiniSplitCriterion::new(), n_classes, impurity_threshold)
    }
}

impl<C: SplitCriterion> SprintTreeBuilder<C> {
    pub fn with_criterion(criterion: C, n_classes: usize, impurity_threshold: f64) -> Result<Self> {
        if !impurity_threshold.is_finite() || impurity_threshold < 0.0 {
            return Err(SprintError::InvalidThreshold(impurity_threshold));
        }
        Ok(Self {
            evaluator: SplitEvaluator::new(criterion, n_classes),
            impurity_threshold,
        })
    }

    pub fn impurity_threshold(&self) -> f64 {
        self.impurity_threshold
    }

    // Right is pushed before left, so a left subtree finishes first.
    pub fn build(&self, dataset: Dataset, schema: &AttributeSchema) -> Result<DecisionTree> {
        if dataset.is_empty() {
            return Err(SprintError::EmptyDataset);
        }
        if schema.n_classes() != self.evaluator.n_classes() {
            return Err(SprintError::InvalidSchema(format!(
                "builder expects {} classes but the schema declares {}",
                self.evaluator.n_classes(),
                schema.n_classes()
            )));
        }
        dataset.validate(schema)?;

        let n_rows = dataset.len();
        let search = BestSplitSearch::new(&self.evaluator);
        let mut arena = NodeArena::with_root();
        let mut work = vec![WorkItem {
            rows: dataset.into_rows(),
            slot: ROOT,
        }];

        while let Some(WorkItem { rows, slot }) = work.pop() {
            let counts = self.class_counts(&rows);
            let Some(candidate) = search.find_best_split(&rows) else {
                arena.fill(slot, Node::Leaf(LeafNode::from_class_counts(counts)));
                continue;
            };

            let (left_slot, right_slot) = arena.reserve_pair();
            arena.fill(
                slot,
                Node::Split(SplitNode::new(
                    SplitTest::from(&candidate),
                    candidate.impurity,
                    counts,
                    left_slot,
                    right_slot,
                )),
            );

            let (left_rows, right_rows) = candidate.partition(rows);
            debug!(
                slot,
                %candidate,
                left = left_rows.len(),
                right = right_rows.len(),
                "split"
            );

            // An empty right side means the left side is the whole partition
            // again; growing it further could never terminate.
            if candidate.impurity >= self.impurity_threshold && !right_rows.is_empty() {
                work.push(WorkItem {
                    rows: right_rows,
                    slot: right_slot,
                });
                work.push(WorkItem {
                    rows: left_rows,
                    slot: left_slot,
                });
            } else {
                let left_leaf = LeafNode::from_class_counts(self.class_counts(&left_rows));
                let right_leaf = if right_rows.is_empty() {
                    left_leaf.clone()
                } else {
                    LeafNode::from_class_counts(self.class_counts(&right_rows))
                };
                arena.fill(left_slot, Node::Leaf(left_leaf));
                arena.fill(right_slot, Node::Leaf(right_leaf));
            }
        }

        let tree = arena.into_tree(self.evaluator.n_classes());
        info!(
            rows = n_rows,
            nodes = tree.n_nodes(),
            leaves = tree.n_leaves(),
            depth = tree.depth(),
            threshold = self.impurity_threshold,
            "built decision tree"
        );
        Ok(tree)
    }

    fn class_counts(&self, rows: &[Row]) -> Vec<usize> {
        let mut counts = vec![0usize; self.evaluator.n_classes()];
        for row in rows {
            if let Some(c) = counts.get_mut(row.label()) {
                *c += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::Classifier;
    use crate::classifiers::sprint::instance_conditional_test::{
        InstanceConditionalTest, NominalAttributeBinaryTest, NumericAttributeBinaryTest,
    };
    use crate::core::attributes::AttributeKind;
    use crate::core::instances::Field;
    use crate::testing::{abalone_like, categorical_dataset, numeric_dataset};

    fn leaf_class(tree: &DecisionTree, id: NodeId) -> usize {
        tree.node(id).and_then(Node::as_leaf).unwrap().predicted_class()
    }

    #[test]
    fn separable_numeric_column_yields_a_single_stump() {
        let (ds, schema) = numeric_dataset(&[(0, 1.0), (0, 2.0), (1, 5.0), (1, 6.0)], 2);
        let tree = build_tree(ds, &schema, 0.1).unwrap();

        let root = tree.root().and_then(Node::as_split).unwrap();
        assert_eq!(
            root.split_test(),
            &SplitTest::Numeric(NumericAttributeBinaryTest::new(1, 3.5))
        );
        assert_eq!(root.impurity(), 0.0);
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(leaf_class(&tree, root.left()), 0);
        assert_eq!(leaf_class(&tree, root.right()), 1);
    }

    #[test]
    fn categorical_column_isolates_pure_category() {
        let (ds, schema) = categorical_dataset(&[(0, "A"), (0, "A"), (1, "B")], 2);
        let tree = build_tree(ds, &schema, 0.4).unwrap();

        let root = tree.root().and_then(Node::as_split).unwrap();
        assert_eq!(
            root.split_test(),
            &SplitTest::Nominal(NominalAttributeBinaryTest::new(1, "A".into()))
        );
        assert_eq!(leaf_class(&tree, root.left()), 0);
        assert_eq!(leaf_class(&tree, root.right()), 1);
    }

    #[test]
    fn single_row_becomes_a_root_leaf() {
        let (ds, schema) = numeric_dataset(&[(2, 4.0)], 3);
        let tree = build_tree(ds, &schema, 0.4).unwrap();
        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(leaf_class(&tree, ROOT), 2);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let schema = AttributeSchema::from_kinds(2, &[AttributeKind::Numeric]);
        let err = build_tree(Dataset::default(), &schema, 0.4).unwrap_err();
        assert_eq!(err, SprintError::EmptyDataset);
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let (ds, schema) = numeric_dataset(&[(0, 1.0), (1, 2.0)], 2);
        assert!(matches!(
            build_tree(ds.clone(), &schema, f64::NAN),
            Err(SprintError::InvalidThreshold(_))
        ));
        assert!(matches!(
            build_tree(ds, &schema, -0.1),
            Err(SprintError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn schema_errors_surface_before_building() {
        let (ds, _) = numeric_dataset(&[(0, 1.0), (1, 2.0)], 2);
        let schema = AttributeSchema::from_kinds(2, &[AttributeKind::Categorical]);
        assert!(matches!(
            build_tree(ds, &schema, 0.4),
            Err(SprintError::InvalidSchema(_))
        ));
    }

    #[test]
    fn pure_enough_split_with_empty_right_side_duplicates_the_left_leaf() {
        // A constant categorical column can only produce an all-matching side.
        let (ds, schema) = categorical_dataset(&[(1, "x"), (0, "x"), (1, "x")], 2);
        let tree = build_tree(ds, &schema, 0.0).unwrap();

        let root = tree.root().and_then(Node::as_split).unwrap();
        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(leaf_class(&tree, root.left()), 1);
        assert_eq!(leaf_class(&tree, root.right()), 1);
    }

    #[test]
    fn impure_splits_keep_growing_until_threshold() {
        let (ds, schema) = numeric_dataset(
            &[(0, 1.0), (1, 2.0), (0, 3.0), (1, 4.0), (0, 5.0), (1, 6.0)],
            2,
        );
        let tree = build_tree(ds.clone(), &schema, 0.0).unwrap();
        assert!(tree.depth() > 1);
        // Zero threshold grows until every leaf is pure, so training rows are
        // all classified correctly.
        for row in ds.rows() {
            assert_eq!(tree.predict(row), Some(row.label()));
        }
    }

    #[test]
    fn every_split_node_has_two_leaves_or_splits() {
        let (ds, schema) = abalone_like();
        let tree = build_tree(ds, &schema, 0.2).unwrap();
        for node in tree.nodes() {
            if let Node::Split(split) = node {
                assert!(tree.node(split.left()).is_some());
                assert!(tree.node(split.right()).is_some());
                assert_ne!(split.left(), split.right());
            }
        }
        for leaf in tree.leaves() {
            assert!(leaf.predicted_class() < 3);
        }
        assert!(tree.check_structure().is_ok());
    }

    #[test]
    fn left_subtree_is_numbered_before_right_subtree_grows() {
        let (ds, schema) = numeric_dataset(
            &[(0, 1.0), (1, 2.0), (0, 3.0), (1, 4.0), (0, 5.0), (1, 6.0)],
            2,
        );
        let tree = build_tree(ds, &schema, 0.0).unwrap();
        let root = tree.root().and_then(Node::as_split).unwrap();
        assert_eq!((root.left(), root.right()), (1, 2));
        if let Some(Node::Split(left)) = tree.node(root.left()) {
            assert_eq!(left.left(), 3);
        }
    }

    #[test]
    fn pathological_depth_does_not_exhaust_the_stack() {
        let points: Vec<(usize, f64)> = (0..1_000).map(|i| (i % 2, i as f64)).collect();
        let (ds, schema) = numeric_dataset(&points, 2);
        let tree = build_tree(ds, &schema, 0.0).unwrap();
        assert!(tree.depth() > 100);
        assert!(tree.to_string().contains("Class: 1"));
    }

    #[test]
    fn numeric_ties_partition_by_sorted_position() {
        let rows = vec![
            Row::new(0, vec![Field::Numeric(1.0)]),
            Row::new(1, vec![Field::Numeric(1.0)]),
            Row::new(1, vec![Field::Numeric(2.0)]),
        ];
        let schema = AttributeSchema::from_kinds(2, &[AttributeKind::Numeric]);
        let tree = build_tree(Dataset::new(rows), &schema, 0.5).unwrap();
        let root = tree.root().and_then(Node::as_split).unwrap();
        assert_eq!(root.split_test().column(), 1);
        assert_eq!(leaf_class(&tree, root.left()), 0);
        assert_eq!(leaf_class(&tree, root.right()), 1);
    }
}
