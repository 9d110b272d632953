use std::cmp::{Eq, Ord, Ordering, PartialEq, PartialOrd, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use super::{CodingError, Probability, ProbabilityTable, Symbol};

#[derive(Clone, Copy)]
enum NodeKind {
    Leaf { symbol: Symbol },
    Inner { left: usize, right: usize },
}

#[derive(Clone)]
struct Node {
    probability: Probability,
    index: usize,
    symbols: Vec<Symbol>,
    kind: NodeKind,
}

/// Huffman tree stored as an arena. The index of a node is its creation
/// order: leaves come first in ascending symbol order, then every inner node
/// in the order it was merged.
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root_index: usize,
}

pub(super) enum Visit {
    Leaf(Symbol),
    Inner { left: usize, right: usize },
}

// Entry of the working set. Ties on probability go to the node created first.
#[derive(Clone, Copy)]
struct Candidate {
    probability: Probability,
    index: usize,
}

impl From<&Node> for Candidate {
    fn from(node: &Node) -> Self {
        Candidate {
            probability: node.probability,
            index: node.index,
        }
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.probability
            .cmp(&other.probability)
            .then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two least probable nodes.
    /// The first extracted node becomes the left child.
    pub fn new(probabilities: &ProbabilityTable) -> Result<HuffmanTree, CodingError> {
        let mut heap = BinaryHeap::with_capacity(probabilities.len());
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * probabilities.len());

        for (symbol, probability) in probabilities.iter() {
            let node = Node {
                probability,
                index: nodes.len(),
                symbols: vec![symbol],
                kind: NodeKind::Leaf { symbol },
            };
            heap.push(Reverse(Candidate::from(&node)));
            nodes.push(node);
        }

        let root_index = loop {
            let Reverse(left) = heap.pop().ok_or(CodingError::EmptyProbabilityTable)?;
            let Some(Reverse(right)) = heap.pop() else {
                break left.index;
            };
            let symbols = [
                nodes[left.index].symbols.as_slice(),
                nodes[right.index].symbols.as_slice(),
            ]
            .concat();
            let node = Node {
                probability: left.probability + right.probability,
                index: nodes.len(),
                symbols,
                kind: NodeKind::Inner {
                    left: left.index,
                    right: right.index,
                },
            };
            log::debug!(
                "Merged node {} ({}) with node {} ({}) into node {} ({})",
                left.index,
                left.probability,
                right.index,
                right.probability,
                node.index,
                node.probability
            );
            heap.push(Reverse(Candidate::from(&node)));
            nodes.push(node);
        };

        Ok(HuffmanTree { nodes, root_index })
    }

    pub fn probability(&self) -> Probability {
        self.nodes[self.root_index].probability
    }

    /// Symbols covered by the tree, in the order of its leaves from left to right.
    pub fn symbols(&self) -> &[Symbol] {
        &self.nodes[self.root_index].symbols
    }

    pub fn leaf_count(&self) -> usize {
        self.symbols().len()
    }

    /// Number of edges on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut node_index_stack = vec![(self.root_index, 0)];
        while let Some((index, depth)) = node_index_stack.pop() {
            match self.nodes[index].kind {
                NodeKind::Leaf { symbol: _ } => height = height.max(depth),
                NodeKind::Inner { left, right } => {
                    node_index_stack.push((left, depth + 1));
                    node_index_stack.push((right, depth + 1));
                }
            }
        }
        height
    }

    pub(super) fn root_index(&self) -> usize {
        self.root_index
    }

    pub(super) fn visit(&self, index: usize) -> Visit {
        match self.nodes[index].kind {
            NodeKind::Leaf { symbol } => Visit::Leaf(symbol),
            NodeKind::Inner { left, right } => Visit::Inner { left, right },
        }
    }
}

const BOX_DRAWINGS_DOUBLE_HORIZONTAL: &str = "═";
const SPACE: &str = " ";

fn center_of(line: &str) -> usize {
    let indentation = line.chars().position(|c| c != ' ').unwrap_or(0);
    (indentation * 2 + line.trim().chars().count()) / 2
}

// Node & Tree visualization
impl Node {
    fn get_string(&self, tree: &HuffmanTree) -> Vec<String> {
        match self.kind {
            NodeKind::Leaf { symbol } => vec![format!("({},{})", symbol, self.probability)],
            NodeKind::Inner { left, right } => {
                let left_box: Vec<String> = tree.nodes[left].get_string(tree);
                let right_box: Vec<String> = tree.nodes[right].get_string(tree);
                let left_width = left_box[0].chars().count();
                let right_width = right_box[0].chars().count();
                let mut result: Vec<String> = Vec::new();

                result.push(format!(
                    "{}•{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));
                result.push(format!(
                    "{}║{}",
                    SPACE.repeat(left_width),
                    SPACE.repeat(right_width)
                ));

                let left_pos = center_of(&left_box[0]);
                let right_pos = center_of(&right_box[0]);
                result.push(format!(
                    "{}1{}╩{}0{}",
                    SPACE.repeat(left_pos),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(left_width - left_pos - 1),
                    BOX_DRAWINGS_DOUBLE_HORIZONTAL.repeat(right_pos),
                    SPACE.repeat(right_width - right_pos - 1)
                ));

                let left_depth = left_box.len();
                let right_depth = right_box.len();
                for i in 0..std::cmp::max(left_depth, right_depth) {
                    let left_str = left_box
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| SPACE.repeat(left_width));
                    let right_str = right_box
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| SPACE.repeat(right_width));
                    result.push(format!("{} {}", left_str, right_str));
                }
                result
            }
        }
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strs = self.nodes[self.root_index].get_string(self);
        for s in strs.iter() {
            writeln!(f, "{}", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{HuffmanTree, NodeKind};
    use crate::huffman::{count, probabilities, CodingError, Probability, ProbabilityTable};

    fn build(input: &str) -> HuffmanTree {
        let probabilities = probabilities(&count(input)).unwrap();
        HuffmanTree::new(&probabilities).unwrap()
    }

    fn calculate_depth_for_each_leaf(tree: &HuffmanTree) -> Vec<(char, usize)> {
        let mut depths = Vec::new();
        let mut node_index_stack = vec![(tree.root_index, 0)];
        while let Some((index, depth)) = node_index_stack.pop() {
            match tree.nodes[index].kind {
                NodeKind::Inner { left, right } => {
                    node_index_stack.push((left, depth + 1));
                    node_index_stack.push((right, depth + 1));
                }
                NodeKind::Leaf { symbol } => depths.push((symbol, depth)),
            }
        }
        depths.sort();
        depths
    }

    #[test]
    fn test_empty_probability_table_is_rejected() {
        let result = HuffmanTree::new(&ProbabilityTable::default());
        assert!(matches!(result, Err(CodingError::EmptyProbabilityTable)));
    }

    #[test]
    fn test_single_symbol_tree_is_a_single_leaf() {
        let tree = build("aaaa");
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(tree.probability(), Probability::new(1, 1).unwrap());
    }

    #[test]
    fn test_root_probability_is_one() {
        for input in ["ab", "abracadabra", "mississippi", "hello world"] {
            let tree = build(input);
            assert_eq!(
                tree.probability(),
                Probability::new(1, 1).unwrap(),
                "input '{}'",
                input
            );
        }
    }

    #[test]
    fn test_every_inner_node_sums_its_children() {
        let tree = build("the quick brown fox jumps over the lazy dog");
        for node in &tree.nodes {
            if let NodeKind::Inner { left, right } = node.kind {
                let left_node = &tree.nodes[left];
                let right_node = &tree.nodes[right];
                assert_eq!(
                    node.probability,
                    left_node.probability + right_node.probability
                );
                assert_eq!(
                    node.symbols,
                    [left_node.symbols.as_slice(), right_node.symbols.as_slice()].concat()
                );
            }
        }
    }

    #[test]
    fn test_tree_has_one_leaf_per_symbol() {
        let tree = build("abracadabra");
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.nodes.len(), 2 * 5 - 1);
        let mut symbols = tree.symbols().to_vec();
        symbols.sort();
        assert_eq!(symbols, ['a', 'b', 'c', 'd', 'r']);
    }

    #[test]
    fn test_each_node_has_correct_index() {
        let tree = build("abracadabra");
        for (index, node) in tree.nodes.iter().enumerate() {
            assert_eq!(index, node.index);
        }
    }

    #[test]
    fn test_calculate_depth_for_each_symbol_of_abracadabra() {
        let tree = build("abracadabra");
        let expected = [('a', 1), ('b', 3), ('c', 3), ('d', 3), ('r', 3)];
        assert_eq!(calculate_depth_for_each_leaf(&tree), expected);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_ties_are_broken_by_creation_order() {
        // a:2 b:2 c:1, c is merged with a before b, the leaf a wins the tie
        // against b because it was created earlier.
        let tree = build("aabbc");
        assert_eq!(tree.symbols(), ['b', 'c', 'a']);
        match tree.nodes[tree.root_index].kind {
            NodeKind::Inner { left, right } => {
                assert!(matches!(tree.nodes[left].kind, NodeKind::Leaf { symbol: 'b' }));
                assert_eq!(tree.nodes[right].symbols, ['c', 'a']);
            }
            NodeKind::Leaf { symbol: _ } => panic!("root of a three symbol tree is a leaf"),
        }
    }

    #[test]
    fn test_leaf_wins_tie_against_inner_node() {
        // a:1 b:1 c:2, the merged node (a,b) has the same probability as c
        let tree = build("abcc");
        assert_eq!(tree.symbols(), ['c', 'a', 'b']);
    }

    #[test]
    fn test_display_single_leaf() {
        let tree = build("aaaa");
        assert_eq!(tree.to_string(), "(a,1)\n");
    }

    #[test]
    fn test_display_two_leaves() {
        let tree = build("ab");
        let expected = concat!(
            "       •       \n",
            "       ║       \n",
            "   1═══╩═══0   \n",
            "(a,1/2) (b,1/2)\n",
        );
        assert_eq!(tree.to_string(), expected);
    }
}
