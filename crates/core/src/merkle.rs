//! Merkle tree implementation for block membership proofs.
//!
//! The tree is always perfect: leaves are padded with [`dummy_leaf`] digests up
//! to the next power of two. Nodes live in an arena and refer to each other by
//! index, so the parent and sibling links are plain relations with no
//! ownership attached.

use crate::block::{Block, BlockError};
use crate::hash::{dummy_leaf, hash_pair, Digest};
use crate::proof::{verify_transaction, MerkleProof};
use crate::transaction::Transaction;
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while building or walking a merkle tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MerkleError {
    #[error("invalid tree input: {0}")]
    InvalidTreeInput(#[from] BlockError),

    #[error("unknown traversal order: {0:?}")]
    UnknownTraversalOrder(String),
}

pub type Result<T> = std::result::Result<T, MerkleError>;

/// Depth-first traversal orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Preorder,
    Inorder,
    Postorder,
}

impl FromStr for Order {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "preorder" | "pre" => Ok(Order::Preorder),
            "inorder" | "in" => Ok(Order::Inorder),
            "postorder" | "post" => Ok(Order::Postorder),
            _ => Err(MerkleError::UnknownTraversalOrder(s.to_string())),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Preorder => "preorder",
            Order::Inorder => "inorder",
            Order::Postorder => "postorder",
        };
        f.write_str(name)
    }
}

type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    data: Digest,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Option<NodeId>,
    sibling: Option<NodeId>,
}

impl Node {
    fn new(data: Digest, left: Option<NodeId>, right: Option<NodeId>) -> Self {
        Self {
            data,
            left,
            right,
            parent: None,
            sibling: None,
        }
    }
}

/// A merkle tree over the transactions of one block.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// Every node of the tree, children allocated before their parent.
    nodes: Vec<Node>,
    root: Option<NodeId>,
    /// Leaf count after padding.
    leaf_count: usize,
    height: usize,
    inner_nodes: usize,
}

impl MerkleTree {
    /// Build the tree for `block` and write its root into the block.
    ///
    /// An empty block yields an empty tree and stays unsealed. A block that
    /// already carries a root is rejected.
    pub fn new(block: &mut Block) -> Result<Self> {
        if block.is_sealed() {
            return Err(BlockError::RootAlreadySet.into());
        }

        let tree = Self::build(block);
        if let Some(root) = tree.root() {
            block.set_root_hash(*root)?;
        }
        Ok(tree)
    }

    /// Build the tree for `block` without touching the block.
    pub fn build(block: &Block) -> Self {
        let tx_count = block.tx_count();
        if tx_count == 0 {
            debug!("empty block, building empty merkle tree");
            return Self {
                nodes: Vec::new(),
                root: None,
                leaf_count: 0,
                height: 0,
                inner_nodes: 0,
            };
        }

        let padded = tx_count.next_power_of_two();
        let mut leaves: Vec<Digest> = Vec::with_capacity(padded);
        leaves.extend(block.iter().map(Transaction::hash));
        leaves.resize(padded, dummy_leaf());

        let node_count = 2 * padded - 1;
        let mut tree = Self {
            nodes: Vec::with_capacity(node_count),
            root: None,
            leaf_count: padded,
            height: (node_count + 1).ilog2() as usize - 1,
            inner_nodes: node_count - padded,
        };
        tree.root = tree.build_range(0, node_count, &leaves);

        debug!(
            transactions = tx_count,
            padding = padded - tx_count,
            height = tree.height,
            "built merkle tree"
        );
        tree
    }

    /// Build the subtree covering in-order positions `[start, end)`.
    fn build_range(&mut self, start: usize, end: usize, leaves: &[Digest]) -> Option<NodeId> {
        if start >= end {
            return None;
        }

        if end - start == 1 {
            // Leaf k of a perfect tree sits at in-order position 2k.
            return Some(self.push(Node::new(leaves[start / 2], None, None)));
        }

        let mid = start + (end - start - 1) / 2;
        let left = self.build_range(start, mid, leaves)?;
        let right = self.build_range(mid + 1, end, leaves)?;

        let data = hash_pair(&self.nodes[left].data, &self.nodes[right].data);
        let id = self.push(Node::new(data, Some(left), Some(right)));

        self.nodes[left].parent = Some(id);
        self.nodes[right].parent = Some(id);
        self.nodes[left].sibling = Some(right);
        self.nodes[right].sibling = Some(left);
        Some(id)
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Get the root digest, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Digest> {
        self.root.map(|id| &self.nodes[id].data)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of non-leaf nodes.
    pub fn inner_node_count(&self) -> usize {
        self.inner_nodes
    }

    /// Number of leaves, padding included.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All digests in level order: root first, then each level left to right.
    pub fn breadth_first_traversal(&self) -> Vec<Digest> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut line: VecDeque<NodeId> = self.root.into_iter().collect();

        while let Some(id) = line.pop_front() {
            let node = &self.nodes[id];
            out.push(node.data);
            line.extend(node.left);
            line.extend(node.right);
        }
        out
    }

    /// All digests in the requested depth-first order.
    pub fn depth_first_traversal(&self, order: Order) -> Vec<Digest> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.walk(self.root, order, &mut out);
        out
    }

    fn walk(&self, id: Option<NodeId>, order: Order, out: &mut Vec<Digest>) {
        let Some(id) = id else {
            return;
        };
        let node = &self.nodes[id];

        if order == Order::Preorder {
            out.push(node.data);
        }
        self.walk(node.left, order, out);
        if order == Order::Inorder {
            out.push(node.data);
        }
        self.walk(node.right, order, out);
        if order == Order::Postorder {
            out.push(node.data);
        }
    }

    /// Extract the sibling path proving `tx` is in this tree.
    ///
    /// Returns an empty proof when no node carries the transaction's digest.
    pub fn extract_proof(&self, tx: &Transaction) -> MerkleProof {
        let target = tx.hash();
        let Some(found) = self.root.and_then(|root| self.find_node(root, &target)) else {
            warn!(tx = %tx, "transaction not found in merkle tree");
            return MerkleProof::default();
        };

        let mut siblings = Vec::with_capacity(self.height);
        self.collect_siblings(found, &mut siblings);
        MerkleProof::new(siblings)
    }

    /// Depth-first search: this node, then the left subtree, then the right.
    ///
    /// Inner nodes are compared too. A transaction hash equal to an inner
    /// digest is accepted as negligible.
    fn find_node(&self, id: NodeId, target: &Digest) -> Option<NodeId> {
        let node = &self.nodes[id];
        if node.data == *target {
            return Some(id);
        }
        node.left
            .and_then(|left| self.find_node(left, target))
            .or_else(|| node.right.and_then(|right| self.find_node(right, target)))
    }

    /// Climb to the root, recording each sibling on the way up.
    fn collect_siblings(&self, id: NodeId, out: &mut Vec<Digest>) {
        let node = &self.nodes[id];
        if let (Some(parent), Some(sibling)) = (node.parent, node.sibling) {
            out.push(self.nodes[sibling].data);
            self.collect_siblings(parent, out);
        }
    }

    /// Verify a proof against this tree's root.
    pub fn verify_proof(&self, tx: &Transaction, proof: &MerkleProof) -> bool {
        self.root()
            .is_some_and(|root| verify_transaction(tx, proof, root))
    }
}
