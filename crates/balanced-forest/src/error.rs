use thiserror::Error;

/// Broken tree invariant reported by `validate()`.
///
/// Node positions are arena indices, which is what the debug printers show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("root node {0} has a parent")]
    RootHasParent(u32),
    #[error("child {child} of node {parent} does not point back to it")]
    BrokenParentLink { parent: u32, child: u32 },
    #[error("in-order sequence not strictly ascending at node {0}")]
    OrderViolated(u32),
    #[error("node {0} has zero multiplicity")]
    ZeroMultiplicity(u32),
    #[error("root node {0} is not black")]
    RootNotBlack(u32),
    #[error("red node {0} has a red child")]
    DoubleRed(u32),
    #[error("node {0} has a red right link")]
    RightLeaningRed(u32),
    #[error("black height mismatch at node {node}: left {left}, right {right}")]
    BlackHeightMismatch { node: u32, left: usize, right: usize },
    #[error("stored height of node {node} is {stored}, expected {expected}")]
    HeightMismatch { node: u32, stored: u32, expected: u32 },
    #[error("node {node} is out of balance (factor {factor})")]
    BalanceViolated { node: u32, factor: i64 },
}
