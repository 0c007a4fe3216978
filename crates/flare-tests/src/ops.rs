//! Operator surface tests: arithmetic, compound assignment, comparison
