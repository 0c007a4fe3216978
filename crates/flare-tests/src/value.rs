//! Value-semantics tests: ownership, aliasing, assignment, destruction
