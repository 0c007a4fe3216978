//! Conversion and readback tests
