//! Integration tests exercising the full compilation pipeline.
