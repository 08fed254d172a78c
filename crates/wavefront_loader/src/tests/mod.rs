//! Whole-file decoding tests

mod scene_integration;
