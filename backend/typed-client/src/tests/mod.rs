mod error_models;
mod json_encoder;
mod merge;
