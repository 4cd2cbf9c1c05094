pub mod controller;
pub mod effect_parser;
pub mod llm_client;
pub mod narrator;
pub mod prompt_builder;
