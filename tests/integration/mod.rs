//! Integration tests for mkubectl against a scripted stand-in for kubectl

mod cli_binary;
