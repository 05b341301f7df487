pub mod aws_parameter_store;
pub mod aws_secrets_store;
pub mod environment_store;
pub mod file_store;
pub mod memory_store;
