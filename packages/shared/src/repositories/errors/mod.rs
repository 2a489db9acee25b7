pub mod token_repository_errors;
