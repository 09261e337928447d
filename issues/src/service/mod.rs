pub mod fields;
pub mod filter;
pub mod issue;
