//! promptops: Framework / Prompt ドキュメントのスキーマ・変換・アーカイブ入出力

pub mod archive;
pub mod collection;
pub mod config;
pub mod dsl;
pub mod env;
pub mod error;
pub mod frontmatter;
pub mod import;
pub mod quota;
pub mod service;
pub mod storage;
