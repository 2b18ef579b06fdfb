pub mod collect;
pub mod init;
pub mod issues;
pub mod search;
pub mod stats;
pub mod tech;
