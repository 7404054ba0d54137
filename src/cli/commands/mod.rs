pub mod annotate;
pub mod helper;
pub mod init;
pub mod rewrite;
pub mod translate;
pub mod watch;
