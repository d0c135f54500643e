pub mod ask;
pub mod config_cmd;
pub mod init;
pub mod profile;
pub mod serve;
pub mod status;
