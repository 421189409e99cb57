pub mod grid;
pub mod holidays;
pub mod init;
pub mod root;
