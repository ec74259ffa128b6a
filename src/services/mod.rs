pub mod dispatch;
pub mod explain;
pub mod install;
