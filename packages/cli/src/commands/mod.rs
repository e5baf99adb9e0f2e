pub mod apply;
pub mod init;
pub mod outline;
pub mod validate;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use outline::{outline, OutlineArgs};
pub use validate::{validate, ValidateArgs};
