pub mod navigator;
pub mod saver;

pub use navigator::SystemNavigator;
pub use saver::DiskFileSaver;
