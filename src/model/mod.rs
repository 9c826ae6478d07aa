pub mod config;
pub mod conversion;
pub mod definition;
pub mod run;
pub mod value;

pub use config::*;
pub use conversion::*;
pub use definition::*;
pub use run::*;
pub use value::*;
