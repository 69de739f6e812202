pub mod mac_roman;
pub mod region;
pub mod error;
pub mod header;
pub mod index;
pub mod fork;
pub mod discovery;
pub mod batch;
pub mod archive;

pub use error::{ForkError, LoadError};
pub use header::{ForkHeader, HEADER_SIZE};
pub use index::{Resource, ResourceIndex};
pub use fork::{decode, ResourceFork};
pub use archive::{load, load_with_options, ErrorPolicy, LoadOptions, LoadReport};
