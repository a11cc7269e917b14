pub mod collection;
pub mod dump;
pub mod registry;

pub use collection::{DebugCollection, erase_outputs};
pub use dump::{CollectionDump, DumpedState, InputDump, NamedState};
pub use krt_debug_error::{Error, ErrorKind, Result};
pub use registry::{RegisteredCollection, Registry, SnapshotFn, maybe_register};
