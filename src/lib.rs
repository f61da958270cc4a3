pub mod action_ref;
pub mod collect;
pub mod config;
pub mod error;
pub mod host;
pub mod instrument;
pub mod menu_ref;
pub mod present;
pub mod registry;
pub mod storage;
pub mod tree;

pub use action_ref::ActionRef;
pub use collect::{collect, Collection};
pub use config::QuickMenuConfig;
pub use error::{CollectionFailure, LifecycleError, QuickMenuError, StorageError};
pub use host::{KeyValueStore, MemoryStore, MenuNode, ResolveError, ResolvedCommand};
pub use instrument::ClickInstrumenter;
pub use menu_ref::MenuRef;
pub use present::{QuickMenuEntry, QuickMenuPresenter, QuickMenuView};
pub use registry::QuickMenu;
pub use storage::{QuickMenuStorage, StoredCount};
pub use tree::{load_tree, validate_tree, MenuItem};
