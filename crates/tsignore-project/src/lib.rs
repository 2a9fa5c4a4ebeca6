mod config;
mod discovery;
mod error;
mod globbing;
mod resolve;
mod skip;

pub use config::{CONFIG_KEY, LoadedToolConfig, ToolConfig, load_tool_config};
pub use discovery::{
    FixedHostPackage, HostPackageLocator, NoHostPackage, PACKAGE_MANIFEST, find_package_dir,
    locate_ts_config,
};
pub use error::{ConfigError, ResolveError};
pub use globbing::{has_glob_pattern, is_glob_pattern, normalize_path};
pub use resolve::{ResolveOptions, resolve_target_paths};
pub use skip::{SkipRules, shared_top_path};

pub type Result<T> = std::result::Result<T, ResolveError>;
