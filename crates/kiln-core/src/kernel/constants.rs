/// Default application name
pub const DEFAULT_APP_NAME: &str = "kiln";

/// Default application version
pub const DEFAULT_APP_VERSION: &str = "0.1.0";

/// Environment variable toggling debug mode
pub const ENV_DEBUG: &str = "APP_DEBUG";

/// Environment variable holding the application root
pub const ENV_ROOT: &str = "APP_ROOT";

/// Environment variable holding the working directory
pub const ENV_WORKING_DIR: &str = "APP_WD";

/// Environment variable overriding the storage path
pub const ENV_STORAGE_PATH: &str = "APP_STORAGE_PATH";

/// Environment variable overriding the resource path
pub const ENV_RESOURCE_PATH: &str = "APP_RESOURCE_PATH";

/// Environment variable overriding the config path
pub const ENV_CONFIG_PATH: &str = "APP_CONFIG_PATH";

/// Storage directory name under the root
pub const STORAGE_DIR: &str = "storage";

/// Resource directory name under the root
pub const RESOURCE_DIR: &str = "resource";

/// Config directory name under the root
pub const CONFIG_DIR: &str = "config";

/// Container key for the configuration repository
pub const CONTAINER_KEY_CONFIG: &str = "config";

/// Container key for the application info snapshot
pub const CONTAINER_KEY_APP: &str = "app";

/// Container key for the kernel
pub const CONTAINER_KEY_KERNEL: &str = "kernel";
