use std::path::PathBuf;

use mwres_core::pool::TypeInferenceRules;
use mwres_store::DataLayout;

/// Output format of the `fmt` tracing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults matching the conventional checkout layout, so
/// running the binary from the asset root needs no configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    /// Where the CSV, sprite and activity trees live.
    pub layout: DataLayout,
    /// Optional JSON file overriding the built-in type inference rules.
    pub type_rules_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                                   |
    /// |---------------------------|-------------------------------------------|
    /// | `HOST`                    | `127.0.0.1`                               |
    /// | `PORT`                    | `5000`                                    |
    /// | `CORS_ORIGINS`            | `http://127.0.0.1:5000,http://localhost:5000` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                                      |
    /// | `LOG_FORMAT`              | `pretty` (or `json`)                      |
    /// | `MWRES_BASE_DIR`          | `.`                                       |
    /// | `MWRES_DATA_DIR`          | `<base>/MW数据站爬虫/爬取数据`            |
    /// | `MWRES_IMAGE_DIR`         | `<base>/MW解包有益资源/.../sprites`       |
    /// | `MWRES_COMMON_ITEMS_DIR`  | `<base>/MW解包有益资源/common-items`      |
    /// | `MWRES_ACTIVITY_DIR`      | `<base>/MW数据站爬虫/抽奖物品数据`        |
    /// | `MWRES_NEW_DATA_CONFIG`   | `<base>/新数据管理.json`                  |
    /// | `MWRES_ITEM_TYPE_MAPPING` | `<base>/物品类型映射.json`                |
    /// | `MWRES_TYPE_RULES`        | unset                                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://127.0.0.1:5000,http://localhost:5000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let log_format = match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let base_dir = std::env::var("MWRES_BASE_DIR").unwrap_or_else(|_| ".".into());
        let defaults = DataLayout::from_base_dir(base_dir);
        let layout = DataLayout {
            data_dir: path_var("MWRES_DATA_DIR", defaults.data_dir),
            image_dir: path_var("MWRES_IMAGE_DIR", defaults.image_dir),
            common_items_dir: path_var("MWRES_COMMON_ITEMS_DIR", defaults.common_items_dir),
            activity_dir: path_var("MWRES_ACTIVITY_DIR", defaults.activity_dir),
            new_data_config_file: path_var("MWRES_NEW_DATA_CONFIG", defaults.new_data_config_file),
            item_type_mapping_file: path_var(
                "MWRES_ITEM_TYPE_MAPPING",
                defaults.item_type_mapping_file,
            ),
            base_dir: defaults.base_dir,
        };

        let type_rules_file = std::env::var("MWRES_TYPE_RULES").ok().map(PathBuf::from);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            layout,
            type_rules_file,
        }
    }

    /// Type inference rules: the configured file, or the built-in defaults.
    pub fn load_type_rules(&self) -> Result<TypeInferenceRules, String> {
        let Some(path) = &self.type_rules_file else {
            return Ok(TypeInferenceRules::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
        TypeInferenceRules::from_json(&text).map_err(|e| e.to_string())
    }
}

fn path_var(name: &str, default: PathBuf) -> PathBuf {
    std::env::var_os(name).map(PathBuf::from).unwrap_or(default)
}
