use std::ffi::OsString;
use std::path::PathBuf;

pub const PAGE_TITLE: &str = "Suarez Penguin Data";
pub const REPO_URL: &str = "https://github.com/edgarsuarez9/cintel-02-data/tree/main";

/// Dataset path, used when no CLI argument is given.
pub const DATA_ENV: &str = "PENGUIN_DASH_DATA";
/// Rows per page in the data table.
pub const PAGE_SIZE_ENV: &str = "PENGUIN_DASH_PAGE_SIZE";
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Startup settings gathered from the command line and environment.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// `None` means "ask with a file dialog".
    pub data_path: Option<PathBuf>,
    pub page_size: usize,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args_os().nth(1),
            std::env::var_os(DATA_ENV),
            std::env::var(PAGE_SIZE_ENV).ok(),
        )
    }

    /// CLI argument wins over the environment variable.
    pub fn resolve(
        arg: Option<OsString>,
        env_path: Option<OsString>,
        page_size: Option<String>,
    ) -> Self {
        let data_path = arg
            .or(env_path)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let page_size = match page_size {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    log::warn!(
                        "{PAGE_SIZE_ENV}={raw:?} is not a positive integer, using {DEFAULT_PAGE_SIZE}"
                    );
                    DEFAULT_PAGE_SIZE
                }
            },
        };

        DashboardConfig {
            data_path,
            page_size,
        }
    }
}
