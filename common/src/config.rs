use std::path::PathBuf;
use std::time::Duration;

/// Default per-probe time budget in milliseconds.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Default location of the investigation history, relative to the
/// working directory. Matches the file the tool has always used, so
/// histories written by older versions keep loading.
pub const DEFAULT_STORE_FILE: &str = "tracked_ips.json";

/// Base URL of the geolocation lookup service. Queried as
/// `{base}/json/{ip}`; with no IP appended the service echoes the
/// caller's own public address.
pub const DEFAULT_GEO_API: &str = "http://ip-api.com";

/// Base URL of the abuse/reputation service. Queried as `{base}/{ip}`.
pub const DEFAULT_REPUTATION_API: &str = "https://www.abuseipdb.com/check";

/// Global configuration options for an investigation run.
///
/// This struct controls the runtime behavior of the application,
/// including UI verbosity, probe deadlines, persistence location and
/// the upstream intelligence endpoints. It is typically constructed
/// from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    /// Toggles the display of the startup ASCII banner.
    ///
    /// If `true`, the application starts immediately with log
    /// output/spinners without printing the stylized branding. Useful
    /// for clean logs or frequent executions.
    pub no_banner: bool,

    /// Controls the visual density and formatting of the terminal output.
    ///
    /// This value is typically mapped from the `-q` or `--quiet` CLI flags.
    ///
    /// # Levels
    /// * **0** (Default): Full UI, including colors, spinners, and detailed trees.
    /// * **1+**: Reduced styling, plain log lines only.
    pub quiet: u8,

    /// Time budget applied to each probe independently.
    ///
    /// Every probe of an investigation gets this full budget; a probe
    /// that has not settled when it elapses is recorded as timed out
    /// without delaying its siblings. The whole investigation therefore
    /// completes within roughly one budget, not four.
    pub probe_timeout: Duration,

    /// Path of the JSON file holding the investigation history.
    ///
    /// Created (empty) on first use if it does not exist.
    pub store_path: PathBuf,

    /// Base URL of the geolocation service.
    ///
    /// Overridable so tests can point the probe at a local stub; the
    /// default is the production endpoint.
    pub geo_api: String,

    /// Base URL of the abuse/reputation service.
    ///
    /// Same override rules as [`Config::geo_api`].
    pub reputation_api: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            probe_timeout: Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            geo_api: String::from(DEFAULT_GEO_API),
            reputation_api: String::from(DEFAULT_REPUTATION_API),
        }
    }
}
