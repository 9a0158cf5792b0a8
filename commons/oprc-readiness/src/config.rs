use envconfig::Envconfig;

#[derive(Envconfig, Clone, Debug)]
pub struct ReadyConfig {
    /// Tracing directive used when `RUST_LOG` is unset or empty.
    /// Env: OPRC_READY_LOG_LEVEL
    #[envconfig(from = "OPRC_READY_LOG_LEVEL", default = "info")]
    pub log_level: String,

    /// Print the trail for every replayed snapshot, not just the final one.
    /// Env: OPRC_READY_PRINT_ALL
    #[envconfig(from = "OPRC_READY_PRINT_ALL", default = "false")]
    pub print_all: bool,
}
