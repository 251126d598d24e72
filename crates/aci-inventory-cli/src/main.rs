//! aci-fabric-inventory
//!
//! Fetch fabric node inventory from a Cisco APIC and report it as JSON

use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use aci_inventory::{ClassMap, ModuleParams, ResultWriter, run_module};
use aci_inventory_api::{Command, InventoryRequest, Level, Protocol};
use aci_inventory_client::ConnectOptions;

mod config;

use config::Config;

/// Get fabric topology data on Cisco ACI fabrics
#[derive(Parser, Debug)]
#[command(name = "aci-fabric-inventory", version, about)]
struct Args {
    /// ID of the node whose details are fetched
    #[arg(long)]
    node_id: u32,

    /// Type of information to retrieve
    /// (fantray, interfaces, power-supplies, firmware, supervisor-module, linecard-module, nodes, all)
    #[arg(long, default_value = "all")]
    command: Command,

    /// MO query (brief) or subtree query (detail)
    #[arg(long, default_value = "brief")]
    level: Level,

    /// Name of the output file; `.txt` is appended
    #[arg(long)]
    filename: Option<String>,

    /// IP address or hostname of the APIC
    #[arg(long, env = "ACI_HOST")]
    host: Option<String>,

    /// Username used to log in to the APIC
    #[arg(long, env = "ACI_USERNAME")]
    username: Option<String>,

    /// Password used to log in to the APIC
    #[arg(long, env = "ACI_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Connection protocol (http or https)
    #[arg(long)]
    protocol: Option<Protocol>,

    /// Skip TLS certificate verification; `--insecure-skip-verify=false`
    /// overrides a config file that enables it
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    insecure_skip_verify: Option<bool>,

    /// Pod the node belongs to
    #[arg(long, default_value = "1")]
    pod: u32,

    /// Path to config file
    #[arg(long, env = "ACI_INVENTORY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (overrides config)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let (config, config_path) = Config::load_default(args.config.as_deref())?;

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, args.log_json);

    match &config_path {
        Some(path) => info!(path = %path.display(), "loaded config"),
        None => warn!("no config file found, using defaults"),
    }

    let params = build_params(&args, &config)?;
    let classes = ClassMap::default();
    let writer = ResultWriter::default();

    match run_module(&params, &classes, &writer).await {
        Ok(result) => {
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "inventory run failed");
            println!("{}", serde_json::to_string(&err.to_failure())?);
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr; stdout carries the result document
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Merge flags over config values
fn build_params(args: &Args, config: &Config) -> Result<ModuleParams> {
    let controller = &config.controller;

    let host = args
        .host
        .clone()
        .or_else(|| controller.host.clone())
        .ok_or_else(|| eyre::eyre!("no controller host given (--host, ACI_HOST or controller.host)"))?;
    let password = args
        .password
        .clone()
        .or_else(|| controller.password.clone())
        .ok_or_else(|| {
            eyre::eyre!("no password given (--password, ACI_PASSWORD or controller.password)")
        })?;

    let request = InventoryRequest::new(args.node_id, args.command, args.level);
    let mut params = ModuleParams::new(request, host, password);
    params.filename = args.filename.clone();
    params.username = args
        .username
        .clone()
        .unwrap_or_else(|| controller.username.clone());
    params.protocol = args.protocol.unwrap_or(controller.protocol);
    params.pod = args.pod;
    params.options = ConnectOptions::default()
        .with_insecure_skip_verify(
            args.insecure_skip_verify.unwrap_or(controller.insecure_skip_verify),
        )
        .with_login_timeout(controller.login_timeout());

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches};
    use std::time::Duration;

    // Env fallbacks are stripped so ACI_* in the test environment cannot leak in
    fn try_parse(argv: &[&str]) -> Result<Args, clap::Error> {
        let mut full = vec!["aci-fabric-inventory"];
        full.extend_from_slice(argv);
        let matches = Args::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(full)?;
        Args::from_arg_matches(&matches)
    }

    fn parse(argv: &[&str]) -> Args {
        try_parse(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["--node-id", "101", "--host", "apic1", "--password", "pw"]);
        assert_eq!(args.command, Command::All);
        assert_eq!(args.level, Level::Brief);
        assert_eq!(args.pod, 1);
        assert!(args.filename.is_none());

        let params = build_params(&args, &Config::default()).unwrap();
        assert_eq!(params.username, "admin");
        assert_eq!(params.protocol, Protocol::Https);
        assert!(!params.options.insecure_skip_verify);
        assert_eq!(params.options.login_timeout, Duration::from_secs(2));
        assert_eq!(params.request, InventoryRequest::new(101, Command::All, Level::Brief));
    }

    #[test]
    fn test_explicit_values() {
        let args = parse(&[
            "--node-id",
            "1",
            "--command",
            "supervisor-module",
            "--level",
            "detail",
            "--filename",
            "report",
            "--host",
            "10.0.0.1",
            "--username",
            "ops",
            "--password",
            "pw",
            "--protocol",
            "http",
            "--insecure-skip-verify",
        ]);
        let params = build_params(&args, &Config::default()).unwrap();
        assert_eq!(params.request.command, Command::SupervisorModule);
        assert_eq!(params.request.level, Level::Detail);
        assert_eq!(params.filename.as_deref(), Some("report"));
        assert_eq!(params.username, "ops");
        assert_eq!(params.protocol, Protocol::Http);
        assert!(params.options.insecure_skip_verify);
    }

    #[test]
    fn test_invalid_command_rejected() {
        let result = try_parse(&["--node-id", "101", "--command", "psu"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_fills_missing_flags() {
        let args = parse(&["--node-id", "201"]);
        let mut config = Config::default();
        config.controller.host = Some("apic.lab".to_string());
        config.controller.password = Some("from-config".to_string());
        config.controller.protocol = Protocol::Http;
        config.controller.insecure_skip_verify = true;

        let params = build_params(&args, &config).unwrap();
        assert_eq!(params.host, "apic.lab");
        assert_eq!(params.password, "from-config");
        assert_eq!(params.protocol, Protocol::Http);
        assert!(params.options.insecure_skip_verify);
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&["--node-id", "201", "--host", "cli-host", "--password", "cli-pw"]);
        let mut config = Config::default();
        config.controller.host = Some("apic.lab".to_string());
        config.controller.password = Some("from-config".to_string());

        let params = build_params(&args, &config).unwrap();
        assert_eq!(params.host, "cli-host");
        assert_eq!(params.password, "cli-pw");
    }

    #[test]
    fn test_missing_host_is_error() {
        let args = parse(&["--node-id", "201", "--password", "pw"]);
        let err = build_params(&args, &Config::default()).unwrap_err();
        assert!(err.to_string().contains("host"));
    }

    #[test]
    fn test_unset_env_is_not_read() {
        let args = parse(&["--node-id", "201"]);
        assert!(args.host.is_none());
        assert!(args.username.is_none());
        assert!(args.password.is_none());
        assert!(args.config.is_none());
        assert!(args.insecure_skip_verify.is_none());
    }

    #[test]
    fn test_insecure_flag_overrides_config() {
        let mut config = Config::default();
        config.controller.host = Some("apic.lab".to_string());
        config.controller.password = Some("pw".to_string());
        config.controller.insecure_skip_verify = true;

        let args = parse(&["--node-id", "201", "--insecure-skip-verify=false"]);
        assert_eq!(args.insecure_skip_verify, Some(false));
        let params = build_params(&args, &config).unwrap();
        assert!(!params.options.insecure_skip_verify);

        config.controller.insecure_skip_verify = false;
        let args = parse(&["--node-id", "201", "--insecure-skip-verify", "true"]);
        let params = build_params(&args, &config).unwrap();
        assert!(params.options.insecure_skip_verify);
    }
}
