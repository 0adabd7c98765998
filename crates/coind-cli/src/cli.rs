use std::time::Duration;

use clap::Parser;
use serde_json::Value;

use coind_core::rpc::{Endpoint, SessionConfig, DEFAULT_HOST, DEFAULT_PORT};

/// coind-cli: call any JSON-RPC method on a coin full-node daemon.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Daemon RPC host.
    #[arg(long, default_value = DEFAULT_HOST, env = "COIND_RPC_HOST")]
    pub rpc_host: String,

    /// Daemon RPC port.
    #[arg(long, default_value_t = DEFAULT_PORT, env = "COIND_RPC_PORT")]
    pub rpc_port: u16,

    /// RPC username.
    #[arg(long, env = "COIND_RPC_USER")]
    pub rpc_user: String,

    /// RPC password.
    #[arg(long, env = "COIND_RPC_PASS", hide_env_values = true)]
    pub rpc_pass: String,

    /// Per-request timeout in seconds. 0 disables it.
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Print the result on one line instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,

    /// RPC method name, e.g. `getblockcount`.
    pub method: String,

    /// Positional parameters. Each one is parsed as JSON when it can be;
    /// anything else is sent as a string.
    pub params: Vec<String>,
}

impl Cli {
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(&self.rpc_user, &self.rpc_pass)
            .with_host(&self.rpc_host)
            .with_port(self.rpc_port)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            request_timeout: (self.timeout_secs > 0)
                .then(|| Duration::from_secs(self.timeout_secs)),
            ..SessionConfig::default()
        }
    }

    pub fn rpc_params(&self) -> Vec<Value> {
        self.params.iter().map(|raw| parse_param(raw)).collect()
    }
}

/// `10` and `true` go out as a number and a boolean; `abc` goes out as
/// `"abc"`. Quote explicitly (`'"10"'`) to force a string.
fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("coind-cli").chain(args.iter().copied()))
            .expect("arguments must parse")
    }

    #[test]
    fn params_are_json_when_possible() {
        let cli = parse(&[
            "--rpc-user",
            "u",
            "--rpc-pass",
            "p",
            "getblock",
            "00ab",
            "2",
            "true",
            "[1,\"x\"]",
            "\"10\"",
        ]);
        assert_eq!(cli.method, "getblock");
        assert_eq!(
            cli.rpc_params(),
            vec![json!("00ab"), json!(2), json!(true), json!([1, "x"]), json!("10")]
        );
    }

    #[test]
    fn endpoint_defaults_to_local_daemon() {
        let cli = parse(&["--rpc-user", "u", "--rpc-pass", "p", "getinfo"]);
        let endpoint = cli.endpoint();
        assert_eq!(endpoint.host(), DEFAULT_HOST);
        assert_eq!(endpoint.port(), DEFAULT_PORT);
        assert_eq!(endpoint.username(), "u");
        assert!(cli.rpc_params().is_empty());
    }

    #[test]
    fn zero_timeout_disables_request_deadline() {
        let cli = parse(&[
            "--rpc-user",
            "u",
            "--rpc-pass",
            "p",
            "--timeout-secs",
            "0",
            "getinfo",
        ]);
        assert_eq!(cli.session_config().request_timeout, None);

        let cli = parse(&["--rpc-user", "u", "--rpc-pass", "p", "getinfo"]);
        assert_eq!(
            cli.session_config().request_timeout,
            Some(Duration::from_secs(30))
        );
    }
}
