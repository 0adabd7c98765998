use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc};

pub struct Control<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Control<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    pub async fn get_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getinfo", Vec::new()).await
    }

    /// Help for one command, or the full command list when `command` is
    /// `None`. Accepts the snake_case spelling (`get_block` → `getblock`).
    pub async fn help(&self, command: Option<&str>) -> Result<Value, CoreError> {
        let command = command
            .map(|command| command.replace('_', ""))
            .filter(|command| !command.is_empty());
        let params = match command {
            Some(command) => vec![json!(command)],
            None => Vec::new(),
        };
        self.rpc.fetch("help", params).await
    }

    pub async fn stop(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("stop", Vec::new()).await
    }

    /// Seconds since the daemon started.
    pub async fn uptime(&self) -> Result<u64, CoreError> {
        fetch_as(self.rpc, "uptime", Vec::new()).await
    }
}
