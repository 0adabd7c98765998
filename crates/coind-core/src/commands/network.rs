use serde_json::{json, Value};

use crate::error::CoreError;
use crate::rpc::{fetch_as, CoindRpc};

/// Peer management, bans and traffic shaping.
pub struct Network<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Network<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    /// `action` is `add`, `remove` or `onetry`.
    pub async fn add_node(&self, node: &str, action: &str) -> Result<Value, CoreError> {
        self.rpc
            .fetch("addnode", vec![json!(node), json!(action)])
            .await
    }

    pub async fn capd(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("capd", Vec::new()).await
    }

    pub async fn clear_banned(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("clearbanned", Vec::new()).await
    }

    pub async fn clear_block_stats(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("clearblockstats", Vec::new()).await
    }

    pub async fn disconnect_node(&self, node: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("disconnectnode", vec![json!(node)]).await
    }

    /// Toggle expedited forwarding of `item` (`block` or `tx`) to a peer.
    pub async fn expedited(
        &self,
        item: &str,
        node_ip: &str,
        state: &str,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch("expedited", vec![json!(item), json!(node_ip), json!(state)])
            .await
    }

    pub async fn get_added_node_info(
        &self,
        dns: bool,
        node: Option<&str>,
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(dns)];
        params.extend(node.map(|node| json!(node)));
        self.rpc.fetch("getaddednodeinfo", params).await
    }

    pub async fn get_connection_count(&self) -> Result<u64, CoreError> {
        fetch_as(self.rpc, "getconnectioncount", Vec::new()).await
    }

    pub async fn get_net_totals(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getnettotals", Vec::new()).await
    }

    pub async fn get_network_info(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getnetworkinfo", Vec::new()).await
    }

    pub async fn get_peer_info(&self, peer_ip: Option<&str>) -> Result<Value, CoreError> {
        let params = peer_ip.map(|ip| vec![json!(ip)]).unwrap_or_default();
        self.rpc.fetch("getpeerinfo", params).await
    }

    pub async fn get_traffic_shaping(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("gettrafficshaping", Vec::new()).await
    }

    pub async fn list_banned(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("listbanned", Vec::new()).await
    }

    pub async fn ping(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("ping", Vec::new()).await
    }

    pub async fn push_tx(&self, node: &str) -> Result<Value, CoreError> {
        self.rpc.fetch("pushtx", vec![json!(node)]).await
    }

    pub async fn save_msg_pool(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("savemsgpool", Vec::new()).await
    }

    /// Ban (`add`) or unban (`remove`) an address or subnet.
    ///
    /// `absolute` only travels together with a `ban_time`, and only when
    /// set; otherwise the daemon's relative default applies.
    pub async fn set_ban(
        &self,
        ip: &str,
        action: &str,
        ban_time: Option<u64>,
        absolute: bool,
    ) -> Result<Value, CoreError> {
        let mut params = vec![json!(ip), json!(action)];
        if let Some(ban_time) = ban_time {
            params.push(json!(ban_time));
            if absolute {
                params.push(json!(true));
            }
        }
        self.rpc.fetch("setban", params).await
    }

    /// `direction` is `send` or `receive`; rates are in KB/s.
    pub async fn set_traffic_shaping(
        &self,
        direction: &str,
        burst_kb: &str,
        average_kb: &str,
    ) -> Result<Value, CoreError> {
        self.rpc
            .fetch(
                "settrafficshaping",
                vec![json!(direction), json!(burst_kb), json!(average_kb)],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::rpc::mock::MockRpc;
    use crate::rpc::CoindRpc;

    #[tokio::test]
    async fn set_ban_truncates_trailing_arguments() {
        let rpc = MockRpc::new();
        let network = rpc.network();
        network.set_ban("10.0.0.1", "add", None, true).await.unwrap();
        network
            .set_ban("10.0.0.1", "add", Some(3600), false)
            .await
            .unwrap();
        network
            .set_ban("10.0.0.1", "add", Some(1_700_000_000), true)
            .await
            .unwrap();

        let params: Vec<Vec<Value>> = rpc.calls().into_iter().map(|(_, p)| p).collect();
        assert_eq!(params[0], vec![json!("10.0.0.1"), json!("add")]);
        assert_eq!(
            params[1],
            vec![json!("10.0.0.1"), json!("add"), json!(3600)]
        );
        assert_eq!(
            params[2],
            vec![
                json!("10.0.0.1"),
                json!("add"),
                json!(1_700_000_000),
                json!(true)
            ]
        );
    }

    #[tokio::test]
    async fn peer_info_filter_is_optional() {
        let rpc = MockRpc::new();
        rpc.network().get_peer_info(None).await.unwrap();
        rpc.network().get_peer_info(Some("1.2.3.4")).await.unwrap();
        let calls = rpc.calls();
        assert!(calls[0].1.is_empty());
        assert_eq!(calls[1].1, vec![json!("1.2.3.4")]);
    }

    #[tokio::test]
    async fn added_node_info_appends_node() {
        let rpc = MockRpc::new();
        rpc.network().get_added_node_info(true, None).await.unwrap();
        rpc.network()
            .get_added_node_info(false, Some("peer:7228"))
            .await
            .unwrap();
        let calls = rpc.calls();
        assert_eq!(calls[0].1, vec![json!(true)]);
        assert_eq!(calls[1].1, vec![json!(false), json!("peer:7228")]);
    }

    #[tokio::test]
    async fn connection_count_is_typed() {
        let rpc = MockRpc::builder()
            .with_result("getconnectioncount", json!(8))
            .build();
        assert_eq!(rpc.network().get_connection_count().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn node_error_passes_through() {
        let rpc = MockRpc::builder()
            .with_error("addnode", -23, "Node already added")
            .build();
        let err = rpc
            .network()
            .add_node("peer", "add")
            .await
            .expect_err("daemon error must surface");
        assert_eq!(err.rpc_code(), Some(-23));
        assert!(err.to_string().contains("Node already added"));
    }
}
