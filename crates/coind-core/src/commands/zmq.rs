use serde_json::Value;

use crate::error::CoreError;
use crate::rpc::CoindRpc;

pub struct Zmq<'a> {
    rpc: &'a dyn CoindRpc,
}

impl<'a> Zmq<'a> {
    pub fn new(rpc: &'a dyn CoindRpc) -> Self {
        Self { rpc }
    }

    /// Active ZMQ notification endpoints.
    pub async fn get_zmq_notifications(&self) -> Result<Value, CoreError> {
        self.rpc.fetch("getzmqnotifications", Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::rpc::mock::MockRpc;
    use crate::rpc::CoindRpc;

    #[tokio::test]
    async fn forwards_without_params() {
        let rpc = MockRpc::builder()
            .with_result("getzmqnotifications", json!([]))
            .build();
        assert_eq!(rpc.zmq().get_zmq_notifications().await.unwrap(), json!([]));
        assert_eq!(rpc.only_call(), ("getzmqnotifications".to_owned(), Vec::new()));
    }
}
