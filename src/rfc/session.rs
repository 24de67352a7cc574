//! RFC session capability and the HTTP gateway client behind it.
//!
//! The marshalling/extraction engine never talks to SAP directly; it sees
//! only the `RfcSession` trait, so it can be tested against fakes. The
//! concrete `GatewayClient` speaks JSON-RPC 2.0 to an RFC-to-HTTP bridge
//! running next to the application server.

use super::types::{InterfaceMetadata, JsonMap, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::utils::config::{ConnectionParams, DEFAULT_GATEWAY_TIMEOUT};
use crate::utils::error::RfcError;
use log::{debug, info};
use reqwest::blocking::Client;

/// One authenticated RFC session.
///
/// `call` invokes a named function module with prepared arguments and
/// returns the raw result map; `describe` fetches the declared interface
/// of a function module. Both are synchronous.
pub trait RfcSession {
    fn call(&mut self, function: &str, args: &JsonMap) -> Result<JsonMap, RfcError>;

    fn describe(&mut self, function: &str) -> Result<InterfaceMetadata, RfcError>;

    /// Release the session. Idempotent; also invoked on error paths.
    fn close(&mut self) {}
}

/// Blocking JSON-RPC client for an RFC gateway
pub struct GatewayClient {
    client: Client,
    gateway_url: String,
    connection: serde_json::Value,
    next_id: u64,
    closed: bool,
}

impl GatewayClient {
    /// Open a session against the gateway for the given system.
    ///
    /// The gateway listens on the SAP gateway port (33<NN>) of the
    /// application server host.
    pub fn connect(params: &ConnectionParams) -> Result<Self, RfcError> {
        let gateway_url = format!("http://{}:{}", params.ashost, params.gateway_port());

        info!(
            "Connecting to SAP system {} (sysnr: {}, client: {})",
            params.ashost, params.sysnr, params.client
        );

        let client = Client::builder()
            .timeout(DEFAULT_GATEWAY_TIMEOUT)
            .build()
            .map_err(RfcError::RequestFailed)?;

        let mut connection = serde_json::Map::new();
        connection.insert("user".to_string(), params.user.clone().into());
        connection.insert("passwd".to_string(), params.passwd.clone().into());
        connection.insert("ashost".to_string(), params.ashost.clone().into());
        connection.insert("sysnr".to_string(), params.sysnr.clone().into());
        connection.insert("client".to_string(), params.client.clone().into());
        if let Some(lang) = &params.lang {
            connection.insert("lang".to_string(), lang.clone().into());
        }
        if let Some(router) = &params.saprouter {
            connection.insert("saprouter".to_string(), router.clone().into());
        }

        Ok(Self {
            client,
            gateway_url,
            connection: serde_json::Value::Object(connection),
            next_id: 1,
            closed: false,
        })
    }

    /// POST one JSON-RPC request and decode the typed result
    fn request<T: serde::de::DeserializeOwned>(
        &mut self,
        method: &str,
        function: &str,
        args: Option<&JsonMap>,
    ) -> Result<T, RfcError> {
        let id = self.next_id;
        self.next_id += 1;

        let params = serde_json::json!({
            "connection": self.connection,
            "function": function,
            "args": args,
        });
        let request = JsonRpcRequest::new(method, params, id);

        debug!("Gateway request {} for {}", method, function);

        let response = self
            .client
            .post(&self.gateway_url)
            .json(&request)
            .send()
            .map_err(RfcError::RequestFailed)?;

        if !response.status().is_success() {
            return Err(RfcError::InvalidResponse(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().unwrap_or_default()
            )));
        }

        let rpc_response: JsonRpcResponse<T> =
            response.json().map_err(RfcError::RequestFailed)?;

        if let Some(error) = rpc_response.error {
            return Err(self.map_rpc_error(error, function));
        }

        rpc_response
            .result
            .ok_or_else(|| RfcError::InvalidResponse("Missing result field".to_string()))
    }

    /// Map a JSON-RPC error object to our error type
    fn map_rpc_error(&self, error: JsonRpcError, function: &str) -> RfcError {
        match error.code {
            // FU_NOT_FOUND and friends surface as -32601 from the bridge
            -32601 => RfcError::FunctionNotFound(function.to_string()),
            -32001 => {
                let ashost = self.connection["ashost"].as_str().unwrap_or("").to_string();
                let client = self.connection["client"].as_str().unwrap_or("").to_string();
                RfcError::LogonFailed {
                    ashost,
                    client,
                    message: error.message,
                }
            }
            -32002 => RfcError::AbapError(error.message),
            _ => RfcError::InvalidResponse(format!("{}: {}", error.code, error.message)),
        }
    }
}

impl RfcSession for GatewayClient {
    fn call(&mut self, function: &str, args: &JsonMap) -> Result<JsonMap, RfcError> {
        info!("Invoking function module '{}'", function);
        self.request("rfc.invoke", function, Some(args))
    }

    fn describe(&mut self, function: &str) -> Result<InterfaceMetadata, RfcError> {
        info!("Fetching interface description for '{}'", function);
        self.request("rfc.describe", function, None)
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            info!("SAP session closed");
        }
    }
}

impl Drop for GatewayClient {
    fn drop(&mut self) {
        self.close();
    }
}
