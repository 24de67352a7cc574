//! RFC session boundary: interface metadata types and the gateway client.

pub mod session;
pub mod types;

pub use session::{GatewayClient, RfcSession};
pub use types::{
    Direction, FieldDescriptor, InterfaceMetadata, JsonMap, ParamKind, ParameterDescriptor,
};
