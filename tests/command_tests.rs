//! Command-level tests against a scripted fake session.

use pretty_assertions::assert_eq;
use rfc_invoke::commands::{execute_describe, execute_invoke, InvokeArgs};
use rfc_invoke::rfc::types::{
    Direction, InterfaceMetadata, JsonMap, ParamKind, ParameterDescriptor,
};
use rfc_invoke::rfc::RfcSession;
use rfc_invoke::utils::error::RfcError;
use serde_json::{json, Value};
use std::io::Write;

/// Scripted in-memory session: canned metadata and result, recorded calls
struct FakeSession {
    interface: InterfaceMetadata,
    result: JsonMap,
    calls: Vec<(String, JsonMap)>,
    closed: bool,
}

impl FakeSession {
    fn new(interface: InterfaceMetadata, result: JsonMap) -> Self {
        Self {
            interface,
            result,
            calls: Vec::new(),
            closed: false,
        }
    }
}

impl RfcSession for FakeSession {
    fn call(&mut self, function: &str, args: &JsonMap) -> Result<JsonMap, RfcError> {
        self.calls.push((function.to_string(), args.clone()));
        Ok(self.result.clone())
    }

    fn describe(&mut self, function: &str) -> Result<InterfaceMetadata, RfcError> {
        if function == self.interface.function {
            Ok(self.interface.clone())
        } else {
            Err(RfcError::FunctionNotFound(function.to_string()))
        }
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

fn descriptor(name: &str, direction: Direction, kind: ParamKind) -> ParameterDescriptor {
    ParameterDescriptor {
        name: name.to_string(),
        direction,
        kind,
        type_name: None,
        optional: true,
        default_value: None,
        fields: Vec::new(),
    }
}

fn sxpg_interface() -> InterfaceMetadata {
    InterfaceMetadata {
        function: "SXPG_COMMAND_LIST_GET".to_string(),
        parameters: vec![
            descriptor("COMMANDNAME", Direction::Import, ParamKind::Scalar),
            descriptor("COMMANDNAME_LIST", Direction::Tables, ParamKind::Table),
        ],
    }
}

fn sxpg_result() -> JsonMap {
    match json!({
        "COMMANDNAME_LIST": [
            {"NAME": "ENV", "TYPE": "X"},
            {"NAME": "LS", "TYPE": "Y"}
        ]
    }) {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_invoke_end_to_end_with_capture() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());

    let import = write_temp(r#"{"COMMANDNAME": "*"}"#);
    let export = write_temp(r#"{"capture": ["COMMANDNAME_LIST[NAME]"]}"#);
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("captured.json");

    let args = InvokeArgs {
        function: "SXPG_COMMAND_LIST_GET".to_string(),
        import_path: Some(import.path().to_path_buf()),
        export_path: Some(export.path().to_path_buf()),
        output_path: Some(out_path.clone()),
    };

    execute_invoke(&mut session, &args).unwrap();

    // The session saw exactly the marshalled arguments
    assert_eq!(session.calls.len(), 1);
    let (function, call_args) = &session.calls[0];
    assert_eq!(function, "SXPG_COMMAND_LIST_GET");
    assert_eq!(Value::Object(call_args.clone()), json!({"COMMANDNAME": "*"}));

    // The written document holds the captured column
    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(written, json!({"COMMANDNAME_LIST[NAME]": ["ENV", "LS"]}));
}

#[test]
fn test_invoke_without_files_captures_everything() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("all.json");

    let args = InvokeArgs {
        function: "SXPG_COMMAND_LIST_GET".to_string(),
        import_path: None,
        export_path: None,
        output_path: Some(out_path.clone()),
    };

    execute_invoke(&mut session, &args).unwrap();

    // No import file means an empty argument map
    assert_eq!(session.calls[0].1.len(), 0);

    // Capture-everything writes the full result map
    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    assert_eq!(written, Value::Object(sxpg_result()));
}

#[test]
fn test_invoke_unknown_import_parameter_fails_before_call() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());
    let import = write_temp(r#"{"BOGUS": 1}"#);

    let args = InvokeArgs {
        function: "SXPG_COMMAND_LIST_GET".to_string(),
        import_path: Some(import.path().to_path_buf()),
        export_path: None,
        output_path: None,
    };

    let err = execute_invoke(&mut session, &args).unwrap_err();
    assert!(format!("{:#}", err).contains("BOGUS"));
    // Marshalling failed, so the function module was never called
    assert!(session.calls.is_empty());
}

#[test]
fn test_invoke_rejects_malformed_capture_path() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());
    let export = write_temp(r#"{"capture": ["COMMANDNAME_LIST["]}"#);

    let args = InvokeArgs {
        function: "SXPG_COMMAND_LIST_GET".to_string(),
        import_path: None,
        export_path: Some(export.path().to_path_buf()),
        output_path: None,
    };

    assert!(execute_invoke(&mut session, &args).is_err());
}

#[test]
fn test_invoke_unknown_function_propagates() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());

    let args = InvokeArgs {
        function: "ZDOES_NOT_EXIST".to_string(),
        import_path: None,
        export_path: None,
        output_path: None,
    };

    let err = execute_invoke(&mut session, &args).unwrap_err();
    assert!(format!("{:#}", err).contains("ZDOES_NOT_EXIST"));
}

#[test]
fn test_describe_command_succeeds() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());
    execute_describe(&mut session, "SXPG_COMMAND_LIST_GET").unwrap();
}

#[test]
fn test_session_close_is_recorded() {
    let mut session = FakeSession::new(sxpg_interface(), sxpg_result());
    session.close();
    assert!(session.closed);
}

#[test]
fn test_describe_empty_interface_fails() {
    let empty = InterfaceMetadata {
        function: "Z_NO_PARAMS".to_string(),
        parameters: Vec::new(),
    };
    let mut session = FakeSession::new(empty, JsonMap::new());
    assert!(execute_describe(&mut session, "Z_NO_PARAMS").is_err());
}
