use pretty_assertions::assert_eq;
use rfc_invoke::marshal::build_call_args;
use rfc_invoke::rfc::types::{
    Direction, InterfaceMetadata, JsonMap, ParamKind, ParameterDescriptor,
};
use rfc_invoke::utils::error::MarshalError;
use serde_json::{json, Value};

fn descriptor(name: &str, direction: Direction, kind: ParamKind) -> ParameterDescriptor {
    ParameterDescriptor {
        name: name.to_string(),
        direction,
        kind,
        type_name: None,
        optional: false,
        default_value: None,
        fields: Vec::new(),
    }
}

/// RFC_READ_TABLE-shaped interface used across these tests
fn interface() -> InterfaceMetadata {
    InterfaceMetadata {
        function: "RFC_READ_TABLE".to_string(),
        parameters: vec![
            descriptor("QUERY_TABLE", Direction::Import, ParamKind::Scalar),
            descriptor("ROWCOUNT", Direction::Import, ParamKind::Scalar),
            descriptor("OPTIONS", Direction::Tables, ParamKind::Table),
            descriptor("FIELDS", Direction::Tables, ParamKind::Table),
            descriptor("DATA", Direction::Tables, ParamKind::Table),
            descriptor("OUT_COUNT", Direction::Export, ParamKind::Scalar),
            descriptor("SETTINGS", Direction::Changing, ParamKind::Scalar),
        ],
    }
}

fn as_map(value: Value) -> JsonMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

#[test]
fn test_spec_example_query_table_and_fields() {
    let doc = as_map(json!({
        "QUERY_TABLE": "USR02",
        "FIELDS": [{"FIELDNAME": "BNAME"}]
    }));

    let args = build_call_args(&doc, &interface()).unwrap();
    assert_eq!(
        Value::Object(args),
        json!({
            "QUERY_TABLE": "USR02",
            "FIELDS": [{"FIELDNAME": "BNAME"}]
        })
    );
}

#[test]
fn test_spec_example_bogus_parameter() {
    let doc = as_map(json!({"BOGUS": "x"}));
    let err = build_call_args(&doc, &interface()).unwrap_err();
    assert_eq!(err, MarshalError::UnknownParameter("BOGUS".to_string()));
}

#[test]
fn test_keys_subset_of_writable_parameters() {
    let doc = as_map(json!({
        "QUERY_TABLE": "T000",
        "ROWCOUNT": 10,
        "OPTIONS": [{"TEXT": "MANDT EQ '000'"}],
        "SETTINGS": {"FLAG": "X"}
    }));

    let iface = interface();
    let args = build_call_args(&doc, &iface).unwrap();
    let writable: Vec<&str> = iface
        .parameters
        .iter()
        .filter(|p| p.direction.is_writable())
        .map(|p| p.name.as_str())
        .collect();

    for key in args.keys() {
        assert!(
            writable.contains(&key.as_str()),
            "{} is not a writable parameter",
            key
        );
    }
}

#[test]
fn test_changing_parameter_is_writable() {
    let doc = as_map(json!({"SETTINGS": {"FLAG": "X"}}));
    let args = build_call_args(&doc, &interface()).unwrap();
    assert_eq!(args["SETTINGS"], json!({"FLAG": "X"}));
}

#[test]
fn test_export_only_rejected() {
    let doc = as_map(json!({"OUT_COUNT": 1}));
    let err = build_call_args(&doc, &interface()).unwrap_err();
    assert_eq!(err, MarshalError::NotWritable("OUT_COUNT".to_string()));
}

#[test]
fn test_table_rows_keep_order() {
    let doc = as_map(json!({
        "FIELDS": [
            {"FIELDNAME": "BNAME"},
            {"FIELDNAME": "USTYP"},
            {"FIELDNAME": "CLASS"}
        ]
    }));

    let args = build_call_args(&doc, &interface()).unwrap();
    let rows = args["FIELDS"].as_array().unwrap();
    assert_eq!(rows[0]["FIELDNAME"], "BNAME");
    assert_eq!(rows[1]["FIELDNAME"], "USTYP");
    assert_eq!(rows[2]["FIELDNAME"], "CLASS");
}

#[test]
fn test_table_value_shape_errors() {
    for bad in [json!({"DATA": 5}), json!({"DATA": "x"}), json!({"DATA": [[1]]})] {
        let err = build_call_args(&as_map(bad), &interface()).unwrap_err();
        assert_eq!(err, MarshalError::InvalidTableValue("DATA".to_string()));
    }
}
