//! Integration tests for mapping whole messages

use hl7_store::config::loader::parse_config;
use hl7_store::core::message::{render, MappingOptions, MessageMapper, OutputOptions};
use hl7_store::core::verification::record_set_checksum;
use hl7_store::domain::{MessageEnvelope, StoreError};
use serde_json::json;

const ADT_MESSAGE: &str = r#"{
    "message_id": "ADT-0001",
    "segments": [
        {"segment": "MSH", "fields": {"SendingApplication": "EPIC"}},
        {"segment": "EVN", "fields": {"RecordedDateTime": "20240115083000"}},
        {"segment": "PID", "fields": {
            "SetIdPid": "1",
            "PatientIdentifierList": "MRN123^^^HOSP^MR",
            "PatientName": "Doe^Jane",
            "DateOfBirth": "19800214",
            "AdministrativeSex": "F"
        }},
        {"segment": "PV1", "fields": {
            "SetIdPv1": "1",
            "PatientClass": "I",
            "AssignedPatientLocation": "WARD^101^A",
            "AdmitDateTime": "20240115083000"
        }},
        {"segment": "DG1", "group_id": "DIAGNOSIS", "fields": {
            "SetIdDg1": "1",
            "DiagnosisCodeDg1": "I10^Hypertension^I10",
            "DiagnosisDescription": "Hypertension"
        }},
        {"segment": "DG1", "group_id": "DIAGNOSIS", "fields": {
            "SetIdDg1": "2",
            "DiagnosisCodeDg1": "E11^Type 2 diabetes^I10"
        }},
        {"segment": "NTE", "fields": {"Comment": "admitted via ED"}}
    ]
}"#;

fn envelope() -> MessageEnvelope {
    serde_json::from_str(ADT_MESSAGE).unwrap()
}

#[test]
fn test_adt_message_maps_supported_segments() {
    let records = MessageMapper::default().map(&envelope()).unwrap();

    assert_eq!(records.message_id.as_str(), "ADT-0001");
    assert_eq!(records.summary.total_segments, 7);
    assert_eq!(records.summary.mapped_segments, 5);
    assert_eq!(records.summary.skipped_segments, 2);
    assert_eq!(records.skipped, vec!["MSH".to_string(), "EVN".to_string()]);
    assert!(records.failures.is_empty());
    assert!(records.summary.is_clean());

    let combined = records.combined();
    assert_eq!(combined.get("PID")[0]["pid_dob"], "1980-02-14 00:00:00");
    assert_eq!(combined.get("PV1").len(), 1);
    assert_eq!(combined.get("DG1").len(), 2);
    assert_eq!(combined.get("NTE")[0]["note_comment"], "admitted via ED");
    assert_eq!(records.summary.total_records, combined.len());
}

#[test]
fn test_grouped_segments_are_numbered() {
    let records = MessageMapper::default().map(&envelope()).unwrap();
    let dg1 = records.combined().get("DG1").to_vec();

    assert_eq!(dg1[0]["msg_group_id"], "DIAGNOSIS");
    assert_eq!(dg1[0]["msg_group_entry"], 1);
    assert_eq!(dg1[1]["msg_group_entry"], 2);
    assert_eq!(dg1[1]["msg_sid"], "2");

    let pid = records.combined().get("PID").to_vec();
    assert_eq!(pid[0]["msg_group_id"], "1");
    assert_eq!(pid[0]["msg_group_entry"], 1);
}

#[test]
fn test_message_checksum_is_stable() {
    let mapper = MessageMapper::default();
    let first = mapper.map(&envelope()).unwrap();
    let second = mapper.map(&envelope()).unwrap();

    let checksum = first.checksum().unwrap();
    assert_eq!(checksum, second.checksum().unwrap());
    assert_eq!(checksum, record_set_checksum(&second.combined()).unwrap());
}

#[test]
fn test_options_from_configuration_file() {
    let config = parse_config(
        r#"
[mapping]
default_group_id = "VISIT"
number_group_entries = false
skip_unsupported_segments = false
"#,
    )
    .unwrap();
    let options = MappingOptions::try_from(&config.mapping).unwrap();
    let mapper = MessageMapper::new(options);

    assert!(matches!(
        mapper.map(&envelope()),
        Err(StoreError::UnsupportedSegment(kind)) if kind == "MSH"
    ));

    let supported: MessageEnvelope = serde_json::from_value(json!({
        "message_id": "ADT-0002",
        "segments": [
            {"segment": "NTE", "fields": {"Comment": "a"}},
            {"segment": "NTE", "fields": {"Comment": "b"}}
        ]
    }))
    .unwrap();
    let records = mapper.map(&supported).unwrap();
    for row in records.combined().get("NTE") {
        assert_eq!(row["msg_group_id"], "VISIT");
        assert_eq!(row["msg_group_entry"], 1);
    }
}

#[test]
fn test_rendered_document_layouts() {
    let records = MessageMapper::default().map(&envelope()).unwrap();

    let per_segment = render(&records, &OutputOptions::default()).unwrap();
    assert_eq!(per_segment["segments"].as_array().unwrap().len(), 5);
    assert_eq!(per_segment["segments"][2]["segment"], "DG1");
    assert_eq!(per_segment["summary"]["mapped_segments"], 5);
    assert_eq!(per_segment["checksum"], json!(records.checksum().unwrap()));

    let combined = render(
        &records,
        &OutputOptions {
            combined: true,
            ..OutputOptions::default()
        },
    )
    .unwrap();
    assert_eq!(combined["records"]["DG1"].as_array().unwrap().len(), 2);
    assert_eq!(combined["failures"], json!([]));
}

#[test]
fn test_segment_failures_do_not_abort_the_message() {
    let message: MessageEnvelope = serde_json::from_value(json!({
        "message_id": "ADT-0003",
        "segments": [
            {"segment": "PV1", "fields": {"PatientClass": "O"}},
            {"segment": "PID", "fields": {
                "SetIdPid": "1",
                "PatientTelecommunicationInformation": ["555-0100", true]
            }}
        ]
    }))
    .unwrap();

    let records = MessageMapper::default().map(&message).unwrap();
    assert_eq!(records.failures.len(), 1);
    assert_eq!(records.failures[0].segment, "PV1");
    assert_eq!(records.summary.mapped_segments, 1);
    assert_eq!(records.combined().get("XTN").len(), 1);
    assert!(!records.summary.is_clean());
}
