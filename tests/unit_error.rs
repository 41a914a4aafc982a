use taskdeck::error::{exit_codes, Error, JsonError};

#[test]
fn exit_codes_map_correctly() {
    let validation = Error::MissingField("title");
    assert_eq!(validation.exit_code(), exit_codes::USER_ERROR);

    let unknown = Error::NotFound("t-123".to_string());
    assert_eq!(unknown.exit_code(), exit_codes::USER_ERROR);

    let fetch = Error::Fetch("connection refused".to_string());
    assert_eq!(fetch.exit_code(), exit_codes::OPERATION_FAILED);

    let upload = Error::Upload("503: unavailable".to_string());
    assert_eq!(upload.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn json_error_carries_code_kind_and_message() {
    let err = Error::NotFound("t-123".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::USER_ERROR);
    assert_eq!(json.kind, "user_error");
    assert!(json.message.contains("Task not found"));

    let err = Error::Fetch("connection refused".to_string());
    let json = JsonError::from(&err);
    assert_eq!(json.code, exit_codes::OPERATION_FAILED);
    assert_eq!(json.kind, "operation_failed");
}

#[test]
fn messages_name_the_failing_operation() {
    assert!(Error::Write("500: oops".to_string())
        .to_string()
        .starts_with("Write failed"));
    assert!(Error::MissingField("dueDate")
        .to_string()
        .contains("dueDate"));
}
