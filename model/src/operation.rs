use serde::{Deserialize, Serialize};

/// The lifecycle operation being applied to a resource instance. This is not stored anywhere, but
/// is useful for dispatching, logging and error messages.
#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ResourceOperation {
    Create,
    Read,
    Update,
    Delete,
}

serde_plain::derive_fromstr_from_deserialize!(ResourceOperation, |e| -> crate::Error {
    crate::Error::SerdePlain { source: e }
});
serde_plain::derive_display_from_serialize!(ResourceOperation);

#[test]
fn resource_operation_round_trips_through_strings() {
    use std::str::FromStr;
    assert_eq!(
        ResourceOperation::from_str("delete").unwrap(),
        ResourceOperation::Delete
    );
    assert_eq!(ResourceOperation::Create.to_string(), "create");
    assert!(ResourceOperation::from_str("destroy").is_err());
}
