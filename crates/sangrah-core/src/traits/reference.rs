//! Stable identifier capability for reference-typed fields.

/// Anything that points at another entity and can be reduced to a stable
/// string identifier.
///
/// Version snapshots and change detection never hold live handles to the
/// referenced entity. They store and compare the value returned here.
pub trait StableId {
    /// The identifier string that survives serialization unchanged.
    fn stable_id(&self) -> String;
}

impl<T: StableId + ?Sized> StableId for &T {
    fn stable_id(&self) -> String {
        (**self).stable_id()
    }
}

impl StableId for uuid::Uuid {
    fn stable_id(&self) -> String {
        self.hyphenated().to_string()
    }
}

impl StableId for str {
    fn stable_id(&self) -> String {
        self.to_string()
    }
}

impl StableId for String {
    fn stable_id(&self) -> String {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_stable_id_is_hyphenated_lowercase() {
        let uuid = uuid::Uuid::parse_str("6F9619FF-8B86-D011-B42D-00CF4FC964FF").expect("uuid");
        assert_eq!(uuid.stable_id(), "6f9619ff-8b86-d011-b42d-00cf4fc964ff");
    }

    #[test]
    fn test_reference_forwarding() {
        let value = String::from("vendor-17");
        let by_ref: &String = &value;
        assert_eq!(by_ref.stable_id(), "vendor-17");
    }
}
