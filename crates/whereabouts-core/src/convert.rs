// ── Wire → domain conversion ──

use whereabouts_api::types::UserRecord;

use crate::model::Person;

/// Convert one wire record into the domain [`Person`].
///
/// Infallible: every field either maps directly or is optional on both
/// sides. The `location` tree moves over untouched for the flattener.
pub fn person_from_wire(record: UserRecord) -> Person {
    Person {
        id: record.login.uuid,
        username: record.login.username,
        title: record.name.title,
        first_name: record.name.first,
        last_name: record.name.last,
        email: record.email,
        gender: record.gender,
        nationality: record.nat,
        born: record.dob.date,
        age: record.dob.age,
        registered: record.registered.date,
        phone: record.phone,
        cell: record.cell,
        location: record.location,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn wire_record() -> UserRecord {
        serde_json::from_value(serde_json::json!({
            "gender": "male",
            "name": { "title": "Mr", "first": "Liam", "last": "Walker" },
            "location": { "city": "Hamilton", "country": "New Zealand" },
            "email": "liam.walker@example.com",
            "login": {
                "uuid": "9b5f30d1-07a2-4b82-9f47-1f1c0e0a6a31",
                "username": "smallkoala903"
            },
            "dob": { "date": "1990-08-21T14:04:00.000Z", "age": 35 },
            "registered": { "date": "2016-01-05T09:00:00.000Z", "age": 10 },
            "phone": "(021)-555-0153",
            "nat": "NZ"
        }))
        .unwrap()
    }

    #[test]
    fn maps_identity_fields() {
        let person = person_from_wire(wire_record());

        assert_eq!(person.username, "smallkoala903");
        assert_eq!(person.display_name(), "Liam Walker");
        assert_eq!(person.nationality.as_deref(), Some("NZ"));
        assert_eq!(person.age, 35);
        assert_eq!(person.cell, None);
    }

    #[test]
    fn location_tree_is_carried_unmodified() {
        let person = person_from_wire(wire_record());
        let keys: Vec<&str> = person.location.keys().map(String::as_str).collect();
        assert_eq!(keys, ["city", "country"]);
    }
}
