use fieldwise::{json, record, value, Record};
use rstest::rstest;

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        #[rename = "firstName"]
        first_name: String,
        #[rename = "lastName"]
        last_name: String,
        age: u32,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Employee {
        #[flatten]
        person: Person,
        employer: String,
        salary: f64,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq)]
    struct Badge {
        #[flatten]
        employee: Employee,
        number: u64 = 0,
    }
}

const HOMER: &str = r#"{"firstName":"Homer","lastName":"Simpson","age":45,"employer":"Mr. Burns","salary":60000.0}"#;

fn homer() -> Employee {
    Employee {
        person: Person {
            first_name: "Homer".to_string(),
            last_name: "Simpson".to_string(),
            age: 45,
        },
        employer: "Mr. Burns".to_string(),
        salary: 60000.0,
    }
}

#[rstest]
fn test_flattened_fields_share_the_object() {
    assert_eq!(json::write(&homer()), HOMER);
    let parsed: Employee = json::read(HOMER).unwrap();
    assert_eq!(parsed, homer());
}

#[rstest]
fn test_slots_are_contiguous() {
    assert_eq!(Employee::FIELD_COUNT, 5);
    assert_eq!(Employee::field_index("firstName"), Some(0));
    assert_eq!(Employee::field_index("age"), Some(2));
    assert_eq!(Employee::field_index("salary"), Some(4));
    assert_eq!(Employee::field_index("first_name"), None);
    assert_eq!(Badge::FIELD_COUNT, 6);
    assert_eq!(Badge::field_index("number"), Some(5));
}

#[rstest]
fn test_flattened_errors_use_the_parent_level() {
    let err = json::read::<Employee>(r#"{"firstName":"Homer","age":"old","salary":1.0}"#)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Found 3 errors:\n\
         1) Field named 'lastName' not found.\n\
         2) Failed to parse field 'age': Could not cast to unsigned int.\n\
         3) Field named 'employer' not found."
    );
}

#[rstest]
fn test_nested_flatten_round_trips() {
    let badge = Badge {
        employee: homer(),
        number: 7,
    };
    let doc = value::to_value(&badge);
    assert_eq!(doc.as_object().map(|obj| obj.len()), Some(6));
    let back: Badge = value::from_value(&doc).unwrap();
    assert_eq!(back, badge);

    let defaulted: Badge = json::read(HOMER).unwrap();
    assert_eq!(defaulted.number, 0);
}
