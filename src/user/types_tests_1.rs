use super::*;

fn make_user() -> User {
    User {
        first_name: "Mona".to_string(),
        last_name: "Adel".to_string(),
        email: "mona@example.com".to_string(),
        password: "secret1".to_string(),
        mobile_phone: "01012345678".to_string(),
        active: true,
    }
}

#[test]
fn test_user_serialization_snake_case() {
    let json = serde_json::to_string(&make_user()).expect("Should serialize");
    assert!(json.contains("\"first_name\""));
    assert!(json.contains("\"mobile_phone\""));
    assert!(json.contains("\"active\":true"));
    assert!(!json.contains("firstName"));
}

#[test]
fn test_user_active_defaults_to_true() {
    let json = r#"{
        "first_name": "Omar",
        "last_name": "Said",
        "email": "omar@example.com",
        "password": "hunter22",
        "mobile_phone": "01112345678"
    }"#;
    let user: User = serde_json::from_str(json).expect("Should deserialize without active");
    assert!(user.active);
}

#[test]
fn test_user_inactive_flag_preserved() {
    let mut user = make_user();
    user.active = false;
    let json = serde_json::to_string(&user).expect("Should serialize");
    let back: User = serde_json::from_str(&json).expect("Should deserialize");
    assert!(!back.active);
    assert_eq!(back, user);
}

#[test]
fn test_email_taken_message() {
    let err = UserError::EmailTaken("mona@example.com".to_string());
    assert!(format!("{err}").contains("already registered"));
}
