use serde::{Deserialize, Serialize};

/// User record as stored by the identity service or the key-value store.
///
/// Every field defaults so partial records echoed by the identity service
/// still decode.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub user_id: String,  // "<app>-<base36 timestamp>"
    pub email: String,
    pub name: String,
    pub age: u32,
    pub app: String,
}

/// Validated signup input.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub age: u32,
}

impl NewUser {
    pub fn into_record(self, user_id: String, app: &str) -> UserRecord {
        UserRecord {
            user_id,
            email: self.email,
            name: self.name,
            age: self.age,
            app: app.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_camel_case() {
        let record = UserRecord {
            user_id: "rivas-abc".into(),
            email: "a@b.com".into(),
            name: "A".into(),
            age: 30,
            app: "rivas".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "rivas-abc");
        assert_eq!(json["app"], "rivas");
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_partial_record_decodes() {
        let record: UserRecord = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(record.email, "a@b.com");
        assert_eq!(record.age, 0);
        assert!(record.user_id.is_empty());
    }
}
