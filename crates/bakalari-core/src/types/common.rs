//! Reference entities shared by most responses

use serde::{Deserialize, Serialize};

use crate::parser::de;

/// Information about an API version deployed on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct ApiInformation {
    /// API version, e.g. "3.13.0"
    pub api_version: String,
    /// Version of the Bakaláři application
    pub application_version: String,
    /// Base URL of this API version
    pub base_url: String,
}

/// A school class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Class {
    pub id: String,
    #[serde(rename(deserialize = "Abbrev"), default, deserialize_with = "de::non_empty")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub name: Option<String>,
}

/// A timetable cycle (e.g. odd/even week)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Cycle {
    pub id: String,
    #[serde(rename(deserialize = "Abbrev"), default, deserialize_with = "de::non_empty")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub name: Option<String>,
}

/// A group of students, usually part of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Group {
    pub id: String,
    #[serde(rename(deserialize = "Abbrev"), default, deserialize_with = "de::non_empty")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub name: Option<String>,
    /// Owning class; only resolved in timetable responses
    #[serde(skip_deserializing)]
    pub class: Option<Class>,
}

/// A classroom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Room {
    pub id: String,
    #[serde(rename(deserialize = "Abbrev"), default, deserialize_with = "de::non_empty")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub name: Option<String>,
}

/// A student attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Student {
    pub id: String,
    #[serde(rename(deserialize = "Abbrev"), default, deserialize_with = "de::non_empty")]
    pub abbreviation: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub name: Option<String>,
}

/// A teacher
///
/// Contact fields are only filled for teachers returned by
/// `Client::get_subjects`; other responses carry id, name and abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub abbreviation: Option<String>,
    pub email: Option<String>,
    pub web: Option<String>,
    pub school_phone: Option<String>,
    pub home_phone: Option<String>,
    pub mobile_phone: Option<String>,
}

impl Teacher {
    /// A teacher with only id, name and abbreviation known.
    pub fn new(id: String, name: String, abbreviation: Option<String>) -> Self {
        Self {
            id,
            name,
            abbreviation,
            email: None,
            web: None,
            school_phone: None,
            home_phone: None,
            mobile_phone: None,
        }
    }
}

/// The logged-in account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct User {
    #[serde(rename(deserialize = "UserUID"))]
    pub id: String,
    #[serde(rename(deserialize = "FullName"))]
    pub name: String,
    pub class: Class,
    #[serde(rename(deserialize = "SchoolOrganizationName"))]
    pub school_name: String,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub school_type: Option<String>,
    /// Account kind, e.g. "student" or "parents"
    pub user_type: String,
    pub user_type_text: String,
    pub study_year: u32,
}

/// A GDPR commissioner of the school
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "PascalCase"))]
pub struct Commissioner {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub web: Option<String>,
    #[serde(default, deserialize_with = "de::non_empty")]
    pub data_box: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize() {
        let json = r#"{
            "UserUID": "ABC123",
            "Class": {"Id": "ZX", "Abbrev": "4.A", "Name": "4.A"},
            "FullName": "Jan Novák, 4.A",
            "SchoolOrganizationName": "Gymnázium",
            "SchoolType": null,
            "UserType": "student",
            "UserTypeText": "žák",
            "StudyYear": 4,
            "EnabledModules": []
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "ABC123");
        assert_eq!(user.name, "Jan Novák, 4.A");
        assert_eq!(user.class.abbreviation.as_deref(), Some("4.A"));
        assert_eq!(user.school_type, None);
        assert_eq!(user.study_year, 4);
    }

    #[test]
    fn test_user_missing_field() {
        let json = r#"{"UserUID": "ABC123", "FullName": "Jan"}"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    #[test]
    fn test_user_serializes_snake_case() {
        let user = User {
            id: "1".to_string(),
            name: "Jan".to_string(),
            class: Class {
                id: "C".to_string(),
                abbreviation: None,
                name: None,
            },
            school_name: "ZŠ".to_string(),
            school_type: None,
            user_type: "student".to_string(),
            user_type_text: "žák".to_string(),
            study_year: 1,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["school_name"], "ZŠ");
        assert_eq!(json["study_year"], 1);
    }

    #[test]
    fn test_commissioner_empty_contacts() {
        let json = r#"{"Id":"1","Name":"Mgr. Dvořák","Mobile":"","Phone":null,"Email":"gdpr@skola.cz","Web":"","DataBox":"abc123"}"#;
        let commissioner: Commissioner = serde_json::from_str(json).unwrap();
        assert_eq!(commissioner.mobile, None);
        assert_eq!(commissioner.phone, None);
        assert_eq!(commissioner.email.as_deref(), Some("gdpr@skola.cz"));
        assert_eq!(commissioner.data_box.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_group_class_is_not_read_from_wire() {
        let json = r#"{"Id":"G1","Abbrev":"AJ1","Name":"Angličtina 1","ClassId":"ZX"}"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.abbreviation.as_deref(), Some("AJ1"));
        assert_eq!(group.class, None);
    }

    #[test]
    fn test_api_information() {
        let json = r#"{"ApiVersion":"3.13.0","ApplicationVersion":"1.45.1017.1","BaseUrl":"api/3"}"#;
        let info: ApiInformation = serde_json::from_str(json).unwrap();
        assert_eq!(info.api_version, "3.13.0");
        assert_eq!(info.base_url, "api/3");
    }
}
