//! Declarative node descriptor handed to the host.

use serde::Serialize;

use crate::utils::constants::{PARAM_APP_ID, PARAM_APP_SECRET};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub group: Vec<String>,
    pub version: u32,
    pub description: String,
    pub defaults: NodeDefaults,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    /// `Some(vec![])` declares that no credential object is required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Vec<String>>,
    pub properties: Vec<NodeProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDefaults {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeProperty {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub default: String,
    pub placeholder: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
}

impl NodeDescription {
    pub fn lark_authentication() -> Self {
        Self {
            display_name: "Lark Authentication".into(),
            name: "larkAuthentication".into(),
            icon: None,
            group: vec!["transform".into()],
            version: 1,
            description: "Get Custom app Tenant access token from Lark API".into(),
            defaults: NodeDefaults {
                name: "Lark Authentication".into(),
            },
            inputs: vec!["main".into()],
            outputs: vec!["main".into()],
            credentials: None,
            properties: vec![
                NodeProperty::string(
                    "App ID",
                    PARAM_APP_ID,
                    "Enter your App ID",
                    "The Custom App ID for authentication (Example: cli_slkdjalasdkjasd)",
                ),
                NodeProperty::string(
                    "App Secret",
                    PARAM_APP_SECRET,
                    "Enter your App Secret",
                    "The Custom App Secret for authentication (Example: dskLLdkasdjlasdKK)",
                ),
            ],
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_credentials(mut self, credentials: Vec<String>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn property(&self, name: &str) -> Option<&NodeProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl NodeProperty {
    fn string(display_name: &str, name: &str, placeholder: &str, description: &str) -> Self {
        Self {
            display_name: display_name.into(),
            name: name.into(),
            property_type: PropertyType::String,
            default: String::new(),
            placeholder: placeholder.into(),
            description: description.into(),
        }
    }
}
