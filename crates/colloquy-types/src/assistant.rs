use serde::{Deserialize, Serialize};

/// An assistant as mirrored from the remote service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub instructions: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Capability flags, stored by the service as a serialized JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_config: Option<String>,
}

impl Assistant {
    /// Parse the serialized tool configuration. Absent or malformed input
    /// yields the default (all capabilities off), never an error.
    pub fn tools(&self) -> ToolConfig {
        self.tool_config
            .as_deref()
            .map(ToolConfig::from_json)
            .unwrap_or_default()
    }
}

/// Optional capability flags for an assistant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub file_search: bool,

    #[serde(default)]
    pub code_interpreter: bool,
}

impl ToolConfig {
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    pub fn to_json(self) -> String {
        // Two booleans cannot fail to serialize
        serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Payload for creating or updating an assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantDraft {
    pub name: String,

    #[serde(default)]
    pub instructions: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default)]
    pub tool_config: ToolConfig,
}

impl AssistantDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: String::new(),
            model: None,
            tool_config: ToolConfig::default(),
        }
    }

    pub fn instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn tool_config(mut self, tool_config: ToolConfig) -> Self {
        self.tool_config = tool_config;
        self
    }
}

/// Account plan, gating how many assistants a user may create
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Pro,
    Enterprise,
}

impl Plan {
    pub fn max_assistants(self) -> usize {
        match self {
            Self::Free => 1,
            Self::Starter => 3,
            Self::Pro => 5,
            Self::Enterprise => 20,
        }
    }
}
