//! MCP tool and resource definitions

use serde_json::json;

use super::protocol::{ResourceDefinition, ToolDefinition};

pub const ADD_OR_UPDATE_FEATURE: &str = "add_or_update_feature";
pub const DELETE_FEATURE: &str = "delete_feature";
pub const ADD_OR_UPDATE_TERM: &str = "add_or_update_term";
pub const DELETE_TERM: &str = "delete_term";
pub const GET_DETAILS: &str = "get_details";

pub const FEATURES_URI: &str = "design://features/list";
pub const TERMS_URI: &str = "design://terms/list";
pub const STATISTICS_URI: &str = "design://statistics";

/// All tool definitions
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        ADD_OR_UPDATE_FEATURE,
        "Add a feature definition, or replace the existing one with the same name. The whole record is validated before it is stored.",
        r#"{
            "type": "object",
            "properties": {
                "feature": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "pattern": "^[a-zA-Z][a-zA-Z0-9_]*$", "description": "Unique feature name"},
                        "purpose": {"type": "string", "description": "What the feature is for"}
                    },
                    "required": ["name", "purpose"]
                },
                "userStories": {"type": "array", "items": {"type": "string"}},
                "inputs": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string"},
                            "dataTypeDescription": {"type": "string"},
                            "constraints": {"type": "array", "items": {"type": "string"}},
                            "purpose": {"type": "string"}
                        },
                        "required": ["name", "dataTypeDescription", "constraints", "purpose"]
                    }
                },
                "outputs": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "condition": {"type": "string"},
                            "dataDescription": {"type": "string"},
                            "structureHint": {"type": "object"}
                        },
                        "required": ["condition", "dataDescription"]
                    }
                },
                "coreLogicSteps": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "stepNumber": {"type": "integer", "minimum": 1, "description": "Unique within the feature"},
                            "description": {"type": "string"},
                            "inputs": {"type": "array", "items": {"type": "string"}},
                            "output": {"type": "string"}
                        },
                        "required": ["stepNumber", "description", "inputs", "output"]
                    }
                },
                "errorHandling": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "errorCondition": {"type": "string"},
                            "detectionPoint": {"type": "string"},
                            "handlingStrategyDescription": {"type": "string"},
                            "resultingOutputCondition": {"type": "string"}
                        },
                        "required": ["errorCondition", "detectionPoint", "handlingStrategyDescription", "resultingOutputCondition"]
                    }
                },
                "nonFunctionalRequirements": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "requirement": {"type": "string"},
                            "considerationsForLogic": {"type": "string"}
                        },
                        "required": ["requirement", "considerationsForLogic"]
                    }
                },
                "documentationNotes": {"type": "array", "items": {"type": "string"}}
            },
            "required": ["feature", "userStories", "inputs", "outputs", "coreLogicSteps", "errorHandling", "nonFunctionalRequirements", "documentationNotes"]
        }"#,
    ),
    (
        DELETE_FEATURE,
        "Delete a feature definition by name",
        r#"{
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Feature name"}
            },
            "required": ["name"]
        }"#,
    ),
    (
        ADD_OR_UPDATE_TERM,
        "Add a ubiquitous-language term, or replace the existing one with the same name",
        r#"{
            "type": "object",
            "properties": {
                "term": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string", "description": "Letters, digits, spaces, hyphens, underscores"},
                        "definition": {"type": "string"},
                        "aliases": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["name", "definition", "aliases"]
                },
                "context": {
                    "type": "object",
                    "properties": {
                        "boundedContext": {"type": "string"},
                        "scope": {"type": "string"}
                    },
                    "required": ["boundedContext", "scope"]
                },
                "details": {
                    "type": "object",
                    "properties": {
                        "category": {"type": "string"},
                        "examples": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "scenario": {"type": "string"},
                                    "description": {"type": "string"}
                                },
                                "required": ["scenario", "description"]
                            }
                        },
                        "ambiguitiesAndBoundaries": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["category", "examples", "ambiguitiesAndBoundaries"]
                },
                "relationships": {
                    "type": "object",
                    "properties": {
                        "relatedTerms": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "termName": {"type": "string"},
                                    "relationshipType": {"type": "string"}
                                },
                                "required": ["termName", "relationshipType"]
                            }
                        },
                        "associatedFunctions": {"type": "array", "items": {"type": "string"}, "description": "Names of related features"}
                    },
                    "required": ["relatedTerms", "associatedFunctions"]
                },
                "implementation": {
                    "type": "object",
                    "properties": {
                        "codeMapping": {"type": "string"},
                        "dataStructureHint": {"type": "object"},
                        "constraints": {"type": "array", "items": {"type": "string"}}
                    },
                    "required": ["codeMapping", "constraints"]
                }
            },
            "required": ["term", "context", "details", "relationships", "implementation"]
        }"#,
    ),
    (
        DELETE_TERM,
        "Delete a term by name",
        r#"{
            "type": "object",
            "properties": {
                "name": {"type": "string", "description": "Term name"}
            },
            "required": ["name"]
        }"#,
    ),
    (
        GET_DETAILS,
        "Fetch full feature and term records by name. Names that do not exist are listed under notFound; an omitted list is not looked up at all.",
        r#"{
            "type": "object",
            "properties": {
                "featureNames": {"type": "array", "items": {"type": "string"}},
                "termNames": {"type": "array", "items": {"type": "string"}}
            }
        }"#,
    ),
];

/// All resource definitions
pub const RESOURCE_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        FEATURES_URI,
        "Feature index",
        "Name and purpose of every feature",
    ),
    (
        TERMS_URI,
        "Term index",
        "Name, definition and category of every term",
    ),
    (
        STATISTICS_URI,
        "Statistics",
        "Feature and term counts",
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}

pub fn get_resource_definitions() -> Vec<ResourceDefinition> {
    RESOURCE_DEFINITIONS
        .iter()
        .map(|(uri, name, description)| ResourceDefinition {
            uri: uri.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            mime_type: "application/json".to_string(),
        })
        .collect()
}
