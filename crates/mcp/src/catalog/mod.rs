// Capability catalog: the fixed set of tools and resources this server exposes

mod resources;
mod schema;
mod tools;

pub use resources::{builtin_resources, ResourceDefinition, ResourceKind, JSON_MIME_TYPE};
pub use schema::{
    json_schema_array, json_schema_empty_object, json_schema_enum, json_schema_number,
    json_schema_object, json_schema_string,
};
pub use tools::{builtin_tools, ToolDefinition, ToolKind};

use crate::protocol::{ResourceSchema, ToolSchema};
use std::collections::HashMap;

/// Read-only lookup table for tools (by name) and resources (by URI)
///
/// Lookups are exact and case-sensitive. Listing follows insertion order.
#[derive(Debug, Clone)]
pub struct Catalog {
    tools: Vec<ToolDefinition>,
    tool_index: HashMap<String, usize>,
    resources: Vec<ResourceDefinition>,
    resource_index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from explicit entries. A repeated name or URI
    /// replaces the earlier entry in place.
    pub fn new(tools: Vec<ToolDefinition>, resources: Vec<ResourceDefinition>) -> Self {
        let mut catalog = Self {
            tools: Vec::new(),
            tool_index: HashMap::new(),
            resources: Vec::new(),
            resource_index: HashMap::new(),
        };

        for tool in tools {
            match catalog.tool_index.get(&tool.name) {
                Some(&idx) => catalog.tools[idx] = tool,
                None => {
                    catalog.tool_index.insert(tool.name.clone(), catalog.tools.len());
                    catalog.tools.push(tool);
                }
            }
        }

        for resource in resources {
            match catalog.resource_index.get(&resource.uri) {
                Some(&idx) => catalog.resources[idx] = resource,
                None => {
                    catalog
                        .resource_index
                        .insert(resource.uri.clone(), catalog.resources.len());
                    catalog.resources.push(resource);
                }
            }
        }

        catalog
    }

    /// The seven tools and six resources backed by the Bank Sheets API
    pub fn builtin() -> Self {
        Self::new(builtin_tools(), builtin_resources())
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_index.get(name).map(|&idx| &self.tools[idx])
    }

    pub fn resource(&self, uri: &str) -> Option<&ResourceDefinition> {
        self.resource_index.get(uri).map(|&idx| &self.resources[idx])
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.resources
    }

    /// Wire form of the tool table (permissions omitted)
    pub fn list_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(ToolDefinition::schema).collect()
    }

    /// Wire form of the resource table (permissions omitted)
    pub fn list_resource_schemas(&self) -> Vec<ResourceSchema> {
        self.resources.iter().map(ResourceDefinition::schema).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
