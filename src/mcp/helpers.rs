//! Helper functions for MCP server operations.

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::{
    config::load_config,
    core::Document,
    session::{Effect, Session},
};

/// An enabled session with the requested document open.
pub struct ToolWorkspace {
    pub session: Session,
    pub document: Document,
}

/// Load config and corpus for `project_root` and open `file_path`.
pub fn open_workspace(project_root: &str, file_path: &str) -> Result<ToolWorkspace, McpError> {
    let root = Path::new(project_root);
    let loaded = load_config(root)
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;
    if !loaded.config.enable {
        return Err(McpError::invalid_request(
            "vvtrans is disabled by the project configuration",
            None,
        ));
    }

    let path = resolve(root, file_path);
    let document = Document::open_supported(&path)
        .map_err(|e| McpError::invalid_params(format!("Failed to open {}: {}", file_path, e), None))?;

    let (mut session, effects) = Session::init(loaded.config, &loaded.root);
    if let Some(Effect::ShowError(message)) = effects
        .into_iter()
        .find(|effect| matches!(effect, Effect::ShowError(_)))
    {
        return Err(McpError::internal_error(message, None));
    }

    session.open(document.clone(), Instant::now());
    Ok(ToolWorkspace { session, document })
}

fn resolve(root: &Path, file_path: &str) -> PathBuf {
    let path = Path::new(file_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Serialize a tool result as pretty JSON text content.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}
