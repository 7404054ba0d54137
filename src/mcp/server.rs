use std::{path::Path, time::Instant};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::{
    cli::commands::helper::write_atomically,
    config::load_config,
    core::{RegexScanner, Scanner},
    session::{CommandId, Effect, Event},
};

use super::helpers::{json_result, open_workspace};
use super::types::{
    AnnotateFileParams, AnnotateFileResult, AnnotationItem, ConfigDto, ConfigValues,
    GetConfigParams, RewriteFileParams, RewriteFileResult, RewriteItem, SkippedItem,
};

#[derive(Clone)]
pub struct VvtransMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for VvtransMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl VvtransMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current vvtrans configuration
    #[tool(description = "Get the current vvtrans configuration and the resolved corpus path.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path)
            .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))?;

        let config_dto = ConfigDto {
            from_file: result.from_file,
            corpus_path: result
                .config
                .corpus_path(&result.root)
                .to_string_lossy()
                .to_string(),
            config: ConfigValues::from(result.config),
        };

        json_result(&config_dto)
    }

    /// Show the translation for every key reference in a file
    #[tool(
        description = "List every t(\"LMID_xxxxxxxx\") key reference in a source file together with its corpus translation."
    )]
    pub async fn annotate_file(
        &self,
        params: Parameters<AnnotateFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let workspace = open_workspace(&params.project_root_path, &params.file_path)?;

        let total_references = RegexScanner.scan_keys(workspace.document.text()).len();
        let annotations: Vec<AnnotationItem> = workspace
            .session
            .annotations()
            .iter()
            .map(AnnotationItem::from)
            .collect();

        let result = AnnotateFileResult {
            file_path: params.file_path,
            total_references,
            unresolved_count: total_references.saturating_sub(annotations.len()),
            annotations,
        };
        json_result(&result)
    }

    /// Convert literal translation calls into key-based calls
    #[tool(
        description = "Rewrite t(\"literal\") calls whose text exists in the corpus into t(\"LMID_xxxxxxxx\") /* literal */. Preview only unless apply is true."
    )]
    pub async fn rewrite_file(
        &self,
        params: Parameters<RewriteFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let apply = params.apply.unwrap_or(false);
        let mut workspace = open_workspace(&params.project_root_path, &params.file_path)?;

        let effects = workspace
            .session
            .dispatch(Event::CommandInvoked(CommandId::Rewrite), Instant::now());

        let mut result = RewriteFileResult {
            file_path: params.file_path,
            applied: false,
            rewritten_count: 0,
            skipped_count: 0,
            edits: Vec::new(),
            skipped: Vec::new(),
        };

        for effect in effects {
            match effect {
                Effect::ApplyEdit { path, plan } => {
                    result.rewritten_count = plan.edits.len();
                    result.skipped_count = plan.skipped.len();
                    result.edits = plan.edits.iter().map(RewriteItem::from).collect();
                    result.skipped = plan.skipped.iter().map(SkippedItem::from).collect();
                    if apply {
                        write_atomically(&path, &plan.apply(workspace.document.text())).map_err(
                            |e| McpError::internal_error(format!("Failed to write file: {:#}", e), None),
                        )?;
                        result.applied = true;
                    }
                }
                Effect::ShowError(message) => {
                    return Err(McpError::internal_error(message, None));
                }
                Effect::SkippedLiterals { skipped, .. } => {
                    result.skipped_count = skipped.len();
                    result.skipped = skipped.iter().map(SkippedItem::from).collect();
                }
                Effect::ShowInfo(_) | Effect::SetAnnotations { .. } => {}
            }
        }

        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for VvtransMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "vvtrans helps AI agents work with LMID-keyed translations.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration and corpus location\n\
                 2. annotate_file - See the translation behind every t(\"LMID_xxxxxxxx\") in a file\n\
                 3. rewrite_file - Convert t(\"literal\") calls into key-based calls (preview, or apply=true)\n\n\
                 Recommended Workflow:\n\
                 1. Use rewrite_file without apply to review the changes\n\
                 2. Run rewrite_file with apply=true\n\
                 3. Use annotate_file to confirm every key resolves"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = VvtransMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
