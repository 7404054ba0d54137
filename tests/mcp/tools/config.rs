use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use vvtrans::mcp::{VvtransMcpServer, types::GetConfigParams};

use crate::{McpTestFixture, extract_tool_result_json};

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = VvtransMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["enable"], true);
    assert_eq!(json_result["config"]["corpusDirectory"], ".builtinLanguage/zh.json");
    assert_eq!(json_result["config"]["debounceMs"], 500);
    let expected = fixture.root_path().join(".builtinLanguage/zh.json");
    assert_eq!(json_result["corpusPath"], expected.to_string_lossy().as_ref());
}

#[tokio::test]
async fn test_get_config_from_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "corpusDirectory": "i18n/zh.json",
            "transStyle": { "color": "#00FF00" },
            "debounceMs": 250
        }))
        .unwrap();

    let server = VvtransMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["corpusDirectory"], "i18n/zh.json");
    assert_eq!(json_result["config"]["transStyle"]["color"], "#00FF00");
    assert_eq!(json_result["config"]["debounceMs"], 250);
}

#[tokio::test]
async fn test_get_config_invalid_file() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_config(&json!({ "debounceMs": 0 })).unwrap();

    let server = VvtransMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await;
    assert!(result.is_err());
}
