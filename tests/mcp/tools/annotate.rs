use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use vvtrans::mcp::{VvtransMcpServer, types::AnnotateFileParams};

use crate::{McpTestFixture, extract_tool_result_json};

fn params(fixture: &McpTestFixture, file: &str) -> Parameters<AnnotateFileParams> {
    Parameters(AnnotateFileParams {
        project_root_path: fixture.root(),
        file_path: file.to_string(),
    })
}

#[tokio::test]
async fn test_annotate_file_lists_translations() {
    let fixture = McpTestFixture::with_corpus(&json!({
        "LMID_00000001": "你好",
        "LMID_00000002": "再见"
    }))
    .unwrap();
    fixture
        .write_file(
            "src/app.tsx",
            "const a = t(\"LMID_00000001\");\nconst b = t('LMID_00000002'); t('LMID_00000003');\n",
        )
        .unwrap();

    let server = VvtransMcpServer::new();
    let result = server
        .annotate_file(params(&fixture, "src/app.tsx"))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["filePath"], "src/app.tsx");
    assert_eq!(json_result["totalReferences"], 3);
    assert_eq!(json_result["unresolvedCount"], 1);

    let annotations = json_result["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0]["key"], "LMID_00000001");
    assert_eq!(annotations[0]["line"], 1);
    assert_eq!(annotations[0]["column"], 11);
    assert_eq!(annotations[0]["text"], "你好");
    assert_eq!(annotations[1]["key"], "LMID_00000002");
    assert_eq!(annotations[1]["line"], 2);
    assert_eq!(annotations[1]["text"], "再见");
}

#[tokio::test]
async fn test_annotate_file_absolute_path() {
    let fixture = McpTestFixture::with_corpus(&json!({ "LMID_00000001": "Hello" })).unwrap();
    fixture.write_file("index.html", "<p>{t('LMID_00000001')}</p>").unwrap();
    let absolute = fixture.root_path().join("index.html");

    let server = VvtransMcpServer::new();
    let result = server
        .annotate_file(params(&fixture, &absolute.to_string_lossy()))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);
    assert_eq!(json_result["annotations"][0]["text"], "Hello");
}

#[tokio::test]
async fn test_annotate_file_missing_corpus() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_file("app.ts", "t('LMID_00000001')").unwrap();

    let server = VvtransMcpServer::new();
    let result = server.annotate_file(params(&fixture, "app.ts")).await;
    let err = result.unwrap_err();
    assert!(err.message.contains("Failed to read corpus file"));
}

#[tokio::test]
async fn test_annotate_file_unsupported() {
    let fixture = McpTestFixture::with_corpus(&json!({})).unwrap();
    fixture.write_file("styles.css", "t('LMID_00000001')").unwrap();

    let server = VvtransMcpServer::new();
    let result = server.annotate_file(params(&fixture, "styles.css")).await;
    let err = result.unwrap_err();
    assert!(err.message.contains("Unsupported file type"));
}

#[tokio::test]
async fn test_annotate_file_disabled() {
    let fixture = McpTestFixture::with_corpus(&json!({ "LMID_00000001": "Hello" })).unwrap();
    fixture.write_config(&json!({ "enable": false })).unwrap();
    fixture.write_file("app.ts", "t('LMID_00000001')").unwrap();

    let server = VvtransMcpServer::new();
    let result = server.annotate_file(params(&fixture, "app.ts")).await;
    assert!(result.is_err());
}
