use form_sheets_backend::credentials::ServiceAccountKey;
use form_sheets_backend::sheets::{
    SheetSchema, SheetWriter, SheetsClient, SheetsError, SpreadsheetService,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::sync::Arc;

const FIXTURE: &str = include_str!("fixtures/service_account.json");

const TOKEN_BODY: &str = r#"{"access_token":"ya29.test-token","expires_in":3599,"token_type":"Bearer"}"#;

fn client_for(server: &ServerGuard) -> SheetsClient {
    let mut key = ServiceAccountKey::from_json(FIXTURE).unwrap();
    key.token_uri = format!("{}/token", server.url());
    SheetsClient::new(key, &format!("{}/v4", server.url())).unwrap()
}

async fn mock_token(server: &mut ServerGuard, hits: usize) -> mockito::Mock {
    server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded(
                "grant_type".into(),
                "urn:ietf:params:oauth:grant-type:jwt-bearer".into(),
            ),
            Matcher::Regex("assertion=[A-Za-z0-9_-]+\\.[A-Za-z0-9_-]+\\.[A-Za-z0-9_-]+".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKEN_BODY)
        .expect(hits)
        .create_async()
        .await
}

fn jane_row() -> Vec<String> {
    ["Jane Doe", "5551234567", "10000", "", "2025-08-01T10:30:00.000Z"]
        .map(String::from)
        .to_vec()
}

#[tokio::test]
async fn append_posts_raw_values_with_bearer_token() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server, 1).await;
    let append = server
        .mock(
            "POST",
            Matcher::Regex("^/v4/spreadsheets/sheet-id/values/Sheet1!A:E:append".into()),
        )
        .match_query(Matcher::UrlEncoded("valueInputOption".into(), "RAW".into()))
        .match_header("authorization", "Bearer ya29.test-token")
        .match_body(Matcher::PartialJson(json!({ "values": [jane_row()] })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "spreadsheetId": "sheet-id",
                "tableRange": "Sheet1!A1:E3",
                "updates": { "updatedRange": "Sheet1!A4:E4", "updatedRows": 1 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let response = client_for(&server)
        .append_values("sheet-id", "Sheet1!A:E", vec![jane_row()])
        .await
        .unwrap();

    assert_eq!(response.updated_range(), Some("Sheet1!A4:E4"));
    token.assert_async().await;
    append.assert_async().await;
}

#[tokio::test]
async fn header_update_puts_the_schema_row() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, 1).await;
    let update = server
        .mock(
            "PUT",
            Matcher::Regex("^/v4/spreadsheets/sheet-id/values/Sheet1!A1:E1".into()),
        )
        .match_query(Matcher::UrlEncoded("valueInputOption".into(), "RAW".into()))
        .match_body(Matcher::PartialJson(json!({
            "values": [["Full Name", "Phone Number", "Total Loan Amount", "Message", "Submitted At"]]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"spreadsheetId":"sheet-id","updatedRange":"Sheet1!A1:E1","updatedCells":5}"#)
        .expect(2)
        .create_async()
        .await;

    let writer: Arc<dyn SheetWriter> = Arc::new(client_for(&server));
    let service = SpreadsheetService::new(Some(writer), SheetSchema::default(), "Sheet1");

    service.init_headers("sheet-id").await.unwrap();
    service.init_headers("sheet-id").await.unwrap();

    update.assert_async().await;
}

#[tokio::test]
async fn access_token_is_reused_across_calls() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server, 1).await;
    let append = server
        .mock("POST", Matcher::Regex("^/v4/spreadsheets/sheet-id/values/".into()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .expect(3)
        .create_async()
        .await;

    let client = client_for(&server);
    for _ in 0..3 {
        client
            .append_values("sheet-id", "Sheet1!A:E", vec![jane_row()])
            .await
            .unwrap();
    }

    token.assert_async().await;
    append.assert_async().await;
}

#[tokio::test]
async fn api_errors_carry_status_and_body() {
    let mut server = Server::new_async().await;
    let _token = mock_token(&mut server, 1).await;
    let _append = server
        .mock("POST", Matcher::Regex("^/v4/spreadsheets/".into()))
        .match_query(Matcher::Any)
        .with_status(403)
        .with_body(r#"{"error":{"code":403,"status":"PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .append_values("sheet-id", "Sheet1!A:E", vec![jane_row()])
        .await
        .unwrap_err();

    match err {
        SheetsError::Api { status, body } => {
            assert_eq!(status, 403);
            assert!(body.contains("PERMISSION_DENIED"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rejected_token_request_skips_the_write() {
    let mut server = Server::new_async().await;
    let _token = server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(r#"{"error":"invalid_grant"}"#)
        .create_async()
        .await;
    let append = server
        .mock("POST", Matcher::Regex("^/v4/spreadsheets/".into()))
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .append_values("sheet-id", "Sheet1!A:E", vec![jane_row()])
        .await
        .unwrap_err();

    assert!(matches!(err, SheetsError::TokenRejected { status: 400, .. }));
    append.assert_async().await;
}
