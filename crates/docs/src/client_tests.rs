//! Wiremock tests for the Drive listing and Docs fetch endpoints.

#[cfg(test)]
mod tests {
    use crate::client::DocsClient;
    use crate::error::DocsError;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DocsClient {
        DocsClient::new("test-token".to_owned())
            .unwrap()
            .with_drive_base_url(&server.uri())
            .with_docs_base_url(&server.uri())
    }

    #[tokio::test]
    async fn lists_documents_oldest_first() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .and(header("authorization", "Bearer test-token"))
            .and(query_param(
                "q",
                "'folder-1' in parents and mimeType='application/vnd.google-apps.document'",
            ))
            .and(query_param("pageSize", "10"))
            .and(query_param("fields", "files(id, name, createdTime)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "files": [
                    {"id": "b", "name": "Week 2", "createdTime": "2025-03-10T10:00:00.000Z"},
                    {"id": "a", "name": "Week 1", "createdTime": "2025-03-03T10:00:00.000Z"},
                    {"id": "c", "name": "Week 3", "createdTime": "2025-03-17T10:00:00.000Z"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let entries = client_for(&server).list_documents("folder-1").await.unwrap();

        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(entries[0].name, "Week 1");
    }

    #[tokio::test]
    async fn list_surfaces_error_status_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_documents("folder-1").await.unwrap_err();

        match err {
            DocsError::HttpStatus { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body, "backend unavailable");
            },
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_of_empty_folder_is_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let entries = client_for(&server).list_documents("folder-1").await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn fetch_flattens_document_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/documents/doc-42"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documentId": "doc-42",
                "title": "3월 2주차 회의록",
                "body": {
                    "content": [
                        {"sectionBreak": {}},
                        {"paragraph": {"elements": [
                            {"textRun": {"content": "안건: 중간 발표 준비\n"}}
                        ]}},
                        {"table": {"rows": 3}},
                        {"paragraph": {"elements": [
                            {"inlineObjectElement": {}},
                            {"textRun": {"content": "역할 분담 논의\n"}}
                        ]}}
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let doc = client_for(&server).fetch_document("doc-42").await.unwrap();

        assert_eq!(doc.title, "3월 2주차 회의록");
        assert_eq!(doc.text, "안건: 중간 발표 준비\n역할 분담 논의\n");
    }

    #[tokio::test]
    async fn fetch_missing_document_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/documents/gone"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_document("gone").await.unwrap_err();

        assert!(err.is_client_error());
        match err {
            DocsError::NotFound(id) => assert_eq!(id, "gone"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_without_body_yields_empty_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/documents/empty"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documentId": "empty",
                "title": "빈 문서"
            })))
            .mount(&server)
            .await;

        let doc = client_for(&server).fetch_document("empty").await.unwrap();
        assert_eq!(doc.title, "빈 문서");
        assert_eq!(doc.text, "");
    }
}
