//! Tests for prompt construction and section mapping.

#[cfg(test)]
mod tests {
    use crate::analysis::{AnalysisInput, build_request, parse_sections};
    use crate::client::LlmClient;
    use retroscope_core::{ResponseMode, SectionSchema};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn schema() -> SectionSchema {
        SectionSchema::new(vec![
            "잘한 점".to_owned(),
            "개선점".to_owned(),
            "다음 회의 추천".to_owned(),
        ])
        .unwrap()
    }

    fn input<'a>(schema: &'a SectionSchema, mode: ResponseMode) -> AnalysisInput<'a> {
        AnalysisInput {
            instruction: "You are a feedback assistant.",
            schema,
            history_block: "No previous meeting summaries for this team.",
            meeting_text: "오늘 회의에서는 중간 발표를 준비했다.",
            response_mode: mode,
        }
    }

    #[test]
    fn text_mode_request_lists_headings_without_response_format() {
        let schema = schema();
        let request = build_request("gpt-4", input(&schema, ResponseMode::Text));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4");
        assert!(value.get("response_format").is_none());

        let system = value["messages"][0]["content"].as_str().unwrap();
        assert!(system.starts_with("You are a feedback assistant."));
        assert!(system.contains("잘한 점\n개선점\n다음 회의 추천"));
    }

    #[test]
    fn json_mode_request_asks_for_json_object() {
        let schema = schema();
        let request = build_request("gpt-4", input(&schema, ResponseMode::Json));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["response_format"]["type"], "json_object");

        let system = value["messages"][0]["content"].as_str().unwrap();
        assert!(system.contains("- \"잘한 점\""));
        assert!(system.contains("- \"다음 회의 추천\""));
    }

    #[test]
    fn user_message_has_history_then_minutes() {
        let schema = schema();
        let request = build_request("gpt-4", input(&schema, ResponseMode::Text));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["messages"][1]["role"], "user");
        let user = value["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with("[Meeting history]\n"));
        assert!(user.contains("\n\n[Current meeting minutes]\n오늘 회의에서는"));
    }

    #[test]
    fn text_reply_splits_on_headings() {
        let schema = schema();
        let reply = "잘한 점\n전원이 제시간에 참석했습니다.\n\n개선점\n\
                     논의가 자주 샛길로 빠졌습니다.\n\n다음 회의 추천\n안건별 시간을 정하세요.";

        let sections = parse_sections(reply, &schema, ResponseMode::Text);

        assert_eq!(sections.get("잘한 점"), Some("전원이 제시간에 참석했습니다."));
        assert_eq!(sections.get("개선점"), Some("논의가 자주 샛길로 빠졌습니다."));
        assert_eq!(sections.get("다음 회의 추천"), Some("안건별 시간을 정하세요."));
    }

    #[test]
    fn json_reply_maps_fields_even_inside_fences() {
        let schema = schema();
        let reply = "```json\n{\"잘한 점\": \"준비가 좋았음\", \"개선점\": \"기록 부족\", \
                     \"다음 회의 추천\": \"서기 지정\", \"extra\": \"dropped\"}\n```";

        let sections = parse_sections(reply, &schema, ResponseMode::Json);

        assert_eq!(sections.get("잘한 점"), Some("준비가 좋았음"));
        assert_eq!(sections.get("다음 회의 추천"), Some("서기 지정"));
        assert_eq!(sections.get("extra"), None);
    }

    #[test]
    fn unparseable_json_reply_falls_back_to_heading_split() {
        let schema = schema();
        let reply = "잘한 점\n그래도 헤딩은 있음\n개선점\n다음 회의 추천\n";

        let sections = parse_sections(reply, &schema, ResponseMode::Json);
        assert_eq!(sections.get("잘한 점"), Some("그래도 헤딩은 있음"));
    }

    #[test]
    fn reply_without_headings_yields_empty_sections() {
        let schema = schema();
        let sections = parse_sections("자유 형식 피드백입니다.", &schema, ResponseMode::Text);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections.get("잘한 점"), Some(""));
        assert_eq!(sections.get("개선점"), Some(""));
    }

    #[tokio::test]
    async fn analyze_minutes_returns_raw_reply_and_sections() {
        let server = MockServer::start().await;
        let reply = "잘한 점\n역할 분담이 명확했습니다.\n개선점\n회의록 작성이 늦습니다.\n\
                     다음 회의 추천\n회의 직후 기록을 남기세요.";

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{"message": {"content": reply, "role": "assistant"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new("test-key".to_owned(), server.uri())
            .unwrap()
            .with_model("test-model".to_owned());
        let schema = schema();

        let output = client.analyze_minutes(input(&schema, ResponseMode::Text)).await.unwrap();

        assert_eq!(output.analysis, reply);
        assert_eq!(output.sections.get("개선점"), Some("회의록 작성이 늦습니다."));
    }
}
