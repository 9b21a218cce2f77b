use std::time::Duration;

use anyhow::Result;
use test_utils::quiz_response_fixture;
use test_utils::upload_response_fixture;

use super::parse_timeout;
use super::VaultApi;
use crate::domain::models::Backend;
use crate::domain::models::BackendFailure;
use crate::domain::models::DocumentFile;
use crate::domain::models::HistoryEntry;
use crate::domain::models::QuizBatchRequest;
use crate::domain::models::QuizQuestion;
use crate::domain::models::Reply;

impl VaultApi {
    fn with_url(url: String) -> VaultApi {
        return VaultApi {
            url,
            timeout: Duration::from_millis(2000),
            session_cookie: "".to_string(),
        };
    }
}

fn document_file() -> DocumentFile {
    return DocumentFile {
        filename: "cells.pdf".to_string(),
        bytes: b"Cells are the basic unit of life.".to_vec(),
    };
}

mod upload {
    use super::*;

    #[tokio::test]
    async fn it_uploads_and_parses_the_analysis() -> Result<()> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/upload")
            .match_body(mockito::Matcher::Regex(
                r#"name="file"; filename="cells.pdf""#.to_string(),
            ))
            .with_status(200)
            .with_body(upload_response_fixture())
            .create();

        let backend = VaultApi::with_url(server.url());
        let payload = match backend.upload(document_file()).await {
            Reply::Data(payload) => payload,
            reply => panic!("Unexpected reply {reply:?}"),
        };

        assert_eq!(payload.summary, "**Cells** are the basic unit of life.");
        assert_eq!(payload.quiz.len(), 2);
        assert_eq!(payload.quiz[1].answer, "Nucleus");
        assert_eq!(payload.videos.len(), 1);
        assert_eq!(payload.videos[0].title, "Cell biology in 10 minutes");
        assert_eq!(
            payload.raw_text,
            "Cells are the basic unit of life. The nucleus holds the genome."
        );
        assert_eq!(payload.index_status, "Memory index built with 4 chunks.");
        mock.assert();

        return Ok(());
    }

    #[tokio::test]
    async fn it_tolerates_missing_videos() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/upload")
            .with_status(200)
            .with_body(r#"{"summary":"Short.","quiz":[],"videos":null,"raw_text":"Short."}"#)
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.upload(document_file()).await;

        match res {
            Reply::Data(payload) => assert!(payload.videos.is_empty()),
            reply => panic!("Unexpected reply {reply:?}"),
        }
        mock.assert();
    }

    #[tokio::test]
    async fn it_returns_the_error_payload() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/upload")
            .with_status(500)
            .with_body(
                r#"{"error":"Processing Error: Could not extract enough text from file.","message":"Failed to process document."}"#,
            )
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.upload(document_file()).await;

        assert_eq!(
            res,
            Reply::Failed(BackendFailure::Backend(
                "Processing Error: Could not extract enough text from file.".to_string()
            ))
        );
        mock.assert();
    }

    #[tokio::test]
    async fn it_reports_sign_in_redirects() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/upload")
            .with_status(302)
            .with_header("location", "/login")
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.upload(document_file()).await;

        assert_eq!(
            res,
            Reply::AuthRequired {
                location: format!("{}/login", server.url()),
            }
        );
        mock.assert();
    }

    #[tokio::test]
    async fn it_reports_see_other_as_sign_in() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/upload")
            .with_status(303)
            .with_header("location", "/login?next=upload")
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.upload(document_file()).await;

        assert_eq!(
            res,
            Reply::AuthRequired {
                location: format!("{}/login?next=upload", server.url()),
            }
        );
        mock.assert();
    }

    #[tokio::test]
    async fn it_does_not_treat_other_redirection_statuses_as_sign_in() {
        for status in [300, 304] {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("POST", "/upload")
                .with_status(status)
                .with_header("location", "/login")
                .create();

            let backend = VaultApi::with_url(server.url());
            let res = backend.upload(document_file()).await;

            assert_eq!(
                res,
                Reply::Failed(BackendFailure::Backend(format!(
                    "Request failed with status {status}"
                )))
            );
            mock.assert();
        }
    }

    #[tokio::test]
    async fn it_fails_without_a_server() {
        let backend = VaultApi::with_url("http://127.0.0.1:1".to_string());
        let res = backend.upload(document_file()).await;

        assert!(matches!(res, Reply::Failed(BackendFailure::Network(_))));
    }
}

mod timeout {
    use super::*;

    #[test]
    fn it_parses_milliseconds() -> Result<()> {
        assert_eq!(parse_timeout("1500")?, Duration::from_millis(1500));
        assert_eq!(parse_timeout(" 120000 ")?, Duration::from_millis(120000));
        return Ok(());
    }

    #[test]
    fn it_rejects_values_that_are_not_numbers() {
        for val in ["2s", "abc", "", "-5"] {
            let res = parse_timeout(val);
            assert!(res.is_err(), "{val} should be rejected");
        }

        insta::assert_snapshot!(parse_timeout("2s").unwrap_err().to_string(), @"Invalid request-timeout '2s', expected a number of milliseconds");
    }

    #[test]
    fn it_rejects_zero() {
        let res = parse_timeout("0");
        assert!(res.is_err());
    }
}

mod generate_quiz {
    use super::*;

    #[tokio::test]
    async fn it_sends_the_batch_request() -> Result<()> {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/quiz-more")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "text": "Cells are small.",
                "difficulty": "Hard",
                "count": 10,
            })))
            .with_status(200)
            .with_body(quiz_response_fixture())
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend
            .generate_quiz(&QuizBatchRequest {
                text: "Cells are small.".to_string(),
                difficulty: "Hard".to_string(),
                count: 10,
            })
            .await;

        assert_eq!(
            res,
            Reply::Data(vec![QuizQuestion::new(
                "Which organelle produces energy?",
                &["Mitochondria", "Golgi", "Lysosome", "Nucleus"],
                "Mitochondria"
            )])
        );
        mock.assert();

        return Ok(());
    }

    #[tokio::test]
    async fn it_reports_status_without_error_payload() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/quiz-more")
            .with_status(502)
            .with_body("Bad Gateway")
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend
            .generate_quiz(&QuizBatchRequest {
                text: "Cells are small.".to_string(),
                difficulty: "Medium".to_string(),
                count: 10,
            })
            .await;

        assert_eq!(
            res,
            Reply::Failed(BackendFailure::Backend(
                "Request failed with status 502".to_string()
            ))
        );
        mock.assert();
    }

    #[tokio::test]
    async fn it_rejects_malformed_bodies() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/quiz-more")
            .with_status(200)
            .with_body("not json")
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend
            .generate_quiz(&QuizBatchRequest {
                text: "Cells are small.".to_string(),
                difficulty: "Medium".to_string(),
                count: 10,
            })
            .await;

        match res {
            Reply::Failed(BackendFailure::Backend(reason)) => {
                assert!(reason.starts_with("Unexpected response from document service"));
            }
            reply => panic!("Unexpected reply {reply:?}"),
        }
        mock.assert();
    }
}

mod chat {
    use super::*;

    #[tokio::test]
    async fn it_returns_the_answer() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "question": "What is X?",
            })))
            .with_status(200)
            .with_body(r#"{"answer":"X is Y"}"#)
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.chat("What is X?").await;

        assert_eq!(res, Reply::Data("X is Y".to_string()));
        mock.assert();
    }

    #[tokio::test]
    async fn it_forwards_the_session_cookie() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat")
            .match_header("cookie", "session=abc123")
            .with_status(200)
            .with_body(r#"{"answer":"X is Y"}"#)
            .create();

        let mut backend = VaultApi::with_url(server.url());
        backend.session_cookie = "session=abc123".to_string();
        let res = backend.chat("What is X?").await;

        assert_eq!(res, Reply::Data("X is Y".to_string()));
        mock.assert();
    }
}

mod list_documents {
    use super::*;

    #[tokio::test]
    async fn it_lists_documents() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/documents")
            .with_status(200)
            .with_body(r#"{"documents":[{"id":3,"filename":"cells.pdf"},{"filename":"atoms.docx"}]}"#)
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.list_documents().await;

        assert_eq!(
            res,
            Reply::Data(vec![
                HistoryEntry {
                    filename: "cells.pdf".to_string(),
                    id: Some(3),
                },
                HistoryEntry::new("atoms.docx"),
            ])
        );
        mock.assert();
    }

    #[tokio::test]
    async fn it_treats_unauthorized_as_sign_in() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/documents")
            .with_status(401)
            .create();

        let backend = VaultApi::with_url(server.url());
        let res = backend.list_documents().await;

        assert_eq!(
            res,
            Reply::AuthRequired {
                location: format!("{}/documents", server.url()),
            }
        );
        mock.assert();
    }
}
