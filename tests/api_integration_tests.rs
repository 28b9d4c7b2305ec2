use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use text_grammar_api::api::routes::{configure, SUCCESS_MESSAGE};
use text_grammar_api::tagger::{PosTagger, TaggedToken};
use text_grammar_api::{AnalyzerOptions, TextAnalyzer};

/// Determiners, prepositions and a few verbs by word; everything else is a noun.
struct WordListTagger;

impl PosTagger for WordListTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, String> {
        Ok(tokens
            .iter()
            .map(|token| {
                let tag = match token.to_lowercase().as_str() {
                    "the" | "a" => "DT",
                    "on" | "in" => "IN",
                    "sat" | "saw" => "VBD",
                    "she" | "her" => "PRP",
                    _ => "NN",
                };
                TaggedToken::new(token.as_str(), tag)
            })
            .collect())
    }
}

async fn post_text(analyzer: TextAnalyzer, body: Value) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(analyzer))
            .configure(configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/process-text/")
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

fn keep_stopwords() -> TextAnalyzer {
    let options = AnalyzerOptions { remove_stopwords: false, ..AnalyzerOptions::default() };
    TextAnalyzer::with_tagger(options, Box::new(WordListTagger))
}

fn word_list_defaults() -> TextAnalyzer {
    TextAnalyzer::with_tagger(AnalyzerOptions::default(), Box::new(WordListTagger))
}

#[actix_rt::test]
async fn test_cat_sat_on_the_mat_end_to_end() {
    let text = json!({ "text": "The cat sat on the mat" });
    let (status, body) = post_text(keep_stopwords(), text).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], SUCCESS_MESSAGE);

    let response = &body["response"];
    assert_eq!(response["text"], "The cat sat on the mat");
    assert_eq!(
        response["pos_tags"],
        json!({
            "determiners": ["the"],
            "nouns": ["cat", "mat"],
            "verbs": ["sat"],
            "prepositions": ["on"],
            "pronouns": []
        })
    );
    assert_eq!(
        response["grammar"],
        "NP -> 'the' 'cat'\n\
         NP -> 'the' 'mat'\n\
         VP -> 'sat' 'NP'\n\
         VP -> 'sat' 'NP'\n\
         PP -> 'on' 'NP'\n\
         PP -> 'on' 'NP'\n\
         THE -> 'the'\n\
         CAT -> 'cat'\n\
         MAT -> 'mat'\n\
         SAT -> 'sat'\n\
         ON -> 'on'\n\
         S -> NP VP"
    );
    assert_eq!(response["encoded_text"], "The cat sat on the mat");
    assert_eq!(response["decoded_text"], "The cat sat on the mat");
    assert_eq!(response["is_same_text"], true);
    assert_eq!(
        response["word_freq_dist"],
        json!({ "The": 1, "cat": 1, "sat": 1, "on": 1, "the": 1, "mat": 1 })
    );
}

#[actix_rt::test]
async fn test_default_options_drop_stopwords() {
    let text = json!({ "text": "She saw the cat and the cat saw her." });
    let (status, body) = post_text(word_list_defaults(), text).await;
    assert_eq!(status, StatusCode::OK);
    let response = &body["response"];
    assert_eq!(response["tokens"], json!(["saw", "cat", "cat", "saw"]));
    assert_eq!(response["pos_tags"]["pronouns"], json!([]));
    assert_eq!(response["word_freq_dist"], json!({ "saw": 2, "cat": 2 }));
}

#[actix_rt::test]
async fn test_frequency_distribution_is_capped_at_twenty() {
    let words: Vec<String> = (0..25).map(|i| format!("word{}", "x".repeat(i + 1))).collect();
    let text = words.join(" ");
    let (status, body) = post_text(word_list_defaults(), json!({ "text": text })).await;
    assert_eq!(status, StatusCode::OK);
    let freq = body["response"]["word_freq_dist"].as_object().unwrap();
    assert_eq!(freq.len(), 20);
    let total: u64 = freq.values().map(|v| v.as_u64().unwrap()).sum();
    assert!(total <= 25);
}

#[actix_rt::test]
async fn test_synthesis_failure_is_reported_as_server_error() {
    let (status, body) = post_text(keep_stopwords(), json!({ "text": "\u{390}" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Error processing text:"));
}

#[actix_rt::test]
async fn test_oversized_grammar_fails_only_that_request() {
    let options = AnalyzerOptions {
        remove_stopwords: false,
        max_grammar_rules: 10,
        ..AnalyzerOptions::default()
    };
    let analyzer = TextAnalyzer::with_tagger(options, Box::new(WordListTagger));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(analyzer))
            .configure(configure),
    )
    .await;

    // 6 phrase lines + 5 unit lines + start rule = 12
    let req = test::TestRequest::post()
        .uri("/process-text/")
        .set_json(json!({ "text": "The cat sat on the mat" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("limit of 10"));

    let req = test::TestRequest::post()
        .uri("/process-text/")
        .set_json(json!({ "text": "the cat" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_default_tagger_end_to_end() {
    let options = AnalyzerOptions { remove_stopwords: false, ..AnalyzerOptions::default() };
    let text = json!({ "text": "The cat sat on the mat" });
    let (status, body) = post_text(TextAnalyzer::new(options), text).await;
    assert_eq!(status, StatusCode::OK);
    let response = &body["response"];
    assert_eq!(response["tokens"], json!(["The", "cat", "sat", "on", "the", "mat"]));
    let nouns = response["pos_tags"]["nouns"].as_array().unwrap();
    assert!(nouns.contains(&json!("cat")));
    assert!(nouns.contains(&json!("mat")));
    assert!(response["grammar"].as_str().unwrap().ends_with("S -> NP VP"));
}

#[actix_rt::test]
async fn test_route_without_trailing_slash_and_welcome() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(TextAnalyzer::default()))
            .configure(configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/process-text")
        .set_json(json!({ "text": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["response"]["grammar"], "S -> NP VP");

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Welcome to the Text Processing API!");
}

#[actix_rt::test]
async fn test_non_json_body_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(TextAnalyzer::default()))
            .configure(configure),
    )
    .await;
    let req = test::TestRequest::post()
        .uri("/process-text/")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"text\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
