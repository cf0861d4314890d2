// Gemini APIとの通信を行う抽出ゲートウェイ

use crate::features::extraction::models::{FormFieldExtraction, ReceiptExtraction};
use crate::shared::config::environment::GeminiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{info, warn};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

/// レシート解析の指示文
const RECEIPT_PROMPT: &str = "Analyze this receipt or payment confirmation image.
Extract the following details accurately:
1. Total amount paid
2. Currency (ISO code)
3. Date of transaction (YYYY-MM-DD)
4. Vendor or business name
5. Category (one of: Food & Dining, Shopping, Transport, Bills & Utilities, Entertainment, Health & Wellness, Business, Travel, Other)
6. A brief 1-sentence description of the purchase.

If details are missing, provide your best guess based on the context.";

/// フォームフィールド推定の指示文
const FORM_FIELDS_PROMPT: &str = "I have the HTML source of a Google Form. Please identify the entry IDs (format: entry.12345678) that most likely correspond to these payment tracking fields:
1. Amount (Total price)
2. Date (Transaction date)
3. Vendor (Merchant/Business name)
4. Category (Type of expense)
5. Description (Notes)";

/// フォームHTMLの最大文字数（先頭からこの文字数までを送る）
const HTML_SNIPPET_MAX_CHARS: usize = 15_000;

/// データURLのMIMEタイプが読み取れない場合のデフォルト
const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// レシート解析の出力スキーマ
static RECEIPT_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "amount": { "type": "NUMBER" },
            "currency": { "type": "STRING" },
            "date": { "type": "STRING" },
            "vendor": { "type": "STRING" },
            "category": { "type": "STRING" },
            "description": { "type": "STRING" }
        },
        "required": ["amount", "currency", "date", "vendor", "category", "description"]
    })
});

/// フォームフィールド推定の出力スキーマ
static FORM_FIELDS_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "amount": { "type": "STRING" },
            "date": { "type": "STRING" },
            "vendor": { "type": "STRING" },
            "category": { "type": "STRING" },
            "description": { "type": "STRING" }
        },
        "required": ["amount", "date", "vendor", "category", "description"]
    })
});

/// generateContent応答（必要な部分のみ）
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// AI抽出ゲートウェイ
///
/// 指示文と出力スキーマをGeminiのgenerateContent APIに送り、JSON形式の
/// 応答を型付きのペイロードに解析する。ステートレスで、呼び出しは
/// 1回のユーザー操作につき最大1回。リトライもキャッシュもしない。
pub struct ExtractionGateway {
    client: Client,
    config: GeminiConfig,
}

impl ExtractionGateway {
    /// 新しい抽出ゲートウェイを作成
    ///
    /// # 引数
    /// * `config` - Gemini API設定
    ///
    /// # 戻り値
    /// 抽出ゲートウェイ、またはHTTPクライアント初期化失敗時はエラー
    pub fn new(config: GeminiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// レシート画像を解析して構造化データを抽出する
    ///
    /// # 引数
    /// * `image` - レシート画像（data URL、またはbase64文字列）
    ///
    /// # 戻り値
    /// 抽出されたデータ、または応答が空・不正な場合はエラー
    pub async fn analyze_receipt(&self, image: &str) -> AppResult<ReceiptExtraction> {
        let (mime_type, data) = split_data_url(image);

        let body = json!({
            "contents": [{
                "parts": [
                    { "text": RECEIPT_PROMPT },
                    { "inlineData": { "mimeType": mime_type, "data": data } }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": *RECEIPT_SCHEMA
            }
        });

        let text = self.generate_content(body).await?;
        parse_receipt_payload(&text)
    }

    /// フォームHTMLから5つの論理フィールドに対応する識別子を推定する
    ///
    /// # 引数
    /// * `html` - フォームのHTMLソース（先頭15,000文字のみ送信される）
    ///
    /// # 戻り値
    /// 推定されたフィールド識別子の組、または応答が空・不正な場合はエラー
    pub async fn extract_form_fields(&self, html: &str) -> AppResult<FormFieldExtraction> {
        let snippet = truncate_html(html);
        let prompt = format!("{FORM_FIELDS_PROMPT}\n\nHTML Snippet:\n{snippet}");

        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": *FORM_FIELDS_SCHEMA
            }
        });

        let text = self.generate_content(body).await?;
        parse_form_fields_payload(&text)
    }

    /// generateContentを1回だけ呼び出し、応答テキストを取り出す
    ///
    /// リトライはしない。タイムアウトはHTTPクライアントの設定のみ。
    async fn generate_content(&self, body: Value) -> AppResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::configuration("Gemini APIキーが設定されていません"))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        info!("Gemini APIへリクエスト送信: model={}", self.config.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::extraction(format!("Gemini APIへの接続に失敗しました: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let response_text = response
                .text()
                .await
                .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());
            warn!("Gemini APIがエラーを返しました: status={status}, body={response_text}");
            return Err(AppError::extraction(format!("Gemini APIエラー: {status}")));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::extraction(format!("レスポンス解析エラー: {e}")))?;

        extract_candidate_text(payload)
    }
}

/// 応答から最初の候補のテキストを取り出す
fn extract_candidate_text(response: GenerateContentResponse) -> AppResult<String> {
    let text = response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                candidates.remove(0).content
            }
        })
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().find_map(|p| p.text));

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::extraction("Gemini APIの応答が空です")),
    }
}

/// data URLをMIMEタイプとbase64データに分解する
///
/// # 引数
/// * `image` - data URL（`data:image/png;base64,...`）、または素のbase64文字列
///
/// # 戻り値
/// (MIMEタイプ, base64データ)のタプル。data URL形式でない場合は
/// デフォルトのMIMEタイプと入力全体を返す
fn split_data_url(image: &str) -> (&str, &str) {
    if let Some(rest) = image.strip_prefix("data:") {
        if let Some((header, data)) = rest.split_once(',') {
            let mime_type = header.split(';').next().unwrap_or("");
            let mime_type = if mime_type.is_empty() {
                DEFAULT_IMAGE_MIME
            } else {
                mime_type
            };
            return (mime_type, data);
        }
    }

    (DEFAULT_IMAGE_MIME, image)
}

/// HTMLを先頭の最大文字数まで切り詰める（文字境界で安全に）
fn truncate_html(html: &str) -> &str {
    match html.char_indices().nth(HTML_SNIPPET_MAX_CHARS) {
        Some((byte_index, _)) => &html[..byte_index],
        None => html,
    }
}

/// レシート解析の応答テキストを型付きペイロードに解析する
fn parse_receipt_payload(text: &str) -> AppResult<ReceiptExtraction> {
    serde_json::from_str(text.trim())
        .map_err(|e| AppError::extraction(format!("レシート解析応答の形式が不正です: {e}")))
}

/// フォームフィールド推定の応答テキストを型付きペイロードに解析する
fn parse_form_fields_payload(text: &str) -> AppResult<FormFieldExtraction> {
    serde_json::from_str(text.trim())
        .map_err(|e| AppError::extraction(format!("フィールド推定応答の形式が不正です: {e}")))
}
