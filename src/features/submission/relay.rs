// 外部フォームへのレコード送信リレー

use crate::features::records::models::ReceiptRecord;
use crate::features::settings::models::{FormConfig, FormFieldKey, FormFieldMap};
use crate::shared::errors::{AppError, AppResult};
use log::{info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

/// フォームの閲覧用パス（このサフィックスを送信用パスに書き換える）
const VIEW_PATH: &str = "/viewform";
/// フォームの送信用パス
const SUBMIT_PATH: &str = "/formResponse";

/// 送信の結果
///
/// 送信先の応答は不透明（ステータスもボディも観測できない）ため、
/// `Sent`は「転送エラーが出なかった」こと以上を意味しない。
/// ベストエフォートであり、サーバー側で受理された保証ではない。
/// これは外部エンドポイントの仕様上避けられない制約で、ここで
/// 保証を強めてはならない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// 転送エラーなしで送信できた（ベストエフォートの成功）
    Sent,
    /// 転送段階での失敗（レコードはpendingのまま）
    TransportError(String),
}

/// フォーム送信リレー
///
/// 確定済みレコードのフィールド値を設定されたフィールド識別子に
/// マッピングし、URLエンコードしてPOSTする。リトライはしない。
pub struct SubmissionRelay {
    client: Client,
}

impl SubmissionRelay {
    /// 新しい送信リレーを作成
    ///
    /// タイムアウトは明示的に設定しない（トランスポートの既定値に任せる）。
    ///
    /// # 戻り値
    /// 送信リレー、またはHTTPクライアント初期化失敗時はエラー
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client })
    }

    /// レコードをフォームへ送信する
    ///
    /// # 引数
    /// * `config` - フォーム送信設定（URLは設定済みであること）
    /// * `record` - 送信するレコード
    ///
    /// # 戻り値
    /// 送信の結果（失敗もRelayOutcomeとして返す）
    pub async fn send(&self, config: &FormConfig, record: &ReceiptRecord) -> RelayOutcome {
        let endpoint = rewrite_form_url(&config.form_url);

        // URLとして解釈できない場合は転送失敗と同じ扱い
        if let Err(e) = Url::parse(&endpoint) {
            warn!("フォームURLの解析に失敗しました: {endpoint}: {e}");
            return RelayOutcome::TransportError(format!("フォームURLが不正です: {e}"));
        }

        let payload = build_payload(&config.fields, record);
        info!("フォームへ送信します: record_id={}", record.id);

        match self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(payload)
            .send()
            .await
        {
            Ok(_response) => {
                // 応答はクロスオリジンの不透明応答に相当するため中身を見ない。
                // ステータスを検査して保証を強めてはならない（元の送信経路では
                // 観測できない情報であり、挙動が変わってしまう）
                info!("フォーム送信が完了しました（ベストエフォート）: record_id={}", record.id);
                RelayOutcome::Sent
            }
            Err(e) => {
                warn!("フォーム送信に失敗しました: record_id={}: {e}", record.id);
                RelayOutcome::TransportError(format!("送信リクエストに失敗しました: {e}"))
            }
        }
    }
}

/// フォームURLの閲覧用パスを送信用パスに書き換える
///
/// # 引数
/// * `form_url` - 設定されたフォームURL
///
/// # 戻り値
/// 送信先URL（`/viewform`を含まない場合はそのまま返す）
pub fn rewrite_form_url(form_url: &str) -> String {
    form_url.replacen(VIEW_PATH, SUBMIT_PATH, 1)
}

/// 送信ボディを構築する
///
/// 5つの論理キーそれぞれについて、設定された識別子とレコードの
/// 文字列化した値のペアをパーセントエンコードして連結する。
/// 値が空の場合も空文字列としてペアは必ず含める。
///
/// # 引数
/// * `fields` - フィールドマッピング
/// * `record` - 送信するレコード
///
/// # 戻り値
/// `application/x-www-form-urlencoded`形式のボディ
pub fn build_payload(fields: &FormFieldMap, record: &ReceiptRecord) -> String {
    FormFieldKey::ALL
        .iter()
        .map(|key| {
            let identifier = fields.identifier(*key);
            let value = field_value(record, *key);
            format!(
                "{}={}",
                urlencoding::encode(identifier),
                urlencoding::encode(&value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// レコードから論理キーに対応する値を文字列で取り出す
fn field_value(record: &ReceiptRecord, key: FormFieldKey) -> String {
    match key {
        FormFieldKey::Amount => record.amount.to_string(),
        FormFieldKey::Date => record.date.clone(),
        FormFieldKey::Vendor => record.vendor.clone(),
        FormFieldKey::Category => record.category.label().to_string(),
        FormFieldKey::Description => record.description.clone(),
    }
}
